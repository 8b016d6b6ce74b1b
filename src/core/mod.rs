//! # Core Application Logic
//!
//! Lectern's browsing logic. It knows nothing about terminals or HTTP.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • render_view()        │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!         ┌────────────┐                  ┌────────────┐
//!         │    TUI     │                  │  --list    │
//!         │  Adapter   │                  │ (headless) │
//!         │ (ratatui)  │                  │            │
//!         └────────────┘                  └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all browsing state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`navigation`]: Navigation states and breadcrumb trails
//! - [`view`]: Turns the current state into cards or an empty/loading/error page
//! - [`search`]: Course-name search over the loaded library
//! - [`playback`]: The single playback session
//! - [`labels`]: Week/type/size labels for video cards
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod labels;
pub mod navigation;
pub mod playback;
pub mod search;
pub mod state;
pub mod view;

pub use action::{Action, Effect, update};
pub use state::App;
