//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `BreadcrumbBar`: app name and the clickable trail
//! - `StatusPage`: loading, failure and empty states
//! - `VideoModal`: the open playback session
//! - `toast`: transient notification
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `SearchBox`: single-line query field
//! - `CardList`: scrollable cards, state kept in `CardListState`
//!
//! Components receive external data as props, never by reaching into `App`.
//!
//! ```text
//! components/
//! ├── mod.rs
//! ├── breadcrumb_bar.rs
//! ├── search_box.rs
//! ├── card_list.rs
//! ├── status_page.rs
//! ├── video_modal.rs
//! └── toast.rs
//! ```

pub mod breadcrumb_bar;
pub mod card_list;
pub mod search_box;
pub mod status_page;
pub mod toast;
pub mod video_modal;

pub use breadcrumb_bar::BreadcrumbBar;
pub use card_list::{CardList, CardListState};
pub use search_box::{SearchBox, SearchEvent};
pub use status_page::StatusPage;
pub use video_modal::VideoModal;
