//! # Application State
//!
//! Core browsing state for Lectern. Domain logic only; presentation state
//! (selection, focus, scroll) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── server_url: String              // archive origin, used for stream URLs
//! ├── reveal_step: Duration           // per-card reveal delay
//! ├── library: LoadState<Library>     // last fetched tree, replaced wholesale
//! ├── navigation: NavigationState     // active view
//! ├── videos: LoadState<Vec<Video>>   // video list of the open course
//! ├── playback: PlaybackController    // at most one open video
//! ├── pending: Option<PendingFetch>   // the one live request, if any
//! ├── view_generation: u64            // bumped whenever the visible content changes
//! └── toast: Option<Toast>            // transient notification
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::time::{Duration, Instant};

use crate::api::{ApiError, Library, Video};
use crate::core::config::ResolvedConfig;
use crate::core::navigation::{Breadcrumb, CourseKey, NavigationState, breadcrumbs};
use crate::core::playback::PlaybackController;

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Default delay between consecutive cards appearing.
pub const DEFAULT_REVEAL_STEP: Duration = Duration::from_millis(100);

/// Generation number of a fetch. Only the latest one is ever applied.
pub type RequestToken = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(ApiError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Library,
    Videos(CourseKey),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub token: RequestToken,
    pub request: FetchRequest,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub created: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created) >= TOAST_DURATION
    }
}

pub struct App {
    pub server_url: String,
    pub reveal_step: Duration,
    pub library: LoadState<Library>,
    pub navigation: NavigationState,
    pub videos: LoadState<Vec<Video>>,
    pub playback: PlaybackController,
    pub pending: Option<PendingFetch>,
    pub view_generation: u64,
    pub toast: Option<Toast>,
    next_token: RequestToken,
}

impl App {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            reveal_step: DEFAULT_REVEAL_STEP,
            library: LoadState::Loading,
            navigation: NavigationState::Library,
            videos: LoadState::Loading,
            playback: PlaybackController::new(),
            pending: None,
            view_generation: 0,
            toast: None,
            next_token: 0,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut app = Self::new(config.server_url.clone());
        app.reveal_step = config.reveal_step;
        app
    }

    /// Starts a new fetch, superseding whatever was pending.
    pub(crate) fn issue(&mut self, request: FetchRequest) -> PendingFetch {
        self.next_token += 1;
        let pending = PendingFetch {
            token: self.next_token,
            request,
        };
        self.pending = Some(pending.clone());
        pending
    }

    /// True when `token` belongs to the live fetch.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.pending.as_ref().is_some_and(|p| p.token == token)
    }

    pub fn loaded_library(&self) -> Option<&Library> {
        match &self.library {
            LoadState::Ready(library) => Some(library),
            _ => None,
        }
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        breadcrumbs(&self.navigation)
    }

    /// Marks the visible content as replaced (restarts the card reveal).
    pub(crate) fn touch_view(&mut self) {
        self.view_generation += 1;
    }

    /// Drops the toast once it has been shown long enough. Returns true if it was removed.
    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self.toast.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.toast = None;
            return true;
        }
        false
    }
}
