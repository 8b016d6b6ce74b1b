//! # Actions
//!
//! Everything that can happen in Lectern becomes an `Action`.
//! User opens a course card? That's `Action::OpenCourse(key)`.
//! Server answers? That's `Action::VideosLoaded { token, result }`.
//!
//! `update()` applies an action to the `App` and returns the single `Effect`
//! the adapter has to carry out (spawn a fetch, copy a link, start the
//! player). No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::api::{ApiError, Library, Video, stream_url};
use crate::core::navigation::{CourseKey, NavigationState};
use crate::core::search::search_courses;
use crate::core::state::{App, FetchRequest, LoadState, PendingFetch, RequestToken, Toast};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Fetch the library (startup and "try again").
    LoadLibrary,
    LibraryLoaded {
        token: RequestToken,
        result: Result<Library, ApiError>,
    },
    OpenSemester {
        year: String,
        semester: String,
    },
    OpenCourse(CourseKey),
    VideosLoaded {
        token: RequestToken,
        result: Result<Vec<Video>, ApiError>,
    },
    Search(String),
    /// Re-enter a state, e.g. from a breadcrumb.
    Navigate(NavigationState),
    /// Re-issue whatever failed last in the current view.
    Retry,
    Play(Video),
    ClosePlayer,
    CopyLink,
    OpenExternally,
    Notify(String),
    Quit,
}

/// Side effect requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Start this fetch, aborting any in-flight one.
    Fetch(PendingFetch),
    /// Abort the in-flight fetch; its view was left.
    CancelFetch,
    /// Load the stream into the player surface (replacing any loaded one).
    StartPlayback { url: String },
    /// Tear the player surface down.
    StopPlayback,
    CopyToClipboard(String),
    OpenUrl(String),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::LoadLibrary => load_library(app),
        Action::LibraryLoaded { token, result } => {
            if !app.is_current(token) {
                debug!("Discarding stale library response (token {})", token);
                return Effect::None;
            }
            app.pending = None;
            app.library = match result {
                Ok(library) => {
                    info!("Library loaded: {} years", library.years.len());
                    LoadState::Ready(library)
                }
                Err(e) => {
                    warn!("Library load failed: {}", e);
                    LoadState::Failed(e)
                }
            };
            app.navigation = NavigationState::Library;
            app.touch_view();
            Effect::None
        }
        Action::OpenSemester { year, semester } => open_semester(app, year, semester),
        Action::OpenCourse(key) => open_course(app, key),
        Action::VideosLoaded { token, result } => {
            if !app.is_current(token) {
                debug!("Discarding stale video response (token {})", token);
                return Effect::None;
            }
            app.pending = None;
            app.videos = match result {
                Ok(videos) => LoadState::Ready(videos),
                Err(e) => {
                    warn!("Video load failed: {}", e);
                    LoadState::Failed(e)
                }
            };
            app.touch_view();
            Effect::None
        }
        Action::Search(query) => search(app, &query),
        Action::Navigate(target) => navigate(app, target),
        Action::Retry => retry(app),
        Action::Play(video) => {
            let url = stream_url(&app.server_url, &video.path);
            if let Some(previous) = app.playback.play(video, url.clone()) {
                debug!("Replaced session for {}", previous.video.name);
            }
            Effect::StartPlayback { url }
        }
        Action::ClosePlayer => match app.playback.close() {
            Some(_) => Effect::StopPlayback,
            None => Effect::None,
        },
        Action::CopyLink => app
            .playback
            .link()
            .map(|url| Effect::CopyToClipboard(url.to_string()))
            .unwrap_or(Effect::None),
        Action::OpenExternally => app
            .playback
            .link()
            .map(|url| Effect::OpenUrl(url.to_string()))
            .unwrap_or(Effect::None),
        Action::Notify(message) => {
            app.toast = Some(Toast::new(message));
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn load_library(app: &mut App) -> Effect {
    info!("Loading library from {}", app.server_url);
    app.library = LoadState::Loading;
    app.navigation = NavigationState::Library;
    app.videos = LoadState::Loading;
    app.touch_view();
    Effect::Fetch(app.issue(FetchRequest::Library))
}

/// Switches to a state that shows no video list, dropping a pending video fetch.
fn enter(app: &mut App, state: NavigationState) -> Effect {
    let cancelled = matches!(
        app.pending,
        Some(PendingFetch {
            request: FetchRequest::Videos(_),
            ..
        })
    );
    if cancelled {
        app.pending = None;
    }
    app.navigation = state;
    app.touch_view();
    if cancelled {
        Effect::CancelFetch
    } else {
        Effect::None
    }
}

fn open_semester(app: &mut App, year: String, semester: String) -> Effect {
    let exists = app
        .loaded_library()
        .is_some_and(|library| library.semester(&year, &semester).is_some());
    if !exists {
        warn!("Ignoring navigation to unknown semester {} - {}", semester, year);
        return Effect::None;
    }
    enter(app, NavigationState::Semester { year, semester })
}

fn open_course(app: &mut App, key: CourseKey) -> Effect {
    let exists = app.loaded_library().is_some_and(|library| {
        library
            .semester(&key.year, &key.semester)
            .is_some_and(|s| s.courses.iter().any(|c| c.name == key.course))
    });
    if !exists {
        warn!("Ignoring navigation to unknown course {:?}", key);
        return Effect::None;
    }

    app.navigation = NavigationState::Course(key.clone());
    app.videos = LoadState::Loading;
    app.touch_view();
    Effect::Fetch(app.issue(FetchRequest::Videos(key)))
}

fn search(app: &mut App, query: &str) -> Effect {
    let query = query.trim();
    if query.is_empty() {
        return Effect::None;
    }
    let Some(library) = app.loaded_library() else {
        debug!("Search before library load ignored");
        return Effect::None;
    };
    let results = search_courses(library, query);
    info!("Search \"{}\": {} courses", query, results.len());
    enter(
        app,
        NavigationState::SearchResults {
            query: query.to_string(),
            results,
        },
    )
}

fn navigate(app: &mut App, target: NavigationState) -> Effect {
    match target {
        NavigationState::Semester { year, semester } => open_semester(app, year, semester),
        NavigationState::Course(key) => open_course(app, key),
        other => enter(app, other),
    }
}

fn retry(app: &mut App) -> Effect {
    if matches!(app.library, LoadState::Failed(_)) {
        return load_library(app);
    }
    match (&app.navigation, &app.videos) {
        (NavigationState::Course(key), LoadState::Failed(_)) => {
            let key = key.clone();
            open_course(app, key)
        }
        _ => Effect::None,
    }
}
