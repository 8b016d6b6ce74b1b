//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard and mouse events into core::Action values, and
//! carries out the `Effect`s the reducer returns.
//!
//! This is the only module that knows about ratatui, crossterm, the
//! clipboard or the media player.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (loading spinner, cards still being revealed, toast on
//!   screen): draws every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events, finished
//!   fetches or terminal resize.
//!
//! ## Fetches
//!
//! Fetches run on tokio tasks and post their result back as an `Action`
//! over a std channel. Only one is ever in flight: starting a fetch aborts
//! the previous task, and the reducer drops any late answer by its token.

mod component;
mod components;
mod event;
pub mod platform;
pub mod player;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::{ArchiveClient, LibrarySource};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, FetchRequest, PendingFetch};
use crate::core::view::{RenderedView, render_view};
use crate::tui::component::EventHandler;
use crate::tui::components::breadcrumb_bar;
use crate::tui::components::{CardListState, SearchBox, SearchEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::platform::{Platform, SystemPlatform};
use crate::tui::player::{ExternalPlayer, PlayerSurface};
use crate::tui::ui::ScreenAreas;

/// Where keystrokes go when no video is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Cards,
    Search,
}

/// TUI-specific presentation state (not part of core browsing logic)
pub struct TuiState {
    pub focus: Focus,
    pub search_box: SearchBox,
    pub card_list: CardListState,
    /// When the visible content last changed; drives the card reveal.
    pub view_entered: Instant,
    /// `App::view_generation` the card list was last reset for.
    seen_generation: u64,
    /// Whether the player surface accepted the current stream.
    pub player_running: bool,
    pub player_command: String,
    /// Layout of the last frame, for mouse hit testing.
    pub areas: ScreenAreas,
}

impl TuiState {
    pub fn new(player_command: impl Into<String>) -> Self {
        Self {
            focus: Focus::Cards,
            search_box: SearchBox::new(),
            card_list: CardListState::new(),
            view_entered: Instant::now(),
            seen_generation: 0,
            player_running: false,
            player_command: player_command.into(),
            areas: ScreenAreas::default(),
        }
    }

    /// Resets selection and restarts the reveal when the app shows new content.
    pub fn sync(&mut self, app: &App, now: Instant) -> bool {
        if app.view_generation == self.seen_generation {
            return false;
        }
        self.seen_generation = app.view_generation;
        self.card_list.reset();
        self.view_entered = now;
        true
    }

    /// True while something on screen still changes without input.
    fn is_animating(&self, app: &App, view: &RenderedView, now: Instant) -> bool {
        let revealing = view
            .cards()
            .last()
            .is_some_and(|card| now.saturating_duration_since(self.view_entered) < card.reveal_delay);
        revealing || matches!(view, RenderedView::Loading { .. }) || app.toast.is_some()
    }
}

/// Executes effects: network, clipboard, player.
pub struct Runtime {
    source: Arc<dyn LibrarySource>,
    platform: Box<dyn Platform>,
    player: Box<dyn PlayerSurface>,
    tx: mpsc::Sender<Action>,
    in_flight: Option<tokio::task::AbortHandle>,
}

impl Runtime {
    pub fn new(
        source: Arc<dyn LibrarySource>,
        platform: Box<dyn Platform>,
        player: Box<dyn PlayerSurface>,
        tx: mpsc::Sender<Action>,
    ) -> Self {
        Self {
            source,
            platform,
            player,
            tx,
            in_flight: None,
        }
    }

    pub fn player_running(&self) -> bool {
        self.player.is_loaded()
    }

    /// Carries out `effect`. Returns true when the app should quit.
    pub fn apply(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::Fetch(pending) => {
                self.cancel();
                self.in_flight = Some(spawn_fetch(self.source.clone(), pending, self.tx.clone()));
            }
            Effect::CancelFetch => self.cancel(),
            Effect::StartPlayback { url } => {
                if let Err(e) = self.player.load(&url) {
                    warn!("Player failed for {}: {}", url, e);
                    self.notify(format!("Could not start player: {e}"));
                }
            }
            Effect::StopPlayback => self.player.teardown(),
            Effect::CopyToClipboard(url) => match self.platform.copy_to_clipboard(&url) {
                Ok(()) => self.notify("Video URL copied to clipboard!".to_string()),
                Err(e) => {
                    warn!("Copy failed: {}", e);
                    self.notify(format!("Could not copy link: {e}"));
                }
            },
            Effect::OpenUrl(url) => match self.platform.open_url(&url) {
                Ok(()) => self.notify("Video URL opened in your default app".to_string()),
                Err(e) => {
                    warn!("Open failed: {}", e);
                    self.notify(format!("Could not open link: {e}"));
                }
            },
        }
        false
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            debug!("Aborting in-flight fetch");
            handle.abort();
        }
    }

    fn notify(&self, message: String) {
        if self.tx.send(Action::Notify(message)).is_err() {
            warn!("Failed to post notification: receiver dropped");
        }
    }

    /// Stops the player and any fetch. Called on exit.
    pub fn shutdown(&mut self) {
        self.cancel();
        self.player.teardown();
    }
}

fn spawn_fetch(
    source: Arc<dyn LibrarySource>,
    pending: PendingFetch,
    tx: mpsc::Sender<Action>,
) -> tokio::task::AbortHandle {
    let PendingFetch { token, request } = pending;
    info!("Spawning fetch {:?} (token {})", request, token);
    let handle = tokio::spawn(async move {
        let action = match request {
            FetchRequest::Library => Action::LibraryLoaded {
                token,
                result: source.fetch_library().await,
            },
            FetchRequest::Videos(key) => Action::VideosLoaded {
                token,
                result: source
                    .fetch_videos(&key.year, &key.semester, &key.course)
                    .await,
            },
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver fetch result (token {}): receiver dropped", token);
        }
    });
    handle.abort_handle()
}

/// Last crumb that leads somewhere, i.e. one level up.
fn parent_target(app: &App) -> Option<Action> {
    app.breadcrumbs()
        .into_iter()
        .rev()
        .find_map(|crumb| crumb.target)
        .map(Action::Navigate)
}

/// Translates an input event into an action, updating TUI-only state on the way.
pub fn route_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    if event == TuiEvent::ForceQuit {
        return Some(Action::Quit);
    }

    // The modal captures all input while a video is open.
    if app.playback.is_active() {
        return match event {
            TuiEvent::Escape => Some(Action::ClosePlayer),
            TuiEvent::InputChar('c') => Some(Action::CopyLink),
            TuiEvent::InputChar('o') => Some(Action::OpenExternally),
            TuiEvent::InputChar('q') => Some(Action::Quit),
            _ => None,
        };
    }

    if tui.focus == Focus::Search {
        if let TuiEvent::MouseClick(_, row) = event
            && !rect_contains_row(tui.areas.search, row)
        {
            tui.focus = Focus::Cards;
            return route_event(app, tui, event);
        }
        return match tui.search_box.handle_event(&event)? {
            SearchEvent::Submit(query) => {
                if query.trim().is_empty() {
                    return None;
                }
                tui.focus = Focus::Cards;
                Some(Action::Search(query))
            }
            SearchEvent::Cancel => {
                tui.focus = Focus::Cards;
                None
            }
            SearchEvent::ContentChanged => None,
        };
    }

    let view = render_view(app);
    let count = view.cards().len();
    match event {
        TuiEvent::InputChar('/') => {
            if app.loaded_library().is_some() {
                tui.focus = Focus::Search;
            }
            None
        }
        TuiEvent::InputChar('q') => Some(Action::Quit),
        TuiEvent::InputChar('r') => Some(Action::Retry),
        TuiEvent::InputChar(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.breadcrumbs()
                .into_iter()
                .nth(index)
                .and_then(|crumb| crumb.target)
                .map(Action::Navigate)
        }
        TuiEvent::CursorUp | TuiEvent::InputChar('k') => {
            tui.card_list.select_prev();
            None
        }
        TuiEvent::CursorDown | TuiEvent::InputChar('j') => {
            tui.card_list.select_next(count);
            None
        }
        TuiEvent::PageUp => {
            tui.card_list.page_up();
            None
        }
        TuiEvent::PageDown => {
            tui.card_list.page_down(count);
            None
        }
        TuiEvent::Home => {
            tui.card_list.selected = 0;
            None
        }
        TuiEvent::End => {
            tui.card_list.select_last(count);
            None
        }
        TuiEvent::Submit => view
            .cards()
            .get(tui.card_list.selected)
            .map(|card| card.action.clone()),
        TuiEvent::Backspace | TuiEvent::Escape => parent_target(app),
        TuiEvent::ScrollUp | TuiEvent::ScrollDown => {
            tui.card_list.handle_event(&event);
            None
        }
        TuiEvent::MouseClick(column, row) => {
            let areas = tui.areas;
            if rect_contains_row(areas.breadcrumbs, row) {
                let crumbs = app.breadcrumbs();
                breadcrumb_bar::hit_test(&crumbs, areas.breadcrumbs, column)
                    .and_then(|i| crumbs.into_iter().nth(i))
                    .and_then(|crumb| crumb.target)
                    .map(Action::Navigate)
            } else if rect_contains_row(areas.search, row) {
                if app.loaded_library().is_some() {
                    tui.focus = Focus::Search;
                }
                None
            } else {
                let index = tui.card_list.hit_test(areas.content, row)?;
                tui.card_list.selected = index;
                view.cards().get(index).map(|card| card.action.clone())
            }
        }
        _ => None,
    }
}

fn rect_contains_row(rect: ratatui::layout::Rect, row: u16) -> bool {
    row >= rect.y && row < rect.y + rect.height
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Feeds one action through the reducer and runs its effect. Returns true to quit.
fn dispatch(app: &mut App, runtime: &mut Runtime, tui: &mut TuiState, action: Action) -> bool {
    debug!("Dispatching {:?}", action);
    let effect = update(app, action);
    let quit = runtime.apply(effect);
    tui.player_running = runtime.player_running();
    quit
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source: Arc<dyn LibrarySource> =
        Arc::new(ArchiveClient::new(config.server_url.clone(), config.timeout));
    let (tx, rx) = mpsc::channel();
    let mut runtime = Runtime::new(
        source,
        Box::new(SystemPlatform::new(tx.clone())),
        Box::new(ExternalPlayer::from_config(&config)),
        tx,
    );
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(config.player_command.clone());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    dispatch(&mut app, &mut runtime, &mut tui, Action::LoadLibrary);

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let now = Instant::now();
        if app.expire_toast(now) {
            needs_redraw = true;
        }
        if tui.sync(&app, now) {
            needs_redraw = true;
        }

        let view = render_view(&app);
        let animating = tui.is_animating(&app, &view, now);
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame, Instant::now()))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if event == TuiEvent::Resize {
                continue;
            }
            if let Some(action) = route_event(&app, &mut tui, event)
                && dispatch(&mut app, &mut runtime, &mut tui, action)
            {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Results from fetch tasks and effect notifications
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if dispatch(&mut app, &mut runtime, &mut tui, action) {
                should_quit = true;
            }
        }
        if should_quit {
            break;
        }
    }

    runtime.shutdown();
    ratatui::restore();
    info!("Lectern shut down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::core::navigation::{CourseKey, NavigationState};
    use crate::core::state::LoadState;
    use crate::test_support::{
        FakeSource, RecordingPlatform, RecordingPlayer, loaded_app, sample_library, test_app, video,
    };

    fn runtime_with(
        source: FakeSource,
        platform: RecordingPlatform,
        player: RecordingPlayer,
    ) -> (Runtime, mpsc::Receiver<Action>) {
        let (tx, rx) = mpsc::channel();
        let runtime = Runtime::new(Arc::new(source), Box::new(platform), Box::new(player), tx);
        (runtime, rx)
    }

    fn recv(rx: &mpsc::Receiver<Action>) -> Action {
        rx.recv_timeout(Duration::from_secs(5))
            .expect("no action posted")
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_effect_posts_library_loaded() {
        let (mut runtime, rx) = runtime_with(
            FakeSource::new(sample_library(), vec![]),
            RecordingPlatform::default(),
            RecordingPlayer::default(),
        );
        let mut app = test_app();
        let effect = update(&mut app, Action::LoadLibrary);
        assert!(!runtime.apply(effect));

        let action = recv(&rx);
        assert!(matches!(action, Action::LibraryLoaded { result: Ok(_), .. }));
        update(&mut app, action);
        assert_eq!(app.loaded_library(), Some(&sample_library()));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_video_fetch_uses_course_key() {
        let source = Arc::new(FakeSource::new(sample_library(), vec![video("a.mp4")]));
        let (tx, rx) = mpsc::channel();
        let mut runtime = Runtime::new(
            source.clone(),
            Box::new(RecordingPlatform::default()),
            Box::new(RecordingPlayer::default()),
            tx,
        );
        let mut app = loaded_app();
        let effect = update(
            &mut app,
            Action::OpenCourse(CourseKey::new("2024", "Semester_1", "Redes")),
        );
        runtime.apply(effect);

        let action = recv(&rx);
        update(&mut app, action);
        assert_eq!(app.videos, LoadState::Ready(vec![video("a.mp4")]));
        assert_eq!(source.requests(), vec!["videos 2024/Semester_1/Redes"]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_failed_fetch_posts_error() {
        let (mut runtime, rx) = runtime_with(
            FakeSource::failing(ApiError::Transport {
                cause: "connection refused".to_string(),
            }),
            RecordingPlatform::default(),
            RecordingPlayer::default(),
        );
        let mut app = test_app();
        runtime.apply(update(&mut app, Action::LoadLibrary));
        update(&mut app, recv(&rx));
        assert!(matches!(app.library, LoadState::Failed(_)));
    }

    #[test]
    fn test_copy_success_and_failure_notify() {
        let platform = RecordingPlatform::default();
        let (mut runtime, rx) = runtime_with(
            FakeSource::new(sample_library(), vec![]),
            platform.clone(),
            RecordingPlayer::default(),
        );
        runtime.apply(Effect::CopyToClipboard("http://x/stream/a".to_string()));
        assert_eq!(
            recv(&rx),
            Action::Notify("Video URL copied to clipboard!".to_string())
        );
        assert_eq!(*platform.copied.lock().unwrap(), vec!["http://x/stream/a"]);

        let failing = RecordingPlatform {
            fail: true,
            ..Default::default()
        };
        let (mut runtime, rx) = runtime_with(
            FakeSource::new(sample_library(), vec![]),
            failing,
            RecordingPlayer::default(),
        );
        runtime.apply(Effect::OpenUrl("http://x/stream/a".to_string()));
        match recv(&rx) {
            Action::Notify(message) => assert!(message.starts_with("Could not open link")),
            other => panic!("expected notification, got {other:?}"),
        }
    }

    #[test]
    fn test_playback_replaces_then_tears_down() {
        let player = RecordingPlayer::default();
        let (mut runtime, _rx) = runtime_with(
            FakeSource::new(sample_library(), vec![]),
            RecordingPlatform::default(),
            player.clone(),
        );
        let mut app = loaded_app();

        runtime.apply(update(&mut app, Action::Play(video("1.mp4"))));
        runtime.apply(update(&mut app, Action::Play(video("2.mp4"))));
        runtime.apply(update(&mut app, Action::ClosePlayer));

        let calls = player.calls();
        assert_eq!(calls.len(), 4);
        assert!(calls[0].starts_with("load:"));
        assert_eq!(calls[1], "teardown");
        assert!(calls[2].ends_with("2.mp4"));
        assert_eq!(calls[3], "teardown");
        assert!(!runtime.player_running());
    }

    #[test]
    fn test_player_failure_notifies() {
        let player = RecordingPlayer {
            fail: true,
            ..Default::default()
        };
        let (mut runtime, rx) = runtime_with(
            FakeSource::new(sample_library(), vec![]),
            RecordingPlatform::default(),
            player,
        );
        runtime.apply(Effect::StartPlayback {
            url: "http://x/stream/a".to_string(),
        });
        match recv(&rx) {
            Action::Notify(message) => assert!(message.starts_with("Could not start player")),
            other => panic!("expected notification, got {other:?}"),
        }
    }

    #[test]
    fn test_quit_effect() {
        let (mut runtime, _rx) = runtime_with(
            FakeSource::new(sample_library(), vec![]),
            RecordingPlatform::default(),
            RecordingPlayer::default(),
        );
        assert!(runtime.apply(Effect::Quit));
    }

    #[test]
    fn test_enter_opens_selected_card() {
        let app = loaded_app();
        let mut tui = TuiState::new("mpv");
        route_event(&app, &mut tui, TuiEvent::CursorDown);
        let action = route_event(&app, &mut tui, TuiEvent::Submit);
        assert_eq!(
            action,
            Some(Action::OpenSemester {
                year: "2024".to_string(),
                semester: "Semester_2".to_string()
            })
        );
    }

    #[test]
    fn test_search_focus_and_submit() {
        let app = loaded_app();
        let mut tui = TuiState::new("mpv");

        assert_eq!(route_event(&app, &mut tui, TuiEvent::InputChar('/')), None);
        assert_eq!(tui.focus, Focus::Search);

        // 'q' is typed into the box, not treated as quit.
        for c in "redq".chars() {
            assert_eq!(route_event(&app, &mut tui, TuiEvent::InputChar(c)), None);
        }
        route_event(&app, &mut tui, TuiEvent::Backspace);
        route_event(&app, &mut tui, TuiEvent::InputChar('e'));
        route_event(&app, &mut tui, TuiEvent::InputChar('s'));

        let action = route_event(&app, &mut tui, TuiEvent::Submit);
        assert_eq!(action, Some(Action::Search("redes".to_string())));
        assert_eq!(tui.focus, Focus::Cards);
    }

    #[test]
    fn test_blank_search_submit_keeps_focus() {
        let app = loaded_app();
        let mut tui = TuiState::new("mpv");
        route_event(&app, &mut tui, TuiEvent::InputChar('/'));
        assert_eq!(route_event(&app, &mut tui, TuiEvent::Submit), None);
        assert_eq!(tui.focus, Focus::Search);
        route_event(&app, &mut tui, TuiEvent::Escape);
        assert_eq!(tui.focus, Focus::Cards);
    }

    #[test]
    fn test_search_needs_loaded_library() {
        let mut app = test_app();
        update(&mut app, Action::LoadLibrary);
        let mut tui = TuiState::new("mpv");
        route_event(&app, &mut tui, TuiEvent::InputChar('/'));
        assert_eq!(tui.focus, Focus::Cards);
    }

    #[test]
    fn test_backspace_and_digits_follow_breadcrumbs() {
        let mut app = loaded_app();
        update(
            &mut app,
            Action::OpenCourse(CourseKey::new("2024", "Semester_1", "Algoritmos")),
        );
        let mut tui = TuiState::new("mpv");

        let semester = NavigationState::Semester {
            year: "2024".to_string(),
            semester: "Semester_1".to_string(),
        };
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::Backspace),
            Some(Action::Navigate(semester))
        );
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::InputChar('1')),
            Some(Action::Navigate(NavigationState::Library))
        );
        // The current page's crumb is inert.
        assert_eq!(route_event(&app, &mut tui, TuiEvent::InputChar('3')), None);
        assert_eq!(route_event(&app, &mut tui, TuiEvent::InputChar('9')), None);
    }

    #[test]
    fn test_escape_at_library_does_nothing() {
        let app = loaded_app();
        let mut tui = TuiState::new("mpv");
        assert_eq!(route_event(&app, &mut tui, TuiEvent::Escape), None);
    }

    #[test]
    fn test_modal_captures_keys() {
        let mut app = loaded_app();
        update(&mut app, Action::Play(video("a.mp4")));
        let mut tui = TuiState::new("mpv");

        assert_eq!(route_event(&app, &mut tui, TuiEvent::InputChar('c')), Some(Action::CopyLink));
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::InputChar('o')),
            Some(Action::OpenExternally)
        );
        assert_eq!(route_event(&app, &mut tui, TuiEvent::InputChar('/')), None);
        assert_eq!(tui.focus, Focus::Cards);
        assert_eq!(route_event(&app, &mut tui, TuiEvent::Escape), Some(Action::ClosePlayer));
    }

    #[test]
    fn test_force_quit_from_search() {
        let app = loaded_app();
        let mut tui = TuiState::new("mpv");
        tui.focus = Focus::Search;
        assert_eq!(route_event(&app, &mut tui, TuiEvent::ForceQuit), Some(Action::Quit));
    }

    #[test]
    fn test_click_on_breadcrumb_navigates() {
        let mut app = loaded_app();
        update(
            &mut app,
            Action::OpenSemester {
                year: "2024".to_string(),
                semester: "Semester_1".to_string(),
            },
        );
        let mut tui = TuiState::new("mpv");
        tui.areas = ui::screen_areas(ratatui::layout::Rect::new(0, 0, 80, 24));

        // " Lectern  " is 10 columns wide; "Library" follows.
        assert_eq!(
            route_event(&app, &mut tui, TuiEvent::MouseClick(12, 0)),
            Some(Action::Navigate(NavigationState::Library))
        );
    }

    #[test]
    fn test_sync_resets_selection_on_new_view() {
        let mut app = loaded_app();
        let mut tui = TuiState::new("mpv");
        let now = Instant::now();
        tui.sync(&app, now);
        tui.card_list.selected = 2;
        assert!(!tui.sync(&app, now));

        update(&mut app, Action::Search("algo".to_string()));
        assert!(tui.sync(&app, now));
        assert_eq!(tui.card_list.selected, 0);
    }
}
