use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::App;
use crate::core::view::{RenderedView, render_view};
use crate::tui::component::Component;
use crate::tui::components::{BreadcrumbBar, CardList, StatusPage, VideoModal, toast};
use crate::tui::{Focus, TuiState};

/// Where each part of the screen goes. Shared by drawing and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenAreas {
    pub breadcrumbs: Rect,
    pub search: Rect,
    pub content: Rect,
    pub help: Rect,
}

pub fn screen_areas(frame_area: Rect) -> ScreenAreas {
    use Constraint::{Length, Min};
    let [breadcrumbs, search, content, help] =
        Layout::vertical([Length(1), Length(3), Min(0), Length(1)]).areas(frame_area);
    ScreenAreas {
        breadcrumbs,
        search,
        content,
        help,
    }
}

fn help_text(app: &App, tui: &TuiState) -> &'static str {
    if app.playback.is_active() {
        " c Copy link  o Open externally  Esc Close  q Quit "
    } else if tui.focus == Focus::Search {
        " Enter Search  Esc Back to cards  Ctrl+C Quit "
    } else {
        " ↑↓ Select  Enter Open  / Search  Bksp Back  1-9 Crumb  r Retry  q Quit "
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize, now: Instant) {
    let areas = screen_areas(frame.area());
    tui.areas = areas;

    let crumbs = app.breadcrumbs();
    BreadcrumbBar::new(&crumbs).render(frame, areas.breadcrumbs);

    tui.search_box.focused = tui.focus == Focus::Search && !app.playback.is_active();
    tui.search_box.render(frame, areas.search);

    let view = render_view(app);
    match &view {
        RenderedView::Cards(cards) => {
            let elapsed = now.saturating_duration_since(tui.view_entered);
            CardList::new(cards, &mut tui.card_list, elapsed).render(frame, areas.content);
        }
        other => StatusPage::new(other, spinner_frame).render(frame, areas.content),
    }

    let help = Paragraph::new(Line::from(Span::styled(
        help_text(app, tui),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(help, areas.help);

    if let Some(session) = app.playback.current() {
        VideoModal::new(session, tui.player_running, &tui.player_command).render(frame, frame.area());
    }

    if let Some(t) = &app.toast {
        toast::render(frame, t, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::navigation::CourseKey;
    use crate::test_support::{loaded_app, test_app, video};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::Duration;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let now = tui.view_entered + Duration::from_secs(10);
        terminal.draw(|f| draw_ui(f, app, tui, 0, now)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_loading_library() {
        let mut app = test_app();
        update(&mut app, Action::LoadLibrary);
        let mut tui = TuiState::new("mpv");
        let text = draw(&app, &mut tui);
        assert!(text.contains("Loading video library..."));
        assert!(text.contains("Library"));
    }

    #[test]
    fn test_draw_library_cards() {
        let app = loaded_app();
        let mut tui = TuiState::new("mpv");
        let text = draw(&app, &mut tui);
        assert!(text.contains("Semester_1 - 2024"));
        assert!(text.contains("Search courses"));
        assert!(text.contains("/ Search"));
    }

    #[test]
    fn test_draw_course_trail_and_failure() {
        let mut app = loaded_app();
        update(
            &mut app,
            Action::OpenCourse(CourseKey::new("2024", "Semester_1", "Redes")),
        );
        let token = app.pending.as_ref().unwrap().token;
        update(
            &mut app,
            Action::VideosLoaded {
                token,
                result: Err(crate::api::ApiError::Transport {
                    cause: "timed out".to_string(),
                }),
            },
        );
        let mut tui = TuiState::new("mpv");
        let text = draw(&app, &mut tui);
        assert!(text.contains("Library › Semester_1 - 2024 › Redes"));
        assert!(text.contains("Failed to load videos: network error: timed out"));
        assert!(text.contains("Press r to try again"));
    }

    #[test]
    fn test_draw_modal_and_toast() {
        let mut app = loaded_app();
        update(&mut app, Action::Play(video("Week_1_TEORÍA.mp4")));
        update(&mut app, Action::Notify("Video URL copied to clipboard!".to_string()));
        let mut tui = TuiState::new("mpv");
        tui.player_running = true;

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let now = app.toast.as_ref().unwrap().created + Duration::from_millis(500);
        terminal.draw(|f| draw_ui(f, &app, &mut tui, 0, now)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();

        assert!(text.contains("Week_1_TEORÍA.mp4"));
        assert!(text.contains("Playing in mpv"));
        assert!(text.contains("Video URL copied to clipboard!"));
    }

    #[test]
    fn test_screen_areas_stack_vertically() {
        let areas = screen_areas(Rect::new(0, 0, 80, 24));
        assert_eq!(areas.breadcrumbs.y, 0);
        assert_eq!(areas.search.y, 1);
        assert_eq!(areas.content.y, 4);
        assert_eq!(areas.content.height, 19);
        assert_eq!(areas.help.y, 23);
    }
}
