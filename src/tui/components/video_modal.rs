//! # VideoModal Component
//!
//! Overlay for the open playback session: video name, labels, stream URL and
//! the keys that act on it. Dismissed with Esc, which also stops the player.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::core::labels::VideoLabels;
use crate::core::playback::PlaybackSession;
use crate::tui::component::Component;

const HELP: &str = " c Copy link  o Open externally  Esc Close ";

pub struct VideoModal<'a> {
    pub session: &'a PlaybackSession,
    /// Whether the player surface accepted the stream.
    pub player_running: bool,
    pub player_command: &'a str,
}

impl<'a> VideoModal<'a> {
    pub fn new(session: &'a PlaybackSession, player_running: bool, player_command: &'a str) -> Self {
        Self {
            session,
            player_running,
            player_command,
        }
    }
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

impl Component for VideoModal<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(80, 60, area);
        frame.render_widget(Clear, overlay);

        let labels = VideoLabels::for_video(&self.session.video);
        let meta: Vec<&str> = [labels.week.as_str(), labels.kind, labels.size.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();

        let status = if self.player_running {
            Line::styled(
                format!("▶ Playing in {}", self.player_command),
                Style::default().fg(Color::Green),
            )
        } else {
            Line::styled(
                "No player running. Press o to open the stream in another app.",
                Style::default().fg(Color::Yellow),
            )
        };

        let lines = vec![
            Line::styled(meta.join(" • "), Style::default().fg(Color::Gray)),
            Line::default(),
            status,
            Line::default(),
            Line::from(Span::styled(
                "Stream URL",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::styled(
                self.session.stream_url.as_str(),
                Style::default().fg(Color::Cyan),
            ),
        ];

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.session.video.name))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(HELP).centered())
            .padding(Padding::horizontal(1));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, overlay);
    }
}
