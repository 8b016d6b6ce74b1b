//! # StatusPage Component
//!
//! Centered message shown instead of cards: loading, failure with a retry
//! hint, or one of the empty states.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

use crate::core::view::RenderedView;
use crate::tui::component::Component;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct StatusPage<'a> {
    pub view: &'a RenderedView,
    pub spinner_frame: usize,
}

impl<'a> StatusPage<'a> {
    pub fn new(view: &'a RenderedView, spinner_frame: usize) -> Self {
        Self {
            view,
            spinner_frame,
        }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        match self.view {
            RenderedView::Loading { message } => vec![Line::styled(
                format!("{} {}", SPINNER[self.spinner_frame % SPINNER.len()], message),
                Style::default().fg(Color::Cyan),
            )],
            RenderedView::Failed { title, message } => vec![
                Line::styled(
                    format!("{title}: {message}"),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Line::default(),
                Line::styled("Press r to try again", Style::default().fg(Color::Gray)),
            ],
            RenderedView::Empty(empty) => {
                let mut lines = vec![
                    Line::styled(empty.title, Style::default().add_modifier(Modifier::BOLD)),
                    Line::default(),
                ];
                lines.extend(
                    empty
                        .guidance
                        .iter()
                        .map(|g| Line::styled(*g, Style::default().fg(Color::Gray))),
                );
                lines
            }
            RenderedView::Cards(_) => Vec::new(),
        }
    }
}

impl Component for StatusPage<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        let height = (paragraph.line_count(area.width) as u16).min(area.height);

        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .areas(area);
        frame.render_widget(paragraph, center);
    }
}
