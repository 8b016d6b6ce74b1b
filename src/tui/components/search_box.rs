//! # SearchBox Component
//!
//! Single-line course search field. `/` focuses it, Enter submits, Esc hands
//! focus back to the cards. The query stays in the box after submitting so
//! it can be refined.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PLACEHOLDER: &str = "Search courses... (press / to focus)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Submit(String),
    /// Esc: leave the box without searching.
    Cancel,
    ContentChanged,
}

/// Byte offset of the character boundary before `pos`.
fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `pos`.
fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[derive(Debug, Default)]
pub struct SearchBox {
    pub buffer: String,
    /// Byte offset of the cursor in `buffer`.
    cursor: usize,
    /// Prop: whether keystrokes go here.
    pub focused: bool,
}

impl SearchBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Visible slice of the buffer and the cursor's column within it.
    fn visible(&self, width: u16) -> (&str, u16) {
        let width = width as usize;
        let before = &self.buffer[..self.cursor];
        let cursor_col = before.width();
        if width == 0 || cursor_col < width {
            return (&self.buffer, cursor_col as u16);
        }
        // Scroll so the cursor sits on the last column.
        let mut start = 0;
        while before[start..].width() >= width {
            start = next_char_boundary(&self.buffer, start);
        }
        (&self.buffer[start..], before[start..].width() as u16)
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(" Search ");

        let inner = block.inner(area);
        let (text, cursor_col) = self.visible(inner.width);
        let paragraph = if text.is_empty() && !self.focused {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(text.to_string())
        };
        frame.render_widget(paragraph.block(block), area);

        if self.focused {
            frame.set_cursor_position((inner.x + cursor_col, inner.y));
        }
    }
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                let line = text.lines().next().unwrap_or_default();
                self.buffer.insert_str(self.cursor, line);
                self.cursor += line.len();
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                SearchEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                SearchEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                }
                None
            }
            TuiEvent::Home => {
                self.cursor = 0;
                None
            }
            TuiEvent::End => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => Some(SearchEvent::Submit(self.buffer.clone())),
            TuiEvent::Escape => Some(SearchEvent::Cancel),
            _ => None,
        }
    }
}
