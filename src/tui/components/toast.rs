//! # Toast Component
//!
//! Transient notification in the top-right corner. It slides in from the
//! right edge; expiry is handled by `App::expire_toast` in the event loop.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::state::Toast;

const SLIDE_MS: f32 = 300.0;

/// Horizontal offset from the resting position while sliding in.
fn slide_offset(width: u16, elapsed_ms: u128) -> u16 {
    if elapsed_ms as f32 >= SLIDE_MS {
        return 0;
    }
    let t = elapsed_ms as f32 / SLIDE_MS;
    let ease = 1.0 - (1.0 - t).powi(3); // cubic out
    (width as f32 * (1.0 - ease)) as u16
}

pub fn render(frame: &mut Frame, toast: &Toast, now: Instant) {
    let screen = frame.area();
    let width = (toast.message.width() as u16 + 6).min(screen.width.saturating_sub(2));
    let height = 3;
    let elapsed = now.saturating_duration_since(toast.created).as_millis();
    let x = screen.width.saturating_sub(width + 1) + slide_offset(width, elapsed);
    if x >= screen.width {
        return;
    }

    let area = Rect::new(x, 1, width, height).intersection(screen);
    if area.is_empty() {
        return;
    }

    frame.render_widget(Clear, area);
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Blue));
    let text = Paragraph::new(toast.message.as_str())
        .style(Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(text, area);
}
