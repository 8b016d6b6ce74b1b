//! # CardList Component
//!
//! Scrollable column of cards (semesters, courses or videos).
//!
//! `CardList` is a transient component created each frame that wraps
//! `&mut CardListState` (persistent selection, scroll and layout) and the
//! cards to show (props).
//!
//! Cards appear one after another: a card is drawn only once `elapsed`
//! (time since the view was entered) has passed its `reveal_delay`.

use std::time::Duration;

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::view::{Card, CardKind};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PAGE_STEP: usize = 5;

/// Selection, scroll and layout state for the card list.
/// Must be persisted in the parent TuiState.
#[derive(Default)]
pub struct CardListState {
    pub selected: usize,
    pub scroll_state: ScrollViewState,
    /// Bottom edge of each drawn card in canvas rows.
    pub prefix_heights: Vec<u16>,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl CardListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the top, first card selected. Used when the view changes.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn select_next(&mut self, count: usize) {
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn page_down(&mut self, count: usize) {
        if count > 0 {
            self.selected = (self.selected + PAGE_STEP).min(count - 1);
        }
    }

    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(PAGE_STEP);
    }

    pub fn select_last(&mut self, count: usize) {
        self.selected = count.saturating_sub(1);
    }

    /// Scroll the viewport so the selected card is fully visible.
    /// If the card is taller than the viewport, align its top edge.
    pub fn scroll_to_selected(&mut self) {
        let idx = self.selected;
        let Some(&item_bottom) = self.prefix_heights.get(idx) else {
            return;
        };
        let item_top = if idx == 0 { 0 } else { self.prefix_heights[idx - 1] };
        let offset_y = self.scroll_state.offset().y;

        if item_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: item_top });
        } else if item_bottom > offset_y + self.viewport_height {
            let new_y = item_bottom
                .saturating_sub(self.viewport_height)
                .min(item_top);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    fn clamp_scroll(&mut self) {
        let total = self.prefix_heights.last().copied().unwrap_or(0);
        let max_y = total.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Index of the drawn card at screen row `row` inside `area`.
    pub fn hit_test(&self, area: Rect, row: u16) -> Option<usize> {
        if row < area.y || row >= area.y + area.height {
            return None;
        }
        let content_y = (row - area.y) + self.scroll_state.offset().y;
        self.prefix_heights.iter().position(|&bottom| content_y < bottom)
    }
}

/// Mouse wheel scrolls without moving the selection.
impl EventHandler for CardListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.clamp_scroll();
            }
            _ => {}
        }
        None
    }
}

fn accent(kind: CardKind) -> Color {
    match kind {
        CardKind::Semester => Color::Magenta,
        CardKind::Course => Color::Blue,
        CardKind::Video => Color::Green,
    }
}

fn card_paragraph(card: &Card, selected: bool) -> Paragraph<'_> {
    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![Line::from(Span::styled(
        card.subtitle.as_str(),
        Style::default().fg(accent(card.kind)),
    ))];
    if !card.body.is_empty() {
        lines.push(Line::from(Span::styled(
            card.body.as_str(),
            Style::default().fg(Color::Gray),
        )));
    }

    Paragraph::new(lines)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(border_style)
                .title(Span::styled(format!(" {} ", card.title), title_style)),
        )
        .wrap(Wrap { trim: true })
}

pub struct CardList<'a> {
    cards: &'a [Card],
    state: &'a mut CardListState,
    /// Time since the view was entered.
    elapsed: Duration,
}

impl<'a> CardList<'a> {
    pub fn new(cards: &'a [Card], state: &'a mut CardListState, elapsed: Duration) -> Self {
        Self {
            cards,
            state,
            elapsed,
        }
    }
}

impl Component for CardList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // scrollbar column
        let inner_width = content_width.saturating_sub(2);

        let cards = self.cards;
        let revealed = cards
            .iter()
            .take_while(|card| card.reveal_delay <= self.elapsed)
            .count();

        let paragraphs: Vec<Paragraph> = cards[..revealed]
            .iter()
            .enumerate()
            .map(|(i, card)| card_paragraph(card, i == self.state.selected))
            .collect();

        let mut bottom = 0u16;
        self.state.prefix_heights = paragraphs
            .iter()
            .map(|p| {
                bottom = bottom.saturating_add(p.line_count(inner_width) as u16);
                bottom
            })
            .collect();

        self.state.viewport_height = area.height;
        self.state.clamp_scroll();
        self.state.scroll_to_selected();

        let mut scroll_view = ScrollView::new(Size::new(content_width, bottom))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut top = 0u16;
        for (paragraph, &card_bottom) in paragraphs.into_iter().zip(&self.state.prefix_heights) {
            let rect = Rect::new(0, top, content_width, card_bottom - top);
            scroll_view.render_widget(paragraph, rect);
            top = card_bottom;
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
