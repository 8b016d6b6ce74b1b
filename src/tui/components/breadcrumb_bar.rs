//! # BreadcrumbBar Component
//!
//! Top line: app name followed by the trail, e.g.
//! `Lectern  Library › Semester_1 - 2024 › Algoritmos`.
//!
//! Actionable crumbs are underlined and can be clicked or picked with the
//! digit keys (`1` is the first crumb). The current page is bold and inert.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::navigation::Breadcrumb;
use crate::tui::component::Component;

const APP_NAME: &str = " Lectern  ";
const SEPARATOR: &str = " › ";

pub struct BreadcrumbBar<'a> {
    pub crumbs: &'a [Breadcrumb],
}

impl<'a> BreadcrumbBar<'a> {
    pub fn new(crumbs: &'a [Breadcrumb]) -> Self {
        Self { crumbs }
    }
}

/// Half-open column ranges `[start, end)` of each crumb label, relative to the bar.
fn crumb_columns(crumbs: &[Breadcrumb]) -> Vec<(u16, u16)> {
    let mut x = APP_NAME.width() as u16;
    let mut columns = Vec::with_capacity(crumbs.len());
    for (i, crumb) in crumbs.iter().enumerate() {
        if i > 0 {
            x += SEPARATOR.width() as u16;
        }
        let end = x.saturating_add(crumb.label.width() as u16);
        columns.push((x, end));
        x = end;
    }
    columns
}

/// Index of the crumb under screen column `column`, if any.
pub fn hit_test(crumbs: &[Breadcrumb], area: Rect, column: u16) -> Option<usize> {
    let relative = column.checked_sub(area.x)?;
    crumb_columns(crumbs)
        .iter()
        .position(|&(start, end)| relative >= start && relative < end)
}

impl Component for BreadcrumbBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            APP_NAME,
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )];
        for (i, crumb) in self.crumbs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(SEPARATOR, Style::default().fg(Color::DarkGray)));
            }
            let style = if crumb.is_actionable() {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            spans.push(Span::styled(crumb.label.as_str(), style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::navigation::{CourseKey, NavigationState, breadcrumbs};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn course_trail() -> Vec<Breadcrumb> {
        breadcrumbs(&NavigationState::Course(CourseKey::new(
            "2024",
            "Semester_1",
            "Algoritmos",
        )))
    }

    #[test]
    fn test_renders_trail() {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let crumbs = course_trail();

        terminal
            .draw(|f| BreadcrumbBar::new(&crumbs).render(f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Lectern"));
        assert!(text.contains("Library › Semester_1 - 2024 › Algoritmos"));
    }

    #[test]
    fn test_hit_test_maps_columns_to_crumbs() {
        let crumbs = course_trail();
        let area = Rect::new(0, 0, 80, 1);
        let start = APP_NAME.width() as u16;

        assert_eq!(hit_test(&crumbs, area, 0), None);
        assert_eq!(hit_test(&crumbs, area, start), Some(0));
        assert_eq!(hit_test(&crumbs, area, start + 6), Some(0));
        // Separator between "Library" and the semester is not a crumb.
        assert_eq!(hit_test(&crumbs, area, start + 8), None);
        assert_eq!(hit_test(&crumbs, area, start + 10), Some(1));
        assert_eq!(hit_test(&crumbs, area, 79), None);
    }

    #[test]
    fn test_columns_use_display_width() {
        let crumbs = vec![
            Breadcrumb {
                label: "Cálculo".to_string(),
                target: None,
            },
            Breadcrumb {
                label: "x".to_string(),
                target: None,
            },
        ];
        let columns = crumb_columns(&crumbs);
        assert_eq!(columns[0].1 - columns[0].0, 7);
        assert_eq!(columns[1].0, columns[0].1 + 3);
    }
}
