//! # Views
//!
//! Pure mapping from navigation state + data to what the screen shows.
//! One render function per view; the TUI only draws the result.
//!
//! ```text
//! render_view(&App) ─┬─ library Loading/Failed ──► Loading / Failed (full page)
//!                    └─ library Ready ─┬─ Library ──────► render_library
//!                                      ├─ Semester ─────► render_semester
//!                                      ├─ Course ───────► Loading / Failed / render_course
//!                                      └─ SearchResults ► render_search
//! ```

use std::time::Duration;

use crate::api::{Library, Semester, Video};
use crate::core::action::Action;
use crate::core::labels::VideoLabels;
use crate::core::navigation::{CourseHit, CourseKey, NavigationState, semester_label};
use crate::core::state::{App, LoadState};

const SEPARATOR: &str = " • ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Semester,
    Course,
    Video,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub kind: CardKind,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    /// How long after the view appears this card is revealed.
    pub reveal_delay: Duration,
    /// Dispatched when the card is activated.
    pub action: Action,
}

/// Placeholder for a view with nothing to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub guidance: Vec<&'static str>,
}

impl EmptyState {
    pub fn library() -> Self {
        Self {
            title: "No videos found",
            guidance: vec![
                "Make sure your videos are organized in the correct structure:",
                "recordings/YYYY/Semester_N/Course_Name/*.mp4",
            ],
        }
    }

    pub fn course() -> Self {
        Self {
            title: "No videos found in this course",
            guidance: vec!["Videos may have been moved or are in an unsupported format."],
        }
    }

    pub fn semester() -> Self {
        Self {
            title: "No courses in this semester",
            guidance: vec!["Course folders go under recordings/YYYY/Semester_N/."],
        }
    }

    pub fn search() -> Self {
        Self {
            title: "No results found",
            guidance: vec!["Try a different search term or browse the library."],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderedView {
    Cards(Vec<Card>),
    Empty(EmptyState),
    Loading { message: &'static str },
    Failed { title: &'static str, message: String },
}

impl RenderedView {
    pub fn cards(&self) -> &[Card] {
        match self {
            RenderedView::Cards(cards) => cards,
            _ => &[],
        }
    }
}

fn delay(index: usize, step: Duration) -> Duration {
    step.saturating_mul(index as u32)
}

/// One card per (year, semester) pair.
pub fn render_library(library: &Library, step: Duration) -> RenderedView {
    let cards: Vec<Card> = library
        .years
        .iter()
        .flat_map(|year| year.semesters.iter().map(move |semester| (year, semester)))
        .enumerate()
        .map(|(i, (year, semester))| Card {
            kind: CardKind::Semester,
            title: semester_label(&year.year, &semester.name),
            subtitle: format!(
                "{} courses{SEPARATOR}{} videos",
                semester.courses.len(),
                semester.total_videos()
            ),
            body: semester
                .courses
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(SEPARATOR),
            reveal_delay: delay(i, step),
            action: Action::OpenSemester {
                year: year.year.clone(),
                semester: semester.name.clone(),
            },
        })
        .collect();

    if cards.is_empty() {
        RenderedView::Empty(EmptyState::library())
    } else {
        RenderedView::Cards(cards)
    }
}

/// One card per course of the semester.
pub fn render_semester(year: &str, semester: &Semester, step: Duration) -> RenderedView {
    if semester.courses.is_empty() {
        return RenderedView::Empty(EmptyState::semester());
    }
    let cards = semester
        .courses
        .iter()
        .enumerate()
        .map(|(i, course)| Card {
            kind: CardKind::Course,
            title: course.name.clone(),
            subtitle: format!("{} videos available", course.video_count),
            body: "Press Enter to view all videos for this course".to_string(),
            reveal_delay: delay(i, step),
            action: Action::OpenCourse(CourseKey::new(year, &semester.name, &course.name)),
        })
        .collect();
    RenderedView::Cards(cards)
}

/// One card per video; video cards reveal twice as fast.
pub fn render_course(videos: &[Video], step: Duration) -> RenderedView {
    if videos.is_empty() {
        return RenderedView::Empty(EmptyState::course());
    }
    let step = step / 2;
    let cards = videos
        .iter()
        .enumerate()
        .map(|(i, video)| {
            let labels = VideoLabels::for_video(video);
            let subtitle = [labels.week.as_str(), labels.kind, labels.size.as_str()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(SEPARATOR);
            Card {
                kind: CardKind::Video,
                title: video.name.clone(),
                subtitle,
                body: String::new(),
                reveal_delay: delay(i, step),
                action: Action::Play(video.clone()),
            }
        })
        .collect();
    RenderedView::Cards(cards)
}

/// One course card per search hit.
pub fn render_search(results: &[CourseHit], step: Duration) -> RenderedView {
    if results.is_empty() {
        return RenderedView::Empty(EmptyState::search());
    }
    let cards = results
        .iter()
        .enumerate()
        .map(|(i, hit)| Card {
            kind: CardKind::Course,
            title: hit.course.name.clone(),
            subtitle: format!("{} videos available", hit.course.video_count),
            body: semester_label(&hit.year, &hit.semester),
            reveal_delay: delay(i, step),
            action: Action::OpenCourse(hit.key()),
        })
        .collect();
    RenderedView::Cards(cards)
}

/// Renders whatever the app currently shows.
pub fn render_view(app: &App) -> RenderedView {
    let library = match &app.library {
        LoadState::Loading => {
            return RenderedView::Loading {
                message: "Loading video library...",
            };
        }
        LoadState::Failed(e) => {
            return RenderedView::Failed {
                title: "Failed to load video library",
                message: e.to_string(),
            };
        }
        LoadState::Ready(library) => library,
    };

    let step = app.reveal_step;
    match &app.navigation {
        NavigationState::Library => render_library(library, step),
        NavigationState::Semester { year, semester } => library
            .semester(year, semester)
            .map(|s| render_semester(year, s, step))
            .unwrap_or_else(|| RenderedView::Empty(EmptyState::library())),
        NavigationState::Course(_) => match &app.videos {
            LoadState::Loading => RenderedView::Loading {
                message: "Loading videos...",
            },
            LoadState::Failed(e) => RenderedView::Failed {
                title: "Failed to load videos",
                message: e.to_string(),
            },
            LoadState::Ready(videos) => render_course(videos, step),
        },
        NavigationState::SearchResults { results, .. } => render_search(results, step),
    }
}

/// Plain-text rendering of a view, wrapped to `width` columns.
pub fn render_plain(view: &RenderedView, width: usize) -> String {
    let width = width.max(20);
    let options = textwrap::Options::new(width).subsequent_indent("  ");
    let mut out = Vec::new();
    match view {
        RenderedView::Cards(cards) => {
            for card in cards {
                out.push(card.title.clone());
                if !card.subtitle.is_empty() {
                    out.push(format!("  {}", card.subtitle));
                }
                if !card.body.is_empty() {
                    for line in textwrap::wrap(&format!("  {}", card.body), &options) {
                        out.push(line.into_owned());
                    }
                }
                out.push(String::new());
            }
        }
        RenderedView::Empty(empty) => {
            out.push(empty.title.to_string());
            out.extend(empty.guidance.iter().map(|g| format!("  {g}")));
        }
        RenderedView::Loading { message } => out.push(message.to_string()),
        RenderedView::Failed { title, message } => out.push(format!("{title}: {message}")),
    }
    out.join("\n")
}
