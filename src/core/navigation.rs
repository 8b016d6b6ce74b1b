//! # Navigation
//!
//! Which view is active and the breadcrumb trail that leads to it.
//!
//! ```text
//! Library ─┬─► Semester(y, s) ──► Course(y, s, c)
//!          └─► SearchResults(q, hits)
//! ```
//!
//! Breadcrumbs carry the typed [`NavigationState`] they lead back to, so
//! activating one is just `Action::Navigate(target)`.

use crate::api::Course;

/// Identifies one course in the tree. Also the parameters of a video fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseKey {
    pub year: String,
    pub semester: String,
    pub course: String,
}

impl CourseKey {
    pub fn new(
        year: impl Into<String>,
        semester: impl Into<String>,
        course: impl Into<String>,
    ) -> Self {
        Self {
            year: year.into(),
            semester: semester.into(),
            course: course.into(),
        }
    }
}

/// One search result: a course plus where it lives in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseHit {
    pub year: String,
    pub semester: String,
    pub course: Course,
}

impl CourseHit {
    pub fn key(&self) -> CourseKey {
        CourseKey::new(&self.year, &self.semester, &self.course.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NavigationState {
    #[default]
    Library,
    Semester {
        year: String,
        semester: String,
    },
    Course(CourseKey),
    SearchResults {
        query: String,
        results: Vec<CourseHit>,
    },
}

impl NavigationState {
    /// Number of breadcrumbs this state shows.
    pub fn depth(&self) -> usize {
        match self {
            NavigationState::Library => 1,
            NavigationState::Semester { .. } => 2,
            NavigationState::Course(_) => 3,
            NavigationState::SearchResults { .. } => 2,
        }
    }
}

/// `"{semester} - {year}"`, the label semesters go by everywhere.
pub fn semester_label(year: &str, semester: &str) -> String {
    format!("{semester} - {year}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub label: String,
    /// Where activating this crumb leads. `None` for the current page.
    pub target: Option<NavigationState>,
}

impl Breadcrumb {
    fn link(label: impl Into<String>, target: NavigationState) -> Self {
        Self {
            label: label.into(),
            target: Some(target),
        }
    }

    fn current(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: None,
        }
    }

    pub fn is_actionable(&self) -> bool {
        self.target.is_some()
    }
}

/// Builds the trail for a state. The last crumb is never actionable.
pub fn breadcrumbs(state: &NavigationState) -> Vec<Breadcrumb> {
    match state {
        NavigationState::Library => vec![Breadcrumb::current("Library")],
        NavigationState::Semester { year, semester } => vec![
            Breadcrumb::link("Library", NavigationState::Library),
            Breadcrumb::current(semester_label(year, semester)),
        ],
        NavigationState::Course(key) => vec![
            Breadcrumb::link("Library", NavigationState::Library),
            Breadcrumb::link(
                semester_label(&key.year, &key.semester),
                NavigationState::Semester {
                    year: key.year.clone(),
                    semester: key.semester.clone(),
                },
            ),
            Breadcrumb::current(&key.course),
        ],
        NavigationState::SearchResults { query, .. } => vec![
            Breadcrumb::link("Library", NavigationState::Library),
            Breadcrumb::current(format!("Search: \"{query}\"")),
        ],
    }
}
