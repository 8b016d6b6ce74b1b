//! Client-side course search over the loaded library.

use crate::api::Library;
use crate::core::navigation::CourseHit;

/// Every course whose name contains `query`, ignoring case, in tree order.
///
/// The query is matched as given; callers trim it and skip empty queries.
pub fn search_courses(library: &Library, query: &str) -> Vec<CourseHit> {
    let needle = query.to_lowercase();
    library
        .years
        .iter()
        .flat_map(|year| {
            year.semesters.iter().flat_map(move |semester| {
                semester.courses.iter().map(move |course| (year, semester, course))
            })
        })
        .filter(|(_, _, course)| course.name.to_lowercase().contains(&needle))
        .map(|(year, semester, course)| CourseHit {
            year: year.year.clone(),
            semester: semester.name.clone(),
            course: course.clone(),
        })
        .collect()
}
