use serde::{Deserialize, Serialize};

/// Root of the archive tree as served by `GET /api/library`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    #[serde(default)]
    pub years: Vec<Year>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Year {
    /// Year label, e.g. "2024".
    pub year: String,
    #[serde(default)]
    pub semesters: Vec<Semester>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Semester {
    /// Directory name, e.g. "Semester_1".
    pub name: String,
    #[serde(default)]
    pub courses: Vec<Course>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub name: String,
    /// Display hint only. Never checked against the fetched video list.
    #[serde(default)]
    pub video_count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Video {
    /// Original file name; labels are derived from it.
    pub name: String,
    /// Opaque server-relative locator used to build the stream URL.
    pub path: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl Library {
    /// Looks up a semester by year label and semester name.
    pub fn semester(&self, year: &str, semester: &str) -> Option<&Semester> {
        self.years
            .iter()
            .find(|y| y.year == year)
            .and_then(|y| y.semesters.iter().find(|s| s.name == semester))
    }
}

impl Semester {
    /// Sum of the advertised `video_count` of every course.
    pub fn total_videos(&self) -> u64 {
        self.courses.iter().map(|c| c.video_count).sum()
    }
}

// ============================================================================
// Wire Envelopes
// ============================================================================

/// Every successful response wraps its payload as `{"data": ...}`.
#[derive(Deserialize, Debug)]
pub struct Envelope<T> {
    pub data: T,
}

/// Payload of `GET /api/video?...&video=` (a course listing).
#[derive(Deserialize, Debug)]
pub struct CourseVideos {
    #[serde(default)]
    pub videos: Vec<Video>,
}

/// Error body the archive server sends with non-2xx responses.
#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    pub message: Option<String>,
}
