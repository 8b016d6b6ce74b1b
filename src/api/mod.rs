//! # Archive API
//!
//! Talks to the archive server: the library listing, per-course video
//! listings and the stream URL scheme. Everything above this module sees the
//! server only through [`LibrarySource`].

pub mod client;
pub mod error;
pub mod types;

use async_trait::async_trait;

pub use client::{ArchiveClient, stream_url};
pub use error::ApiError;
pub use types::{Course, Library, Semester, Video, Year};

/// Read-only access to an archive server.
#[async_trait]
pub trait LibrarySource: Send + Sync {
    /// Fetches the whole year → semester → course tree.
    async fn fetch_library(&self) -> Result<Library, ApiError>;

    /// Fetches the videos of one course.
    async fn fetch_videos(
        &self,
        year: &str,
        semester: &str,
        course: &str,
    ) -> Result<Vec<Video>, ApiError>;
}
