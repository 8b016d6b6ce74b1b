//! HTTP client for the archive server.
//!
//! Endpoints:
//! - `GET {base}/api/library` → `{"data": Library}`
//! - `GET {base}/api/video?year=&semester=&course=&video=` → `{"data": {"videos": [...]}}`
//! - `GET {base}/stream/<encoded path>` → media bytes (only the URL is built here)

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use url::Url;

use super::types::{CourseVideos, Envelope, ErrorBody, Library, Video};
use super::{ApiError, LibrarySource};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Archive server client. Cheap to share behind an `Arc`.
pub struct ArchiveClient {
    base_url: String,
    client: reqwest::Client,
}

impl ArchiveClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                reqwest::Client::new()
            });
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/<segments...>`, each segment percent-encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::transport(format!("invalid server URL '{}': {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::transport(format!("server URL '{}' cannot have a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Performs a GET and unwraps the `data` field of the JSON envelope.
    async fn get_data<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(ApiError::transport)?;

        let status = response.status();
        debug!("{} -> {}", url, status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            warn!("Archive API error: {} - {}", status, body);
            return Err(ApiError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(ApiError::transport)?;
        let envelope: Envelope<T> = serde_json::from_slice(&bytes).map_err(ApiError::decode)?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl LibrarySource for ArchiveClient {
    async fn fetch_library(&self) -> Result<Library, ApiError> {
        let url = self.endpoint(&["api", "library"])?;
        let library: Library = self.get_data(url).await?;
        info!("Fetched library: {} years", library.years.len());
        Ok(library)
    }

    async fn fetch_videos(
        &self,
        year: &str,
        semester: &str,
        course: &str,
    ) -> Result<Vec<Video>, ApiError> {
        let mut url = self.endpoint(&["api", "video"])?;
        url.query_pairs_mut()
            .append_pair("year", year)
            .append_pair("semester", semester)
            .append_pair("course", course)
            .append_pair("video", "");

        let listing: CourseVideos = self.get_data(url).await?;
        info!(
            "Fetched {} videos for {}/{}/{}",
            listing.videos.len(),
            year,
            semester,
            course
        );
        Ok(listing.videos)
    }
}

/// Bytes `encodeURIComponent` leaves alone: alphanumerics and `-_.!~*'()`.
/// Everything else is escaped, notably `/`, `+` and space, since the server
/// decodes `+` as a space.
const STREAM_PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds `{base}/stream/<path>` with the whole path encoded as one segment,
/// so `/` inside `path` becomes `%2F`.
pub fn stream_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/stream/{}",
        base_url.trim_end_matches('/'),
        utf8_percent_encode(path, STREAM_PATH)
    )
}
