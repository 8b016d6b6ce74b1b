//! # Playback
//!
//! Tracks the single open video. Starting a new one always closes the
//! previous session first; there is never more than one.

use log::info;

use crate::api::Video;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSession {
    pub video: Video,
    pub stream_url: String,
}

#[derive(Debug, Default)]
pub struct PlaybackController {
    session: Option<PlaybackSession>,
}

impl PlaybackController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `video`, returning the session it replaced.
    pub fn play(&mut self, video: Video, stream_url: String) -> Option<PlaybackSession> {
        let previous = self.close();
        info!("Playing {} ({})", video.name, stream_url);
        self.session = Some(PlaybackSession { video, stream_url });
        previous
    }

    /// Ends the active session, returning it.
    pub fn close(&mut self) -> Option<PlaybackSession> {
        let closed = self.session.take();
        if let Some(ref session) = closed {
            info!("Closed playback of {}", session.video.name);
        }
        closed
    }

    pub fn current(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Stream URL of the active session, for copy-link and open-externally.
    pub fn link(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.stream_url.as_str())
    }
}
