//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{ApiError, Course, Library, LibrarySource, Semester, Video, Year};
use crate::core::action::{Action, update};
use crate::core::state::App;
use crate::tui::platform::{Platform, PlatformError};
use crate::tui::player::PlayerSurface;

fn course(name: &str, video_count: u64) -> Course {
    Course {
        name: name.to_string(),
        video_count,
    }
}

fn semester(name: &str, courses: Vec<Course>) -> Semester {
    Semester {
        name: name.to_string(),
        courses,
    }
}

/// Two years, three semesters, five courses. `Cálculo` has no videos.
pub fn sample_library() -> Library {
    Library {
        years: vec![
            Year {
                year: "2024".to_string(),
                semesters: vec![
                    semester(
                        "Semester_1",
                        vec![
                            course("Algoritmos", 3),
                            course("Redes", 2),
                            course("Cálculo", 0),
                        ],
                    ),
                    semester("Semester_2", vec![course("Algoritmos Avanzados", 4)]),
                ],
            },
            Year {
                year: "2023".to_string(),
                semesters: vec![semester("Semester_2", vec![course("Física", 1)])],
            },
        ],
    }
}

/// A video of the `2024/Semester_1/Algoritmos` course.
pub fn video(name: &str) -> Video {
    Video {
        name: name.to_string(),
        path: format!("2024/Semester_1/Algoritmos/{name}"),
        size: 1536,
        extension: Some(".mp4".to_string()),
    }
}

/// Creates a test App pointing at the default local server.
pub fn test_app() -> App {
    App::new("http://localhost:8080")
}

/// A test App whose library already loaded with `sample_library()`.
pub fn loaded_app() -> App {
    let mut app = test_app();
    update(&mut app, Action::LoadLibrary);
    let token = app.pending.as_ref().map(|p| p.token).unwrap_or_default();
    update(
        &mut app,
        Action::LibraryLoaded {
            token,
            result: Ok(sample_library()),
        },
    );
    app
}

/// Canned `LibrarySource` answering every request the same way.
pub struct FakeSource {
    pub library: Result<Library, ApiError>,
    pub videos: Result<Vec<Video>, ApiError>,
    pub requests: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new(library: Library, videos: Vec<Video>) -> Self {
        Self {
            library: Ok(library),
            videos: Ok(videos),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ApiError) -> Self {
        Self {
            library: Err(error.clone()),
            videos: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LibrarySource for FakeSource {
    async fn fetch_library(&self) -> Result<Library, ApiError> {
        self.requests.lock().unwrap().push("library".to_string());
        self.library.clone()
    }

    async fn fetch_videos(
        &self,
        year: &str,
        semester: &str,
        course: &str,
    ) -> Result<Vec<Video>, ApiError> {
        self.requests
            .lock()
            .unwrap()
            .push(format!("videos {year}/{semester}/{course}"));
        self.videos.clone()
    }
}

/// Records clipboard writes and opened URLs. Clones share the log.
#[derive(Clone, Default)]
pub struct RecordingPlatform {
    pub copied: Arc<Mutex<Vec<String>>>,
    pub opened: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
}

impl Platform for RecordingPlatform {
    fn copy_to_clipboard(&self, text: &str) -> Result<(), PlatformError> {
        if self.fail {
            return Err(PlatformError::Unavailable("clipboard tool"));
        }
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn open_url(&self, url: &str) -> Result<(), PlatformError> {
        if self.fail {
            return Err(PlatformError::Unavailable("URL opener"));
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Player surface that logs `load:<url>` / `teardown` calls. Clones share the log.
#[derive(Clone, Default)]
pub struct RecordingPlayer {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail: bool,
    pub loaded: bool,
}

impl RecordingPlayer {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl PlayerSurface for RecordingPlayer {
    fn load(&mut self, url: &str) -> Result<(), PlatformError> {
        self.teardown();
        if self.fail {
            return Err(PlatformError::Unavailable("media player"));
        }
        self.calls.lock().unwrap().push(format!("load:{url}"));
        self.loaded = true;
        Ok(())
    }

    fn teardown(&mut self) {
        if self.loaded {
            self.calls.lock().unwrap().push("teardown".to_string());
            self.loaded = false;
        }
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }
}
