//! Display labels derived from a video's file name and size.
//!
//! These are presentation heuristics only. Nothing else in the crate relies
//! on them.

use crate::api::Video;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable size in base-1024 units, two decimals at most.
///
/// Anything past the GB range is still shown in GB.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    while unit + 1 < SIZE_UNITS.len() && bytes >= 1024u64.pow(unit as u32 + 1) {
        unit += 1;
    }

    let value = bytes as f64 / 1024f64.powi(unit as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

/// `"Week <n>"` for the first `Week_<digits>` in the name, `""` otherwise.
pub fn extract_week(name: &str) -> String {
    for (start, marker) in name.match_indices("Week_") {
        let digits: String = name[start + marker.len()..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if !digits.is_empty() {
            return format!("Week {digits}");
        }
    }
    String::new()
}

/// Recording type from the markers the archive uses in file names.
/// Checked in order: Theory, Lab, Virtual, falling back to Video.
pub fn extract_type(name: &str) -> &'static str {
    if name.contains("TEORÍA") {
        "Theory"
    } else if name.contains("LABORATORIO") {
        "Lab"
    } else if name.contains("VIRTUAL") {
        "Virtual"
    } else {
        "Video"
    }
}

/// The three labels shown on a video card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoLabels {
    pub week: String,
    pub kind: &'static str,
    pub size: String,
}

impl VideoLabels {
    pub fn for_video(video: &Video) -> Self {
        Self {
            week: extract_week(&video.name),
            kind: extract_type(&video.name),
            size: format_size(video.size),
        }
    }
}
