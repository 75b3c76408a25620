// SPDX-License-Identifier: MPL-2.0
//! Media library: the asset model, the directory scanner, and the timeline
//! partitioner that groups assets into dated sections for the grid.

pub mod scanner;
pub mod timeline;

pub use scanner::scan_library;
pub use timeline::{Granularity, Layout, LayoutEntry, Story, Timeline};

use crate::media::MediaType;
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// A single media file in the library.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    /// Absolute path to the file.
    pub path: PathBuf,
    /// Whether the file is an image or a video.
    pub kind: MediaType,
    /// Capture time (EXIF when available, file modification time otherwise).
    pub taken_at: DateTime<Local>,
}

impl Asset {
    /// Returns the file name for display, falling back to the full path.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Returns true if this asset is a video.
    #[must_use]
    pub fn is_video(&self) -> bool {
        self.kind == MediaType::Video
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn display_name_uses_file_name() {
        let asset = Asset {
            path: PathBuf::from("/photos/2024/beach.jpg"),
            kind: MediaType::Image,
            taken_at: Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        };
        assert_eq!(asset.display_name(), "beach.jpg");
    }

    #[test]
    fn is_video_reflects_kind() {
        let asset = Asset {
            path: PathBuf::from("/photos/clip.mp4"),
            kind: MediaType::Video,
            taken_at: Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        };
        assert!(asset.is_video());
    }
}
