// SPDX-License-Identifier: MPL-2.0
//! Unified media handling for images and videos.
//!
//! This module provides a common interface for detecting, loading, and
//! displaying both image and video files.

pub mod image;
pub mod thumbs;
pub mod video;

use std::path::Path;

pub use image::{load_image, load_thumbnail, ImageData};
pub use thumbs::ThumbnailCache;
pub use video::{probe_video, VideoMetadata};

/// Represents different types of media formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
}

/// Contains metadata and data for a loaded media file (image or video)
#[derive(Debug, Clone)]
pub enum MediaData {
    Image(ImageData),
    Video(VideoData),
}

/// Metadata and preview frame for video playback
#[derive(Debug, Clone)]
pub struct VideoData {
    /// First frame, shown until the decoder delivers live frames
    pub poster: ImageData,
    /// Video width in pixels
    pub width: u32,
    /// Video height in pixels
    pub height: u32,
    /// Duration in seconds
    pub duration_secs: f64,
    /// Frames per second
    pub fps: f64,
}

impl MediaData {
    /// Returns the media type (Image or Video)
    pub fn media_type(&self) -> MediaType {
        match self {
            MediaData::Image(_) => MediaType::Image,
            MediaData::Video(_) => MediaType::Video,
        }
    }

    /// Returns the width of the media
    pub fn width(&self) -> u32 {
        match self {
            MediaData::Image(data) => data.width,
            MediaData::Video(data) => data.width,
        }
    }

    /// Returns the height of the media
    pub fn height(&self) -> u32 {
        match self {
            MediaData::Image(data) => data.height,
            MediaData::Video(data) => data.height,
        }
    }
}

/// Supported media extensions
pub mod extensions {
    /// Image file extensions
    pub const IMAGE_EXTENSIONS: &[&str] = &[
        "jpg", "jpeg", "png", "gif", "tiff", "tif", "webp", "bmp",
    ];

    /// Video file extensions
    pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "m4v", "avi", "mov", "mkv", "webm"];
}

/// Detects the media type of a file from its extension.
///
/// Returns `None` for unsupported or missing extensions.
pub fn detect_media_type(path: &Path) -> Option<MediaType> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();

    if extensions::IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaType::Image)
    } else if extensions::VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaType::Video)
    } else {
        None
    }
}

/// Loads a media file for the full-screen viewer.
///
/// Images are decoded fully; videos are probed for metadata and their first
/// frame, with live frames arriving later through the playback subscription.
pub fn load_media(path: &Path) -> crate::error::Result<MediaData> {
    match detect_media_type(path) {
        Some(MediaType::Image) => Ok(MediaData::Image(load_image(path)?)),
        Some(MediaType::Video) => {
            let metadata = probe_video(path)?;
            let poster = video::extract_poster(path)?;
            Ok(MediaData::Video(VideoData {
                width: metadata.width,
                height: metadata.height,
                duration_secs: metadata.duration_secs,
                fps: metadata.fps,
                poster,
            }))
        }
        None => Err(crate::error::Error::Library(format!(
            "unsupported media file: {}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_images_case_insensitively() {
        assert_eq!(
            detect_media_type(&PathBuf::from("/a/photo.JPG")),
            Some(MediaType::Image)
        );
        assert_eq!(
            detect_media_type(&PathBuf::from("/a/photo.webp")),
            Some(MediaType::Image)
        );
    }

    #[test]
    fn detects_videos() {
        assert_eq!(
            detect_media_type(&PathBuf::from("/a/clip.mp4")),
            Some(MediaType::Video)
        );
        assert_eq!(
            detect_media_type(&PathBuf::from("/a/clip.MOV")),
            Some(MediaType::Video)
        );
    }

    #[test]
    fn rejects_unsupported_and_missing_extensions() {
        assert_eq!(detect_media_type(&PathBuf::from("/a/notes.txt")), None);
        assert_eq!(detect_media_type(&PathBuf::from("/a/noext")), None);
    }

    #[test]
    fn media_data_reports_image_dimensions() {
        let image = ImageData::from_rgba(2, 3, vec![0_u8; 24]);
        let media = MediaData::Image(image);
        assert_eq!(media.media_type(), MediaType::Image);
        assert_eq!(media.width(), 2);
        assert_eq!(media.height(), 3);
    }
}
