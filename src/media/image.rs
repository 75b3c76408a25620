// SPDX-License-Identifier: MPL-2.0
//! Image loading and thumbnail generation.

use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::GenericImageView;
use std::path::Path;

/// A decoded image ready for display.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }
}

/// Loads and decodes an image at full resolution.
pub fn load_image(path: &Path) -> Result<ImageData> {
    let img = image_rs::open(path)
        .map_err(|e| Error::Io(format!("Failed to load image {}: {e}", path.display())))?;

    let (width, height) = img.dimensions();
    let rgba = img.to_rgba8().into_vec();
    Ok(ImageData::from_rgba(width, height, rgba))
}

/// Loads an image downscaled to fit inside `edge` x `edge` pixels,
/// preserving aspect ratio. Images already smaller are left untouched.
pub fn load_thumbnail(path: &Path, edge: u32) -> Result<ImageData> {
    let img = image_rs::open(path)
        .map_err(|e| Error::Io(format!("Failed to load image {}: {e}", path.display())))?;

    let (width, height) = img.dimensions();
    let img = if width > edge || height > edge {
        img.thumbnail(edge, edge)
    } else {
        img
    };

    let (width, height) = img.dimensions();
    let rgba = img.to_rgba8().into_vec();
    Ok(ImageData::from_rgba(width, height, rgba))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> std::path::PathBuf {
        let path = dir.join(name);
        let img = image_rs::RgbaImage::from_pixel(width, height, image_rs::Rgba([10, 20, 30, 255]));
        img.save(&path).expect("failed to save test image");
        path
    }

    #[test]
    fn load_image_preserves_dimensions() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = write_png(temp_dir.path(), "full.png", 8, 6);

        let data = load_image(&path).expect("load failed");
        assert_eq!((data.width, data.height), (8, 6));
    }

    #[test]
    fn load_image_fails_for_missing_file() {
        let result = load_image(Path::new("/nonexistent/photo.png"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn thumbnail_downscales_large_images() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = write_png(temp_dir.path(), "large.png", 64, 32);

        let data = load_thumbnail(&path, 16).expect("load failed");
        assert!(data.width <= 16 && data.height <= 16);
        // Aspect ratio survives the downscale.
        assert_eq!(data.width, 16);
        assert_eq!(data.height, 8);
    }

    #[test]
    fn thumbnail_keeps_small_images_untouched() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = write_png(temp_dir.path(), "small.png", 4, 4);

        let data = load_thumbnail(&path, 16).expect("load failed");
        assert_eq!((data.width, data.height), (4, 4));
    }
}
