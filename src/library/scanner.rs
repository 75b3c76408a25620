// SPDX-License-Identifier: MPL-2.0
//! Library scanner: walks a directory tree for supported media files and
//! resolves each file's capture time.
//!
//! Capture time comes from the EXIF `DateTimeOriginal` tag when the file
//! carries one; files without usable EXIF (videos, screenshots, stripped
//! images) fall back to the filesystem modification time.

use crate::error::{Error, Result};
use crate::library::Asset;
use crate::media;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Scans `root` recursively and returns assets sorted by descending
/// capture time (newest first).
///
/// Returns an error if the root directory cannot be read; unreadable
/// subdirectories and files are skipped.
pub fn scan_library(root: &Path) -> Result<Vec<Asset>> {
    if !root.is_dir() {
        return Err(Error::Library(format!(
            "not a directory: {}",
            root.display()
        )));
    }

    let mut assets = Vec::new();
    collect(root, &mut assets)?;
    sort_newest_first(&mut assets);
    Ok(assets)
}

fn collect(dir: &Path, assets: &mut Vec<Asset>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let Ok(entry) = entry else { continue };
        let path = entry.path();

        if path.is_dir() {
            // Best effort: a single unreadable subtree must not abort the scan.
            let _ = collect(&path, assets);
            continue;
        }

        if let Some(kind) = media::detect_media_type(&path) {
            let taken_at = capture_time(&path);
            assets.push(Asset {
                path,
                kind,
                taken_at,
            });
        }
    }
    Ok(())
}

/// Sorts assets newest first; ties keep a stable path order so repeated
/// scans produce identical layouts.
pub fn sort_newest_first(assets: &mut [Asset]) {
    assets.sort_by(|a, b| b.taken_at.cmp(&a.taken_at).then(a.path.cmp(&b.path)));
}

/// Resolves the capture time of a media file.
fn capture_time(path: &Path) -> DateTime<Local> {
    exif_capture_time(path).unwrap_or_else(|| modification_time(path))
}

fn exif_capture_time(path: &Path) -> Option<DateTime<Local>> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut reader).ok()?;

    let field = exif
        .get_field(exif::Tag::DateTimeOriginal, exif::In::PRIMARY)
        .or_else(|| exif.get_field(exif::Tag::DateTime, exif::In::PRIMARY))?;

    parse_exif_datetime(&field.display_value().to_string())
}

/// Parses the EXIF datetime representation into a local timestamp.
///
/// `kamadak-exif` renders `DateTimeOriginal` as `YYYY-MM-DD HH:MM:SS`; the
/// raw tag format with colon-separated dates is accepted as well.
fn parse_exif_datetime(value: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y:%m:%d %H:%M:%S"))
        .ok()?;
    Local.from_local_datetime(&naive).single()
}

fn modification_time(path: &Path) -> DateTime<Local> {
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map(DateTime::<Local>::from)
        .unwrap_or_else(|_| Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"fake media data").expect("failed to write test file");
        path
    }

    #[test]
    fn scan_finds_supported_media_only() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        touch(temp_dir.path(), "a.jpg");
        touch(temp_dir.path(), "b.mp4");
        touch(temp_dir.path(), "notes.txt");

        let assets = scan_library(temp_dir.path()).expect("scan failed");
        assert_eq!(assets.len(), 2);
        assert!(assets.iter().all(|a| a.path.extension().is_some()));
    }

    #[test]
    fn scan_recurses_into_subdirectories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let sub = temp_dir.path().join("2024");
        fs::create_dir(&sub).expect("failed to create subdir");
        touch(temp_dir.path(), "top.png");
        touch(&sub, "nested.jpg");

        let assets = scan_library(temp_dir.path()).expect("scan failed");
        assert_eq!(assets.len(), 2);
    }

    #[test]
    fn scan_rejects_missing_directory() {
        let result = scan_library(Path::new("/nonexistent/library"));
        assert!(matches!(result, Err(Error::Library(_))));
    }

    #[test]
    fn parse_exif_datetime_accepts_both_separators() {
        assert!(parse_exif_datetime("2024-06-01 12:30:00").is_some());
        assert!(parse_exif_datetime("2024:06:01 12:30:00").is_some());
        assert!(parse_exif_datetime("yesterday").is_none());
    }

    #[test]
    fn files_without_exif_fall_back_to_mtime() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = touch(temp_dir.path(), "plain.jpg");

        let assets = scan_library(temp_dir.path()).expect("scan failed");
        let expected = modification_time(&path);
        // Allow a little slack in case the filesystem rounds timestamps.
        let delta = (assets[0].taken_at - expected).num_seconds().abs();
        assert!(delta <= 1, "capture time should track mtime");
    }

    #[test]
    fn sort_is_newest_first_and_stable_on_ties() {
        use crate::media::MediaType;
        use chrono::TimeZone;

        let at = |h| Local.with_ymd_and_hms(2024, 6, 1, h, 0, 0).unwrap();
        let mut assets = vec![
            Asset {
                path: "/b.jpg".into(),
                kind: MediaType::Image,
                taken_at: at(10),
            },
            Asset {
                path: "/a.jpg".into(),
                kind: MediaType::Image,
                taken_at: at(10),
            },
            Asset {
                path: "/c.jpg".into(),
                kind: MediaType::Image,
                taken_at: at(12),
            },
        ];

        sort_newest_first(&mut assets);
        let order: Vec<_> = assets.iter().map(|a| a.path.clone()).collect();
        assert_eq!(
            order,
            vec![
                std::path::PathBuf::from("/c.jpg"),
                "/a.jpg".into(),
                "/b.jpg".into()
            ]
        );
    }
}
