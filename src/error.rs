// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Library(String),
    Video(VideoError),
}

/// Specific error types for video playback issues.
/// Used to provide user-friendly, localized error messages.
#[derive(Debug, Clone)]
pub enum VideoError {
    /// File exists but contains no video stream
    NoVideoStream,

    /// File appears corrupted or has invalid data
    CorruptedFile,

    /// Decoding failed during playback
    DecodingFailed(String),

    /// I/O error (file not found, permission denied, etc.)
    IoError(String),

    /// Generic error with raw message
    Other(String),
}

impl VideoError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            VideoError::NoVideoStream => "error-video-no-video-stream",
            VideoError::CorruptedFile => "error-video-corrupted",
            VideoError::DecodingFailed(_) => "error-video-decoding-failed",
            VideoError::IoError(_) => "error-video-io",
            VideoError::Other(_) => "error-video-general",
        }
    }

    /// Attempts to parse a raw decoder message into a specific VideoError type.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("no such file")
            || msg_lower.contains("not found")
            || msg_lower.contains("permission denied")
            || msg_lower.contains("i/o error")
        {
            return VideoError::IoError(msg.to_string());
        }

        if msg_lower.contains("no video stream") || msg_lower.contains("no video track") {
            return VideoError::NoVideoStream;
        }

        if msg_lower.contains("corrupt")
            || msg_lower.contains("invalid")
            || msg_lower.contains("malformed")
        {
            return VideoError::CorruptedFile;
        }

        if msg_lower.contains("packet")
            || msg_lower.contains("scaling")
            || msg_lower.contains("seek")
            || msg_lower.contains("decode")
            || msg_lower.contains("codec")
            || msg_lower.contains("unsupported")
        {
            return VideoError::DecodingFailed(msg.to_string());
        }

        VideoError::Other(msg.to_string())
    }
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::NoVideoStream => write!(f, "No video stream found"),
            VideoError::CorruptedFile => write!(f, "Video file is corrupted"),
            VideoError::DecodingFailed(msg) => write!(f, "Decoding failed: {}", msg),
            VideoError::IoError(msg) => write!(f, "I/O error: {}", msg),
            VideoError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Library(e) => write!(f, "Library Error: {}", e),
            Error::Video(e) => write!(f, "Video Error: {}", e),
        }
    }
}

impl From<VideoError> for Error {
    fn from(err: VideoError) -> Self {
        Error::Video(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn library_error_formats_properly() {
        let err = Error::Library("empty directory".into());
        assert_eq!(format!("{}", err), "Library Error: empty directory");
    }

    #[test]
    fn video_error_from_message_io() {
        let err = VideoError::from_message("No such file or directory");
        assert!(matches!(err, VideoError::IoError(_)));
    }

    #[test]
    fn video_error_from_message_no_stream() {
        let err = VideoError::from_message("No video stream found in file");
        assert!(matches!(err, VideoError::NoVideoStream));
    }

    #[test]
    fn video_error_from_message_corrupted() {
        let err = VideoError::from_message("File is corrupt or malformed");
        assert!(matches!(err, VideoError::CorruptedFile));
    }

    #[test]
    fn video_error_from_message_decoding() {
        let err = VideoError::from_message("Packet send failed: error");
        assert!(matches!(err, VideoError::DecodingFailed(_)));
    }

    #[test]
    fn video_error_i18n_keys() {
        assert_eq!(
            VideoError::NoVideoStream.i18n_key(),
            "error-video-no-video-stream"
        );
        assert_eq!(VideoError::CorruptedFile.i18n_key(), "error-video-corrupted");
    }

    #[test]
    fn video_error_display_includes_message() {
        let err = VideoError::DecodingFailed("bad packet".to_string());
        assert!(format!("{}", err).contains("bad packet"));
    }
}
