// SPDX-License-Identifier: MPL-2.0
//! Video probing and poster frame extraction.

use crate::error::{Error, Result};
use crate::media::ImageData;
use std::path::Path;
use std::sync::Once;

/// Static flag to ensure FFmpeg is initialized only once.
static FFMPEG_INIT: Once = Once::new();

/// Initialize FFmpeg with appropriate log level.
///
/// Safe to call multiple times; initialization only happens once. The log
/// level is lowered to ERROR to suppress container warnings on scan.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(Error::Io(format!("FFmpeg initialization failed: {e}")));
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// Video metadata extracted from a video file
#[derive(Debug, Clone)]
pub struct VideoMetadata {
    /// Video width in pixels
    pub width: u32,
    /// Video height in pixels
    pub height: u32,
    /// Duration in seconds
    pub duration_secs: f64,
    /// Frames per second
    pub fps: f64,
}

/// Reads dimensions, duration, and frame rate without decoding frames.
pub fn probe_video(path: &Path) -> Result<VideoMetadata> {
    init_ffmpeg()?;

    let ictx = ffmpeg_next::format::input(&path)
        .map_err(|e| Error::Io(format!("Failed to open video file: {e}")))?;

    let input = ictx
        .streams()
        .best(ffmpeg_next::media::Type::Video)
        .ok_or_else(|| Error::Io("No video stream found".to_string()))?;

    let decoder = ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
        .map_err(|e| Error::Io(format!("Failed to create codec context: {e}")))?
        .decoder()
        .video()
        .map_err(|e| Error::Io(format!("Failed to create video decoder: {e}")))?;

    let duration_secs = if ictx.duration() > 0 {
        ictx.duration() as f64 / f64::from(ffmpeg_next::ffi::AV_TIME_BASE)
    } else {
        0.0
    };

    let rate = input.avg_frame_rate();
    let fps = if rate.denominator() != 0 {
        f64::from(rate.numerator()) / f64::from(rate.denominator())
    } else {
        0.0
    };

    Ok(VideoMetadata {
        width: decoder.width(),
        height: decoder.height(),
        duration_secs,
        fps,
    })
}

/// Extracts the first frame of a video as an RGBA image.
///
/// Used for grid thumbnails, story covers, and as the viewer's poster frame
/// until the playback subscription delivers live frames.
pub fn extract_poster(path: &Path) -> Result<ImageData> {
    init_ffmpeg()?;

    let mut ictx = ffmpeg_next::format::input(&path)
        .map_err(|e| Error::Io(format!("Failed to open video file: {e}")))?;

    let input = ictx
        .streams()
        .best(ffmpeg_next::media::Type::Video)
        .ok_or_else(|| Error::Io("No video stream found".to_string()))?;
    let video_stream_index = input.index();

    let context_decoder = ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
        .map_err(|e| Error::Io(format!("Failed to create codec context: {e}")))?;
    let mut decoder = context_decoder
        .decoder()
        .video()
        .map_err(|e| Error::Io(format!("Failed to create video decoder: {e}")))?;

    let width = decoder.width();
    let height = decoder.height();
    if width == 0 || height == 0 {
        return Err(Error::Io(format!(
            "Invalid video dimensions: {width}x{height} (possibly unsupported format)"
        )));
    }

    let mut scaler = ffmpeg_next::software::scaling::Context::get(
        decoder.format(),
        width,
        height,
        ffmpeg_next::format::Pixel::RGBA,
        width,
        height,
        ffmpeg_next::software::scaling::Flags::BILINEAR,
    )
    .map_err(|e| Error::Io(format!("Failed to create scaler: {e}")))?;

    let mut rgba_frame = ffmpeg_next::frame::Video::empty();
    let mut got_frame = false;

    for (stream, packet) in ictx.packets() {
        if stream.index() != video_stream_index {
            continue;
        }

        decoder
            .send_packet(&packet)
            .map_err(|e| Error::Io(format!("Failed to send packet: {e}")))?;

        let mut decoded = ffmpeg_next::frame::Video::empty();
        if decoder.receive_frame(&mut decoded).is_ok() {
            scaler
                .run(&decoded, &mut rgba_frame)
                .map_err(|e| Error::Io(format!("Failed to scale frame: {e}")))?;
            got_frame = true;
            break;
        }
    }

    if !got_frame {
        return Err(Error::Io("No decodable frame found".to_string()));
    }

    Ok(ImageData::from_rgba(
        width,
        height,
        extract_rgba_data(&rgba_frame),
    ))
}

/// Copies RGBA bytes out of a frame, honoring the row stride.
pub(crate) fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
    let width = frame.width();
    let height = frame.height();
    let data = frame.data(0);
    let stride = frame.stride(0);

    let mut rgba_bytes = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        let row_start = y as usize * stride;
        let row_end = row_start + (width * 4) as usize;
        rgba_bytes.extend_from_slice(&data[row_start..row_end]);
    }

    rgba_bytes
}
