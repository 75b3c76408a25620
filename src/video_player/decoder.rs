// SPDX-License-Identifier: MPL-2.0
//! Async video frame decoder using FFmpeg.
//!
//! Decoding runs on a blocking thread because FFmpeg contexts are not
//! `Send`; the UI talks to it through channels. Frames are paced against
//! wall-clock time so the decoder never outruns the display.

use crate::error::{Error, Result};
use crate::media::video;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Represents a decoded video frame ready for display.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// RGBA pixel data (width × height × 4 bytes).
    pub rgba_data: Arc<Vec<u8>>,

    /// Frame width in pixels.
    pub width: u32,

    /// Frame height in pixels.
    pub height: u32,

    /// Presentation timestamp in seconds.
    pub pts_secs: f64,
}

/// Commands sent to the decoder task.
#[derive(Debug, Clone)]
pub enum DecoderCommand {
    /// Start or resume playback.
    Play,

    /// Pause playback, keeping the current position.
    Pause,

    /// Seek to a timestamp.
    Seek { target_secs: f64 },

    /// Stop decoding and release resources.
    Stop,
}

/// Events sent from the decoder to the UI.
#[derive(Debug, Clone)]
pub enum DecoderEvent {
    /// A new frame is ready for display.
    FrameReady(DecodedFrame),

    /// Playback reached the end of the video.
    EndOfStream,

    /// An error occurred during decoding.
    Error(String),
}

/// Handle to a decoder task running on a blocking thread.
pub struct AsyncDecoder {
    command_tx: mpsc::UnboundedSender<DecoderCommand>,
    /// Bounded so the decoder backpressures instead of piling up frames.
    event_rx: mpsc::Receiver<DecoderEvent>,
}

impl AsyncDecoder {
    /// Spawns a decoder task for the given video file.
    pub fn new<P: AsRef<Path>>(video_path: P) -> Result<Self> {
        let path = video_path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(Error::Io(format!("Video file not found: {:?}", path)));
        }

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(2);

        tokio::task::spawn_blocking(move || {
            if let Err(e) = decoder_loop(path, command_rx, event_tx) {
                eprintln!("Decoder task failed: {}", e);
            }
        });

        Ok(Self {
            command_tx,
            event_rx,
        })
    }

    /// Sends a command to the decoder task.
    pub fn send_command(&self, command: DecoderCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| Error::Io("Decoder task is not running".into()))
    }

    /// Receives the next event from the decoder.
    ///
    /// Returns `None` once the decoder task has terminated.
    pub async fn recv_event(&mut self) -> Option<DecoderEvent> {
        self.event_rx.recv().await
    }
}

/// Decode loop on the blocking thread: poll commands, decode, pace, emit.
fn decoder_loop(
    video_path: std::path::PathBuf,
    mut command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
    event_tx: mpsc::Sender<DecoderEvent>,
) -> Result<()> {
    video::init_ffmpeg()?;

    let mut ictx = ffmpeg_next::format::input(&video_path)
        .map_err(|e| Error::Io(format!("Failed to open video: {}", e)))?;

    let input = ictx
        .streams()
        .best(ffmpeg_next::media::Type::Video)
        .ok_or_else(|| Error::Io("No video stream found".to_string()))?;
    let video_stream_index = input.index();

    let context_decoder = ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
        .map_err(|e| Error::Io(format!("Failed to create codec context: {}", e)))?;
    let mut decoder = context_decoder
        .decoder()
        .video()
        .map_err(|e| Error::Io(format!("Failed to create video decoder: {}", e)))?;

    let width = decoder.width();
    let height = decoder.height();

    let mut scaler = ffmpeg_next::software::scaling::Context::get(
        decoder.format(),
        width,
        height,
        ffmpeg_next::format::Pixel::RGBA,
        width,
        height,
        ffmpeg_next::software::scaling::Flags::BILINEAR,
    )
    .map_err(|e| Error::Io(format!("Failed to create scaler: {}", e)))?;

    let time_base = input.time_base();
    let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

    let mut is_playing = false;
    let mut playback_start: Option<std::time::Instant> = None;
    let mut first_pts: Option<f64> = None;
    let mut current_pts_secs: f64 = 0.0;

    loop {
        match command_rx.try_recv() {
            Ok(DecoderCommand::Play) => {
                // Resuming mid-stream: rewind to the paused position first.
                if !is_playing && current_pts_secs > 0.0 {
                    let timestamp = (current_pts_secs * 1_000_000.0) as i64;
                    if ictx.seek(timestamp, ..timestamp).is_ok() {
                        decoder.flush();
                    }
                }
                is_playing = true;
                playback_start = Some(std::time::Instant::now());
                first_pts = None;
            }
            Ok(DecoderCommand::Pause) => {
                is_playing = false;
                playback_start = None;
                first_pts = None;
            }
            Ok(DecoderCommand::Seek { target_secs }) => {
                let timestamp = (target_secs * 1_000_000.0) as i64;
                if let Err(e) = ictx.seek(timestamp, ..timestamp) {
                    let _ =
                        event_tx.blocking_send(DecoderEvent::Error(format!("Seek failed: {}", e)));
                } else {
                    decoder.flush();
                    current_pts_secs = target_secs;
                    playback_start = Some(std::time::Instant::now());
                    first_pts = None;
                }
            }
            Ok(DecoderCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => {
                break;
            }
            Err(mpsc::error::TryRecvError::Empty) => {}
        }

        if !is_playing {
            std::thread::sleep(std::time::Duration::from_millis(10));
            continue;
        }

        let mut frame_decoded = false;
        for (stream, packet) in ictx.packets() {
            if stream.index() != video_stream_index {
                continue;
            }

            if let Err(e) = decoder.send_packet(&packet) {
                let _ = event_tx
                    .blocking_send(DecoderEvent::Error(format!("Packet send failed: {}", e)));
                continue;
            }

            let mut decoded = ffmpeg_next::frame::Video::empty();
            if decoder.receive_frame(&mut decoded).is_ok() {
                let mut rgba_frame = ffmpeg_next::frame::Video::empty();
                if let Err(e) = scaler.run(&decoded, &mut rgba_frame) {
                    let _ =
                        event_tx.blocking_send(DecoderEvent::Error(format!("Scaling failed: {}", e)));
                    continue;
                }

                let pts_secs = decoded
                    .timestamp()
                    .map(|pts| pts as f64 * time_base_f64)
                    .unwrap_or(0.0);

                // Pace the frame against wall-clock time.
                if let Some(start) = playback_start {
                    let first = *first_pts.get_or_insert(pts_secs);
                    let target = start + std::time::Duration::from_secs_f64(pts_secs - first);
                    let now = std::time::Instant::now();
                    if target > now {
                        std::thread::sleep(target - now);
                    }
                }

                current_pts_secs = pts_secs;

                let frame = DecodedFrame {
                    rgba_data: Arc::new(video::extract_rgba_data(&rgba_frame)),
                    width,
                    height,
                    pts_secs,
                };

                if event_tx
                    .blocking_send(DecoderEvent::FrameReady(frame))
                    .is_err()
                {
                    // UI dropped the subscription; shut down.
                    return Ok(());
                }

                frame_decoded = true;
                break;
            }
        }

        if !frame_decoded {
            let _ = event_tx.blocking_send(DecoderEvent::EndOfStream);
            is_playing = false;
            playback_start = None;
            first_pts = None;
        }
    }

    Ok(())
}
