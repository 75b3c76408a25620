// SPDX-License-Identifier: MPL-2.0
//! Video playback for the full-screen viewer.
//!
//! Decoding runs on a blocking task driven by commands from the UI; frames
//! come back through an Iced subscription. Playback exists only while the
//! viewer shows a video: closing the viewer or navigating away drops the
//! subscription, which tears the decoder down.

pub mod decoder;
pub mod subscription;

pub use decoder::{AsyncDecoder, DecodedFrame, DecoderCommand, DecoderEvent};
pub use subscription::{video_playback, CommandSender, PlaybackMessage};
