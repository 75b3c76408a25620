// SPDX-License-Identifier: MPL-2.0
//! Iced subscription bridging the decoder task to the UI.
//!
//! The subscription stays alive for as long as the application keeps
//! returning it; Iced drops the stream when it disappears from the
//! subscription batch, which closes the channels and stops the decoder.

use crate::video_player::decoder::{AsyncDecoder, DecoderCommand, DecoderEvent};
use iced::futures::SinkExt;
use iced::Subscription;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Messages delivered by the playback subscription.
#[derive(Debug, Clone)]
pub enum PlaybackMessage {
    /// The decoder is up; use the sender to control playback.
    Started(CommandSender),

    /// A decoded frame is ready for display.
    FrameReady {
        rgba_data: Arc<Vec<u8>>,
        width: u32,
        height: u32,
        pts_secs: f64,
    },

    /// Playback reached the end of the video.
    EndOfStream,

    /// Something went wrong; the message is a raw decoder error.
    Error(String),
}

/// Cloneable handle for sending commands to the running decoder.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<DecoderCommand>,
}

impl CommandSender {
    /// Sends a command, ignoring failures from an already-stopped decoder.
    pub fn send(&self, command: DecoderCommand) {
        let _ = self.tx.send(command);
    }
}

/// Creates a playback subscription for the given video file.
///
/// `session_id` distinguishes successive viewer sessions: opening another
/// video (or the same one again) under a new id makes Iced tear down the
/// old stream and start a fresh decoder.
pub fn video_playback(
    video_path: PathBuf,
    session_id: u64,
) -> Subscription<PlaybackMessage> {
    Subscription::run_with_id(
        ("video_playback", video_path.clone(), session_id),
        iced::stream::channel(16, move |mut output| async move {
            let mut decoder = match AsyncDecoder::new(&video_path) {
                Ok(decoder) => decoder,
                Err(e) => {
                    let _ = output.send(PlaybackMessage::Error(e.to_string())).await;
                    return;
                }
            };

            let (command_tx, mut command_rx) = mpsc::unbounded_channel();
            let sender = CommandSender { tx: command_tx };

            if output
                .send(PlaybackMessage::Started(sender))
                .await
                .is_err()
            {
                return;
            }

            loop {
                tokio::select! {
                    command = command_rx.recv() => {
                        let Some(command) = command else { break };
                        let stop = matches!(command, DecoderCommand::Stop);
                        if decoder.send_command(command).is_err() {
                            break;
                        }
                        if stop {
                            break;
                        }
                    }
                    event = decoder.recv_event() => {
                        let Some(event) = event else { break };
                        let message = match event {
                            DecoderEvent::FrameReady(frame) => PlaybackMessage::FrameReady {
                                rgba_data: frame.rgba_data,
                                width: frame.width,
                                height: frame.height,
                                pts_secs: frame.pts_secs,
                            },
                            DecoderEvent::EndOfStream => PlaybackMessage::EndOfStream,
                            DecoderEvent::Error(msg) => PlaybackMessage::Error(msg),
                        };
                        if output.send(message).await.is_err() {
                            break;
                        }
                    }
                }
            }
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_sender_survives_a_dropped_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        let sender = CommandSender { tx };
        drop(rx);

        // Must not panic.
        sender.send(DecoderCommand::Play);
        sender.send(DecoderCommand::Stop);
    }

    #[tokio::test]
    async fn command_sender_delivers_commands() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sender = CommandSender { tx };

        sender.send(DecoderCommand::Pause);
        assert!(matches!(rx.recv().await, Some(DecoderCommand::Pause)));
    }
}
