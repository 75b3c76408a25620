// SPDX-License-Identifier: MPL-2.0
//! Viewer component encapsulating state and update logic.
//!
//! The viewer shows one asset full-screen. Images respond to double-tap and
//! pinch zoom; videos start paused on their poster frame and play through
//! the decoder subscription. Opening a different asset resets zoom and tears
//! down playback by bumping the session id.

use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::media::{MediaData, MediaType};
use crate::ui::viewer::zoom::ViewerZoom;
use crate::video_player::{CommandSender, DecoderCommand, PlaybackMessage};
use iced::widget::{button, container, image as iced_image, mouse_area, text, Column, Row, Stack};
use iced::{alignment, Element, Length};
use std::path::PathBuf;

/// Messages emitted by viewer widgets and the playback subscription.
#[derive(Debug, Clone)]
pub enum Message {
    MediaLoaded(Result<MediaData, Error>),
    DoubleTapped,
    PinchChanged(f32),
    PinchEnded,
    Panned { dx: f32, dy: f32 },
    NavigateNext,
    NavigatePrevious,
    TogglePlayback,
    Playback(PlaybackMessage),
    Close,
}

/// Side effects the application performs after handling a viewer message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Load the asset at the given position in the flat timeline order.
    LoadMedia(usize),
    /// Dismiss the viewer and return to the grid.
    Close,
}

/// Video playback lifecycle within the current viewer session.
#[derive(Debug, Clone, Default)]
enum Playback {
    /// No video, or playback not yet requested.
    #[default]
    Inactive,
    /// Subscription requested, decoder not yet up.
    Starting,
    Running {
        sender: CommandSender,
        paused: bool,
    },
    Ended,
}

/// Full-screen viewer over the timeline's flat asset order.
pub struct Viewer {
    path: PathBuf,
    index: usize,
    asset_count: usize,
    media: Option<MediaData>,
    error_key: Option<&'static str>,
    zoom: ViewerZoom,
    playback: Playback,
    /// Latest decoded frame, replacing the poster during playback.
    live_frame: Option<iced_image::Handle>,
    session_id: u64,
}

impl Viewer {
    /// Opens the viewer on the asset at `index`. The caller follows up with
    /// the [`Effect::LoadMedia`] this implies.
    #[must_use]
    pub fn open(path: PathBuf, index: usize, asset_count: usize) -> Self {
        Self {
            path,
            index,
            asset_count,
            media: None,
            error_key: None,
            zoom: ViewerZoom::new(),
            playback: Playback::Inactive,
            live_frame: None,
            session_id: 0,
        }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// The playback subscription the application should keep alive, if any.
    #[must_use]
    pub fn wants_playback(&self) -> Option<(PathBuf, u64)> {
        match self.playback {
            Playback::Inactive | Playback::Ended => None,
            Playback::Starting | Playback::Running { .. } => {
                Some((self.path.clone(), self.session_id))
            }
        }
    }

    /// Moves the viewer to another asset, resetting per-asset state.
    pub fn navigate_to(&mut self, path: PathBuf, index: usize) {
        self.stop_playback();
        self.path = path;
        self.index = index;
        self.media = None;
        self.error_key = None;
        self.zoom.reset();
        self.live_frame = None;
        // A new id makes Iced tear down any previous decoder stream.
        self.session_id = self.session_id.wrapping_add(1);
        self.playback = Playback::Inactive;
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::MediaLoaded(Ok(media)) => {
                self.error_key = None;
                self.media = Some(media);
                Effect::None
            }
            Message::MediaLoaded(Err(error)) => {
                self.media = None;
                self.error_key = Some(match error {
                    Error::Video(video_error) => video_error.i18n_key(),
                    Error::Io(_) => "error-io",
                    Error::Config(_) => "error-config",
                    Error::Library(_) => "error-library",
                });
                Effect::None
            }
            Message::DoubleTapped => {
                if self.shows_image() {
                    self.zoom.double_tap();
                }
                Effect::None
            }
            Message::PinchChanged(scale) => {
                if self.shows_image() {
                    self.zoom.pinch_changed(scale);
                }
                Effect::None
            }
            Message::PinchEnded => {
                self.zoom.pinch_ended();
                Effect::None
            }
            Message::Panned { dx, dy } => {
                self.zoom.pan_by(dx, dy);
                Effect::None
            }
            Message::NavigateNext => {
                if self.index + 1 < self.asset_count {
                    Effect::LoadMedia(self.index + 1)
                } else {
                    Effect::None
                }
            }
            Message::NavigatePrevious => {
                if self.index > 0 {
                    Effect::LoadMedia(self.index - 1)
                } else {
                    Effect::None
                }
            }
            Message::TogglePlayback => {
                self.toggle_playback();
                Effect::None
            }
            Message::Playback(playback) => {
                self.handle_playback(playback);
                Effect::None
            }
            Message::Close => {
                self.stop_playback();
                Effect::Close
            }
        }
    }

    fn shows_image(&self) -> bool {
        matches!(
            self.media.as_ref().map(MediaData::media_type),
            Some(MediaType::Image)
        )
    }

    fn toggle_playback(&mut self) {
        match &self.playback {
            Playback::Inactive | Playback::Ended => {
                self.playback = Playback::Starting;
            }
            Playback::Running { sender, paused } => {
                if *paused {
                    sender.send(DecoderCommand::Play);
                } else {
                    sender.send(DecoderCommand::Pause);
                }
                let sender = sender.clone();
                let paused = !paused;
                self.playback = Playback::Running { sender, paused };
            }
            Playback::Starting => {}
        }
    }

    fn handle_playback(&mut self, message: PlaybackMessage) {
        match message {
            PlaybackMessage::Started(sender) => {
                sender.send(DecoderCommand::Play);
                self.playback = Playback::Running {
                    sender,
                    paused: false,
                };
            }
            PlaybackMessage::FrameReady {
                rgba_data,
                width,
                height,
                ..
            } => {
                self.live_frame = Some(iced_image::Handle::from_rgba(
                    width,
                    height,
                    rgba_data.as_ref().clone(),
                ));
            }
            PlaybackMessage::EndOfStream => {
                self.playback = Playback::Ended;
            }
            PlaybackMessage::Error(message) => {
                self.error_key = Some(crate::error::VideoError::from_message(&message).i18n_key());
                self.playback = Playback::Inactive;
            }
        }
    }

    fn stop_playback(&mut self) {
        if let Playback::Running { sender, .. } = &self.playback {
            sender.send(DecoderCommand::Stop);
        }
        self.playback = Playback::Inactive;
        self.live_frame = None;
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let content: Element<'a, Message> = if let Some(key) = self.error_key {
            centered_text(i18n.tr(key))
        } else {
            match &self.media {
                None => centered_text(i18n.tr("gallery-loading")),
                Some(MediaData::Image(image)) => self.image_view(&image.handle),
                Some(MediaData::Video(video)) => self.video_view(&video.poster.handle, i18n),
            }
        };

        let close = button(text(i18n.tr("viewer-close"))).on_press(Message::Close);
        let mut nav = Row::new().spacing(10).padding(10).push(close);
        if self.index > 0 {
            nav = nav
                .push(button(text(i18n.tr("viewer-previous"))).on_press(Message::NavigatePrevious));
        }
        if self.index + 1 < self.asset_count {
            nav = nav.push(button(text(i18n.tr("viewer-next"))).on_press(Message::NavigateNext));
        }

        Stack::new()
            .push(
                container(content)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(alignment::Horizontal::Center)
                    .align_y(alignment::Vertical::Center),
            )
            .push(
                container(nav)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Right),
            )
            .into()
    }

    fn image_view(&self, handle: &iced_image::Handle) -> Element<'_, Message> {
        let factor = self.zoom.factor();
        let image = iced_image::Image::new(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .scale(factor);

        mouse_area(image)
            .on_double_click(Message::DoubleTapped)
            .into()
    }

    fn video_view<'a>(
        &'a self,
        poster: &iced_image::Handle,
        i18n: &'a I18n,
    ) -> Element<'a, Message> {
        let handle = self.live_frame.as_ref().unwrap_or(poster).clone();
        let frame = iced_image::Image::new(handle)
            .width(Length::Fill)
            .height(Length::Fill);

        let label = match &self.playback {
            Playback::Running { paused: false, .. } => i18n.tr("viewer-pause"),
            _ => i18n.tr("viewer-play"),
        };

        Column::new()
            .push(frame)
            .push(
                container(button(text(label)).on_press(Message::TogglePlayback))
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Center)
                    .padding(10),
            )
            .into()
    }
}

fn centered_text<'a>(label: String) -> Element<'a, Message> {
    container(text(label))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ImageData;

    fn image_media() -> MediaData {
        MediaData::Image(ImageData::from_rgba(1, 1, vec![0_u8, 0, 0, 255]))
    }

    #[test]
    fn navigation_stays_within_bounds() {
        let mut viewer = Viewer::open(PathBuf::from("/p/a.jpg"), 0, 3);
        assert_eq!(viewer.update(Message::NavigatePrevious), Effect::None);
        assert_eq!(viewer.update(Message::NavigateNext), Effect::LoadMedia(1));

        let mut viewer = Viewer::open(PathBuf::from("/p/c.jpg"), 2, 3);
        assert_eq!(viewer.update(Message::NavigateNext), Effect::None);
        assert_eq!(
            viewer.update(Message::NavigatePrevious),
            Effect::LoadMedia(1)
        );
    }

    #[test]
    fn double_tap_zooms_loaded_images_only() {
        let mut viewer = Viewer::open(PathBuf::from("/p/a.jpg"), 0, 1);

        // Nothing loaded yet: the tap is ignored.
        viewer.update(Message::DoubleTapped);
        assert!(!viewer.zoom.is_zoomed());

        viewer.update(Message::MediaLoaded(Ok(image_media())));
        viewer.update(Message::DoubleTapped);
        assert!(viewer.zoom.is_zoomed());
    }

    #[test]
    fn navigate_to_resets_zoom_and_session() {
        let mut viewer = Viewer::open(PathBuf::from("/p/a.jpg"), 0, 2);
        viewer.update(Message::MediaLoaded(Ok(image_media())));
        viewer.update(Message::DoubleTapped);
        let session_before = viewer.session_id;

        viewer.navigate_to(PathBuf::from("/p/b.jpg"), 1);

        assert!(!viewer.zoom.is_zoomed());
        assert_eq!(viewer.index(), 1);
        assert!(viewer.media.is_none());
        assert_ne!(viewer.session_id, session_before);
    }

    #[test]
    fn load_error_maps_to_a_translation_key() {
        let mut viewer = Viewer::open(PathBuf::from("/p/a.mp4"), 0, 1);
        viewer.update(Message::MediaLoaded(Err(Error::Video(
            crate::error::VideoError::NoVideoStream,
        ))));
        assert_eq!(viewer.error_key, Some("error-video-no-video-stream"));
    }

    #[test]
    fn toggle_requests_playback_before_the_decoder_is_up() {
        let mut viewer = Viewer::open(PathBuf::from("/p/a.mp4"), 0, 1);
        assert!(viewer.wants_playback().is_none());

        viewer.update(Message::TogglePlayback);
        assert!(viewer.wants_playback().is_some());
    }

    #[test]
    fn end_of_stream_drops_the_subscription() {
        let mut viewer = Viewer::open(PathBuf::from("/p/a.mp4"), 0, 1);
        viewer.update(Message::TogglePlayback);
        viewer.update(Message::Playback(PlaybackMessage::EndOfStream));
        assert!(viewer.wants_playback().is_none());
    }

    #[test]
    fn close_emits_the_close_effect() {
        let mut viewer = Viewer::open(PathBuf::from("/p/a.jpg"), 0, 1);
        assert_eq!(viewer.update(Message::Close), Effect::Close);
    }
}
