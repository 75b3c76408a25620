// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the gallery, the
//! full-screen viewer, and the story overlay.
//!
//! The `App` struct wires the components together and translates their
//! effects into side effects like config persistence and media loading.
//! Subscription policy lives here: the story timer only runs while the
//! overlay's player wants ticks, and the video decoder stream only exists
//! while the viewer is playing a video.

use crate::config::{self, Config, THUMBNAIL_SIZE};
use crate::error::Error;
use crate::gallery::ColumnCount;
use crate::i18n::fluent::I18n;
use crate::library::{self, Asset, Granularity, Timeline};
use crate::media::{self, ImageData, MediaData, MediaType, ThumbnailCache};
use crate::ui::gallery::{self as gallery_ui, GalleryScreen};
use crate::ui::story::{self as story_ui, StoryOverlay};
use crate::ui::viewer::{self as viewer_ui, Viewer};
use crate::video_player::{self, PlaybackMessage};
use iced::widget::image as iced_image;
use iced::{event, keyboard, mouse, time, window, Element, Subscription, Task, Theme};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level messages consumed by [`App::update`]. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    LibraryScanned(Result<Vec<Asset>, Error>),
    ThumbnailLoaded {
        path: PathBuf,
        result: Result<ImageData, Error>,
    },
    Gallery(gallery_ui::Message),
    Viewer(viewer_ui::Message),
    Story(story_ui::Message),
    ModifiersChanged(keyboard::Modifiers),
    WheelScrolled { lines: f32 },
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional library directory overriding the configured one.
    pub library_dir: Option<String>,
}

pub const WINDOW_DEFAULT_WIDTH: u32 = 480;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 850;

fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    iced::application(|state: &App| state.title(), App::update, App::view)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run_with(move || App::new(flags))
}

/// Root Iced application state bridging components, localization, and
/// persisted preferences.
pub struct App {
    pub i18n: I18n,
    config: Config,
    library_root: PathBuf,
    timeline: Timeline,
    thumbs: ThumbnailCache,
    gallery: GalleryScreen,
    viewer: Option<Viewer>,
    story: Option<StoryOverlay>,
    scanning: bool,
    ctrl_held: bool,
}

impl App {
    /// Initializes application state and kicks off the library scan.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = config::load().unwrap_or_default();
        let i18n = I18n::new(flags.lang.clone(), &config);

        let library_root = flags
            .library_dir
            .map(PathBuf::from)
            .or_else(|| config.library_path.clone())
            .or_else(dirs::picture_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        let columns = ColumnCount::from_count(config.columns_clamped())
            .unwrap_or(ColumnCount::Two);

        let app = App {
            i18n,
            config,
            library_root: library_root.clone(),
            timeline: Timeline::default(),
            thumbs: ThumbnailCache::new(),
            gallery: GalleryScreen::new(columns),
            viewer: None,
            story: None,
            scanning: true,
            ctrl_held: false,
        };

        let scan = Task::perform(scan_library(library_root), Message::LibraryScanned);
        (app, scan)
    }

    fn title(&self) -> String {
        self.i18n.tr("app-title")
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        let story_tick = match &self.story {
            Some(story) if story.wants_tick() => time::every(story.tick_interval())
                .map(|_| Message::Story(story_ui::Message::Tick)),
            _ => Subscription::none(),
        };

        let playback = match self.viewer.as_ref().and_then(Viewer::wants_playback) {
            Some((path, session_id)) => video_player::video_playback(path, session_id)
                .map(playback_to_message),
            None => Subscription::none(),
        };

        // Ctrl+wheel stands in for the pinch gesture on desktop.
        let pinch_input = event::listen_with(|event, _status, _window| match event {
            event::Event::Keyboard(keyboard::Event::ModifiersChanged(modifiers)) => {
                Some(Message::ModifiersChanged(modifiers))
            }
            event::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                let lines = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => y,
                    mouse::ScrollDelta::Pixels { y, .. } => y / 40.0,
                };
                Some(Message::WheelScrolled { lines })
            }
            _ => None,
        });

        Subscription::batch([story_tick, playback, pinch_input])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::LibraryScanned(result) => self.handle_library_scanned(result),
            Message::ThumbnailLoaded { path, result } => {
                if let Ok(data) = result {
                    self.thumbs.insert(path, data);
                }
                Task::none()
            }
            Message::Gallery(gallery_message) => {
                let effect = self.gallery.update(gallery_message);
                self.handle_gallery_effect(effect)
            }
            Message::Viewer(viewer_message) => {
                let Some(viewer) = self.viewer.as_mut() else {
                    return Task::none();
                };
                match viewer.update(viewer_message) {
                    viewer_ui::Effect::None => Task::none(),
                    viewer_ui::Effect::Close => {
                        self.viewer = None;
                        Task::none()
                    }
                    viewer_ui::Effect::LoadMedia(index) => self.open_viewer_at(index),
                }
            }
            Message::ModifiersChanged(modifiers) => {
                self.ctrl_held = modifiers.control();
                Task::none()
            }
            Message::WheelScrolled { lines } => self.handle_wheel(lines),
            Message::Story(story_message) => {
                let Some(story) = self.story.as_mut() else {
                    return Task::none();
                };
                match story.update(story_message) {
                    story_ui::Effect::Close => self.story = None,
                    story_ui::Effect::None => {}
                }
                Task::none()
            }
        }
    }

    /// Turns a Ctrl+wheel notch into one discrete pinch step for whichever
    /// surface is on top. Without Ctrl the wheel keeps its scroll meaning.
    fn handle_wheel(&mut self, lines: f32) -> Task<Message> {
        if !self.ctrl_held || lines == 0.0 || self.story.is_some() {
            return Task::none();
        }

        let factor = 2.0_f32.powf(lines.clamp(-1.0, 1.0));

        if let Some(viewer) = self.viewer.as_mut() {
            viewer.update(viewer_ui::Message::PinchChanged(factor));
            viewer.update(viewer_ui::Message::PinchEnded);
            return Task::none();
        }

        self.gallery
            .update(gallery_ui::Message::PinchChanged(factor));
        let effect = self.gallery.update(gallery_ui::Message::PinchEnded);
        self.handle_gallery_effect(effect)
    }

    fn handle_library_scanned(&mut self, result: Result<Vec<Asset>, Error>) -> Task<Message> {
        self.scanning = false;
        let assets = match result {
            Ok(assets) => assets,
            Err(e) => {
                eprintln!("Library scan failed: {e}");
                return Task::none();
            }
        };

        self.timeline = Timeline::build(
            assets,
            &[Granularity::Day, Granularity::Month],
            chrono::Local::now(),
        );
        self.thumbs.clear();

        let loads = self
            .timeline
            .assets
            .iter()
            .map(|asset| {
                let path = asset.path.clone();
                let kind = asset.kind;
                Task::perform(load_thumbnail(path.clone(), kind), move |result| {
                    Message::ThumbnailLoaded {
                        path: path.clone(),
                        result,
                    }
                })
            })
            .collect::<Vec<_>>();
        Task::batch(loads)
    }

    fn handle_gallery_effect(&mut self, effect: gallery_ui::Effect) -> Task<Message> {
        match effect {
            gallery_ui::Effect::None => Task::none(),
            gallery_ui::Effect::ColumnsChanged(columns) => {
                self.config.columns = Some(columns.count());
                if let Err(e) = config::save(&self.config) {
                    eprintln!("Failed to persist preferences: {e}");
                }
                Task::none()
            }
            gallery_ui::Effect::OpenViewer(index) => self.open_viewer_at(index),
            gallery_ui::Effect::OpenStory(story_index) => self.open_story(story_index),
        }
    }

    /// Opens (or moves) the viewer onto `index` and starts the media load.
    fn open_viewer_at(&mut self, index: usize) -> Task<Message> {
        let Some(asset) = self.timeline.assets.get(index) else {
            return Task::none();
        };
        let path = asset.path.clone();
        let count = self.timeline.assets.len();

        match self.viewer.as_mut() {
            Some(viewer) => viewer.navigate_to(path.clone(), index),
            None => self.viewer = Some(Viewer::open(path.clone(), index, count)),
        }

        Task::perform(load_media(path), |result| {
            Message::Viewer(viewer_ui::Message::MediaLoaded(result))
        })
    }

    fn open_story(&mut self, story_index: usize) -> Task<Message> {
        let Some(story) = self.timeline.stories.get(story_index) else {
            return Task::none();
        };

        let items: Vec<PathBuf> = story
            .asset_indices
            .iter()
            .filter_map(|&i| self.timeline.assets.get(i))
            .map(|asset| asset.path.clone())
            .collect();

        let tick = Duration::from_millis(self.config.story_tick_ms_clamped());
        let overlay = match StoryOverlay::open(story.label.clone(), items, tick) {
            Ok(overlay) => overlay,
            Err(e) => {
                eprintln!("Cannot open story: {e}");
                return Task::none();
            }
        };

        let loads = overlay
            .pending_loads()
            .into_iter()
            .map(|(index, path)| {
                Task::perform(load_story_frame(path), move |result| {
                    Message::Story(story_ui::Message::FrameLoaded { index, result })
                })
            })
            .collect::<Vec<_>>();

        self.story = Some(overlay);
        Task::batch(loads)
    }

    fn view(&self) -> Element<'_, Message> {
        if let Some(story) = &self.story {
            return story.view(&self.i18n).map(Message::Story);
        }

        if let Some(viewer) = &self.viewer {
            return viewer.view(&self.i18n).map(Message::Viewer);
        }

        self.gallery
            .view(gallery_ui::ViewContext {
                i18n: &self.i18n,
                timeline: &self.timeline,
                thumbs: &self.thumbs,
                top_inset: 0.0,
            })
            .map(Message::Gallery)
    }
}

fn playback_to_message(message: PlaybackMessage) -> Message {
    Message::Viewer(viewer_ui::Message::Playback(message))
}

/// Scans and sorts the library off the UI thread.
async fn scan_library(root: PathBuf) -> Result<Vec<Asset>, Error> {
    tokio::task::spawn_blocking(move || library::scan_library(&root))
        .await
        .map_err(|e| Error::Library(format!("scan task failed: {e}")))?
}

/// Decodes one grid thumbnail off the UI thread.
async fn load_thumbnail(path: PathBuf, kind: MediaType) -> Result<ImageData, Error> {
    tokio::task::spawn_blocking(move || match kind {
        MediaType::Image => media::load_thumbnail(&path, THUMBNAIL_SIZE),
        MediaType::Video => media::video::extract_poster(&path),
    })
    .await
    .map_err(|e| Error::Library(format!("thumbnail task failed: {e}")))?
}

/// Loads a full media file for the viewer off the UI thread.
async fn load_media(path: PathBuf) -> Result<MediaData, Error> {
    tokio::task::spawn_blocking(move || media::load_media(&path))
        .await
        .map_err(|e| Error::Library(format!("load task failed: {e}")))?
}

/// Loads the display frame for one story item: images fully decoded,
/// videos represented by their poster frame.
async fn load_story_frame(path: PathBuf) -> Result<iced_image::Handle, Error> {
    let media = load_media(path).await?;
    Ok(match media {
        MediaData::Image(image) => image.handle,
        MediaData::Video(video) => video.poster.handle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_carry_no_overrides() {
        let flags = Flags::default();
        assert!(flags.lang.is_none());
        assert!(flags.library_dir.is_none());
    }

    #[test]
    fn playback_messages_route_to_the_viewer() {
        let message = playback_to_message(PlaybackMessage::EndOfStream);
        assert!(matches!(
            message,
            Message::Viewer(viewer_ui::Message::Playback(PlaybackMessage::EndOfStream))
        ));
    }
}
