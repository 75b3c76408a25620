// SPDX-License-Identifier: MPL-2.0
//! Story overlay component.
//!
//! Plays a day's assets as a slideshow. The bar row mirrors the player:
//! completed bars full, the current one filling live, the rest empty.
//! Tapping the right edge skips forward, the left edge goes back, and
//! holding anywhere pauses. Finishing the last item closes the overlay.

use crate::config::DEFAULT_BAR_HEIGHT;
use crate::error::{Error, Result};
use crate::i18n::fluent::I18n;
use crate::story::{PlayerEvent, StoryPlayer};
use iced::widget::{button, container, image as iced_image, mouse_area, progress_bar, text, Row, Space, Stack};
use iced::{alignment, Element, Length};
use std::path::PathBuf;
use std::time::Duration;

/// Messages emitted by the overlay's widgets and its tick subscription.
#[derive(Debug, Clone)]
pub enum Message {
    /// One timer tick from the subscription.
    Tick,
    /// Tap on the left edge: previous item.
    TapLeft,
    /// Tap on the right edge: next item.
    TapRight,
    /// Press-and-hold started or ended.
    SetPaused(bool),
    /// A frame for item `index` finished loading off-thread.
    FrameLoaded {
        index: usize,
        result: std::result::Result<iced_image::Handle, Error>,
    },
    Close,
}

/// Side effects the application performs after handling an overlay message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Dismiss the overlay and return to the grid.
    Close,
}

/// Full-screen story playback over one day's assets.
pub struct StoryOverlay {
    label: String,
    items: Vec<PathBuf>,
    /// Per-item display frame, filled in as loads complete.
    frames: Vec<Option<iced_image::Handle>>,
    player: StoryPlayer,
}

impl StoryOverlay {
    /// Opens the overlay and starts playback on the first item.
    pub fn open(label: String, items: Vec<PathBuf>, tick_interval: Duration) -> Result<Self> {
        let mut player = StoryPlayer::new(items.len(), tick_interval)?;
        player.start();

        let frames = vec![None; items.len()];
        Ok(Self {
            label,
            items,
            frames,
            player,
        })
    }

    /// Paths still needing a frame load, with their item indexes.
    #[must_use]
    pub fn pending_loads(&self) -> Vec<(usize, PathBuf)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(i, _)| self.frames[*i].is_none())
            .map(|(i, path)| (i, path.clone()))
            .collect()
    }

    /// True while the app should keep the tick subscription alive.
    #[must_use]
    pub fn wants_tick(&self) -> bool {
        self.player.wants_tick()
    }

    /// Tick interval for the subscription timer.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.player.tick_interval()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.player.current_index()
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::Tick => {
                let event = self.player.tick();
                self.after_player_event(event)
            }
            Message::TapRight => {
                let event = self.player.advance();
                self.after_player_event(event)
            }
            Message::TapLeft => {
                self.player.rewind();
                Effect::None
            }
            Message::SetPaused(paused) => {
                self.player.set_enabled(!paused);
                Effect::None
            }
            Message::FrameLoaded { index, result } => {
                if let (Some(slot), Ok(handle)) = (self.frames.get_mut(index), result) {
                    *slot = Some(handle);
                }
                Effect::None
            }
            Message::Close => Effect::Close,
        }
    }

    fn after_player_event(&self, event: PlayerEvent) -> Effect {
        match event {
            PlayerEvent::Finished => Effect::Close,
            PlayerEvent::Ticked | PlayerEvent::Advanced { .. } | PlayerEvent::Idle => Effect::None,
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let frame: Element<'a, Message> = match &self.frames[self.current_index()] {
            Some(handle) => iced_image::Image::new(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => container(text(i18n.tr("gallery-loading")))
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center)
                .into(),
        };

        // Left third rewinds, right two thirds advance.
        let tap_zones = Row::new()
            .push(
                mouse_area(Space::new(Length::FillPortion(1), Length::Fill))
                    .on_press(Message::TapLeft),
            )
            .push(
                mouse_area(Space::new(Length::FillPortion(2), Length::Fill))
                    .on_press(Message::TapRight),
            );

        let close = container(
            button(text(i18n.tr("story-close"))).on_press(Message::Close),
        )
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Right)
        .padding(10);

        let chrome = iced::widget::Column::new()
            .push(self.bar_row())
            .push(container(text(&self.label)).padding(10))
            .push(close);

        Stack::new()
            .push(frame)
            .push(tap_zones)
            .push(chrome)
            .into()
    }

    fn bar_row(&self) -> Element<'_, Message> {
        let mut row = Row::new().spacing(4).padding(8).width(Length::Fill);
        for index in 0..self.player.len() {
            row = row.push(
                progress_bar(0.0..=1.0, self.player.fraction_for(index))
                    .height(Length::Fixed(DEFAULT_BAR_HEIGHT)),
            );
        }
        row.into()
    }
}
