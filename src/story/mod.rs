// SPDX-License-Identifier: MPL-2.0
//! Ephemeral story playback: per-item progress controllers and the player
//! that advances through a story as bars fill up.
//!
//! Everything here is pure state; timers live in the application layer as
//! subscriptions that exist only while [`StoryPlayer::wants_tick`] holds.

pub mod player;
pub mod progress;

pub use player::{PlayerEvent, StoryPlayer};
pub use progress::{Phase, ProgressController, ProgressState, Tick, COMPLETE};
