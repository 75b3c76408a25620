// SPDX-License-Identifier: MPL-2.0
//! Multi-bar story playback: routes ticks to the current bar and advances
//! through the sequence as bars complete.

use crate::error::{Error, Result};
use crate::story::progress::{ProgressController, Tick};
use std::time::Duration;

/// Outcome of one player tick or navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The current bar advanced without finishing.
    Ticked,
    /// The current bar finished and playback moved to the next item.
    Advanced { from: usize, to: usize },
    /// The last bar finished; the story is over.
    Finished,
    /// Nothing happened (player suspended or tick suppressed).
    Idle,
}

/// Plays an ordered sequence of story items, one progress bar per item.
///
/// Exactly one bar is current at a time. Completed bars keep their full
/// fill; upcoming bars read as empty. Suspending the player blocks the
/// current bar, which cancels the pending tick source.
#[derive(Debug, Clone)]
pub struct StoryPlayer {
    bars: Vec<ProgressController>,
    current: usize,
    enabled: bool,
}

impl StoryPlayer {
    /// Creates a player for `len` story items sharing one tick interval.
    pub fn new(len: usize, tick_interval: Duration) -> Result<Self> {
        if len == 0 {
            return Err(Error::Library("story has no items".to_string()));
        }

        let mut bars = Vec::with_capacity(len);
        for _ in 0..len {
            bars.push(ProgressController::new(tick_interval)?);
        }

        Ok(Self {
            bars,
            current: 0,
            enabled: false,
        })
    }

    /// Starts playback from the first item.
    pub fn start(&mut self) {
        self.enabled = true;
        self.current = 0;
        self.bars[0].set_enabled(true);
        self.bars[0].activate(0);
    }

    /// Number of story items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Index of the current story item.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Tick interval shared by all bars.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.bars[self.current].tick_interval()
    }

    /// Returns true while the app should keep a tick source scheduled.
    #[must_use]
    pub fn wants_tick(&self) -> bool {
        self.enabled && self.bars[self.current].wants_tick()
    }

    /// Suspends or resumes playback of the current bar.
    ///
    /// Suspending never loses the position: resuming restarts the current
    /// bar from 0 while earlier bars keep their full fill.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.bars[self.current].set_enabled(enabled);
    }

    /// Delivers one timer tick to the current bar.
    pub fn tick(&mut self) -> PlayerEvent {
        if !self.enabled {
            return PlayerEvent::Idle;
        }

        match self.bars[self.current].tick() {
            Tick::Advanced(_) => PlayerEvent::Ticked,
            Tick::Completed => self.advance_from(self.current),
            Tick::Suppressed => PlayerEvent::Idle,
        }
    }

    /// Skips to the next item (right tap zone).
    pub fn advance(&mut self) -> PlayerEvent {
        self.bars[self.current].set_enabled(false);
        self.advance_from(self.current)
    }

    /// Returns to the previous item, or restarts the first (left tap zone).
    pub fn rewind(&mut self) -> PlayerEvent {
        let from = self.current;
        let to = from.saturating_sub(1);

        self.bars[from].set_enabled(false);
        self.current = to;
        self.bars[to].set_enabled(self.enabled);
        self.bars[to].activate(to);

        PlayerEvent::Advanced { from, to }
    }

    /// Fill fraction to render for bar `index`: full before the current
    /// item, live fraction at it, empty after it.
    #[must_use]
    pub fn fraction_for(&self, index: usize) -> f32 {
        if index < self.current {
            1.0
        } else if index == self.current {
            self.bars[index].fraction()
        } else {
            0.0
        }
    }

    /// Raw progress of a bar, kept for completed bars (they stay at 100).
    #[must_use]
    pub fn progress_of(&self, index: usize) -> Option<u8> {
        self.bars.get(index).map(ProgressController::progress)
    }

    fn advance_from(&mut self, from: usize) -> PlayerEvent {
        let next = from + 1;
        if next >= self.bars.len() {
            self.enabled = false;
            return PlayerEvent::Finished;
        }

        self.current = next;
        self.bars[next].set_enabled(self.enabled);
        self.bars[next].activate(next);
        PlayerEvent::Advanced { from, to: next }
    }
}
