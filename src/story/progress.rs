// SPDX-License-Identifier: MPL-2.0
//! Timer-driven progress state machine for a single story bar.
//!
//! A bar counts from 0 to 100, one percent per tick, and reports completion
//! exactly once per run. The tick itself is delivered externally (in the app
//! a subscription firing every [`ProgressController::tick_interval`]); the
//! controller only decides what a tick means in its current phase. A
//! controller never owns more than one tick source: the caller keeps the
//! timer alive only while [`ProgressController::wants_tick`] returns true,
//! so blocking or unmounting cancels the pending tick by construction.
//!
//! Completion is guarded by a per-run latch (`armed`) that is set when a run
//! starts and consumed when progress reaches 100. Every controller owns its
//! own latch and phase, so two bars can never suppress or duplicate each
//! other's signals.

use crate::error::{Error, Result};
use std::time::Duration;

/// Fill percentage at which a run is complete.
pub const COMPLETE: u8 = 100;

/// A bar's fill percentage, mutated through a single replace transition.
///
/// The transition does not clamp; the controller is responsible for keeping
/// the value in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressState {
    progress: u8,
}

impl ProgressState {
    /// Replaces the stored progress value unconditionally.
    #[must_use]
    pub fn apply(self, value: u8) -> Self {
        Self { progress: value }
    }

    /// Returns the current progress value.
    #[must_use]
    pub fn progress(self) -> u8 {
        self.progress
    }
}

/// Lifecycle phase of a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not yet started; progress is 0.
    Idle,
    /// Counting; progress is in `0..100`.
    Running,
    /// Externally suspended; the tick source is cancelled and the bar will
    /// not resume until re-enabled.
    Blocked,
    /// Reached 100; further ticks are no-ops.
    Completed,
}

/// Outcome of a single timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Progress advanced by one percent without finishing the run.
    Advanced(u8),
    /// The run just finished; reported exactly once per run.
    Completed,
    /// The tick landed while the bar was not running and was ignored.
    Suppressed,
}

/// Drives a single story bar's fill percentage over a fixed tick interval.
#[derive(Debug, Clone)]
pub struct ProgressController {
    tick_interval: Duration,
    state: ProgressState,
    phase: Phase,
    /// Completion latch for the current run. Armed when a run starts,
    /// consumed by the tick that reaches 100.
    armed: bool,
    enabled: bool,
}

impl ProgressController {
    /// Creates a controller with the given tick interval.
    ///
    /// A full run lasts 100 ticks. A zero interval is rejected as a
    /// configuration error rather than treated as "complete immediately".
    pub fn new(tick_interval: Duration) -> Result<Self> {
        if tick_interval.is_zero() {
            return Err(Error::Config(
                "story tick interval must be positive".to_string(),
            ));
        }

        Ok(Self {
            tick_interval,
            state: ProgressState::default(),
            phase: Phase::Idle,
            armed: false,
            enabled: false,
        })
    }

    /// Returns the interval at which the caller should deliver ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Returns the current fill percentage in `0..=100`.
    #[must_use]
    pub fn progress(&self) -> u8 {
        self.state.progress()
    }

    /// Returns the current fill as a fraction in `0.0..=1.0`.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        f32::from(self.state.progress()) / f32::from(COMPLETE)
    }

    /// Returns the current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns true while a tick source should be scheduled for this bar.
    #[must_use]
    pub fn wants_tick(&self) -> bool {
        self.enabled && self.phase == Phase::Running
    }

    /// Returns true once the bar has finished its run.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Completed
    }

    /// Enables or disables the bar.
    ///
    /// Disabling suspends the bar: the tick source is cancelled (via
    /// [`Self::wants_tick`]) and the completion latch is disarmed so no
    /// signal can fire while suspended. Re-enabling a suspended or idle bar
    /// starts a fresh run from 0; a completed bar stays completed until it
    /// is activated again.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.enabled = true;
            if matches!(self.phase, Phase::Blocked | Phase::Idle) {
                self.begin_run();
            }
        } else {
            self.enabled = false;
            self.block();
        }
    }

    /// Makes this bar the current one in the sequence and restarts it.
    ///
    /// Bars other than the first go through a full block-then-reset so a
    /// tick already in flight cannot land on the old run; the first bar in
    /// the sequence only disarms its latch before resetting, since nothing
    /// has run yet when it mounts. Neither path emits a completion signal.
    pub fn activate(&mut self, progress_index: usize) {
        if progress_index != 0 {
            self.block();
        } else {
            self.armed = false;
        }

        self.state = self.state.apply(0);

        if self.enabled {
            self.begin_run();
        } else {
            self.block();
        }
    }

    /// Handles one timer tick.
    ///
    /// While running, advances progress by exactly one percent. The tick
    /// that reaches 100 consumes the latch and reports [`Tick::Completed`];
    /// any tick landing on a non-running bar, or on a completed run whose
    /// latch is already consumed, reports [`Tick::Suppressed`].
    pub fn tick(&mut self) -> Tick {
        if !self.wants_tick() {
            return Tick::Suppressed;
        }

        let next = self.state.progress() + 1;
        self.state = self.state.apply(next);

        if next >= COMPLETE {
            self.phase = Phase::Completed;
            if self.armed {
                self.armed = false;
                return Tick::Completed;
            }
            return Tick::Suppressed;
        }

        Tick::Advanced(next)
    }

    /// Suspends the bar and disarms the completion latch.
    fn block(&mut self) {
        self.phase = Phase::Blocked;
        self.armed = false;
    }

    /// Starts a fresh run from 0 with the latch armed.
    fn begin_run(&mut self) {
        self.state = self.state.apply(0);
        self.armed = true;
        self.phase = Phase::Running;
    }
}
