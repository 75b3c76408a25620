// SPDX-License-Identifier: MPL-2.0
//! Pinch-driven column switching.
//!
//! All three column layouts are rendered stacked; a continuous transition
//! level in `0.0..=2.0` (two to four columns) drives each layer's opacity
//! and cell scale so the grids cross-fade into each other while the pinch
//! is in flight. On gesture end the accumulated level snaps to the nearest
//! whole layout.
//!
//! A pinch scale of 2 moves the level by exactly one layout (log2 mapping),
//! spreading fingers selects fewer, larger columns.

use crate::gallery::ColumnCount;

/// Continuous transition state between the column layouts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchTransition {
    /// Accumulated level from finished gestures, in `0.0..=2.0`.
    base: f32,
    /// Scale of the pinch currently in flight (1.0 = at rest).
    pinch: f32,
}

impl PinchTransition {
    /// Starts at the given layout with no gesture in flight.
    #[must_use]
    pub fn new(columns: ColumnCount) -> Self {
        Self {
            base: columns.level(),
            pinch: 1.0,
        }
    }

    /// Updates the in-flight gesture scale. Non-positive scales are ignored
    /// (a degenerate event from the gesture source).
    pub fn pinch_changed(&mut self, scale: f32) {
        if scale > 0.0 {
            self.pinch = scale;
        }
    }

    /// Folds the in-flight gesture into the base level and snaps to the
    /// nearest layout, returning it.
    pub fn pinch_ended(&mut self) -> ColumnCount {
        let columns = ColumnCount::from_level(self.level());
        self.base = columns.level();
        self.pinch = 1.0;
        columns
    }

    /// Cancels the in-flight gesture without folding it in.
    pub fn pinch_cancelled(&mut self) {
        self.pinch = 1.0;
    }

    /// Current effective transition level, clamped to the layout range.
    #[must_use]
    pub fn level(&self) -> f32 {
        (self.base - self.pinch.log2()).clamp(0.0, 2.0)
    }

    /// Layout the transition would snap to right now.
    #[must_use]
    pub fn nearest(&self) -> ColumnCount {
        ColumnCount::from_level(self.level())
    }

    /// True while a gesture is being tracked.
    #[must_use]
    pub fn is_active(&self) -> bool {
        (self.pinch - 1.0).abs() > f32::EPSILON
    }
}

/// Opacity of a layout layer at the given transition level: fully opaque at
/// its own level, fading linearly to transparent one level away.
#[must_use]
pub fn layer_opacity(level: f32, layer: ColumnCount) -> f32 {
    (1.0 - (level - layer.level()).abs()).clamp(0.0, 1.0)
}

/// Cell scale of a layout layer at the given transition level.
///
/// Cell width is the viewport width over the effective column count
/// `2 + level`, so a layer with `n` columns renders its cells at
/// `n / (2 + level)` of their resting size. At level 0 the three-column
/// layer sits at 1.5, at level 2 at 0.75, passing through 1.0 at its own
/// level.
#[must_use]
pub fn layer_scale(level: f32, layer: ColumnCount) -> f32 {
    f32::from(layer.count()) / (2.0 + level.clamp(0.0, 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn starts_at_rest_on_the_given_layout() {
        let transition = PinchTransition::new(ColumnCount::Three);
        assert_abs_diff_eq!(transition.level(), 1.0);
        assert!(!transition.is_active());
    }

    #[test]
    fn spreading_fingers_moves_toward_fewer_columns() {
        let mut transition = PinchTransition::new(ColumnCount::Three);
        transition.pinch_changed(2.0);
        assert_abs_diff_eq!(transition.level(), 0.0);
        assert_eq!(transition.pinch_ended(), ColumnCount::Two);
    }

    #[test]
    fn pinching_in_moves_toward_more_columns() {
        let mut transition = PinchTransition::new(ColumnCount::Three);
        transition.pinch_changed(0.5);
        assert_abs_diff_eq!(transition.level(), 2.0);
        assert_eq!(transition.pinch_ended(), ColumnCount::Four);
    }

    #[test]
    fn small_gestures_snap_back() {
        let mut transition = PinchTransition::new(ColumnCount::Two);
        transition.pinch_changed(0.9);
        assert_eq!(transition.pinch_ended(), ColumnCount::Two);
        assert_abs_diff_eq!(transition.level(), 0.0);
        assert!(!transition.is_active());
    }

    #[test]
    fn level_is_clamped_at_the_edges() {
        let mut transition = PinchTransition::new(ColumnCount::Two);
        transition.pinch_changed(8.0);
        assert_abs_diff_eq!(transition.level(), 0.0);

        let mut transition = PinchTransition::new(ColumnCount::Four);
        transition.pinch_changed(0.1);
        assert_abs_diff_eq!(transition.level(), 2.0);
    }

    #[test]
    fn cancelled_gesture_keeps_the_base_layout() {
        let mut transition = PinchTransition::new(ColumnCount::Three);
        transition.pinch_changed(2.0);
        transition.pinch_cancelled();
        assert_abs_diff_eq!(transition.level(), 1.0);
        assert_eq!(transition.nearest(), ColumnCount::Three);
    }

    #[test]
    fn opacity_peaks_at_own_level_and_fades_out() {
        assert_abs_diff_eq!(layer_opacity(1.0, ColumnCount::Three), 1.0);
        assert_abs_diff_eq!(layer_opacity(0.0, ColumnCount::Three), 0.0);
        assert_abs_diff_eq!(layer_opacity(2.0, ColumnCount::Three), 0.0);
        assert_abs_diff_eq!(layer_opacity(0.5, ColumnCount::Two), 0.5);
    }

    #[test]
    fn scale_matches_the_layout_cross_fade_table() {
        // Three-column layer: 1.5 at two columns, 1.0 at rest, 0.75 at four.
        assert_abs_diff_eq!(layer_scale(0.0, ColumnCount::Three), 1.5);
        assert_abs_diff_eq!(layer_scale(1.0, ColumnCount::Three), 1.0);
        assert_abs_diff_eq!(layer_scale(2.0, ColumnCount::Three), 0.75);
        // Four-column layer reaches 4/3 at the three-column level.
        assert_abs_diff_eq!(layer_scale(1.0, ColumnCount::Four), 4.0 / 3.0);
        // Two-column layer shrinks to 0.5 at the four-column level.
        assert_abs_diff_eq!(layer_scale(2.0, ColumnCount::Two), 0.5);
    }
}
