// SPDX-License-Identifier: MPL-2.0
//! Zoom state for the full-screen viewer.
//!
//! Two gestures drive it: a double tap toggles between fit and a fixed
//! magnification, and a pinch scales continuously. Both land in the same
//! clamped factor so they compose without special cases.

use crate::config::{DOUBLE_TAP_ZOOM, MAX_VIEWER_ZOOM, MIN_VIEWER_ZOOM};

/// Zoom factor, guaranteed to be within the viewer's valid range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomFactor(f32);

impl ZoomFactor {
    /// Creates a new zoom factor, clamping the value to the valid range.
    #[must_use]
    pub fn new(factor: f32) -> Self {
        Self(factor.clamp(MIN_VIEWER_ZOOM, MAX_VIEWER_ZOOM))
    }

    /// Returns the raw factor.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns whether the media is shown at its fitted size.
    #[must_use]
    pub fn is_fit(self) -> bool {
        (self.0 - MIN_VIEWER_ZOOM).abs() < f32::EPSILON
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self(MIN_VIEWER_ZOOM)
    }
}

/// Manages zoom and pan for the media shown in the viewer.
#[derive(Debug, Clone, Default)]
pub struct ViewerZoom {
    /// Zoom committed by finished gestures.
    committed: ZoomFactor,

    /// Scale of the pinch currently in flight (1.0 = none).
    pinch_scale: f32,

    /// Pan offset in points, only meaningful while zoomed in.
    pub pan: (f32, f32),
}

impl ViewerZoom {
    #[must_use]
    pub fn new() -> Self {
        Self {
            committed: ZoomFactor::default(),
            pinch_scale: 1.0,
            pan: (0.0, 0.0),
        }
    }

    /// Current effective zoom factor, including any in-flight pinch.
    #[must_use]
    pub fn factor(&self) -> f32 {
        let scale = if self.pinch_scale > 0.0 {
            self.pinch_scale
        } else {
            1.0
        };
        ZoomFactor::new(self.committed.value() * scale).value()
    }

    /// Whether the media is magnified beyond its fitted size.
    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.factor() > MIN_VIEWER_ZOOM + f32::EPSILON
    }

    /// Toggles between fit and the double-tap magnification.
    ///
    /// Any zoomed-in state returns to fit; only from fit does the tap
    /// magnify. Pan resets either way.
    pub fn double_tap(&mut self) {
        self.pinch_scale = 1.0;
        self.pan = (0.0, 0.0);
        self.committed = if self.committed.is_fit() {
            ZoomFactor::new(DOUBLE_TAP_ZOOM)
        } else {
            ZoomFactor::default()
        };
    }

    /// Updates the in-flight pinch scale. Non-positive scales are ignored.
    pub fn pinch_changed(&mut self, scale: f32) {
        if scale > 0.0 {
            self.pinch_scale = scale;
        }
    }

    /// Folds the in-flight pinch into the committed zoom.
    pub fn pinch_ended(&mut self) {
        self.committed = ZoomFactor::new(self.factor());
        self.pinch_scale = 1.0;
        if self.committed.is_fit() {
            self.pan = (0.0, 0.0);
        }
    }

    /// Pans the zoomed media by a drag delta. Ignored while at fit.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        if self.is_zoomed() {
            self.pan.0 += dx;
            self.pan.1 += dy;
        }
    }

    /// Resets to fit, clearing pan and any in-flight gesture.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
