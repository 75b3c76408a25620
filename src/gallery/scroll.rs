// SPDX-License-Identifier: MPL-2.0
//! Scroll synchronization between column layouts.
//!
//! Each layout keeps its own scroll offset; when the pinch lands on a new
//! layout the offset is translated so the same content stays in view.

use crate::gallery::ColumnCount;

/// Translates a scroll offset from one layout to another.
///
/// With a fixed viewport width, a grid with `n` columns has cells of edge
/// `W/n` and roughly `items/n` rows, so total content height scales with
/// `1/n²`. Preserving the scrolled content position therefore scales the
/// offset by the squared column ratio.
#[must_use]
pub fn translate_offset(offset: f32, from: ColumnCount, to: ColumnCount) -> f32 {
    if from == to {
        return offset;
    }

    let ratio = f32::from(from.count()) / f32::from(to.count());
    (offset * ratio * ratio).max(0.0)
}
