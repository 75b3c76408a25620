// SPDX-License-Identifier: MPL-2.0
//! Grid model for the gallery screen: the column layouts the pinch gesture
//! moves between, scroll synchronization across them, and the collapsing
//! header.

pub mod header;
pub mod pinch;
pub mod scroll;

pub use header::header_translation;
pub use pinch::{layer_opacity, layer_scale, PinchTransition};
pub use scroll::translate_offset;

use crate::library::Granularity;

/// Number of grid columns. The pinch transition moves between these three
/// layouts; denser grids switch the section headers from days to months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnCount {
    Two,
    Three,
    Four,
}

impl ColumnCount {
    /// All layouts, in transition-level order.
    pub const ALL: [ColumnCount; 3] = [ColumnCount::Two, ColumnCount::Three, ColumnCount::Four];

    /// Number of columns as an integer.
    #[must_use]
    pub fn count(self) -> u8 {
        match self {
            ColumnCount::Two => 2,
            ColumnCount::Three => 3,
            ColumnCount::Four => 4,
        }
    }

    /// Position of this layout on the continuous transition axis
    /// (0.0 = two columns, 2.0 = four columns).
    #[must_use]
    pub fn level(self) -> f32 {
        f32::from(self.count() - 2)
    }

    /// Section granularity shown at this density: sparse grids section by
    /// day, the densest grid sections by month.
    #[must_use]
    pub fn granularity(self) -> Granularity {
        match self {
            ColumnCount::Two | ColumnCount::Three => Granularity::Day,
            ColumnCount::Four => Granularity::Month,
        }
    }

    /// Maps a column count back to a layout; out-of-range values are refused.
    #[must_use]
    pub fn from_count(count: u8) -> Option<Self> {
        match count {
            2 => Some(ColumnCount::Two),
            3 => Some(ColumnCount::Three),
            4 => Some(ColumnCount::Four),
            _ => None,
        }
    }

    /// Snaps a transition level to the nearest layout.
    #[must_use]
    pub fn from_level(level: f32) -> Self {
        match level.clamp(0.0, 2.0).round() as u8 {
            0 => ColumnCount::Two,
            1 => ColumnCount::Three,
            _ => ColumnCount::Four,
        }
    }
}
