// SPDX-License-Identifier: MPL-2.0
//! Centralized default values and allowed ranges for user-tunable settings.
//!
//! Keeping the constants in one place makes it obvious what a fresh install
//! behaves like and what a persisted config can legally request.

/// Default number of grid columns shown on startup.
pub const DEFAULT_COLUMNS: u8 = 2;

/// Smallest grid the pinch transition can reach.
pub const MIN_COLUMNS: u8 = 2;

/// Largest grid the pinch transition can reach.
pub const MAX_COLUMNS: u8 = 4;

/// Default story tick interval in milliseconds.
///
/// One tick advances the active progress bar by one percent, so a full
/// story item lasts 100 ticks (5 seconds at the default).
pub const DEFAULT_STORY_TICK_MS: u64 = 50;

/// Lower bound for the story tick interval.
pub const MIN_STORY_TICK_MS: u64 = 5;

/// Upper bound for the story tick interval.
pub const MAX_STORY_TICK_MS: u64 = 1000;

/// Assets captured within this many days are eligible for the story strip.
pub const STORY_RECENCY_DAYS: i64 = 7;

/// Minimum viewer zoom factor (1.0 = fit).
pub const MIN_VIEWER_ZOOM: f32 = 1.0;

/// Maximum viewer zoom factor.
pub const MAX_VIEWER_ZOOM: f32 = 8.0;

/// Zoom factor applied by a double tap on an unzoomed image.
pub const DOUBLE_TAP_ZOOM: f32 = 2.0;

/// Edge length in pixels for grid thumbnails.
pub const THUMBNAIL_SIZE: u32 = 256;

/// Height in logical pixels of the collapsing gallery header.
pub const HEADER_HEIGHT: f32 = 60.0;

/// Height in logical pixels of the story strip above the grid.
pub const STORY_STRIP_HEIGHT: f32 = 90.0;

/// Default story progress bar height in logical pixels.
pub const DEFAULT_BAR_HEIGHT: f32 = 7.0;
