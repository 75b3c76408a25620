// SPDX-License-Identifier: MPL-2.0
//! Collapsing gallery header.
//!
//! The header stays pinned until the grid has scrolled past its own height,
//! then slides up one pixel per scrolled pixel until fully hidden.

/// Vertical translation of the header for a given scroll offset.
///
/// Returns a value in `-(header_height + inset)..=0.0`: zero while the
/// scroll is within the header's height, then increasingly negative until
/// the header (and the top inset above it) is fully off-screen.
#[must_use]
pub fn header_translation(scroll: f32, header_height: f32, top_inset: f32) -> f32 {
    let past = (scroll - header_height).max(0.0);
    -past.min(header_height + top_inset)
}
