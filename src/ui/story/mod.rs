// SPDX-License-Identifier: MPL-2.0
//! Story overlay: full-screen auto-advancing slideshow with one progress
//! bar per item.

pub mod component;

pub use component::{Effect, Message, StoryOverlay};
