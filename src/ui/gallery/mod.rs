// SPDX-License-Identifier: MPL-2.0
//! Gallery screen: the date-sectioned media grid with pinch-driven column
//! switching, the collapsing header, and the story strip.

pub mod component;

pub use component::{Effect, GalleryScreen, Message, ViewContext};
