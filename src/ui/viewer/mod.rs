// SPDX-License-Identifier: MPL-2.0
//! Full-screen media viewer: one asset at a time, zoomable, with inline
//! video playback.

pub mod component;
pub mod zoom;

pub use component::{Effect, Message, Viewer};
pub use zoom::{ViewerZoom, ZoomFactor};
