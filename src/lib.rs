// SPDX-License-Identifier: MPL-2.0
//! `iced_gallery` is a mobile-style photo gallery built with the Iced GUI
//! framework.
//!
//! It shows a date-sectioned media grid with pinch-driven column switching,
//! a full-screen viewer with zoom and video playback, and auto-advancing
//! story slideshows of recent days.

#![doc(html_root_url = "https://docs.rs/iced_gallery/0.2.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod gallery;
pub mod i18n;
pub mod library;
pub mod media;
pub mod story;
pub mod ui;
pub mod video_player;

#[cfg(test)]
pub mod test_utils;
