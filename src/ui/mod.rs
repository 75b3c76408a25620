// SPDX-License-Identifier: MPL-2.0
//! UI components: the gallery grid, the full-screen viewer, and the story
//! overlay. Each follows the same shape: a state struct, a `Message` enum,
//! an `update` returning an `Effect` for the application to act on, and a
//! `view`.

pub mod gallery;
pub mod story;
pub mod viewer;
