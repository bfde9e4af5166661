// SPDX-License-Identifier: MPL-2.0
//! `iced_reel` is a simple video player built with the Iced GUI framework.
//!
//! It decodes video with FFmpeg, plays audio through cpal, and drives both
//! from a render tick on the GUI thread. Frames can be shown as decoded, in
//! greyscale, or as a colour negative.

#![doc(html_root_url = "https://docs.rs/iced_reel/0.1.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod media;
pub mod ui;
pub mod video_player;

#[cfg(test)]
mod test_utils;
