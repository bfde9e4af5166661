// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`, wrapping external libraries.
//!
//! # Available Adapters
//!
//! - [`ffmpeg`]: Video decoding via `FFmpeg` (implements [`FrameSource`])
//!
//! The audio adapter lives next to its cpal output in `video_player::audio`.
//!
//! [`FrameSource`]: crate::application::port::FrameSource

pub mod ffmpeg;

pub use ffmpeg::FfmpegFrameSource;
