// SPDX-License-Identifier: MPL-2.0
//! Application layer.
//!
//! - [`port`]: Trait definitions the playback session depends on
//!
//! # Dependency Rule
//!
//! - The playback session only talks to the traits in [`port`]
//! - Infrastructure implements those traits on top of `FFmpeg` and cpal
//! - Tests substitute in-memory implementations
//!
//! # Example
//!
//! ```ignore
//! use iced_reel::application::port::{AudioClock, FrameSource};
//!
//! // Infrastructure implements the port traits
//! struct FfmpegFrameSource { /* ... */ }
//! impl FrameSource for FfmpegFrameSource { /* ... */ }
//! ```

pub mod port;
