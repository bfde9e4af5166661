// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! # Available Ports
//!
//! - [`video`]: Frame-indexed video decoding
//! - [`audio`]: Audio playback with its own clock
//!
//! # Design Notes
//!
//! - Traits use crate types only (no `FFmpeg` or cpal types leak through)
//! - Methods are synchronous; they are called from the GUI thread on each tick
//! - Traits are object-safe so the session can hold `Box<dyn _>`

pub mod audio;
pub mod video;

pub use audio::{AudioChunk, AudioClock};
pub use video::FrameSource;
