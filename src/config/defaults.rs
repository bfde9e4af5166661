// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Display**: Canvas and window geometry
//! - **Playback**: Render tick and seek step
//! - **Audio**: Output buffering

// ==========================================================================
// Display Defaults
// ==========================================================================

/// Width of the video canvas in pixels (16:9 with [`DISPLAY_HEIGHT`]).
pub const DISPLAY_WIDTH: u32 = 900;

/// Height of the video canvas in pixels.
pub const DISPLAY_HEIGHT: u32 = 506;

/// Extra window height reserved below the canvas for the scrub bar and controls.
pub const CONTROL_BAR_HEIGHT: u32 = 80;

/// Window title.
pub const WINDOW_TITLE: &str = "Video Player";

// ==========================================================================
// Playback Defaults
// ==========================================================================

/// Default interval between render ticks, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 30;

/// Minimum render tick interval.
pub const MIN_TICK_INTERVAL_MS: u64 = 5;

/// Maximum render tick interval.
pub const MAX_TICK_INTERVAL_MS: u64 = 1000;

/// Default number of frames skipped by the seek back/forward buttons.
pub const DEFAULT_SEEK_STEP_FRAMES: u64 = 30;

/// Minimum seek step in frames.
pub const MIN_SEEK_STEP_FRAMES: u64 = 1;

/// Maximum seek step in frames.
pub const MAX_SEEK_STEP_FRAMES: u64 = 10_000;

/// Ticks a scrub preview may sit unchanged before it is committed without a
/// slider release (keyboard and wheel changes never send one).
pub const SCRUB_SETTLE_TICKS: u32 = 10;

// ==========================================================================
// Audio Defaults
// ==========================================================================

/// How far ahead of the output device the audio decoder fills its queue.
pub const AUDIO_LOOKAHEAD_SECS: f64 = 0.2;
