// SPDX-License-Identifier: MPL-2.0
//! Runtime configuration for the player.
//!
//! Nothing is persisted. Values come from [`defaults`] and may be overridden
//! per launch through environment variables:
//!
//! - `ICED_REEL_TICK_MS`: render tick interval in milliseconds
//! - `ICED_REEL_SEEK_STEP_FRAMES`: frames skipped by the seek buttons
//!
//! Out-of-range values are clamped; unparsable values fall back to the default.
//!
//! # Examples
//!
//! ```
//! use iced_reel::config::PlayerConfig;
//!
//! let config = PlayerConfig::default();
//! assert_eq!(config.tick_interval.as_millis(), 30);
//! assert_eq!(config.seek_step_frames, 30);
//! ```

mod defaults;

pub use defaults::*;

use std::time::Duration;

/// Environment variable overriding the render tick interval.
pub const ENV_TICK_MS: &str = "ICED_REEL_TICK_MS";

/// Environment variable overriding the seek step.
pub const ENV_SEEK_STEP_FRAMES: &str = "ICED_REEL_SEEK_STEP_FRAMES";

/// Fixed display geometry of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

impl Default for DisplaySize {
    fn default() -> Self {
        Self {
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
        }
    }
}

/// Player settings resolved at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerConfig {
    pub display: DisplaySize,
    pub tick_interval: Duration,
    pub seek_step_frames: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            display: DisplaySize::default(),
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            seek_step_frames: DEFAULT_SEEK_STEP_FRAMES,
        }
    }
}

impl PlayerConfig {
    /// Builds the configuration from defaults plus environment overrides.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_overrides(
            std::env::var(ENV_TICK_MS).ok().as_deref(),
            std::env::var(ENV_SEEK_STEP_FRAMES).ok().as_deref(),
        )
    }

    /// Builds the configuration from raw override strings.
    #[must_use]
    pub fn from_overrides(tick_ms: Option<&str>, seek_step_frames: Option<&str>) -> Self {
        let tick_ms = parse_clamped(
            ENV_TICK_MS,
            tick_ms,
            DEFAULT_TICK_INTERVAL_MS,
            MIN_TICK_INTERVAL_MS,
            MAX_TICK_INTERVAL_MS,
        );
        let seek_step_frames = parse_clamped(
            ENV_SEEK_STEP_FRAMES,
            seek_step_frames,
            DEFAULT_SEEK_STEP_FRAMES,
            MIN_SEEK_STEP_FRAMES,
            MAX_SEEK_STEP_FRAMES,
        );

        Self {
            display: DisplaySize::default(),
            tick_interval: Duration::from_millis(tick_ms),
            seek_step_frames,
        }
    }

    /// Total window height: canvas plus the control bar allowance.
    #[must_use]
    pub fn window_height(&self) -> u32 {
        self.display.height + CONTROL_BAR_HEIGHT
    }
}

fn parse_clamped(name: &str, raw: Option<&str>, default: u64, min: u64, max: u64) -> u64 {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return default;
    };

    match raw.parse::<u64>() {
        Ok(value) => value.clamp(min, max),
        Err(e) => {
            log::warn!("Ignoring {name}={raw:?}: {e}");
            default
        }
    }
}
