// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::config::PlayerConfig;
use crate::ui::controls;
use crate::video_player::PlaybackSession;
use std::time::Instant;

/// Everything the application needs at boot, prepared before the window opens.
#[derive(Debug)]
pub struct Flags {
    pub session: PlaybackSession,
    pub config: PlayerConfig,
}

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Render tick.
    Tick(Instant),
    Controls(controls::Message),
    /// Window close was requested (user clicked X or pressed Alt+F4).
    WindowCloseRequested(iced::window::Id),
}
