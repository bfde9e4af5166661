// SPDX-License-Identifier: MPL-2.0
//! Video playback engine.
//!
//! A [`PlaybackSession`] pairs an FFmpeg frame source with an audio clock and
//! advances both from a render tick on the GUI thread.

pub mod audio;
pub mod audio_output;
mod session;
pub mod time_units;

pub use audio::{FfmpegAudioPlayer, SilentClock};
pub use session::{
    open_session, DisplayFrame, PlaybackSession, TickOutcome, PAUSE_GLYPH, PLAY_GLYPH,
};
