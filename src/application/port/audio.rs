// SPDX-License-Identifier: MPL-2.0
//! Audio playback port definition.
//!
//! The audio layer owns the playback clock. The session only pauses it,
//! seeks it to absolute positions, and polls it once per playing tick.

use crate::error::VideoError;

/// Description of an audio chunk handed to the output during a poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioChunk {
    /// Presentation timestamp of the chunk in seconds.
    pub pts_secs: f64,
    /// Number of sample frames (samples per channel) in the chunk.
    pub frames: usize,
}

/// Port for audio playback with an internal clock.
pub trait AudioClock {
    /// Advances the audio pipeline and returns the last chunk it queued.
    ///
    /// Must be called on every playing tick, whether or not a video frame was
    /// produced: it is what keeps the output device fed.
    fn poll_frame(&mut self) -> Option<AudioChunk>;

    /// Repositions the clock to an absolute time in seconds.
    ///
    /// # Errors
    ///
    /// Returns a [`VideoError`] if the underlying seek fails.
    fn seek(&mut self, target_secs: f64) -> Result<(), VideoError>;

    /// Pauses (`true`) or resumes (`false`) playback.
    fn set_paused(&mut self, paused: bool);

    /// Current clock position in seconds.
    fn position_secs(&self) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn AudioClock) {}

    #[test]
    fn chunk_is_copy() {
        let chunk = AudioChunk {
            pts_secs: 1.5,
            frames: 1024,
        };
        let copy = chunk;
        assert_eq!(chunk, copy);
    }
}
