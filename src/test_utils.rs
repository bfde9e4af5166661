// SPDX-License-Identifier: MPL-2.0
//! Test utilities: float comparisons and in-memory playback fakes.
//!
//! Clock positions and sample durations are `f64`; compare them with the
//! `approx` macros rather than `assert_eq!`.

pub use approx::{assert_abs_diff_eq, assert_relative_eq};

use image_rs::{Rgba, RgbaImage};

use crate::application::port::{AudioChunk, AudioClock, FrameSource};
use crate::config::PlayerConfig;
use crate::error::VideoError;
use crate::media::StreamInfo;
use crate::video_player::PlaybackSession;

/// Yields `total_frames` solid 4x2 frames, then `None`.
pub struct ScriptedSource {
    info: StreamInfo,
    cursor: u64,
    fail_seeks: bool,
}

impl FrameSource for ScriptedSource {
    fn info(&self) -> StreamInfo {
        self.info
    }

    fn read_frame(&mut self) -> Result<Option<RgbaImage>, VideoError> {
        if self.cursor >= self.info.total_frames {
            return Ok(None);
        }
        self.cursor += 1;
        Ok(Some(RgbaImage::from_pixel(4, 2, Rgba([10, 200, 30, 255]))))
    }

    fn seek_frame(&mut self, frame: u64) -> Result<(), VideoError> {
        if self.fail_seeks {
            return Err(VideoError::DecodingFailed("seek".into()));
        }
        self.cursor = frame;
        Ok(())
    }

    fn position(&self) -> u64 {
        self.cursor
    }
}

/// Clock that sits wherever it was last sought to.
#[derive(Default)]
pub struct NullClock {
    secs: f64,
}

impl AudioClock for NullClock {
    fn poll_frame(&mut self) -> Option<AudioChunk> {
        None
    }

    fn seek(&mut self, target_secs: f64) -> Result<(), VideoError> {
        self.secs = target_secs;
        Ok(())
    }

    fn set_paused(&mut self, _paused: bool) {}

    fn position_secs(&self) -> f64 {
        self.secs
    }
}

/// Paused 25 fps session over a [`ScriptedSource`] and a [`NullClock`].
pub fn fake_session(total_frames: u64, fail_seeks: bool) -> PlaybackSession {
    let info = StreamInfo {
        width: 4,
        height: 2,
        total_frames,
        fps: 25,
    };
    let source = ScriptedSource {
        info,
        cursor: 0,
        fail_seeks,
    };
    PlaybackSession::new(
        "clip.mp4",
        Box::new(source),
        Box::new(NullClock::default()),
        &PlayerConfig::default(),
    )
}
