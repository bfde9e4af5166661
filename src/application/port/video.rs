// SPDX-License-Identifier: MPL-2.0
//! Video frame source port definition.
//!
//! This module defines the [`FrameSource`] trait. The `FFmpeg` adapter in
//! `infrastructure::ffmpeg` implements it for real files.
//!
//! # Design Notes
//!
//! - The source is **stateful**: it owns a read cursor measured in frames
//! - `read_frame` returns the frame at the cursor and advances it by one
//! - `seek_frame` moves the cursor; the next `read_frame` returns that frame

use crate::error::VideoError;
use crate::media::video::StreamInfo;
use image_rs::RgbaImage;

/// Port for frame-by-frame video decoding.
///
/// # Lifecycle
///
/// 1. Open the source (adapter-specific constructor)
/// 2. Call [`read_frame`](FrameSource::read_frame) once per render tick
/// 3. Use [`seek_frame`](FrameSource::seek_frame) for transport actions and looping
///
/// # Example
///
/// ```ignore
/// use iced_reel::application::port::FrameSource;
///
/// fn count_frames(source: &mut dyn FrameSource) -> u64 {
///     let mut n = 0;
///     while let Ok(Some(_)) = source.read_frame() {
///         n += 1;
///     }
///     n
/// }
/// ```
pub trait FrameSource {
    /// Returns the stream description captured when the source was opened.
    fn info(&self) -> StreamInfo;

    /// Decodes the frame at the cursor and advances the cursor.
    ///
    /// Returns `Ok(None)` at end of stream.
    ///
    /// # Errors
    ///
    /// Returns a [`VideoError`] if decoding or pixel conversion fails.
    fn read_frame(&mut self) -> Result<Option<RgbaImage>, VideoError>;

    /// Moves the cursor to `frame`.
    ///
    /// # Errors
    ///
    /// Returns a [`VideoError`] if the underlying seek fails.
    fn seek_frame(&mut self, frame: u64) -> Result<(), VideoError>;

    /// Index of the next frame `read_frame` will return.
    fn position(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn FrameSource) {}

    struct CountingSource {
        cursor: u64,
        total: u64,
    }

    impl FrameSource for CountingSource {
        fn info(&self) -> StreamInfo {
            StreamInfo {
                width: 2,
                height: 2,
                total_frames: self.total,
                fps: 10,
            }
        }

        fn read_frame(&mut self) -> Result<Option<RgbaImage>, VideoError> {
            if self.cursor >= self.total {
                return Ok(None);
            }
            self.cursor += 1;
            Ok(Some(RgbaImage::new(2, 2)))
        }

        fn seek_frame(&mut self, frame: u64) -> Result<(), VideoError> {
            self.cursor = frame;
            Ok(())
        }

        fn position(&self) -> u64 {
            self.cursor
        }
    }

    #[test]
    fn read_advances_cursor_until_end() {
        let mut source = CountingSource { cursor: 0, total: 3 };
        let mut frames = 0;
        while source.read_frame().unwrap().is_some() {
            frames += 1;
        }
        assert_eq!(frames, 3);
        assert_eq!(source.position(), 3);
    }

    #[test]
    fn seek_moves_cursor() {
        let mut source = CountingSource { cursor: 0, total: 10 };
        source.seek_frame(7).unwrap();
        assert_eq!(source.position(), 7);
        assert!(source.read_frame().unwrap().is_some());
        assert_eq!(source.position(), 8);
    }
}
