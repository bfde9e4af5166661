// SPDX-License-Identifier: MPL-2.0
//! FFmpeg initialization and video stream probing.

use crate::error::{Error, Result, VideoError};
use std::path::Path;
use std::sync::Once;

static FFMPEG_INIT: Once = Once::new();

/// Initializes FFmpeg once per process and quiets its logging to errors.
///
/// Every adapter that opens a file calls this first.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(Error::Io(format!("FFmpeg initialization failed: {e}")));
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// Playback-relevant description of a video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamInfo {
    /// Intrinsic frame width in pixels (informational).
    pub width: u32,
    /// Intrinsic frame height in pixels (informational).
    pub height: u32,
    /// Total number of frames; also the upper bound of the scrub bar.
    pub total_frames: u64,
    /// Whole frames per second, at least 1.
    pub fps: u32,
}

impl StreamInfo {
    /// Converts a frame index to seconds on the audio timeline.
    #[must_use]
    pub fn frame_to_secs(&self, frame: u64) -> f64 {
        frame as f64 / f64::from(self.fps)
    }
}

/// Truncates an exact frame rate to whole frames per second, at least 1.
#[must_use]
pub fn whole_fps(exact_fps: f64) -> u32 {
    (exact_fps.floor() as u32).max(1)
}

/// Picks a stream's frame rate as `(numerator, denominator)`.
///
/// The average rate wins; the real base rate is the fallback. Returns `None`
/// when neither is positive.
#[must_use]
pub fn select_frame_rate(average: (i32, i32), real: (i32, i32)) -> Option<(i32, i32)> {
    [average, real]
        .into_iter()
        .find(|&(num, den)| num > 0 && den > 0)
}

/// Exact frame rate of a stream, as chosen by [`select_frame_rate`].
pub(crate) fn stream_frame_rate(stream: &ffmpeg_next::format::stream::Stream<'_>) -> Option<f64> {
    let average = stream.avg_frame_rate();
    let real = stream.rate();
    select_frame_rate(
        (average.numerator(), average.denominator()),
        (real.numerator(), real.denominator()),
    )
    .map(|(num, den)| f64::from(num) / f64::from(den))
}

/// Frame count from the stream header, or estimated from duration and rate.
#[must_use]
pub fn estimate_total_frames(declared_frames: i64, duration_secs: f64, exact_fps: f64) -> u64 {
    if declared_frames > 0 {
        return declared_frames as u64;
    }
    if duration_secs > 0.0 && exact_fps > 0.0 {
        return (duration_secs * exact_fps).floor() as u64;
    }
    0
}

/// Reads [`StreamInfo`] from an already-opened input context.
pub(crate) fn stream_info_from_input(
    ictx: &ffmpeg_next::format::context::Input,
) -> Result<StreamInfo> {
    let video_stream = ictx
        .streams()
        .best(ffmpeg_next::media::Type::Video)
        .ok_or(VideoError::NoVideoStream)?;

    let context_decoder =
        ffmpeg_next::codec::context::Context::from_parameters(video_stream.parameters())
            .map_err(|e| VideoError::DecodingFailed(format!("Failed to create codec context: {e}")))?;
    let decoder = context_decoder
        .decoder()
        .video()
        .map_err(|e| VideoError::DecodingFailed(format!("Failed to create video decoder: {e}")))?;

    let width = decoder.width();
    let height = decoder.height();
    if width == 0 || height == 0 {
        return Err(VideoError::DecodingFailed(format!(
            "Invalid video dimensions: {width}x{height} (possibly unsupported format)"
        ))
        .into());
    }

    let exact_fps = stream_frame_rate(&video_stream).ok_or_else(|| {
        VideoError::DecodingFailed("Stream does not declare a frame rate".to_string())
    })?;
    let fps = whole_fps(exact_fps);

    let duration_secs = if video_stream.duration() > 0 {
        let time_base = video_stream.time_base();
        video_stream.duration() as f64 * f64::from(time_base.numerator())
            / f64::from(time_base.denominator())
    } else if ictx.duration() > 0 {
        ictx.duration() as f64 / f64::from(ffmpeg_next::ffi::AV_TIME_BASE)
    } else {
        0.0
    };

    Ok(StreamInfo {
        width,
        height,
        total_frames: estimate_total_frames(video_stream.frames(), duration_secs, exact_fps),
        fps,
    })
}

/// Opens a file just long enough to read its [`StreamInfo`].
pub fn probe_stream_info<P: AsRef<Path>>(path: P) -> Result<StreamInfo> {
    init_ffmpeg()?;

    let ictx = ffmpeg_next::format::input(&path)
        .map_err(|e| VideoError::from_message(&format!("Failed to open video file: {e}")))?;

    stream_info_from_input(&ictx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_fps_truncates() {
        assert_eq!(whole_fps(30000.0 / 1001.0), 29);
        assert_eq!(whole_fps(25.0), 25);
        assert_eq!(whole_fps(24000.0 / 1001.0), 23);
    }

    #[test]
    fn whole_fps_never_below_one() {
        assert_eq!(whole_fps(0.5), 1);
    }

    #[test]
    fn average_frame_rate_preferred() {
        assert_eq!(select_frame_rate((25, 1), (50, 1)), Some((25, 1)));
    }

    #[test]
    fn real_frame_rate_used_when_average_missing() {
        assert_eq!(select_frame_rate((0, 0), (30000, 1001)), Some((30000, 1001)));
        assert_eq!(select_frame_rate((30, 0), (24, 1)), Some((24, 1)));
    }

    #[test]
    fn no_frame_rate_when_both_missing() {
        assert_eq!(select_frame_rate((0, 0), (0, 1)), None);
        assert_eq!(select_frame_rate((-1, 1), (25, -1)), None);
    }

    #[test]
    fn declared_frame_count_wins() {
        assert_eq!(estimate_total_frames(1500, 99.0, 25.0), 1500);
    }

    #[test]
    fn frame_count_estimated_from_duration() {
        assert_eq!(estimate_total_frames(0, 10.0, 29.97), 299);
        assert_eq!(estimate_total_frames(-1, 0.0, 25.0), 0);
    }

    #[test]
    fn frame_to_secs_uses_integer_rate() {
        let info = StreamInfo {
            width: 1920,
            height: 1080,
            total_frames: 250,
            fps: 25,
        };
        assert_eq!(info.frame_to_secs(125), 5.0);
        assert_eq!(info.frame_to_secs(0), 0.0);
    }

    #[test]
    fn probe_fails_for_nonexistent_file() {
        assert!(probe_stream_info("tests/data/this_file_does_not_exist.mp4").is_err());
    }

    #[test]
    fn probe_reads_sample_when_present() {
        let path = "tests/data/sample.mp4";
        if !std::path::Path::new(path).exists() {
            return;
        }
        let info = probe_stream_info(path).unwrap();
        assert!(info.width > 0);
        assert!(info.fps >= 1);
    }
}
