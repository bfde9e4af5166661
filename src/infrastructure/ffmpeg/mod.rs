// SPDX-License-Identifier: MPL-2.0
//! `FFmpeg` adapter implementing the [`FrameSource`] port trait.
//!
//! [`FfmpegFrameSource`] decodes one frame per call on the calling thread and
//! tracks its position as a frame index, the unit the scrub bar works in.
//!
//! # Design Notes
//!
//! - Seeking jumps to the keyframe at or before the target, then decodes and
//!   discards frames until the target frame is reached
//! - At end of input the decoder is drained before `Ok(None)` is reported
//!
//! [`FrameSource`]: crate::application::port::FrameSource

use std::path::Path;

use image_rs::RgbaImage;

use crate::application::port::FrameSource;
use crate::error::{Result, VideoError};
use crate::media::video::{init_ffmpeg, stream_frame_rate, stream_info_from_input, StreamInfo};

/// Maximum number of frames discarded while landing on a seek target.
/// Prevents runaway decoding on corrupted files or targets beyond EOF.
const MAX_SEEK_FRAMES: u32 = 1000;

/// `FFmpeg`-based frame source for one video file.
pub struct FfmpegFrameSource {
    /// Input format context.
    input_context: ffmpeg_next::format::context::Input,
    /// Video decoder.
    decoder: ffmpeg_next::decoder::Video,
    /// Converts decoded frames to RGBA at intrinsic size.
    scaler: ffmpeg_next::software::scaling::Context,
    /// Video stream index.
    video_stream_index: usize,
    /// Time base for PTS conversion.
    time_base_f64: f64,
    /// Exact stream frame rate, used to land seeks on the right frame.
    exact_fps: f64,
    /// Stream description.
    info: StreamInfo,
    /// Index of the next frame `read_frame` returns.
    cursor: u64,
    /// Frame decoded while seeking, returned by the next `read_frame`.
    pending: Option<ffmpeg_next::frame::Video>,
    /// Whether EOF has been signalled to the decoder since the last flush.
    eof_sent: bool,
}

impl FfmpegFrameSource {
    /// Opens `path` and prepares to decode from frame 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, has no video stream,
    /// or its codec/pixel format is unsupported.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        init_ffmpeg()?;

        let input_context = ffmpeg_next::format::input(&path)
            .map_err(|e| VideoError::from_message(&format!("Failed to open video: {e}")))?;

        let info = stream_info_from_input(&input_context)?;

        let video_stream = input_context
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or(VideoError::NoVideoStream)?;
        let video_stream_index = video_stream.index();

        let time_base = video_stream.time_base();
        let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        // Same rate the frame count was derived from, unrounded.
        let exact_fps = stream_frame_rate(&video_stream).unwrap_or(f64::from(info.fps));

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(video_stream.parameters())
                .map_err(|e| {
                    VideoError::DecodingFailed(format!("Failed to create codec context: {e}"))
                })?;
        let decoder = context_decoder.decoder().video().map_err(|e| {
            VideoError::DecodingFailed(format!("Failed to create video decoder: {e}"))
        })?;

        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            ffmpeg_next::format::Pixel::RGBA,
            decoder.width(),
            decoder.height(),
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| VideoError::DecodingFailed(format!("Failed to create scaler: {e}")))?;

        log::info!(
            "Opened {}: {}x{}, {} frames at {} fps",
            path.as_ref().display(),
            info.width,
            info.height,
            info.total_frames,
            info.fps
        );

        Ok(Self {
            input_context,
            decoder,
            scaler,
            video_stream_index,
            time_base_f64,
            exact_fps,
            info,
            cursor: 0,
            pending: None,
            eof_sent: false,
        })
    }

    /// Pulls the next decoded frame from FFmpeg, draining at end of input.
    fn decode_next(
        &mut self,
    ) -> std::result::Result<Option<ffmpeg_next::frame::Video>, VideoError> {
        let mut decoded = ffmpeg_next::frame::Video::empty();

        // A packet may yield several frames; drain those first.
        if self.decoder.receive_frame(&mut decoded).is_ok() {
            return Ok(Some(decoded));
        }
        if self.eof_sent {
            return Ok(None);
        }

        let video_stream_index = self.video_stream_index;
        loop {
            let packet = self
                .input_context
                .packets()
                .find(|(stream, _)| stream.index() == video_stream_index)
                .map(|(_, packet)| packet);

            match packet {
                Some(packet) => {
                    self.decoder.send_packet(&packet).map_err(|e| {
                        VideoError::DecodingFailed(format!("Packet send failed: {e}"))
                    })?;
                    if self.decoder.receive_frame(&mut decoded).is_ok() {
                        return Ok(Some(decoded));
                    }
                }
                None => {
                    self.eof_sent = true;
                    // Nothing more to read; flush buffered frames out of the decoder.
                    if self.decoder.send_eof().is_ok()
                        && self.decoder.receive_frame(&mut decoded).is_ok()
                    {
                        return Ok(Some(decoded));
                    }
                    return Ok(None);
                }
            }
        }
    }

    fn pts_secs(&self, frame: &ffmpeg_next::frame::Video) -> Option<f64> {
        frame.timestamp().map(|pts| pts as f64 * self.time_base_f64)
    }

    fn to_rgba(
        &mut self,
        frame: &ffmpeg_next::frame::Video,
    ) -> std::result::Result<RgbaImage, VideoError> {
        let mut rgba_frame = ffmpeg_next::frame::Video::empty();
        self.scaler
            .run(frame, &mut rgba_frame)
            .map_err(|e| VideoError::DecodingFailed(format!("Scaling failed: {e}")))?;

        let width = rgba_frame.width();
        let height = rgba_frame.height();
        RgbaImage::from_raw(width, height, extract_rgba_data(&rgba_frame)).ok_or_else(|| {
            VideoError::DecodingFailed(format!("Short RGBA buffer for {width}x{height} frame"))
        })
    }
}

/// Extracts RGBA data from a scaled frame, handling stride correctly.
fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let data = frame.data(0);
    let stride = frame.stride(0);

    let mut rgba_bytes = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        let row_start = y * stride;
        let row_end = row_start + width * 4;
        rgba_bytes.extend_from_slice(&data[row_start..row_end]);
    }

    rgba_bytes
}

impl FrameSource for FfmpegFrameSource {
    fn info(&self) -> StreamInfo {
        self.info
    }

    fn read_frame(&mut self) -> std::result::Result<Option<RgbaImage>, VideoError> {
        let frame = match self.pending.take() {
            Some(frame) => frame,
            None => match self.decode_next()? {
                Some(frame) => frame,
                None => return Ok(None),
            },
        };

        let image = self.to_rgba(&frame)?;
        self.cursor += 1;
        Ok(Some(image))
    }

    fn seek_frame(&mut self, frame: u64) -> std::result::Result<(), VideoError> {
        let target_secs = frame as f64 / self.exact_fps;
        // Convert seconds to AV_TIME_BASE (microseconds); RangeTo lets FFmpeg
        // land on the keyframe before the target.
        let timestamp = (target_secs * 1_000_000.0) as i64;
        self.input_context
            .seek(timestamp, ..timestamp)
            .map_err(|e| VideoError::DecodingFailed(format!("Seek failed: {e}")))?;
        self.decoder.flush();
        self.pending = None;
        self.eof_sent = false;
        self.cursor = frame;

        if frame == 0 {
            return Ok(());
        }

        // Half a frame of slack absorbs PTS rounding.
        let half_frame = 0.5 / self.exact_fps;
        let mut skipped = 0;
        while let Some(decoded) = self.decode_next()? {
            let reached = self
                .pts_secs(&decoded)
                .is_none_or(|pts| pts + half_frame >= target_secs);
            if reached {
                self.pending = Some(decoded);
                break;
            }
            skipped += 1;
            if skipped >= MAX_SEEK_FRAMES {
                log::warn!("Seek to frame {frame} gave up after {skipped} frames");
                break;
            }
        }
        Ok(())
    }

    fn position(&self) -> u64 {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_fails_for_nonexistent_file() {
        assert!(FfmpegFrameSource::open("/nonexistent/video.mp4").is_err());
    }

    #[test]
    fn open_fails_for_garbage_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let video_path = temp_dir.path().join("fake.mp4");
        std::fs::write(&video_path, b"fake video data").unwrap();

        assert!(FfmpegFrameSource::open(&video_path).is_err());
    }

    #[test]
    fn reads_and_seeks_sample_when_present() {
        let path = "tests/data/sample.mp4";
        if !std::path::Path::new(path).exists() {
            return;
        }

        let mut source = FfmpegFrameSource::open(path).unwrap();
        let info = source.info();
        let first = source.read_frame().unwrap().expect("first frame");
        assert_eq!(first.dimensions(), (info.width, info.height));
        assert_eq!(source.position(), 1);

        source.seek_frame(0).unwrap();
        assert_eq!(source.position(), 0);
        assert!(source.read_frame().unwrap().is_some());
    }
}
