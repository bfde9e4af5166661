// SPDX-License-Identifier: MPL-2.0
//! Audio clocks: FFmpeg-decoded playback and a silent fallback.
//!
//! [`FfmpegAudioPlayer`] decodes the best audio stream of a file and keeps the
//! output queue topped up to a small lookahead on every poll. Its position is
//! the seek base plus what the device has actually played, so video can be
//! paced against what the listener hears.
//!
//! [`SilentClock`] stands in when a file has no audio stream or no output
//! device is available. It measures wall-clock time while running.

use std::path::Path;
use std::time::Instant;

use crate::application::port::{AudioChunk, AudioClock};
use crate::config::AUDIO_LOOKAHEAD_SECS;
use crate::error::VideoError;
use crate::media::video::init_ffmpeg;

use super::audio_output::AudioOutput;

/// Maximum number of decoded frames discarded while landing on a seek target.
const MAX_SEEK_FRAMES: u32 = 1000;

/// Upper bound on frames decoded in one poll, so a tick never stalls.
const MAX_FRAMES_PER_POLL: usize = 64;

/// Decodes a file's audio stream into the default output device.
pub struct FfmpegAudioPlayer {
    input_context: ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Audio,
    resampler: ffmpeg_next::software::resampling::Context,
    audio_stream_index: usize,
    time_base_f64: f64,
    output: AudioOutput,
    /// Channel count produced by the resampler.
    resampled_channels: u16,
    /// Position the played-sample counter is measured from.
    base_secs: f64,
    /// Frames ending before this time are dropped after a seek.
    seek_target_secs: Option<f64>,
    seek_frames_skipped: u32,
    eof_sent: bool,
    exhausted: bool,
}

impl FfmpegAudioPlayer {
    /// Opens the audio stream of `path` and the default output device.
    ///
    /// The output starts paused at position 0.
    ///
    /// # Errors
    ///
    /// Returns [`VideoError::NoAudioStream`] when the file carries no audio,
    /// [`VideoError::AudioOutput`] when no device can be opened, or a decoding
    /// error when the stream cannot be prepared.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, VideoError> {
        init_ffmpeg().map_err(|e| VideoError::Other(e.to_string()))?;

        let input_context = ffmpeg_next::format::input(&path)
            .map_err(|e| VideoError::from_message(&format!("Failed to open video: {e}")))?;

        let input = input_context
            .streams()
            .best(ffmpeg_next::media::Type::Audio)
            .ok_or(VideoError::NoAudioStream)?;
        let audio_stream_index = input.index();

        let time_base = input.time_base();
        let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(input.parameters()).map_err(
                |e| VideoError::DecodingFailed(format!("Failed to create codec context: {e}")),
            )?;
        let decoder = context_decoder.decoder().audio().map_err(|e| {
            VideoError::DecodingFailed(format!("Failed to create audio decoder: {e}"))
        })?;

        let output = AudioOutput::new()?;

        // The resampler converts to packed f32 at the device rate.
        // Anything wider than stereo is downmixed.
        let (output_layout, resampled_channels) = match output.channels() {
            1 => (ffmpeg_next::ChannelLayout::MONO, 1),
            _ => (ffmpeg_next::ChannelLayout::STEREO, 2),
        };
        let resampler = ffmpeg_next::software::resampling::Context::get(
            decoder.format(),
            decoder.channel_layout(),
            decoder.rate(),
            ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Packed),
            output_layout,
            output.sample_rate(),
        )
        .map_err(|e| VideoError::DecodingFailed(format!("Failed to create resampler: {e}")))?;

        log::info!(
            "Audio stream: {} Hz, {} channels -> device {} Hz, {} channels",
            decoder.rate(),
            decoder.channels(),
            output.sample_rate(),
            output.channels()
        );

        Ok(Self {
            input_context,
            decoder,
            resampler,
            audio_stream_index,
            time_base_f64,
            output,
            resampled_channels,
            base_secs: 0.0,
            seek_target_secs: None,
            seek_frames_skipped: 0,
            eof_sent: false,
            exhausted: false,
        })
    }

    /// Pulls the next decoded audio frame, draining the decoder at EOF.
    fn decode_next(&mut self) -> Option<ffmpeg_next::frame::Audio> {
        let mut decoded = ffmpeg_next::frame::Audio::empty();
        if self.decoder.receive_frame(&mut decoded).is_ok() {
            return Some(decoded);
        }
        if self.eof_sent {
            return None;
        }

        let audio_stream_index = self.audio_stream_index;
        loop {
            let packet = self
                .input_context
                .packets()
                .find(|(stream, _)| stream.index() == audio_stream_index)
                .map(|(_, packet)| packet);

            let Some(packet) = packet else {
                self.eof_sent = true;
                if self.decoder.send_eof().is_ok()
                    && self.decoder.receive_frame(&mut decoded).is_ok()
                {
                    return Some(decoded);
                }
                return None;
            };

            if let Err(e) = self.decoder.send_packet(&packet) {
                log::warn!("Audio packet failed: {e}");
                continue;
            }
            if self.decoder.receive_frame(&mut decoded).is_ok() {
                return Some(decoded);
            }
        }
    }

    /// Resamples one frame and queues it. Returns `None` when it was
    /// skipped for seeking or could not be converted.
    fn queue_frame(&mut self, decoded: &ffmpeg_next::frame::Audio) -> Option<AudioChunk> {
        let mut resampled = ffmpeg_next::frame::Audio::empty();
        if let Err(e) = self.resampler.run(decoded, &mut resampled) {
            log::warn!("Resampling failed: {e}");
            return None;
        }

        let samples = extract_samples(&resampled, self.resampled_channels);
        let frames = samples.len() / usize::from(self.resampled_channels);
        let pts_secs = decoded
            .timestamp()
            .map_or(self.base_secs, |pts| pts as f64 * self.time_base_f64);

        if let Some(target) = self.seek_target_secs {
            let duration = frames as f64 / f64::from(self.output.sample_rate());
            if pts_secs + duration < target {
                self.seek_frames_skipped += 1;
                if self.seek_frames_skipped >= MAX_SEEK_FRAMES {
                    log::warn!("Audio seek timeout: target may be beyond end of file");
                    self.seek_target_secs = None;
                }
                return None;
            }
            self.seek_target_secs = None;
        }

        let accepted = self.output.queue_samples(&samples, self.resampled_channels);
        Some(AudioChunk {
            pts_secs,
            frames: accepted,
        })
    }
}

impl AudioClock for FfmpegAudioPlayer {
    fn poll_frame(&mut self) -> Option<AudioChunk> {
        let mut last = None;
        for _ in 0..MAX_FRAMES_PER_POLL {
            if self.exhausted || self.output.buffered_secs() >= AUDIO_LOOKAHEAD_SECS {
                break;
            }
            match self.decode_next() {
                Some(decoded) => {
                    if let Some(chunk) = self.queue_frame(&decoded) {
                        last = Some(chunk);
                    }
                }
                None => {
                    log::debug!("Audio stream exhausted");
                    self.exhausted = true;
                }
            }
        }
        last
    }

    fn seek(&mut self, target_secs: f64) -> Result<(), VideoError> {
        let target_secs = target_secs.max(0.0);
        let timestamp = (target_secs * 1_000_000.0) as i64;

        self.output.clear();
        self.base_secs = target_secs;
        self.seek_frames_skipped = 0;
        self.seek_target_secs = (target_secs > 0.0).then_some(target_secs);
        self.eof_sent = false;
        self.exhausted = false;

        self.input_context
            .seek(timestamp, ..timestamp)
            .map_err(|e| VideoError::DecodingFailed(format!("Audio seek failed: {e}")))?;
        self.decoder.flush();
        Ok(())
    }

    fn set_paused(&mut self, paused: bool) {
        self.output.set_paused(paused);
    }

    fn position_secs(&self) -> f64 {
        self.base_secs + self.output.played_secs()
    }
}

/// Extracts f32 samples from a resampled packed audio frame.
fn extract_samples(frame: &ffmpeg_next::frame::Audio, channels: u16) -> Vec<f32> {
    let data = frame.data(0);
    let sample_count = frame.samples() * channels as usize;

    data.chunks_exact(4)
        .take(sample_count)
        .map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect()
}

/// Wall-clock stand-in used when there is nothing to hear.
///
/// Starts paused at position 0, like the real player.
#[derive(Debug, Default)]
pub struct SilentClock {
    base_secs: f64,
    running_since: Option<Instant>,
}

impl SilentClock {
    /// Creates a paused clock at position 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn elapsed_secs(&self) -> f64 {
        self.running_since
            .map_or(0.0, |start| start.elapsed().as_secs_f64())
    }
}

impl AudioClock for SilentClock {
    fn poll_frame(&mut self) -> Option<AudioChunk> {
        None
    }

    fn seek(&mut self, target_secs: f64) -> Result<(), VideoError> {
        self.base_secs = target_secs.max(0.0);
        if self.running_since.is_some() {
            self.running_since = Some(Instant::now());
        }
        Ok(())
    }

    fn set_paused(&mut self, paused: bool) {
        match (paused, self.running_since) {
            (true, Some(_)) => {
                self.base_secs += self.elapsed_secs();
                self.running_since = None;
            }
            (false, None) => self.running_since = Some(Instant::now()),
            _ => {}
        }
    }

    fn position_secs(&self) -> f64 {
        self.base_secs + self.elapsed_secs()
    }
}
