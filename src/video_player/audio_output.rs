// SPDX-License-Identifier: MPL-2.0
//! Audio output using cpal.
//!
//! Decoded samples are pushed into a shared queue that the device callback
//! drains. The callback counts the samples it actually plays so that the
//! queue doubles as the playback clock.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::VideoError;

/// Queue capacity in seconds of audio; extra samples are dropped.
const MAX_BUFFER_SECS: usize = 1;

/// Shared state between the device callback and the player.
struct SharedState {
    /// Pause state; the callback outputs silence while set.
    paused: AtomicBool,

    /// Interleaved samples consumed from the queue since the last clear.
    played_samples: AtomicU64,
}

impl SharedState {
    fn new() -> Self {
        Self {
            paused: AtomicBool::new(true),
            played_samples: AtomicU64::new(0),
        }
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }

    fn played_samples(&self) -> u64 {
        self.played_samples.load(Ordering::Relaxed)
    }

    fn add_played(&self, count: u64) {
        self.played_samples.fetch_add(count, Ordering::Relaxed);
    }

    fn reset_played(&self) {
        self.played_samples.store(0, Ordering::Relaxed);
    }
}

type SampleQueue = Arc<Mutex<VecDeque<f32>>>;

/// Audio output stream on the default device.
///
/// Starts paused with an empty queue.
pub struct AudioOutput {
    queue: SampleQueue,
    shared_state: Arc<SharedState>,
    sample_rate: u32,
    channels: u16,
    max_queued: usize,

    /// The audio stream (kept alive to maintain playback).
    _stream: cpal::Stream,
}

impl AudioOutput {
    /// Opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns [`VideoError::AudioOutput`] if no device is available, its
    /// configuration cannot be read, or the stream fails to start.
    pub fn new() -> Result<Self, VideoError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| VideoError::AudioOutput("No audio output device found".to_string()))?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| VideoError::AudioOutput(format!("Failed to get audio config: {e}")))?;

        let sample_rate = supported_config.sample_rate();
        let channels = supported_config.channels();
        let max_queued = sample_rate as usize * channels as usize * MAX_BUFFER_SECS;

        let queue: SampleQueue = Arc::new(Mutex::new(VecDeque::with_capacity(max_queued)));
        let shared_state = Arc::new(SharedState::new());

        let config: cpal::StreamConfig = supported_config.config();
        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => Self::build_stream::<f32>(
                &device,
                &config,
                Arc::clone(&queue),
                Arc::clone(&shared_state),
            )?,
            cpal::SampleFormat::I16 => Self::build_stream::<i16>(
                &device,
                &config,
                Arc::clone(&queue),
                Arc::clone(&shared_state),
            )?,
            cpal::SampleFormat::U16 => Self::build_stream::<u16>(
                &device,
                &config,
                Arc::clone(&queue),
                Arc::clone(&shared_state),
            )?,
            other => {
                return Err(VideoError::AudioOutput(format!(
                    "Unsupported audio sample format: {other:?}"
                )))
            }
        };

        stream
            .play()
            .map_err(|e| VideoError::AudioOutput(format!("Failed to start audio stream: {e}")))?;

        log::debug!("Audio output ready: {sample_rate} Hz, {channels} channels");

        Ok(Self {
            queue,
            shared_state,
            sample_rate,
            channels,
            max_queued,
            _stream: stream,
        })
    }

    /// Builds an audio output stream for a specific sample format.
    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        queue: SampleQueue,
        shared_state: Arc<SharedState>,
    ) -> Result<cpal::Stream, VideoError> {
        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    let silence = T::from_sample(0.0f32);
                    if shared_state.is_paused() {
                        data.fill(silence);
                        return;
                    }

                    let Ok(mut buf) = queue.lock() else {
                        data.fill(silence);
                        return;
                    };

                    let mut consumed = 0u64;
                    for sample in data.iter_mut() {
                        *sample = match buf.pop_front() {
                            Some(value) => {
                                consumed += 1;
                                // i16 conversion overflows at exactly 1.0.
                                T::from_sample(value.clamp(-1.0, 0.999_999_9))
                            }
                            None => silence,
                        };
                    }
                    shared_state.add_played(consumed);
                },
                |err| {
                    log::error!("Audio output error: {err}");
                },
                None,
            )
            .map_err(|e| VideoError::AudioOutput(format!("Failed to build audio stream: {e}")))
    }

    /// Queues interleaved samples with `source_channels` channels, mapping
    /// them onto the device layout. Returns the number of frames accepted.
    pub fn queue_samples(&self, samples: &[f32], source_channels: u16) -> usize {
        let mapped = remap_channels(samples, source_channels, self.channels);
        let Ok(mut buf) = self.queue.lock() else {
            return 0;
        };
        let room = self.max_queued.saturating_sub(buf.len());
        let accepted = mapped.len().min(room);
        buf.extend(mapped.iter().take(accepted));
        accepted / usize::from(self.channels.max(1))
    }

    /// Discards queued samples and restarts the played-sample counter.
    pub fn clear(&self) {
        if let Ok(mut buf) = self.queue.lock() {
            buf.clear();
        }
        self.shared_state.reset_played();
    }

    /// Pauses (`true`) or resumes (`false`) the device callback.
    pub fn set_paused(&self, paused: bool) {
        self.shared_state.set_paused(paused);
    }

    /// Seconds of audio waiting in the queue.
    #[must_use]
    pub fn buffered_secs(&self) -> f64 {
        let queued = self.queue.lock().map_or(0, |buf| buf.len());
        samples_to_secs(queued as u64, self.sample_rate, self.channels)
    }

    /// Seconds of audio played since the last [`clear`](Self::clear).
    #[must_use]
    pub fn played_secs(&self) -> f64 {
        samples_to_secs(
            self.shared_state.played_samples(),
            self.sample_rate,
            self.channels,
        )
    }

    /// Returns the output sample rate.
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Returns the number of output channels.
    #[must_use]
    pub fn channels(&self) -> u16 {
        self.channels
    }
}

/// Converts an interleaved sample count to seconds.
fn samples_to_secs(samples: u64, sample_rate: u32, channels: u16) -> f64 {
    let per_sec = u64::from(sample_rate) * u64::from(channels);
    if per_sec == 0 {
        return 0.0;
    }
    samples as f64 / per_sec as f64
}

/// Maps interleaved audio onto a device channel count.
///
/// Mono is duplicated to every channel. Extra device channels beyond the
/// source layout are silent, and extra source channels are dropped.
fn remap_channels(samples: &[f32], source: u16, target: u16) -> Vec<f32> {
    let source = usize::from(source.max(1));
    let target = usize::from(target.max(1));
    if source == target {
        return samples.to_vec();
    }

    let frames = samples.len() / source;
    let mut out = Vec::with_capacity(frames * target);
    for frame in samples.chunks_exact(source) {
        for channel in 0..target {
            let value = if source == 1 {
                frame[0]
            } else {
                frame.get(channel).copied().unwrap_or(0.0)
            };
            out.push(value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn shared_state_starts_paused() {
        let state = SharedState::new();
        assert!(state.is_paused());

        state.set_paused(false);
        assert!(!state.is_paused());
    }

    #[test]
    fn shared_state_counts_played_samples() {
        let state = SharedState::new();
        state.add_played(480);
        state.add_played(20);
        assert_eq!(state.played_samples(), 500);

        state.reset_played();
        assert_eq!(state.played_samples(), 0);
    }

    #[test]
    fn samples_to_secs_accounts_for_channels() {
        assert_abs_diff_eq!(samples_to_secs(96_000, 48_000, 2), 1.0);
        assert_relative_eq!(samples_to_secs(4_410, 44_100, 1), 0.1);
        assert_abs_diff_eq!(samples_to_secs(100, 0, 2), 0.0);
    }

    #[test]
    fn remap_same_layout_is_identity() {
        let samples = [0.1, -0.1, 0.2, -0.2];
        assert_eq!(remap_channels(&samples, 2, 2), samples);
    }

    #[test]
    fn remap_mono_to_stereo_duplicates() {
        assert_eq!(remap_channels(&[0.5, -0.5], 1, 2), [0.5, 0.5, -0.5, -0.5]);
    }

    #[test]
    fn remap_stereo_to_surround_pads_with_silence() {
        let out = remap_channels(&[0.1, 0.2], 2, 4);
        assert_eq!(out, [0.1, 0.2, 0.0, 0.0]);
    }

    #[test]
    fn remap_stereo_to_mono_keeps_first_channel() {
        assert_eq!(remap_channels(&[0.3, 0.9, -0.3, -0.9], 2, 1), [0.3, -0.3]);
    }

    #[test]
    #[ignore = "requires audio hardware"]
    fn audio_output_can_be_created() {
        if let Ok(output) = AudioOutput::new() {
            assert!(output.sample_rate() > 0);
            assert!(output.channels() > 0);
            assert_abs_diff_eq!(output.buffered_secs(), 0.0);
            assert_abs_diff_eq!(output.played_secs(), 0.0);
        }
    }
}
