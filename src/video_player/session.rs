// SPDX-License-Identifier: MPL-2.0
//! Playback session: one open file, its transport state, and the render tick.
//!
//! The session owns a [`FrameSource`] and an [`AudioClock`] opened on the same
//! file. Everything runs on the caller's thread: the GUI calls [`tick`] on a
//! timer and the transport methods on user input.
//!
//! # Invariants
//!
//! - `position` stays within `0..=total_frames`
//! - a scrub preview only moves the bar and label; the clocks move on commit
//! - nothing is read or polled while paused
//! - after every seek the audio clock sits at `position / fps` seconds
//!
//! [`tick`]: PlaybackSession::tick

use std::path::{Path, PathBuf};

use image_rs::RgbaImage;

use super::audio::{FfmpegAudioPlayer, SilentClock};
use super::time_units::{progress_label, INITIAL_LABEL};
use crate::application::port::{AudioClock, FrameSource};
use crate::config::{PlayerConfig, SCRUB_SETTLE_TICKS};
use crate::error::{Result, VideoError};
use crate::infrastructure::ffmpeg::FfmpegFrameSource;
use crate::media::filter::{to_display, FilterMode};
use crate::media::StreamInfo;

/// Frame ready for presentation: filtered and scaled to the canvas size.
pub type DisplayFrame = RgbaImage;

/// What a call to [`PlaybackSession::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused; nothing was read.
    Idle,
    /// A new frame was decoded and stored for display.
    Presented,
    /// The source ran dry and playback wrapped to frame 0.
    Looped,
}

/// Glyph on the play/pause button while paused.
pub const PLAY_GLYPH: &str = "▶";
/// Glyph on the play/pause button while playing.
pub const PAUSE_GLYPH: &str = "⏸";

/// Scrub bar value held while the slider is dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScrubPreview {
    frame: u64,
    idle_ticks: u32,
}

/// A playing (or paused) video file.
pub struct PlaybackSession {
    path: PathBuf,
    source: Box<dyn FrameSource>,
    audio: Box<dyn AudioClock>,
    info: StreamInfo,
    filter: FilterMode,
    is_playing: bool,
    position: u64,
    display_width: u32,
    display_height: u32,
    seek_step: u64,
    frame: Option<DisplayFrame>,
    label: String,
    scrub_preview: Option<ScrubPreview>,
}

impl std::fmt::Debug for PlaybackSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSession")
            .field("path", &self.path)
            .field("info", &self.info)
            .field("filter", &self.filter)
            .field("is_playing", &self.is_playing)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl PlaybackSession {
    /// Builds a paused session at frame 0 from already-opened parts.
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        source: Box<dyn FrameSource>,
        mut audio: Box<dyn AudioClock>,
        config: &PlayerConfig,
    ) -> Self {
        audio.set_paused(true);
        let info = source.info();
        Self {
            path: path.into(),
            source,
            audio,
            info,
            filter: FilterMode::default(),
            is_playing: false,
            position: 0,
            display_width: config.display.width,
            display_height: config.display.height,
            seek_step: config.seek_step_frames,
            frame: None,
            label: INITIAL_LABEL.to_string(),
            scrub_preview: None,
        }
    }

    /// Advances playback by one frame if playing.
    ///
    /// The audio clock is polled on every playing tick, whether or not a
    /// video frame comes back. A read that yields nothing (end of stream or
    /// a decode error) rewinds both clocks to the start.
    ///
    /// A scrub preview left unchanged for [`SCRUB_SETTLE_TICKS`] ticks is
    /// committed first, playing or not.
    pub fn tick(&mut self) -> TickOutcome {
        self.settle_scrub_preview();

        if !self.is_playing {
            return TickOutcome::Idle;
        }

        let read = self.source.read_frame();
        self.audio.poll_frame();

        match read {
            Ok(Some(frame)) => {
                let filtered = self.filter.apply(&frame);
                self.frame = Some(to_display(
                    &filtered,
                    self.display_width,
                    self.display_height,
                ));
                self.position = self.source.position().min(self.info.total_frames);
                self.refresh_label();
                TickOutcome::Presented
            }
            Ok(None) => {
                log::debug!("End of stream at frame {}, looping", self.position);
                self.rewind();
                TickOutcome::Looped
            }
            Err(e) => {
                log::warn!("Decode failed at frame {}: {e}; looping", self.position);
                self.rewind();
                TickOutcome::Looped
            }
        }
    }

    /// Flips between playing and paused, pausing or resuming audio to match.
    pub fn toggle_play_pause(&mut self) {
        self.is_playing = !self.is_playing;
        self.audio.set_paused(!self.is_playing);
        log::debug!(
            "{} at frame {}",
            if self.is_playing { "Playing" } else { "Paused" },
            self.position
        );
    }

    /// Glyph for the play/pause button.
    #[must_use]
    pub fn play_pause_glyph(&self) -> &'static str {
        if self.is_playing {
            PAUSE_GLYPH
        } else {
            PLAY_GLYPH
        }
    }

    /// Jumps back by the seek step, stopping at frame 0.
    pub fn seek_back(&mut self) {
        self.seek_to(self.position.saturating_sub(self.seek_step));
    }

    /// Jumps forward by the seek step, stopping at the last frame.
    pub fn seek_forward(&mut self) {
        self.seek_to(self.position.saturating_add(self.seek_step));
    }

    /// Jumps to a scrub bar value, truncated to a whole frame.
    pub fn scrub(&mut self, value: f64) {
        self.seek_to(frame_from_slider(value));
    }

    /// Records a slider value during a drag without seeking.
    ///
    /// The bar and label follow the preview until [`commit_scrub`] runs.
    ///
    /// [`commit_scrub`]: Self::commit_scrub
    pub fn preview_scrub(&mut self, value: f64) {
        let frame = frame_from_slider(value).min(self.info.total_frames);
        self.scrub_preview = Some(ScrubPreview {
            frame,
            idle_ticks: 0,
        });
        self.refresh_label();
    }

    /// Seeks to the pending scrub preview, if any.
    pub fn commit_scrub(&mut self) {
        if let Some(preview) = self.scrub_preview.take() {
            self.seek_to(preview.frame);
        }
    }

    /// Selects the filter applied from the next tick on.
    pub fn set_filter(&mut self, filter: FilterMode) {
        self.filter = filter;
    }

    /// Pauses audio ahead of teardown.
    pub fn shutdown(&mut self) {
        self.is_playing = false;
        self.audio.set_paused(true);
        log::info!("Closing {}", self.path.display());
    }

    /// Source file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn info(&self) -> StreamInfo {
        self.info
    }

    #[must_use]
    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Current frame index.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Scrub bar value: the pending preview, else the current frame.
    #[must_use]
    pub fn scrub_position(&self) -> u64 {
        self.scrub_preview.map_or(self.position, |preview| preview.frame)
    }

    /// Elapsed/total label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Last presented frame, if any.
    #[must_use]
    pub fn current_frame(&self) -> Option<&DisplayFrame> {
        self.frame.as_ref()
    }

    /// Audio clock position in seconds.
    #[must_use]
    pub fn audio_position_secs(&self) -> f64 {
        self.audio.position_secs()
    }

    fn settle_scrub_preview(&mut self) {
        let Some(preview) = self.scrub_preview.as_mut() else {
            return;
        };
        preview.idle_ticks += 1;
        if preview.idle_ticks >= SCRUB_SETTLE_TICKS {
            log::debug!("Committing scrub to frame {} without release", preview.frame);
            self.commit_scrub();
        }
    }

    fn rewind(&mut self) {
        if let Err(e) = self.source.seek_frame(0) {
            log::warn!("Rewind failed: {e}");
        }
        if let Err(e) = self.audio.seek(0.0) {
            log::warn!("Audio rewind failed: {e}");
        }
        self.position = 0;
        self.refresh_label();
    }

    /// Moves both clocks to `frame`, clamped to the stream. Seek failures are
    /// logged and the cursor moves anyway.
    fn seek_to(&mut self, frame: u64) {
        self.scrub_preview = None;
        let target = frame.min(self.info.total_frames);
        if let Err(e) = self.source.seek_frame(target) {
            log::warn!("Seek to frame {target} failed: {e}");
        }
        if let Err(e) = self.audio.seek(self.info.frame_to_secs(target)) {
            log::warn!("Audio seek to frame {target} failed: {e}");
        }
        self.position = target;
        self.refresh_label();
    }

    fn refresh_label(&mut self) {
        self.label = progress_label(self.scrub_position(), self.info.total_frames, self.info.fps);
    }
}

/// Negative and NaN slider values saturate to 0.
fn frame_from_slider(value: f64) -> u64 {
    value as u64
}

/// Opens `path` for playback, paused at frame 0.
///
/// Audio falls back to a [`SilentClock`] when the file has no audio stream
/// or no output device can be opened.
///
/// # Errors
///
/// Returns an error if the video stream cannot be opened.
pub fn open_session(path: &Path, config: &PlayerConfig) -> Result<PlaybackSession> {
    let source = FfmpegFrameSource::open(path)?;

    let audio: Box<dyn AudioClock> = match FfmpegAudioPlayer::open(path) {
        Ok(player) => Box::new(player),
        Err(VideoError::NoAudioStream) => {
            log::warn!("{} has no audio stream; playing silently", path.display());
            Box::new(SilentClock::new())
        }
        Err(e) => {
            log::warn!("Audio unavailable ({e}); playing silently");
            Box::new(SilentClock::new())
        }
    };

    Ok(PlaybackSession::new(path, Box::new(source), audio, config))
}
