// SPDX-License-Identifier: MPL-2.0
//! Time formatting for the progress label.
//!
//! Positions are whole frames; the label shows whole seconds derived from
//! the stream's integer frame rate.

/// Label shown before the first frame is presented.
pub const INITIAL_LABEL: &str = "00:00 / 00:00";

/// Formats whole seconds as `MM:SS`. Minutes keep counting past 59.
///
/// # Examples
///
/// ```
/// use iced_reel::video_player::time_units::format_time;
///
/// assert_eq!(format_time(0), "00:00");
/// assert_eq!(format_time(65), "01:05");
/// assert_eq!(format_time(3725), "62:05");
/// ```
#[must_use]
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Whole seconds elapsed at `frame`, rounded down.
#[inline]
#[must_use]
pub fn frames_to_secs(frame: u64, fps: u32) -> u64 {
    frame / u64::from(fps.max(1))
}

/// Builds the `MM:SS / MM:SS` label for a position in a stream.
///
/// # Examples
///
/// ```
/// use iced_reel::video_player::time_units::progress_label;
///
/// assert_eq!(progress_label(125, 250, 25), "00:05 / 00:10");
/// ```
#[must_use]
pub fn progress_label(frame: u64, total_frames: u64, fps: u32) -> String {
    format!(
        "{} / {}",
        format_time(frames_to_secs(frame, fps)),
        format_time(frames_to_secs(total_frames, fps))
    )
}
