// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Video(VideoError),
}

/// Specific error types for opening and playing a video file.
/// The `Display` text is what the error dialog shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoError {
    /// File extension is not one of the supported containers.
    /// Holds the extension including its leading dot (or empty).
    UnsupportedFormat(String),

    /// File exists but contains no video stream
    NoVideoStream,

    /// File contains no audio stream
    NoAudioStream,

    /// Decoding failed during playback
    DecodingFailed(String),

    /// The audio output device could not be opened or driven
    AudioOutput(String),

    /// I/O error (file not found, permission denied, etc.)
    IoError(String),

    /// Generic error with raw message
    Other(String),
}

impl VideoError {
    /// Attempts to parse a raw error message into a specific VideoError type.
    /// This is used to categorize errors from FFmpeg.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("no such file")
            || msg_lower.contains("permission denied")
            || msg_lower.contains("i/o error")
        {
            return VideoError::IoError(msg.to_string());
        }

        if msg_lower.contains("no video stream") || msg_lower.contains("invalid data found") {
            return VideoError::NoVideoStream;
        }

        if msg_lower.contains("no audio stream") {
            return VideoError::NoAudioStream;
        }

        if msg_lower.contains("packet")
            || msg_lower.contains("scaling")
            || msg_lower.contains("resampl")
            || msg_lower.contains("seek")
            || msg_lower.contains("decode")
            || msg_lower.contains("codec")
        {
            return VideoError::DecodingFailed(msg.to_string());
        }

        VideoError::Other(msg.to_string())
    }
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::UnsupportedFormat(ext) => {
                write!(f, "Error: '{}' is not a supported video format.", ext)
            }
            VideoError::NoVideoStream => write!(f, "No video stream found"),
            VideoError::NoAudioStream => write!(f, "No audio stream found"),
            VideoError::DecodingFailed(msg) => write!(f, "Decoding failed: {}", msg),
            VideoError::AudioOutput(msg) => write!(f, "Audio output error: {}", msg),
            VideoError::IoError(msg) => write!(f, "I/O error: {}", msg),
            VideoError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Video(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<VideoError> for Error {
    fn from(err: VideoError) -> Self {
        Error::Video(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<ffmpeg_next::Error> for Error {
    fn from(err: ffmpeg_next::Error) -> Self {
        Error::Video(VideoError::from_message(&err.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn unsupported_format_message_names_extension() {
        let err = VideoError::UnsupportedFormat(".txt".into());
        assert_eq!(
            err.to_string(),
            "Error: '.txt' is not a supported video format."
        );
    }

    #[test]
    fn video_error_passes_through_error_display() {
        let err: Error = VideoError::NoVideoStream.into();
        assert_eq!(err.to_string(), "No video stream found");
    }

    #[test]
    fn video_error_from_message_io() {
        let err = VideoError::from_message("No such file or directory");
        assert!(matches!(err, VideoError::IoError(_)));
    }

    #[test]
    fn video_error_from_message_no_stream() {
        let err = VideoError::from_message("Invalid data found when processing input");
        assert_eq!(err, VideoError::NoVideoStream);
    }

    #[test]
    fn video_error_from_message_decoding() {
        let err = VideoError::from_message("Packet send failed: error");
        assert!(matches!(err, VideoError::DecodingFailed(_)));
    }

    #[test]
    fn video_error_from_message_falls_back_to_other() {
        let err = VideoError::from_message("something odd");
        assert_eq!(err, VideoError::Other("something odd".into()));
    }
}
