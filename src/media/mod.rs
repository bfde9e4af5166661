// SPDX-License-Identifier: MPL-2.0
//! Media handling: file selection, stream probing and frame filters.

pub mod filter;
pub mod video;

pub use filter::FilterMode;
pub use video::{probe_stream_info, StreamInfo};

use crate::error::VideoError;
use std::path::{Path, PathBuf};

/// Centralized supported file extensions.
pub mod extensions {
    /// Supported video container extensions (lowercase, without dot).
    pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv"];

    /// Checks if an extension (without dot, any case) is a supported container.
    #[must_use]
    pub fn is_supported_video_extension(ext: &str) -> bool {
        VIDEO_EXTENSIONS.contains(&ext.to_lowercase().as_str())
    }
}

pub use extensions::VIDEO_EXTENSIONS;

/// Title of the open-file dialog.
const OPEN_DIALOG_TITLE: &str = "Select a Video File";

/// Title of the error dialog shown for rejected files.
const UNSUPPORTED_DIALOG_TITLE: &str = "Unsupported File";

/// Per-container filters shown in the open dialog, followed by "All Files".
const DIALOG_FILTERS: &[(&str, &str)] = &[
    ("MP4 files", "mp4"),
    ("AVI files", "avi"),
    ("MOV files", "mov"),
    ("MKV files", "mkv"),
];

/// Checks that a selected path has a supported video extension.
///
/// The error carries the offending extension with its leading dot, lowercased
/// (empty when the file has no extension).
///
/// # Examples
///
/// ```
/// use iced_reel::media::validate_video_path;
/// use std::path::Path;
///
/// assert!(validate_video_path(Path::new("clip.MKV")).is_ok());
/// assert!(validate_video_path(Path::new("notes.txt")).is_err());
/// ```
pub fn validate_video_path(path: &Path) -> Result<(), VideoError> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if extensions::is_supported_video_extension(&extension) {
        Ok(())
    } else if extension.is_empty() {
        Err(VideoError::UnsupportedFormat(String::new()))
    } else {
        Err(VideoError::UnsupportedFormat(format!(".{extension}")))
    }
}

/// Resolves the outcome of the open dialog into a playable path.
///
/// - `None` (user cancelled) yields `Ok(None)`
/// - an unsupported extension yields the validation error
pub fn resolve_selection(picked: Option<PathBuf>) -> Result<Option<PathBuf>, VideoError> {
    let Some(path) = picked else {
        return Ok(None);
    };
    validate_video_path(&path)?;
    Ok(Some(path))
}

/// Shows the native open dialog and validates the selection.
///
/// Returns `Ok(None)` when the user cancels. On an unsupported extension a
/// modal error dialog is shown before the error is returned.
pub fn select_video_file() -> Result<Option<PathBuf>, VideoError> {
    let mut dialog = rfd::FileDialog::new().set_title(OPEN_DIALOG_TITLE);
    for (name, ext) in DIALOG_FILTERS {
        dialog = dialog.add_filter(*name, &[*ext]);
    }
    dialog = dialog.add_filter("All Files", &["*"]);

    let picked = dialog.pick_file();
    match resolve_selection(picked) {
        Err(err) => {
            show_error(UNSUPPORTED_DIALOG_TITLE, &err.to_string());
            Err(err)
        }
        ok => ok,
    }
}

/// Shows a blocking modal error dialog.
pub fn show_error(title: &str, message: &str) {
    let _ = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_supported_extension() {
        for ext in VIDEO_EXTENSIONS {
            let path = PathBuf::from(format!("movie.{ext}"));
            assert!(validate_video_path(&path).is_ok(), "{ext} should be accepted");
        }
    }

    #[test]
    fn accepts_uppercase_extension() {
        assert!(validate_video_path(Path::new("/tmp/HOLIDAY.MP4")).is_ok());
        assert!(validate_video_path(Path::new("clip.Mov")).is_ok());
    }

    #[test]
    fn rejects_unsupported_extension_with_dotted_name() {
        let err = validate_video_path(Path::new("song.mp3")).unwrap_err();
        assert_eq!(err, VideoError::UnsupportedFormat(".mp3".into()));
    }

    #[test]
    fn rejects_missing_extension() {
        let err = validate_video_path(Path::new("README")).unwrap_err();
        assert_eq!(err, VideoError::UnsupportedFormat(String::new()));
        assert_eq!(
            err.to_string(),
            "Error: '' is not a supported video format."
        );
    }

    #[test]
    fn rejects_webm_even_though_ffmpeg_could_play_it() {
        assert!(validate_video_path(Path::new("clip.webm")).is_err());
    }

    #[test]
    fn cancelled_selection_yields_no_path() {
        assert_eq!(resolve_selection(None), Ok(None));
    }

    #[test]
    fn valid_selection_is_returned() {
        let path = PathBuf::from("a/b/c.avi");
        assert_eq!(resolve_selection(Some(path.clone())), Ok(Some(path)));
    }

    #[test]
    fn invalid_selection_is_an_error() {
        assert!(resolve_selection(Some(PathBuf::from("x.gif"))).is_err());
    }

    #[test]
    fn dialog_filters_cover_supported_extensions() {
        let exts: Vec<&str> = DIALOG_FILTERS.iter().map(|(_, ext)| *ext).collect();
        assert_eq!(exts, VIDEO_EXTENSIONS);
    }
}
