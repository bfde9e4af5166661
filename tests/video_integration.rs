// SPDX-License-Identifier: MPL-2.0
//! Integration tests against real video files.
//!
//! Fixtures live in `tests/data/`; each test returns early when its file is
//! missing so the suite runs on machines without them.

use iced_reel::application::port::FrameSource;
use iced_reel::config::PlayerConfig;
use iced_reel::infrastructure::FfmpegFrameSource;
use iced_reel::media::{probe_stream_info, validate_video_path};
use iced_reel::video_player::{open_session, TickOutcome};
use std::path::Path;

const SAMPLES: &[&str] = &[
    "tests/data/sample.mp4",
    "tests/data/sample.avi",
    "tests/data/sample.mov",
    "tests/data/sample.mkv",
];

fn existing_samples() -> impl Iterator<Item = &'static Path> {
    SAMPLES.iter().map(Path::new).filter(|p| p.exists())
}

#[test]
fn test_samples_pass_validation() {
    for path in SAMPLES {
        assert!(validate_video_path(Path::new(path)).is_ok(), "{path}");
    }
}

#[test]
fn test_probe_reports_dimensions_and_rate() {
    for path in existing_samples() {
        let info = probe_stream_info(path).unwrap();
        assert!(info.width > 0, "{}", path.display());
        assert!(info.height > 0, "{}", path.display());
        assert!(info.fps >= 1, "{}", path.display());
        assert!(info.total_frames > 0, "{}", path.display());
    }
}

#[test]
fn test_frame_source_reads_at_intrinsic_size() {
    for path in existing_samples() {
        let mut source = FfmpegFrameSource::open(path).unwrap();
        let info = source.info();
        for expected_position in 1..=5 {
            let frame = source
                .read_frame()
                .unwrap()
                .expect("sample should have at least five frames");
            assert_eq!(frame.dimensions(), (info.width, info.height));
            assert_eq!(source.position(), expected_position);
        }
    }
}

#[test]
fn test_frame_source_seek_moves_cursor() {
    for path in existing_samples() {
        let mut source = FfmpegFrameSource::open(path).unwrap();
        let target = source.info().total_frames / 2;
        source.seek_frame(target).unwrap();
        assert_eq!(source.position(), target);
        assert!(source.read_frame().unwrap().is_some());
        assert_eq!(source.position(), target + 1);
    }
}

#[test]
fn test_frame_source_reaches_end_of_stream() {
    let path = Path::new("tests/data/sample.mp4");
    if !path.exists() {
        return;
    }

    let mut source = FfmpegFrameSource::open(path).unwrap();
    let total = source.info().total_frames;
    let mut read = 0u64;
    while source.read_frame().unwrap().is_some() {
        read += 1;
        assert!(read <= total + 10, "decoder should stop near the declared frame count");
    }
    assert!(read > 0);
}

#[test]
fn test_session_plays_sample_file() {
    let path = Path::new("tests/data/sample.mp4");
    if !path.exists() {
        return;
    }

    let config = PlayerConfig::default();
    let mut session = open_session(path, &config).unwrap();
    assert_eq!(session.tick(), TickOutcome::Idle);

    session.toggle_play_pause();
    assert_eq!(session.tick(), TickOutcome::Presented);
    let frame = session.current_frame().unwrap();
    assert_eq!(frame.dimensions(), (900, 506));
    session.shutdown();
}

#[test]
fn test_garbage_file_with_valid_extension_fails_to_open() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("broken.mkv");
    std::fs::write(&path, b"definitely not matroska").unwrap();

    assert!(validate_video_path(&path).is_ok());
    assert!(open_session(&path, &PlayerConfig::default()).is_err());
}
