// SPDX-License-Identifier: MPL-2.0
use iced_reel::app::{self, Flags};
use iced_reel::config::PlayerConfig;
use iced_reel::media;
use iced_reel::video_player;
use std::process::ExitCode;

/// Title of the error dialog shown when a valid-looking file fails to open.
const OPEN_FAILED_TITLE: &str = "Unable to Open Video";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("iced_reel=info"))
        .init();

    let config = PlayerConfig::from_env();

    let path = match media::select_video_file() {
        Ok(Some(path)) => path,
        Ok(None) => {
            log::info!("No file selected");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("Selected {}", path.display());

    let session = match video_player::open_session(&path, &config) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Failed to open {}: {e}", path.display());
            media::show_error(OPEN_FAILED_TITLE, &e.to_string());
            return ExitCode::FAILURE;
        }
    };

    match app::run(Flags { session, config }) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Application error: {e}");
            ExitCode::FAILURE
        }
    }
}
