// SPDX-License-Identifier: MPL-2.0
//! Message handling for the application.
//!
//! Every arm runs synchronously on the GUI thread; transport actions take
//! effect before the next tick.

use super::{App, Message};
use crate::ui::controls;
use crate::video_player::TickOutcome;
use iced::Task;

/// Applies one message to the application state.
pub fn handle(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Tick(_) => {
            match app.session.tick() {
                TickOutcome::Presented => app.refresh_frame_handle(),
                TickOutcome::Looped | TickOutcome::Idle => {}
            }
            Task::none()
        }
        Message::Controls(msg) => {
            handle_controls(app, msg);
            Task::none()
        }
        Message::WindowCloseRequested(_id) => {
            app.session.shutdown();
            iced::exit()
        }
    }
}

fn handle_controls(app: &mut App, message: controls::Message) {
    match message {
        controls::Message::TogglePlayback => app.session.toggle_play_pause(),
        controls::Message::SeekBack => app.session.seek_back(),
        controls::Message::SeekForward => app.session.seek_forward(),
        controls::Message::ScrubPreview(value) => app.session.preview_scrub(value),
        controls::Message::ScrubReleased => app.session.commit_scrub(),
        controls::Message::FilterSelected(filter) => {
            log::debug!("Filter set to {filter}");
            app.session.set_filter(filter);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Flags;
    use crate::config::PlayerConfig;
    use crate::media::FilterMode;
    use crate::test_utils::{assert_abs_diff_eq, fake_session};
    use crate::video_player::{PAUSE_GLYPH, PLAY_GLYPH};

    fn app() -> App {
        App::new(Flags {
            session: fake_session(500, false),
            config: PlayerConfig::default(),
        })
    }

    fn send(app: &mut App, msg: controls::Message) {
        let _ = handle(app, Message::Controls(msg));
    }

    #[test]
    fn scrub_drag_then_release_moves_session() {
        let mut app = app();
        send(&mut app, controls::Message::ScrubPreview(125.0));
        assert_eq!(app.session.position(), 0);
        assert_eq!(app.session.scrub_position(), 125);

        send(&mut app, controls::Message::ScrubReleased);
        assert_eq!(app.session.position(), 125);
        assert_abs_diff_eq!(app.session.audio_position_secs(), 5.0);
    }

    #[test]
    fn filter_selection_reaches_session() {
        let mut app = app();
        send(&mut app, controls::Message::FilterSelected(FilterMode::Greyscale));
        assert_eq!(app.session.filter(), FilterMode::Greyscale);
    }

    #[test]
    fn transport_buttons_reach_session() {
        let mut app = app();
        send(&mut app, controls::Message::TogglePlayback);
        assert!(app.session.is_playing());
        assert_eq!(app.session.play_pause_glyph(), PAUSE_GLYPH);

        send(&mut app, controls::Message::SeekForward);
        assert_eq!(app.session.position(), 30);
        send(&mut app, controls::Message::SeekBack);
        assert_eq!(app.session.position(), 0);

        send(&mut app, controls::Message::TogglePlayback);
        assert_eq!(app.session.play_pause_glyph(), PLAY_GLYPH);
    }

    #[test]
    fn tick_presents_frame_handle_while_playing() {
        let mut app = app();
        let _ = handle(&mut app, Message::Tick(std::time::Instant::now()));
        assert!(app.frame_handle.is_none());

        send(&mut app, controls::Message::TogglePlayback);
        let _ = handle(&mut app, Message::Tick(std::time::Instant::now()));
        assert!(app.frame_handle.is_some());
        assert_eq!(app.session.position(), 1);
    }
}
