// SPDX-License-Identifier: MPL-2.0
//! Application root state and the iced program wiring.
//!
//! The `App` owns the [`PlaybackSession`] opened before launch and routes the
//! render tick and control messages into it. The window is fixed-size: the
//! canvas on top, the control bar below.

mod message;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config::{self, PlayerConfig};
use crate::video_player::PlaybackSession;
use iced::widget::image::Handle;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

/// Root iced application state.
pub struct App {
    session: PlaybackSession,
    config: PlayerConfig,
    /// Texture handle for the last presented frame, rebuilt once per frame.
    frame_handle: Option<Handle>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("session", &self.session)
            .field("has_frame", &self.frame_handle.is_some())
            .finish()
    }
}

/// Builds the fixed window settings for a configuration.
#[must_use]
pub fn window_settings(config: &PlayerConfig) -> window::Settings {
    window::Settings {
        size: iced::Size::new(
            config.display.width as f32,
            config.window_height() as f32,
        ),
        resizable: false,
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    let settings = window_settings(&flags.config);

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(settings)
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags) -> Self {
        let Flags { session, config } = flags;
        log::info!(
            "Playing {} ({} frames at {} fps)",
            session.path().display(),
            session.info().total_frames,
            session.info().fps
        );
        Self {
            session,
            config,
            frame_handle: None,
        }
    }

    fn title(&self) -> String {
        config::WINDOW_TITLE.to_string()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_tick_subscription(self.config.tick_interval),
            subscription::create_event_subscription(),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::handle(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(&self.session, self.frame_handle.as_ref(), &self.config)
    }

    /// Rebuilds the texture handle from the session's latest frame.
    fn refresh_frame_handle(&mut self) {
        self.frame_handle = self.session.current_frame().map(|frame| {
            Handle::from_rgba(frame.width(), frame.height(), frame.as_raw().clone())
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_fixed_size() {
        let settings = window_settings(&PlayerConfig::default());
        assert_eq!(settings.size, iced::Size::new(900.0, 586.0));
        assert!(!settings.resizable);
        assert!(!settings.exit_on_close_request);
    }
}
