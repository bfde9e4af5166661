// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! The render tick fires on a fixed interval whether playing or paused; the
//! session decides whether a tick does any work.

use super::Message;
use iced::{event, time, Subscription};
use std::time::Duration;

/// Creates the periodic render tick.
pub fn create_tick_subscription(interval: Duration) -> Subscription<Message> {
    time::every(interval).map(Message::Tick)
}

/// Routes window close requests so the session can shut down first.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, window_id| {
        if let event::Event::Window(iced::window::Event::CloseRequested) = &event {
            return Some(Message::WindowCloseRequested(window_id));
        }
        None
    })
}
