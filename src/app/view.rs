// SPDX-License-Identifier: MPL-2.0
//! Window layout: the video canvas above the control bar.

use super::Message;
use crate::config::PlayerConfig;
use crate::ui::controls::{self, ControlsState};
use crate::ui::design_tokens::palette;
use crate::video_player::PlaybackSession;
use iced::widget::image::{FilterMethod, Handle};
use iced::widget::{column, container, image, Space};
use iced::{Element, Length};

/// Builds the window contents.
pub fn view<'a>(
    session: &'a PlaybackSession,
    frame: Option<&'a Handle>,
    config: &PlayerConfig,
) -> Element<'a, Message> {
    let width = Length::Fixed(config.display.width as f32);
    let height = Length::Fixed(config.display.height as f32);

    let picture: Element<'a, Message> = match frame {
        Some(handle) => image(handle.clone())
            .width(width)
            .height(height)
            .filter_method(FilterMethod::Linear)
            .into(),
        None => Space::new().width(width).height(height).into(),
    };

    let canvas = container(picture)
        .width(width)
        .height(height)
        .style(|_theme| container::Style {
            background: Some(palette::BLACK.into()),
            ..container::Style::default()
        });

    let controls = controls::view(&ControlsState {
        play_pause_glyph: session.play_pause_glyph(),
        position: session.scrub_position(),
        total_frames: session.info().total_frames,
        label: session.label(),
        filter: session.filter(),
    })
    .map(Message::Controls);

    column![canvas, controls].width(Length::Fill).into()
}
