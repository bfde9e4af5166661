// SPDX-License-Identifier: MPL-2.0
//! Playback control bar.
//!
//! A full-width scrub slider above a row holding the filter dropdown, the
//! transport buttons and the elapsed/total label.

use crate::media::FilterMode;
use crate::ui::design_tokens::{sizing, spacing, typography};
use iced::alignment::Horizontal;
use iced::widget::{button, column, container, pick_list, row, slider, text, Row};
use iced::{Alignment, Element, Length};

/// Glyph on the seek back button.
pub const SEEK_BACK_GLYPH: &str = "⏪";
/// Glyph on the seek forward button.
pub const SEEK_FORWARD_GLYPH: &str = "⏩";

/// Messages emitted by the control bar.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Play/pause button pressed.
    TogglePlayback,

    /// Seek back button pressed.
    SeekBack,

    /// Seek forward button pressed.
    SeekForward,

    /// Scrub slider dragged; value in frames.
    ScrubPreview(f64),

    /// Scrub slider released.
    ScrubReleased,

    /// Filter picked from the dropdown.
    FilterSelected(FilterMode),
}

/// Snapshot of the session needed to draw the controls.
#[derive(Debug, Clone)]
pub struct ControlsState<'a> {
    pub play_pause_glyph: &'static str,
    /// Slider value: the drag preview while dragging, else the current frame.
    pub position: u64,
    pub total_frames: u64,
    pub label: &'a str,
    pub filter: FilterMode,
}

/// Renders the control bar.
pub fn view<'a>(state: &ControlsState<'a>) -> Element<'a, Message> {
    // Dragging only previews; the seek happens on release.
    let scrub_bar = slider(
        0.0..=state.total_frames as f64,
        state.position as f64,
        Message::ScrubPreview,
    )
    .on_release(Message::ScrubReleased)
    .step(1.0)
    .width(Length::Fill);

    let filter_picker = pick_list(
        FilterMode::ALL,
        Some(state.filter),
        Message::FilterSelected,
    )
    .text_size(typography::BODY)
    .width(Length::Fixed(sizing::FILTER_PICKER_WIDTH));

    let transport: Row<'a, Message> = row![
        transport_button(SEEK_BACK_GLYPH, Message::SeekBack),
        transport_button(state.play_pause_glyph, Message::TogglePlayback),
        transport_button(SEEK_FORWARD_GLYPH, Message::SeekForward),
    ]
    .spacing(spacing::XS)
    .align_y(Alignment::Center);

    let time_label = text(state.label).size(typography::BODY);

    let bottom_row = row![
        container(filter_picker)
            .width(Length::Fill)
            .align_x(Horizontal::Left),
        transport,
        container(time_label)
            .width(Length::Fill)
            .align_x(Horizontal::Right),
    ]
    .align_y(Alignment::Center);

    column![scrub_bar, bottom_row]
        .spacing(spacing::XS)
        .padding([spacing::XS, spacing::MD])
        .width(Length::Fill)
        .into()
}

fn transport_button<'a>(glyph: &'a str, on_press: Message) -> Element<'a, Message> {
    let glyph = container(text(glyph).size(typography::GLYPH)).center_x(Length::Fill);

    button(glyph)
        .on_press(on_press)
        .padding(spacing::XXS)
        .width(Length::Fixed(sizing::BUTTON_WIDTH))
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .into()
}
