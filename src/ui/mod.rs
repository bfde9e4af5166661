// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Elm-style "state down, messages up": components take a read-only snapshot
//! and emit their own message type, which the app maps into its own.
//!
//! - [`controls`] - Scrub bar, filter dropdown, transport buttons, time label
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod controls;
pub mod design_tokens;
