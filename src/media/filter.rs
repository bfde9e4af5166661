// SPDX-License-Identifier: MPL-2.0
//! Per-frame visual filters and display rescaling.
//!
//! Frames arrive from the decoder as RGBA. A filter is applied at the
//! source resolution, then the result is rescaled to the canvas size.
//!
//! # Example
//!
//! ```
//! use iced_reel::media::filter::FilterMode;
//! use image_rs::{Rgba, RgbaImage};
//!
//! let frame = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
//! let negative = FilterMode::Negative.apply(&frame);
//! assert_eq!(negative.get_pixel(0, 0), &Rgba([245, 235, 225, 255]));
//! ```

use image_rs::imageops::{self, FilterType};
use image_rs::RgbaImage;
use std::fmt;

/// Filter selected in the dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Frame shown as decoded.
    #[default]
    Normal,
    /// Single-channel luminance with BT.601 weights.
    Greyscale,
    /// Bitwise inversion of every colour channel.
    Negative,
}

impl FilterMode {
    /// All modes, in dropdown order.
    pub const ALL: [FilterMode; 3] = [FilterMode::Normal, FilterMode::Greyscale, FilterMode::Negative];

    /// Label shown in the dropdown.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FilterMode::Normal => "Normal",
            FilterMode::Greyscale => "Greyscale",
            FilterMode::Negative => "Negative",
        }
    }

    /// Applies the filter, returning an RGBA frame of the same size.
    #[must_use]
    pub fn apply(self, frame: &RgbaImage) -> RgbaImage {
        match self {
            FilterMode::Normal => frame.clone(),
            FilterMode::Greyscale => greyscale(frame),
            FilterMode::Negative => invert_colors(frame),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Replaces R, G and B with the BT.601 luma `0.299 R + 0.587 G + 0.114 B`,
/// rounded to nearest. Alpha is kept.
fn greyscale(frame: &RgbaImage) -> RgbaImage {
    let mut out = frame.clone();
    for pixel in out.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let luma = (299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b) + 500) / 1000;
        // The weights sum to 1000, so luma never exceeds 255.
        let luma = luma as u8;
        pixel.0[0] = luma;
        pixel.0[1] = luma;
        pixel.0[2] = luma;
    }
    out
}

/// Inverts R, G and B; alpha is left opaque as decoded.
fn invert_colors(frame: &RgbaImage) -> RgbaImage {
    let mut out = frame.clone();
    for pixel in out.pixels_mut() {
        pixel.0[0] = !pixel.0[0];
        pixel.0[1] = !pixel.0[1];
        pixel.0[2] = !pixel.0[2];
    }
    out
}

/// Rescales a frame to the canvas size with bilinear filtering.
///
/// Aspect ratio is not preserved; the canvas is fixed.
#[must_use]
pub fn to_display(frame: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let width = width.max(1);
    let height = height.max(1);
    if frame.width() == width && frame.height() == height {
        return frame.clone();
    }
    imageops::resize(frame, width, height, FilterType::Triangle)
}
