// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Layout and colour constants shared by the player's widgets.

## Organization

- **Palette**: Base colors
- **Spacing**: Spacing scale (8px grid)
- **Sizing**: Component sizes
- **Typography**: Font size scale

## Examples

```
use iced_reel::ui::design_tokens::{palette, spacing};

let canvas_background = palette::BLACK;
let padding = spacing::MD; // 16px
```
"#]

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use iced::Color;

    pub const BLACK: Color = Color::BLACK;
}

// ============================================================================
// Spacing Scale (8px grid)
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0; // 0.5 unit
    pub const XS: f32 = 8.0; // 1 unit
    pub const SM: f32 = 12.0; // 1.5 units
    pub const MD: f32 = 16.0; // 2 units
}

// ============================================================================
// Sizing
// ============================================================================

pub mod sizing {
    /// Transport button height.
    pub const BUTTON_HEIGHT: f32 = 36.0;

    /// Minimum transport button width, so glyph changes don't shift the row.
    pub const BUTTON_WIDTH: f32 = 48.0;

    /// Width of the filter dropdown.
    pub const FILTER_PICKER_WIDTH: f32 = 140.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    /// Transport glyphs.
    pub const GLYPH: f32 = 18.0;

    /// Standard body - labels, dropdown text
    pub const BODY: f32 = 14.0;
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > 0.0);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);

    assert!(typography::GLYPH > typography::BODY);

    // Controls must fit inside the control bar.
    assert!(
        sizing::BUTTON_HEIGHT + 2.0 * spacing::XS + 20.0
            <= crate::config::CONTROL_BAR_HEIGHT as f32
    );
};
