//! Color definitions and palette management
//!
//! All colors are RGB565, the native format of the panel.
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

/// Screen background - very dark gray-blue
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(18 >> 3, 23 >> 2, 24 >> 3);

/// Focus border on dark backgrounds - inverted-text amber
pub const COLOR_HIGHLIGHT: Rgb565 = Rgb565::new(255 >> 3, 176 >> 2, 32 >> 3);

/// Focus border on light backgrounds - deep blue
pub const COLOR_HIGHLIGHT_LIGHT: Rgb565 = Rgb565::new(20 >> 3, 70 >> 2, 160 >> 3);

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Colors the core draws with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPalette {
    pub background: Rgb565,
    /// Border around the zone that currently receives input
    pub highlight: Rgb565,
    pub text: Rgb565,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorPalette {
    pub const fn dark() -> Self {
        Self {
            background: COLOR_BACKGROUND,
            highlight: COLOR_HIGHLIGHT,
            text: WHITE,
        }
    }

    pub const fn light() -> Self {
        Self {
            background: WHITE,
            highlight: COLOR_HIGHLIGHT_LIGHT,
            text: COLOR_BACKGROUND,
        }
    }
}
