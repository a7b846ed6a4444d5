//! Colors and theme used for the chrome the core draws itself.
//!
//! Widgets own their content; the only thing the core paints is the focus
//! border around the active zone of a multi-zone view.

pub mod colors;
pub mod theme;

pub use colors::{
    COLOR_BACKGROUND, COLOR_HIGHLIGHT, COLOR_HIGHLIGHT_LIGHT, ColorPalette, WHITE,
};
pub use theme::Theme;
