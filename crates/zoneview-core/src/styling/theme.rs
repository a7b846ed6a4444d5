//! Theme combining the palette with focus-border geometry.

use super::colors::ColorPalette;
use crate::config::HighlightConfig;

/// Theme handed to every container.
///
/// ```ignore
/// let theme = Theme::default();
/// let color = theme.palette.highlight;
/// let padding = theme.highlight.padding;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub palette: ColorPalette,
    pub highlight: HighlightConfig,
}

impl Default for Theme {
    /// Dark theme with the default border geometry
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            palette: ColorPalette::dark(),
            highlight: HighlightConfig::default(),
        }
    }

    pub fn light() -> Self {
        Self {
            palette: ColorPalette::light(),
            highlight: HighlightConfig::default(),
        }
    }

    /// Replace the border geometry, e.g. with the one from a stored
    /// [`Config`](crate::config::Config).
    pub fn with_highlight(mut self, highlight: HighlightConfig) -> Self {
        self.highlight = highlight;
        self
    }
}
