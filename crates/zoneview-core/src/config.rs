//! Build-time constants and the small runtime configuration record.

use serde::{Deserialize, Serialize};

/// Display width in pixels.
pub const DISPLAY_WIDTH_PX: u16 = 480;

/// Display height in pixels.
pub const DISPLAY_HEIGHT_PX: u16 = 272;

/// Capacity of the view list. Slots past the first empty one are ignored.
pub const MAX_VIEWS: usize = 5;

/// Fixed byte width of a persisted widget name (NUL padded).
pub const WIDGET_NAME_LEN: usize = 10;

/// Size of the opaque per-widget data blob.
pub const WIDGET_DATA_LEN: usize = 40;

/// Size of one encoded container option slot.
pub const OPTION_SLOT_LEN: usize = 12;

/// Geometry of the focus border drawn around the active zone.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightConfig {
    /// Distance between the zone edge and the outside of the border
    pub padding: u8,
    /// Border stroke width
    pub thickness: u8,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            padding: 4,
            thickness: 2,
        }
    }
}

/// Runtime settings stored next to the layout image.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub highlight: HighlightConfig,
    /// View shown after boot
    pub initial_view: u8,
}

impl Config {
    /// Encode with postcard.
    pub fn to_bytes(&self) -> Result<alloc::vec::Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    /// Decode a record written by [`Config::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}
