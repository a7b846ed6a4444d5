//! Persisted layout image.
//!
//! This is the only state that survives a reboot or firmware update. It is
//! embedded in the wider settings record, so containers borrow it rather
//! than own it.
//!
//! Binary format, per zone then per option:
//! - widget name: `WIDGET_NAME_LEN` bytes, UTF-8, NUL padded (empty = no widget)
//! - widget data: `WIDGET_DATA_LEN` opaque bytes
//! - option: `OPTION_SLOT_LEN` bytes, postcard-encoded [`ZoneOptionValue`],
//!   zero padded
//!
//! An all-zero image decodes to empty zones and zero options.

use alloc::vec;
use alloc::vec::Vec;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use heapless::String;
use log::warn;
use serde::{Deserialize, Serialize};

use super::LayoutError;
use crate::config::{OPTION_SLOT_LEN, WIDGET_DATA_LEN, WIDGET_NAME_LEN};
use crate::widgets::{WidgetData, truncate_name};

/// Bytes used by one zone record in the image.
pub const ZONE_RECORD_LEN: usize = WIDGET_NAME_LEN + WIDGET_DATA_LEN;

/// Capacity of a [`ZoneOptionValue::Text`] option.
pub const OPTION_TEXT_LEN: usize = 8;

/// Persisted state of one zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZonePersistentData {
    pub(crate) name: String<WIDGET_NAME_LEN>,
    pub(crate) data: WidgetData,
}

impl ZonePersistentData {
    /// Registered name of the occupant, empty when the zone is blank.
    pub fn widget_name(&self) -> &str {
        self.name.as_str()
    }

    pub fn data(&self) -> &WidgetData {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// Store `name`, cut down to the field width.
    pub(crate) fn set_widget_name(&mut self, name: &str) {
        self.name.clear();
        self.name.push_str(truncate_name(name)).ok();
    }

    pub(crate) fn clear(&mut self) {
        self.name.clear();
        self.data.clear();
    }

    fn encode(&self, out: &mut [u8]) {
        out.fill(0);
        let name = self.name.as_bytes();
        out[..name.len()].copy_from_slice(name);
        out[WIDGET_NAME_LEN..ZONE_RECORD_LEN].copy_from_slice(self.data.as_bytes());
    }

    /// A name that is not valid UTF-8 is cut back to its valid prefix.
    fn decode(bytes: &[u8], zone: usize) -> Self {
        let field = &bytes[..WIDGET_NAME_LEN];
        let end = field.iter().position(|&b| b == 0).unwrap_or(WIDGET_NAME_LEN);
        let raw = &field[..end];
        let name = match core::str::from_utf8(raw) {
            Ok(name) => name,
            Err(e) => {
                warn!(
                    " Zone {} has a malformed widget name, keeping {} bytes",
                    zone,
                    e.valid_up_to()
                );
                core::str::from_utf8(&raw[..e.valid_up_to()]).unwrap_or_default()
            }
        };

        let mut record = Self::default();
        record.set_widget_name(name);
        let mut data = [0; WIDGET_DATA_LEN];
        data.copy_from_slice(&bytes[WIDGET_NAME_LEN..ZONE_RECORD_LEN]);
        record.data = WidgetData::from_bytes(data);
        record
    }
}

/// Value of one container-level option.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneOptionValue {
    Unsigned(u32),
    Signed(i32),
    Bool(bool),
    /// Raw RGB565
    Color(u16),
    /// NUL padded UTF-8
    Text([u8; OPTION_TEXT_LEN]),
}

impl Default for ZoneOptionValue {
    fn default() -> Self {
        Self::Unsigned(0)
    }
}

impl ZoneOptionValue {
    pub fn color(color: Rgb565) -> Self {
        Self::Color(color.into_storage())
    }

    /// Text option; input longer than the field is cut at a character
    /// boundary.
    pub fn text(text: &str) -> Self {
        let mut end = text.len().min(OPTION_TEXT_LEN);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        let mut bytes = [0; OPTION_TEXT_LEN];
        bytes[..end].copy_from_slice(&text.as_bytes()[..end]);
        Self::Text(bytes)
    }

    pub fn as_color(&self) -> Option<Rgb565> {
        match self {
            Self::Color(raw) => Some(Rgb565::from(RawU16::new(*raw))),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(bytes) => {
                let end = bytes.iter().position(|&b| b == 0).unwrap_or(OPTION_TEXT_LEN);
                core::str::from_utf8(&bytes[..end]).ok()
            }
            _ => None,
        }
    }
}

/// Persisted image of a container with `N` zones and `O` options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistentData<const N: usize, const O: usize> {
    pub(crate) zones: [ZonePersistentData; N],
    pub(crate) options: [ZoneOptionValue; O],
}

impl<const N: usize, const O: usize> Default for PersistentData<N, O> {
    fn default() -> Self {
        Self {
            zones: core::array::from_fn(|_| ZonePersistentData::default()),
            options: [ZoneOptionValue::default(); O],
        }
    }
}

impl<const N: usize, const O: usize> PersistentData<N, O> {
    /// Size of the encoded image in bytes.
    pub const IMAGE_LEN: usize = N * ZONE_RECORD_LEN + O * OPTION_SLOT_LEN;

    /// Back to every zone empty and every option zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn zone(&self, index: usize) -> Option<&ZonePersistentData> {
        self.zones.get(index)
    }

    pub fn zones(&self) -> &[ZonePersistentData; N] {
        &self.zones
    }

    pub fn option(&self, index: usize) -> Option<&ZoneOptionValue> {
        self.options.get(index)
    }

    pub fn options(&self) -> &[ZoneOptionValue; O] {
        &self.options
    }

    /// Encode into the fixed-width image.
    pub fn to_bytes(&self) -> Result<Vec<u8>, LayoutError> {
        let mut image = vec![0; Self::IMAGE_LEN];
        let (zones, options) = image.split_at_mut(N * ZONE_RECORD_LEN);

        for (zone, out) in self.zones.iter().zip(zones.chunks_exact_mut(ZONE_RECORD_LEN)) {
            zone.encode(out);
        }
        for (index, (option, out)) in self
            .options
            .iter()
            .zip(options.chunks_exact_mut(OPTION_SLOT_LEN))
            .enumerate()
        {
            postcard::to_slice(option, out).map_err(|_| LayoutError::OptionEncoding { index })?;
        }
        Ok(image)
    }

    /// Decode an image written by [`PersistentData::to_bytes`].
    pub fn from_bytes(image: &[u8]) -> Result<Self, LayoutError> {
        if image.len() != Self::IMAGE_LEN {
            return Err(LayoutError::ImageLength {
                expected: Self::IMAGE_LEN,
                actual: image.len(),
            });
        }
        let (zones, options) = image.split_at(N * ZONE_RECORD_LEN);

        let mut decoded = Self::default();
        for (index, bytes) in zones.chunks_exact(ZONE_RECORD_LEN).enumerate() {
            decoded.zones[index] = ZonePersistentData::decode(bytes, index);
        }
        for (index, bytes) in options.chunks_exact(OPTION_SLOT_LEN).enumerate() {
            decoded.options[index] =
                postcard::from_bytes(bytes).map_err(|_| LayoutError::OptionEncoding { index })?;
        }
        Ok(decoded)
    }
}
