//! Opaque per-widget storage blob.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{WIDGET_DATA_LEN, WIDGET_NAME_LEN};
use crate::container::LayoutError;

/// Fixed-size data area owned by whichever widget occupies a zone.
///
/// The core only zeroes and copies it. Widgets may treat it as raw bytes or
/// keep a serde value in it with [`WidgetData::store`] / [`WidgetData::fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetData {
    bytes: [u8; WIDGET_DATA_LEN],
}

impl Default for WidgetData {
    fn default() -> Self {
        Self {
            bytes: [0; WIDGET_DATA_LEN],
        }
    }
}

impl WidgetData {
    pub fn from_bytes(bytes: [u8; WIDGET_DATA_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; WIDGET_DATA_LEN] {
        &self.bytes
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; WIDGET_DATA_LEN] {
        &mut self.bytes
    }

    pub fn clear(&mut self) {
        self.bytes = [0; WIDGET_DATA_LEN];
    }

    /// Replace the blob with the postcard encoding of `value`.
    ///
    /// The blob is left untouched if the value does not fit.
    pub fn store<T: Serialize>(&mut self, value: &T) -> Result<(), LayoutError> {
        let mut bytes = [0; WIDGET_DATA_LEN];
        postcard::to_slice(value, &mut bytes).map_err(|_| LayoutError::WidgetDataEncoding)?;
        self.bytes = bytes;
        Ok(())
    }

    /// Decode a value previously written with [`WidgetData::store`].
    pub fn fetch<T: DeserializeOwned>(&self) -> Result<T, LayoutError> {
        postcard::from_bytes(&self.bytes).map_err(|_| LayoutError::WidgetDataEncoding)
    }
}

/// Longest prefix of `name` that fits the persisted name field without
/// splitting a character.
pub fn truncate_name(name: &str) -> &str {
    if name.len() <= WIDGET_NAME_LEN {
        return name;
    }
    let mut end = WIDGET_NAME_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}
