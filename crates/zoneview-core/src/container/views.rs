//! Object-safe view interface and the bounded list of configured views.

use alloc::boxed::Box;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use super::LayoutError;
use crate::config::MAX_VIEWS;
use crate::events::Event;
use crate::layouts::Zone;

/// One user-selectable screen.
///
/// Implemented by every [`WidgetsContainer`](super::WidgetsContainer) so the
/// navigator can hold containers of different shapes side by side.
pub trait View<D: DrawTarget<Color = Rgb565>> {
    fn zones_count(&self) -> usize;

    fn zone(&self, index: usize) -> Option<Zone>;

    /// Interactive page count; 0 when the view has none.
    fn pages(&mut self) -> u8;

    /// Draw one frame, routing `event` to the zone that owns `page`.
    fn refresh(
        &mut self,
        display: &mut D,
        event: Option<Event>,
        page: u8,
    ) -> Result<(), D::Error>;

    /// Run every widget's upkeep.
    fn background(&mut self);
}

/// Up to [`MAX_VIEWS`] configured views.
///
/// Only the leading run of configured slots counts: the first empty slot
/// ends the list.
pub struct ViewList<'a, D: DrawTarget<Color = Rgb565>> {
    slots: [Option<Box<dyn View<D> + 'a>>; MAX_VIEWS],
}

impl<D: DrawTarget<Color = Rgb565>> Default for ViewList<'_, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, D: DrawTarget<Color = Rgb565>> ViewList<'a, D> {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
        }
    }

    /// Install `view` in slot `index`, replacing what was there.
    pub fn set(&mut self, index: usize, view: impl View<D> + 'a) -> Result<(), LayoutError> {
        let slot = self.slots.get_mut(index).ok_or(LayoutError::ViewOutOfRange {
            index,
            capacity: MAX_VIEWS,
        })?;
        *slot = Some(Box::new(view));
        Ok(())
    }

    /// Remove and return the view in slot `index`.
    pub fn clear(&mut self, index: usize) -> Option<Box<dyn View<D> + 'a>> {
        self.slots.get_mut(index)?.take()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut (dyn View<D> + 'a)> {
        self.slots.get_mut(index)?.as_deref_mut()
    }

    /// Number of configured views, counted up to the first empty slot.
    pub fn available_count(&self) -> usize {
        self.slots
            .iter()
            .position(Option::is_none)
            .unwrap_or(MAX_VIEWS)
    }

    /// Background upkeep for every configured view, shown or not.
    pub fn background_all(&mut self) {
        let count = self.available_count();
        for view in self.slots[..count].iter_mut().flatten() {
            view.background();
        }
    }
}
