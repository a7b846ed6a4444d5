//! Zone layout container.
//!
//! A [`WidgetsContainer`] owns the live widgets of one view: `N` zone slots,
//! each empty or holding exactly one widget, plus `O` container options. The
//! persisted image ([`PersistentData`]) is borrowed from the settings record
//! that outlives the container; the container only keeps it in sync with
//! the live widgets.
//!
//! # Pages
//!
//! A container reports how many interactive pages it exposes:
//! - single-zone layouts forward the occupant's own page count;
//! - multi-zone layouts sum every occupant's count, and each page-capable
//!   zone takes one step of the page sequence (see
//!   [`WidgetsContainer::interactive_index`]).
//!
//! The count is cached and recomputed lazily after any assignment or load.

mod persistent;
mod views;

pub use persistent::{
    OPTION_TEXT_LEN, PersistentData, ZONE_RECORD_LEN, ZoneOptionValue, ZonePersistentData,
};
pub use views::{View, ViewList};

use alloc::boxed::Box;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use log::{debug, info, warn};
use thiserror_no_std::Error;

use crate::events::Event;
use crate::layouts::{Layout, Zone};
use crate::navigation::draw_active_highlight;
use crate::styling::Theme;
use crate::widgets::{Widget, WidgetFactory, WidgetRegistry, truncate_name};

/// Errors raised while assigning widgets or moving layout images around.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// Zone index past the container's zones
    #[error("Zone {index} out of range ({zones} zones)")]
    ZoneOutOfRange { index: usize, zones: usize },

    /// Option index past the container's options
    #[error("Option {index} out of range ({options} options)")]
    OptionOutOfRange { index: usize, options: usize },

    /// View slot past the view list capacity
    #[error("View {index} out of range (capacity {capacity})")]
    ViewOutOfRange { index: usize, capacity: usize },

    /// Image has the wrong size for this container shape
    #[error("Layout image is {actual} bytes, expected {expected}")]
    ImageLength { expected: usize, actual: usize },

    /// Factory registered under an empty name
    #[error("Widget factory has an empty name")]
    EmptyWidgetName,

    /// Option slot could not be encoded or decoded
    #[error("Invalid option value in slot {index}")]
    OptionEncoding { index: usize },

    /// Widget state does not fit its data blob or does not decode
    #[error("Widget data encoding failed")]
    WidgetDataEncoding,
}

/// Live widgets of one view, backed by a borrowed persisted image.
pub struct WidgetsContainer<'p, D, L, const N: usize, const O: usize>
where
    D: DrawTarget<Color = Rgb565>,
    L: Layout,
{
    layout: L,
    theme: Theme,
    widgets: [Option<Box<dyn Widget<D>>>; N],
    persistent: &'p mut PersistentData<N, O>,
    /// `None` until computed
    pages: Option<u8>,
}

impl<'p, D, L, const N: usize, const O: usize> WidgetsContainer<'p, D, L, N, O>
where
    D: DrawTarget<Color = Rgb565>,
    L: Layout,
{
    /// Build an empty container. Call [`load`](Self::load) to restore the
    /// widgets named in `persistent`, or [`create`](Self::create) to start
    /// from a blank image.
    pub fn new(layout: L, persistent: &'p mut PersistentData<N, O>) -> Self {
        Self {
            layout,
            theme: Theme::default(),
            widgets: core::array::from_fn(|_| None),
            persistent,
            pages: None,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn persistent(&self) -> &PersistentData<N, O> {
        self.persistent
    }

    /// Widget in zone `index`, if any.
    pub fn widget(&self, index: usize) -> Option<&dyn Widget<D>> {
        self.widgets.get(index)?.as_deref()
    }

    /// Assign a widget to zone `index`, or empty the zone with `None`.
    ///
    /// Any previous occupant is dropped before the new one is built. A new
    /// widget gets a freshly initialized data blob. A factory with an empty
    /// name is rejected and the zone is left as it was.
    pub fn create_widget(
        &mut self,
        index: usize,
        factory: Option<&dyn WidgetFactory<D>>,
    ) -> Result<(), LayoutError> {
        if index >= N {
            return Err(LayoutError::ZoneOutOfRange { index, zones: N });
        }
        if factory.is_some_and(|factory| truncate_name(factory.name()).is_empty()) {
            return Err(LayoutError::EmptyWidgetName);
        }
        let zone = match factory {
            Some(_) => Some(self.layout.zone(index).ok_or(LayoutError::ZoneOutOfRange {
                index,
                zones: self.zones_count(),
            })?),
            None => None,
        };

        self.pages = None;
        self.widgets[index] = None;
        let record = &mut self.persistent.zones[index];
        record.clear();

        if let (Some(factory), Some(zone)) = (factory, zone) {
            record.set_widget_name(factory.name());
            self.widgets[index] = Some(factory.create(zone, &mut record.data));
            info!(" Zone {} now holds {}", index, record.widget_name());
        } else {
            debug!(" Zone {} cleared", index);
        }
        Ok(())
    }

    /// Reset the persisted image to its blank state.
    ///
    /// Live widgets are dropped too so that a zone never holds a widget
    /// without a persisted name.
    pub fn create(&mut self) {
        self.persistent.reset();
        self.widgets.iter_mut().for_each(|slot| *slot = None);
        self.pages = None;
    }

    /// Rebuild every zone's widget from the persisted image.
    ///
    /// Names the registry does not know leave their zone blank.
    pub fn load(&mut self, registry: &dyn WidgetRegistry<D>) {
        self.pages = None;
        self.widgets.iter_mut().for_each(|slot| *slot = None);

        for index in 0..self.zones_count() {
            let record = &self.persistent.zones[index];
            if record.is_empty() {
                continue;
            }
            let Some(zone) = self.layout.zone(index) else {
                continue;
            };
            match registry.lookup(record.widget_name(), zone, &record.data) {
                Some(widget) => {
                    debug!(" Restored {} in zone {}", record.widget_name(), index);
                    self.widgets[index] = Some(widget);
                }
                None => warn!(
                    " Unknown widget {:?} in zone {}, leaving it blank",
                    record.widget_name(),
                    index
                ),
            }
        }
    }

    pub fn option_value(&self, index: usize) -> Option<&ZoneOptionValue> {
        self.persistent.option(index)
    }

    pub fn set_option_value(
        &mut self,
        index: usize,
        value: ZoneOptionValue,
    ) -> Result<(), LayoutError> {
        let slot = self
            .persistent
            .options
            .get_mut(index)
            .ok_or(LayoutError::OptionOutOfRange { index, options: O })?;
        *slot = value;
        Ok(())
    }

    /// Zone that owns global page `page` in a multi-zone layout.
    ///
    /// Zones whose widget reports no pages are skipped; every page-capable
    /// zone takes one step. Returns `None` when `page` runs past the last
    /// page-capable zone.
    pub fn interactive_index(&self, page: u8) -> Option<usize> {
        self.widgets[..self.zones_count()]
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.as_ref().is_some_and(|widget| widget.pages() > 0))
            .nth(page as usize)
            .map(|(index, _)| index)
    }
}

impl<D, L, const N: usize, const O: usize> View<D> for WidgetsContainer<'_, D, L, N, O>
where
    D: DrawTarget<Color = Rgb565>,
    L: Layout,
{
    fn zones_count(&self) -> usize {
        self.layout.zones_count().min(N)
    }

    fn zone(&self, index: usize) -> Option<Zone> {
        if index < N { self.layout.zone(index) } else { None }
    }

    fn pages(&mut self) -> u8 {
        if let Some(pages) = self.pages {
            return pages;
        }
        let pages = if self.zones_count() == 1 {
            self.widgets[0].as_ref().map_or(0, |widget| widget.pages())
        } else {
            self.widgets
                .iter()
                .flatten()
                .fold(0u8, |total, widget| total.saturating_add(widget.pages()))
        };
        debug!(" Container pages recomputed: {}", pages);
        self.pages = Some(pages);
        pages
    }

    fn refresh(
        &mut self,
        display: &mut D,
        event: Option<Event>,
        page: u8,
    ) -> Result<(), D::Error> {
        let pages = self.pages();
        let zones = self.zones_count();
        let active = if pages > 0 && zones > 1 {
            let active = self.interactive_index(page);
            if active.is_none() {
                warn!(" No interactive zone for page {} of {}", page, pages);
            }
            active
        } else {
            None
        };

        for index in 0..zones {
            let Some(widget) = self.widgets[index].as_mut() else {
                continue;
            };
            let data = &mut self.persistent.zones[index].data;

            if pages > 0 && zones == 1 {
                widget.refresh(display, data, event, page)?;
            } else if active == Some(index) {
                if let Some(zone) = self.layout.zone(index) {
                    draw_active_highlight(display, zone, &self.theme)?;
                }
                widget.refresh(display, data, event, 0)?;
            } else {
                widget.refresh(display, data, None, 0)?;
            }
        }
        Ok(())
    }

    fn background(&mut self) {
        for (widget, record) in self.widgets.iter_mut().zip(self.persistent.zones.iter_mut()) {
            if let Some(widget) = widget {
                widget.background(&mut record.data);
            }
        }
    }
}
