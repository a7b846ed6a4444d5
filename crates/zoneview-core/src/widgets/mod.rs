//! Widget capability and the name-keyed registry used to restore widgets.
//!
//! A widget is a self-contained display component living in exactly one
//! zone. The core never looks inside a widget: it only calls the three
//! operations of [`Widget`] and hands the widget its own persisted
//! [`WidgetData`] blob on every call so the widget can keep state across
//! reboots.
//!
//! Widgets are created two ways:
//! - **Assignment** ([`WidgetFactory::create`]): the user picks a widget for a
//!   zone; the factory initializes the blob and builds the widget.
//! - **Restore** ([`WidgetRegistry::lookup`]): on boot the persisted name is
//!   looked up and the widget is rebuilt from the blob as stored.

mod data;

pub use data::{WidgetData, truncate_name};

use alloc::boxed::Box;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::events::Event;
use crate::layouts::Zone;

/// Trait every widget implements.
pub trait Widget<D: DrawTarget<Color = Rgb565>> {
    /// Draw one frame.
    ///
    /// `event` is `Some` only when this widget owns input focus. `page` is
    /// the widget's active internal page, or 0 when paging does not apply.
    fn refresh(
        &mut self,
        display: &mut D,
        data: &mut WidgetData,
        event: Option<Event>,
        page: u8,
    ) -> Result<(), D::Error>;

    /// Number of internally handled pages; 0 for a passive widget.
    fn pages(&self) -> u8 {
        0
    }

    /// Periodic upkeep that runs whether or not the widget is visible.
    fn background(&mut self, _data: &mut WidgetData) {}
}

/// Builds one kind of widget.
pub trait WidgetFactory<D: DrawTarget<Color = Rgb565>> {
    /// Registered name; persisted truncated to
    /// [`WIDGET_NAME_LEN`](crate::config::WIDGET_NAME_LEN) bytes.
    fn name(&self) -> &str;

    /// Reset `data` to this widget's defaults.
    fn initialize(&self, data: &mut WidgetData) {
        data.clear();
    }

    /// Build a widget from data that is already initialized.
    fn restore(&self, zone: Zone, data: &WidgetData) -> Box<dyn Widget<D>>;

    /// Initialize `data` and build a fresh widget.
    fn create(&self, zone: Zone, data: &mut WidgetData) -> Box<dyn Widget<D>> {
        self.initialize(data);
        self.restore(zone, data)
    }
}

/// Name lookup used when a container restores its persisted layout.
pub trait WidgetRegistry<D: DrawTarget<Color = Rgb565>> {
    /// Rebuild the widget registered as `name`, or `None` if the name is
    /// unknown.
    fn lookup(&self, name: &str, zone: Zone, data: &WidgetData) -> Option<Box<dyn Widget<D>>>;
}

/// Registry over a static list of factories.
pub struct FactoryRegistry<'a, D: DrawTarget<Color = Rgb565>> {
    factories: &'a [&'a dyn WidgetFactory<D>],
}

impl<'a, D: DrawTarget<Color = Rgb565>> FactoryRegistry<'a, D> {
    pub fn new(factories: &'a [&'a dyn WidgetFactory<D>]) -> Self {
        Self { factories }
    }

    /// Factory whose persisted name matches `name`.
    pub fn find(&self, name: &str) -> Option<&'a dyn WidgetFactory<D>> {
        self.factories
            .iter()
            .copied()
            .find(|factory| truncate_name(factory.name()) == name)
    }

    pub fn factories(&self) -> &'a [&'a dyn WidgetFactory<D>] {
        self.factories
    }
}

impl<D: DrawTarget<Color = Rgb565>> WidgetRegistry<D> for FactoryRegistry<'_, D> {
    fn lookup(&self, name: &str, zone: Zone, data: &WidgetData) -> Option<Box<dyn Widget<D>>> {
        self.find(name).map(|factory| factory.restore(zone, data))
    }
}
