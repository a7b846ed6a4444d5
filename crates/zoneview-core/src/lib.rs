//! Hardware-independent core library for zoneview
//!
//! This crate manages how the fixed rectangular zones of a small embedded
//! display are populated with pluggable widgets, how that assignment is
//! persisted across reboots, and how the user moves between configured views
//! and the interactive pages inside them with a handful of hardware buttons.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod config;
pub mod container;
pub mod events;
pub mod framebuffer;
pub mod layouts;
pub mod navigation;
pub mod styling;
pub mod widgets;

#[cfg(test)]
pub(crate) mod testing;

pub use container::{LayoutError, PersistentData, View, ViewList, WidgetsContainer};
pub use events::{Event, EventQueue, InputQueue, Key, KeyAction};
pub use layouts::{FullScreen, Grid, Layout, Zone};
pub use navigation::{FocusSignal, NavDirection, Navigator};
pub use widgets::{FactoryRegistry, Widget, WidgetData, WidgetFactory, WidgetRegistry};
