//! Layout policies: how a view's screen area is cut into zones.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

/// A rectangular screen region hosting at most one widget.
pub type Zone = Rectangle;

/// Full display area.
pub fn screen_bounds() -> Rectangle {
    Rectangle::new(
        Point::zero(),
        Size::new(DISPLAY_WIDTH_PX as u32, DISPLAY_HEIGHT_PX as u32),
    )
}

/// Splits a view into zones.
///
/// Implementations must return the same zones for the same configuration on
/// every call.
pub trait Layout {
    fn zones_count(&self) -> usize;

    /// Rectangle of zone `index`, `None` past [`Layout::zones_count`].
    fn zone(&self, index: usize) -> Option<Zone>;
}

/// A single zone covering the whole area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FullScreen {
    bounds: Rectangle,
}

impl FullScreen {
    pub fn new(bounds: Rectangle) -> Self {
        Self { bounds }
    }
}

impl Default for FullScreen {
    fn default() -> Self {
        Self::new(screen_bounds())
    }
}

impl Layout for FullScreen {
    fn zones_count(&self) -> usize {
        1
    }

    fn zone(&self, index: usize) -> Option<Zone> {
        (index == 0).then_some(self.bounds)
    }
}

/// Equal-sized cells, numbered row by row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    bounds: Rectangle,
    columns: u8,
    rows: u8,
    gap: u32,
}

impl Grid {
    pub fn new(bounds: Rectangle, columns: u8, rows: u8) -> Self {
        Self {
            bounds,
            columns,
            rows,
            gap: 0,
        }
    }

    /// Space between neighbouring cells
    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    fn cell_size(&self) -> Size {
        let columns = self.columns.max(1) as u32;
        let rows = self.rows.max(1) as u32;
        let width = self
            .bounds
            .size
            .width
            .saturating_sub(self.gap * (columns - 1))
            / columns;
        let height = self
            .bounds
            .size
            .height
            .saturating_sub(self.gap * (rows - 1))
            / rows;
        Size::new(width, height)
    }
}

impl Layout for Grid {
    fn zones_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    fn zone(&self, index: usize) -> Option<Zone> {
        if index >= self.zones_count() {
            return None;
        }
        let cell = self.cell_size();
        let column = (index % self.columns as usize) as i32;
        let row = (index / self.columns as usize) as i32;
        let origin = self.bounds.top_left
            + Point::new(
                column * (cell.width + self.gap) as i32,
                row * (cell.height + self.gap) as i32,
            );
        Some(Rectangle::new(origin, cell))
    }
}
