//! Instrumented widgets shared by the unit tests.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use crate::events::Event;
use crate::framebuffer::FrameBuffer;
use crate::layouts::Zone;
use crate::widgets::{Widget, WidgetData, WidgetFactory};

/// One `refresh` call as seen by a test widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Call {
    pub widget: &'static str,
    pub event: Option<Event>,
    pub page: u8,
}

pub(crate) type CallLog = Rc<RefCell<Vec<Call>>>;

pub(crate) fn calls() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

#[derive(Clone, Default)]
struct Counters {
    live: Rc<Cell<i32>>,
    page_queries: Rc<Cell<u32>>,
    backgrounds: Rc<Cell<u32>>,
}

/// Widget reporting a fixed page count and logging every refresh.
pub(crate) struct TestWidget {
    name: &'static str,
    pages: u8,
    log: CallLog,
    counters: Counters,
}

impl Drop for TestWidget {
    fn drop(&mut self) {
        self.counters.live.set(self.counters.live.get() - 1);
    }
}

impl Widget<FrameBuffer> for TestWidget {
    fn refresh(
        &mut self,
        _display: &mut FrameBuffer,
        _data: &mut WidgetData,
        event: Option<Event>,
        page: u8,
    ) -> Result<(), core::convert::Infallible> {
        self.log.borrow_mut().push(Call {
            widget: self.name,
            event,
            page,
        });
        Ok(())
    }

    fn pages(&self) -> u8 {
        self.counters
            .page_queries
            .set(self.counters.page_queries.get() + 1);
        self.pages
    }

    fn background(&mut self, data: &mut WidgetData) {
        self.counters
            .backgrounds
            .set(self.counters.backgrounds.get() + 1);
        data.as_bytes_mut()[1] += 1;
    }
}

/// Builds test widgets that share one call log and one set of counters.
pub(crate) struct TestWidgetFactory {
    name: &'static str,
    pages: u8,
    log: CallLog,
    counters: Counters,
}

impl TestWidgetFactory {
    pub fn new(name: &'static str, pages: u8, log: &CallLog) -> Self {
        Self {
            name,
            pages,
            log: log.clone(),
            counters: Counters::default(),
        }
    }

    /// Test widgets built by this factory that have not been dropped yet.
    pub fn live(&self) -> i32 {
        self.counters.live.get()
    }

    pub fn page_queries(&self) -> u32 {
        self.counters.page_queries.get()
    }

    pub fn backgrounds(&self) -> u32 {
        self.counters.backgrounds.get()
    }
}

impl WidgetFactory<FrameBuffer> for TestWidgetFactory {
    fn name(&self) -> &str {
        self.name
    }

    fn initialize(&self, data: &mut WidgetData) {
        data.clear();
        data.as_bytes_mut()[0] = self.pages;
    }

    fn restore(&self, _zone: Zone, _data: &WidgetData) -> Box<dyn Widget<FrameBuffer>> {
        self.counters.live.set(self.counters.live.get() + 1);
        Box::new(TestWidget {
            name: self.name,
            pages: self.pages,
            log: self.log.clone(),
            counters: self.counters.clone(),
        })
    }
}
