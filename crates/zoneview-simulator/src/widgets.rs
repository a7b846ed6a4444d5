//! Demo widgets used by the simulator.
//!
//! - `Uptime`: passive, counts background ticks in its data blob.
//! - `Gauge`: one interactive page; Plus/Minus move the value.
//! - `Chart`: full-screen widget with three internal pages.

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use log::debug;
use serde::{Deserialize, Serialize};

use zoneview_core::framebuffer::FrameBuffer;
use zoneview_core::styling::WHITE;
use zoneview_core::{Event, Key, KeyAction, Widget, WidgetData, WidgetFactory, Zone};

const LABEL_INSET: Point = Point::new(6, 14);
const COLOR_GAUGE: Rgb565 = Rgb565::new(76 >> 3, 154 >> 2, 113 >> 3);
const COLOR_FOCUS_TEXT: Rgb565 = Rgb565::new(255 >> 3, 176 >> 2, 32 >> 3);

fn label(display: &mut FrameBuffer, text: &str, at: Point, color: Rgb565) {
    let style = MonoTextStyle::new(&FONT_6X10, color);
    // FrameBuffer drawing is infallible.
    let _ = Text::new(text, at, style).draw(display);
}

// ---------------------------------------------------------------------------
// Uptime
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize, Default)]
struct UptimeState {
    ticks: u32,
}

pub struct Uptime {
    zone: Zone,
}

impl Widget<FrameBuffer> for Uptime {
    fn refresh(
        &mut self,
        display: &mut FrameBuffer,
        data: &mut WidgetData,
        _event: Option<Event>,
        _page: u8,
    ) -> Result<(), core::convert::Infallible> {
        let state: UptimeState = data.fetch().unwrap_or_default();
        label(
            display,
            &format!("Uptime {} ticks", state.ticks),
            self.zone.top_left + LABEL_INSET,
            WHITE,
        );
        Ok(())
    }

    fn background(&mut self, data: &mut WidgetData) {
        let mut state: UptimeState = data.fetch().unwrap_or_default();
        state.ticks = state.ticks.wrapping_add(1);
        data.store(&state).ok();
    }
}

pub struct UptimeFactory;

impl WidgetFactory<FrameBuffer> for UptimeFactory {
    fn name(&self) -> &str {
        "Uptime"
    }

    fn restore(&self, zone: Zone, _data: &WidgetData) -> Box<dyn Widget<FrameBuffer>> {
        Box::new(Uptime { zone })
    }
}

// ---------------------------------------------------------------------------
// Gauge
// ---------------------------------------------------------------------------

#[derive(Serialize, Deserialize)]
struct GaugeState {
    value: u8,
}

pub struct Gauge {
    zone: Zone,
    focused: bool,
}

impl Widget<FrameBuffer> for Gauge {
    fn refresh(
        &mut self,
        display: &mut FrameBuffer,
        data: &mut WidgetData,
        event: Option<Event>,
        _page: u8,
    ) -> Result<(), core::convert::Infallible> {
        let mut state: GaugeState = data.fetch().unwrap_or(GaugeState { value: 50 });

        match event {
            Some(Event {
                key: Key::PageDown,
                action: KeyAction::First,
            }) => self.focused = true,
            Some(Event {
                key: Key::Exit,
                action: KeyAction::Long,
            }) => self.focused = false,
            Some(Event { key: Key::Plus, .. }) => {
                state.value = state.value.saturating_add(5).min(100)
            }
            Some(Event { key: Key::Minus, .. }) => state.value = state.value.saturating_sub(5),
            _ => {}
        }
        if event.is_some() {
            debug!("Gauge event {:?}, value {}", event, state.value);
            data.store(&state).ok();
        }

        let bar_width = self.zone.size.width.saturating_sub(12) * state.value as u32 / 100;
        let _ = Rectangle::new(
            self.zone.top_left + Point::new(6, 24),
            Size::new(bar_width, 16),
        )
        .into_styled(PrimitiveStyle::with_fill(COLOR_GAUGE))
        .draw(display);

        let color = if self.focused { COLOR_FOCUS_TEXT } else { WHITE };
        label(
            display,
            &format!("Gauge {}%", state.value),
            self.zone.top_left + LABEL_INSET,
            color,
        );
        Ok(())
    }

    fn pages(&self) -> u8 {
        1
    }
}

pub struct GaugeFactory;

impl WidgetFactory<FrameBuffer> for GaugeFactory {
    fn name(&self) -> &str {
        "Gauge"
    }

    fn initialize(&self, data: &mut WidgetData) {
        data.store(&GaugeState { value: 50 }).ok();
    }

    fn restore(&self, zone: Zone, _data: &WidgetData) -> Box<dyn Widget<FrameBuffer>> {
        Box::new(Gauge {
            zone,
            focused: false,
        })
    }
}

// ---------------------------------------------------------------------------
// Chart
// ---------------------------------------------------------------------------

const CHART_PAGES: [&str; 3] = ["Altitude", "Speed", "Battery"];

pub struct Chart {
    zone: Zone,
}

impl Widget<FrameBuffer> for Chart {
    fn refresh(
        &mut self,
        display: &mut FrameBuffer,
        _data: &mut WidgetData,
        _event: Option<Event>,
        page: u8,
    ) -> Result<(), core::convert::Infallible> {
        let title = CHART_PAGES.get(page as usize).copied().unwrap_or("?");
        let style = MonoTextStyle::new(&FONT_10X20, WHITE);
        let _ = Text::new(title, self.zone.top_left + Point::new(12, 30), style).draw(display);
        label(
            display,
            &format!("page {}/{}", page + 1, CHART_PAGES.len()),
            self.zone.top_left + Point::new(12, 50),
            WHITE,
        );
        Ok(())
    }

    fn pages(&self) -> u8 {
        CHART_PAGES.len() as u8
    }
}

pub struct ChartFactory;

impl WidgetFactory<FrameBuffer> for ChartFactory {
    fn name(&self) -> &str {
        "Chart"
    }

    fn restore(&self, zone: Zone, _data: &WidgetData) -> Box<dyn Widget<FrameBuffer>> {
        Box::new(Chart { zone })
    }
}
