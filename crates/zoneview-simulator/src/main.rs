//! Headless desktop simulator for zoneview.
//!
//! Builds three views (a 2x2 grid, a full-screen chart, and a passive
//! status screen), persists and reloads their layout as a device would
//! across a reboot, then replays a scripted sequence of button presses
//! through the navigator. Every frame is drawn into the core framebuffer
//! and flushed to an off-screen `SimulatorDisplay`; the last frame is
//! written to `zoneview.png`.
//!
//! Run with `RUST_LOG=debug` to follow navigation step by step.

mod widgets;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use log::{error, info};

use zoneview_core::config::{Config, DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};
use zoneview_core::framebuffer::FrameBuffer;
use zoneview_core::layouts::screen_bounds;
use zoneview_core::styling::Theme;
use zoneview_core::{
    Event, EventQueue, FactoryRegistry, FullScreen, Grid, Key, KeyAction, Navigator,
    PersistentData, ViewList, WidgetFactory, WidgetsContainer,
};

use widgets::{ChartFactory, GaugeFactory, UptimeFactory};

/// Where the final frame is written.
const SCREENSHOT_PATH: &str = "zoneview.png";

/// Gap between grid cells, leaves room for the focus border.
const GRID_GAP_PX: u32 = 12;

type GridScreen<'p> = WidgetsContainer<'p, FrameBuffer, Grid, 4, 1>;
type FullScreenView<'p> = WidgetsContainer<'p, FrameBuffer, FullScreen, 1, 0>;

/// Persisted layout of every view, as stored in the settings record.
#[derive(Default)]
struct Settings {
    grid: PersistentData<4, 1>,
    chart: PersistentData<1, 0>,
    status: PersistentData<1, 0>,
}

/// Button presses replayed by the simulator.
const SCRIPT: &[(Key, KeyAction)] = &[
    (Key::Plus, KeyAction::First),
    (Key::PageDown, KeyAction::First),
    (Key::Minus, KeyAction::First),
    (Key::PageDown, KeyAction::First),
    (Key::PageDown, KeyAction::First),
    (Key::PageDown, KeyAction::First),
    (Key::Exit, KeyAction::Long),
    (Key::PageUp, KeyAction::First),
    (Key::PageUp, KeyAction::First),
    (Key::Exit, KeyAction::Break),
];

fn grid_layout() -> Grid {
    Grid::new(screen_bounds(), 2, 2).with_gap(GRID_GAP_PX)
}

/// First boot: assign a widget to every zone in use.
fn first_boot(settings: &mut Settings) -> Result<(), zoneview_core::LayoutError> {
    let gauge = GaugeFactory;
    let uptime = UptimeFactory;
    let chart = ChartFactory;

    let mut grid = GridScreen::new(grid_layout(), &mut settings.grid);
    grid.create();
    grid.create_widget(0, Some(&gauge))?;
    grid.create_widget(1, Some(&uptime))?;
    grid.create_widget(3, Some(&gauge))?;

    let mut full = FullScreenView::new(FullScreen::default(), &mut settings.chart);
    full.create();
    full.create_widget(0, Some(&chart))?;

    let mut status = FullScreenView::new(FullScreen::default(), &mut settings.status);
    status.create();
    status.create_widget(0, Some(&uptime))?;
    Ok(())
}

/// Map a raw key event to a navigation action. Returns the event that is
/// still left for the widgets.
fn dispatch(
    nav: &mut Navigator,
    views: &mut ViewList<'_, FrameBuffer>,
    fb: &mut FrameBuffer,
    input: &mut EventQueue,
    event: Event,
) -> Option<Event> {
    let result = match (event.key, event.action) {
        (Key::PageDown, KeyAction::First) => nav.user_increment_page(views, fb).map(|_| false),
        (Key::PageUp, KeyAction::First) => nav.user_decrement_page(views, fb).map(|_| false),
        (Key::Exit, KeyAction::Long) => nav.user_exit_screen(event, views, fb, input),
        _ => Ok(false),
    };
    match result {
        Ok(true) => None,
        Ok(false) => Some(event),
        Err(e) => match e {},
    }
}

fn main() {
    env_logger::init();
    info!("Starting zoneview simulator");
    info!("Display: {}×{}", DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX);

    // Settings record as it would come back from flash.
    let config = match Config::from_bytes(&Config::default().to_bytes().unwrap_or_default()) {
        Ok(config) => config,
        Err(e) => {
            error!("Config unreadable, using defaults: {:?}", e);
            Config::default()
        }
    };
    let theme = Theme::dark().with_highlight(config.highlight);

    let mut settings = Settings::default();
    if let Err(e) = first_boot(&mut settings) {
        error!("Layout setup failed: {}", e);
        return;
    }

    // Simulate a reboot: encode the grid image and decode it again.
    match settings
        .grid
        .to_bytes()
        .and_then(|image| PersistentData::<4, 1>::from_bytes(&image))
    {
        Ok(restored) => settings.grid = restored,
        Err(e) => error!("Layout image round trip failed: {}", e),
    }

    let gauge = GaugeFactory;
    let uptime = UptimeFactory;
    let chart = ChartFactory;
    let factories: [&dyn WidgetFactory<FrameBuffer>; 3] = [&gauge, &uptime, &chart];
    let registry = FactoryRegistry::new(&factories);

    let Settings {
        grid,
        chart: chart_data,
        status,
    } = &mut settings;

    let mut grid_view = GridScreen::new(grid_layout(), grid).with_theme(theme);
    grid_view.load(&registry);
    let mut chart_view = FullScreenView::new(FullScreen::default(), chart_data).with_theme(theme);
    chart_view.load(&registry);
    let mut status_view = FullScreenView::new(FullScreen::default(), status).with_theme(theme);
    status_view.load(&registry);

    let mut views: ViewList<'_, FrameBuffer> = ViewList::new();
    let installed = views
        .set(0, grid_view)
        .and_then(|()| views.set(1, chart_view))
        .and_then(|()| views.set(2, status_view));
    if let Err(e) = installed {
        error!("Cannot install views: {}", e);
        return;
    }

    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(
        DISPLAY_WIDTH_PX as u32,
        DISPLAY_HEIGHT_PX as u32,
    ));
    let mut fb = FrameBuffer::new();
    let mut input = EventQueue::new();
    let mut nav = Navigator::new(config.initial_view as usize);

    // One frame per scripted press, plus a final idle frame.
    let presses = SCRIPT.iter().map(|&(key, action)| Some(Event::new(key, action)));
    for raw in presses.chain(std::iter::once(None)) {
        if let Some(event) = raw {
            input.push(event);
        }

        nav.init(&mut views);
        let event = input
            .pop()
            .and_then(|event| dispatch(&mut nav, &mut views, &mut fb, &mut input, event));
        let event = nav.filter_event(event);

        let _ = fb.clear(theme.palette.background);
        let page = nav.current_page();
        if let Some(view) = views.get_mut(nav.active_view()) {
            let _ = view.refresh(&mut fb, event, page);
        }
        views.background_all();

        info!(
            "view {} page {}/{} event {:?}",
            nav.active_view(),
            page,
            nav.pages().unwrap_or(0),
            event
        );
        let _ = fb.flush(&mut display);
    }

    let output_settings = OutputSettingsBuilder::new().build();
    match display
        .to_rgb_output_image(&output_settings)
        .save_png(SCREENSHOT_PATH)
    {
        Ok(()) => info!("Last frame written to {}", SCREENSHOT_PATH),
        Err(e) => error!("Cannot write {}: {}", SCREENSHOT_PATH, e),
    }

    info!("Simulator exiting");
}
