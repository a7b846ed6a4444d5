//! Interactive navigation across views and pages.
//!
//! The [`Navigator`] is the single owner of "what is on screen": which view
//! of the [`ViewList`] is active, which page of that view has input focus,
//! and which focus transition still has to be announced to a widget.
//!
//! # States
//!
//! - *Uninitialized*: `pages() == None`, at start-up and after
//!   [`Navigator::invalidate`]. [`Navigator::init`] recomputes everything.
//! - *Non-interactive*: the active view has no pages. Page keys only move to
//!   the neighbouring view.
//! - *Interactive*: `current_page() < pages()`.
//!
//! Widgets learn about focus changes through synthetic events rather than a
//! dedicated callback: losing focus is an `Exit` long press, gaining focus a
//! `PageDown` press (see [`Navigator::filter_event`]).

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle, StrokeAlignment};
use log::{debug, info};

use crate::container::ViewList;
use crate::events::{Event, InputQueue, Key};
use crate::layouts::Zone;
use crate::styling::Theme;

/// Direction of the last page move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Forward,
    Backward,
}

/// Focus transition waiting to be delivered as a synthetic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusSignal {
    /// Delivered as a `PageDown` press
    Entering,
    /// Delivered as an `Exit` long press
    Exiting,
}

impl FocusSignal {
    pub fn event(self) -> Event {
        match self {
            FocusSignal::Entering => Event::first(Key::PageDown),
            FocusSignal::Exiting => Event::long(Key::Exit),
        }
    }
}

/// Event a widget receives when it loses input focus.
const FOCUS_LOST: Event = Event::long(Key::Exit);

/// View and page selection state, driven from the UI loop.
#[derive(Debug, Clone)]
pub struct Navigator {
    view: usize,
    page: u8,
    /// `None` while uninitialized
    pages: Option<u8>,
    last_direction: NavDirection,
    signal: Option<FocusSignal>,
    last_event_was_exit: bool,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Navigator {
    /// Start uninitialized on view `view` (usually the persisted one).
    pub fn new(view: usize) -> Self {
        Self {
            view,
            page: 0,
            pages: None,
            last_direction: NavDirection::Forward,
            signal: None,
            last_event_was_exit: false,
        }
    }

    pub fn active_view(&self) -> usize {
        self.view
    }

    pub fn current_page(&self) -> u8 {
        self.page
    }

    /// Page count of the active view, `None` until [`init`](Self::init).
    pub fn pages(&self) -> Option<u8> {
        self.pages
    }

    pub fn last_direction(&self) -> NavDirection {
        self.last_direction
    }

    pub fn pending_signal(&self) -> Option<FocusSignal> {
        self.signal
    }

    pub fn screen_is_interactive(&self) -> bool {
        self.pages.is_some_and(|pages| pages > 0)
    }

    pub fn available_views_count<D>(&self, views: &ViewList<'_, D>) -> usize
    where
        D: DrawTarget<Color = Rgb565>,
    {
        views.available_count()
    }

    /// Compute the active view's pages if uninitialized; no-op otherwise.
    pub fn init<D>(&mut self, views: &mut ViewList<'_, D>)
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.pages.is_some() {
            return;
        }
        if self.view >= views.available_count() {
            self.view = 0;
        }
        let pages = Self::view_pages(views, self.view);
        self.pages = Some(pages);
        self.page = 0;
        self.signal = Some(FocusSignal::Entering);
        self.last_event_was_exit = false;
        info!(" Navigation init: view {} has {} pages", self.view, pages);
    }

    /// Tell the focused widget it is losing focus and drop back to the
    /// uninitialized state.
    ///
    /// Call whenever the active view or its widgets may have changed behind
    /// the navigator's back.
    pub fn invalidate<D>(
        &mut self,
        views: &mut ViewList<'_, D>,
        display: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.screen_is_interactive() {
            self.notify_focus_lost(views, display)?;
        }
        self.pages = None;
        debug!(" Navigation invalidated");
        Ok(())
    }

    /// Switch to view `index` chosen outside the navigator.
    pub fn select_view<D>(
        &mut self,
        index: usize,
        views: &mut ViewList<'_, D>,
        display: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.invalidate(views, display)?;
        self.view = index;
        Ok(())
    }

    /// Request a synthetic focus event on the next filter pass.
    pub fn arm(&mut self, signal: FocusSignal) {
        debug!(" Armed {:?}", signal);
        self.signal = Some(signal);
    }

    /// Clean up one raw input event before it reaches the active view.
    ///
    /// 1. An `Exit` release is only passed on when it ends an `Exit` press
    ///    seen here; stray releases left over from other menus are dropped.
    /// 2. Page keys are reserved for navigation and never passed on.
    /// 3. With no event left, a pending [`FocusSignal`] is turned into its
    ///    synthetic event and cleared.
    pub fn filter_event(&mut self, event: Option<Event>) -> Option<Event> {
        let mut event = event;

        if event == Some(Event::release(Key::Exit)) {
            if self.last_event_was_exit {
                self.last_event_was_exit = false;
            } else {
                event = None;
            }
        }

        if let Some(current) = event {
            self.last_event_was_exit = current == Event::first(Key::Exit);
        }

        if event.is_some_and(|current| current.is_page_key()) {
            event = None;
        }

        if event.is_none()
            && let Some(signal) = self.signal.take()
        {
            debug!(" Injecting {:?}", signal);
            event = Some(signal.event());
        }

        event
    }

    /// Leave the current view in the last travelled direction.
    ///
    /// Returns `false` (and does nothing) on a non-interactive view, in which
    /// case the caller performs its default exit action.
    pub fn user_exit_screen<D>(
        &mut self,
        event: Event,
        views: &mut ViewList<'_, D>,
        display: &mut D,
        input: &mut dyn InputQueue,
    ) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if !self.screen_is_interactive() {
            return Ok(false);
        }
        input.discard_pending(event.key);
        self.notify_focus_lost(views, display)?;
        self.view = Self::neighbour(self.view, self.last_direction, views.available_count());
        self.enter_view(views, self.last_direction);
        Ok(true)
    }

    /// Next page, or the first page of the next view.
    pub fn user_increment_page<D>(
        &mut self,
        views: &mut ViewList<'_, D>,
        display: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.step(views, display, NavDirection::Forward)
    }

    /// Previous page, or the last page of the previous view.
    pub fn user_decrement_page<D>(
        &mut self,
        views: &mut ViewList<'_, D>,
        display: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.step(views, display, NavDirection::Backward)
    }

    fn step<D>(
        &mut self,
        views: &mut ViewList<'_, D>,
        display: &mut D,
        direction: NavDirection,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.init(views);
        self.last_direction = direction;
        let pages = self.pages.unwrap_or(0);

        let next = match direction {
            NavDirection::Forward => (self.page + 1 < pages).then(|| self.page + 1),
            NavDirection::Backward => (pages > 0 && self.page > 0).then(|| self.page - 1),
        };

        match next {
            Some(next) => {
                let multi_zone = views
                    .get_mut(self.view)
                    .is_some_and(|view| view.zones_count() > 1);
                if multi_zone {
                    self.notify_focus_lost(views, display)?;
                    self.signal = Some(FocusSignal::Entering);
                }
                self.page = next;
                debug!(" Page {}/{} of view {}", self.page, pages, self.view);
            }
            None => {
                if pages > 0 {
                    self.notify_focus_lost(views, display)?;
                }
                self.view = Self::neighbour(self.view, direction, views.available_count());
                self.enter_view(views, direction);
            }
        }
        Ok(())
    }

    /// Land on the active view after a view change.
    fn enter_view<D>(&mut self, views: &mut ViewList<'_, D>, direction: NavDirection)
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let pages = Self::view_pages(views, self.view);
        self.pages = Some(pages);
        self.page = match direction {
            NavDirection::Forward => 0,
            NavDirection::Backward => pages.saturating_sub(1),
        };
        if pages > 0 {
            self.signal = Some(FocusSignal::Entering);
        }
        info!(
            " Switched to view {} (page {} of {})",
            self.view, self.page, pages
        );
    }

    fn notify_focus_lost<D>(
        &mut self,
        views: &mut ViewList<'_, D>,
        display: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if let Some(view) = views.get_mut(self.view) {
            view.refresh(display, Some(FOCUS_LOST), self.page)?;
        }
        Ok(())
    }

    fn view_pages<D>(views: &mut ViewList<'_, D>, index: usize) -> u8
    where
        D: DrawTarget<Color = Rgb565>,
    {
        views.get_mut(index).map_or(0, |view| view.pages())
    }

    /// Circular neighbour of `index` among `count` views.
    fn neighbour(index: usize, direction: NavDirection, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        match direction {
            NavDirection::Forward => (index + 1) % count,
            NavDirection::Backward => (index % count + count - 1) % count,
        }
    }
}

/// Draw the focus border around `zone`, `padding` pixels outside it.
pub fn draw_active_highlight<D>(
    display: &mut D,
    zone: Zone,
    theme: &Theme,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let padding = theme.highlight.padding as u32;
    let style = PrimitiveStyleBuilder::new()
        .stroke_color(theme.palette.highlight)
        .stroke_width(theme.highlight.thickness as u32)
        .stroke_alignment(StrokeAlignment::Inside)
        .build();

    Rectangle::new(
        zone.top_left - Point::new(padding as i32, padding as i32),
        zone.size + Size::new(2 * padding, 2 * padding),
    )
    .into_styled(style)
    .draw(display)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{PersistentData, WidgetsContainer};
    use crate::events::{EventQueue, KeyAction};
    use crate::framebuffer::FrameBuffer;
    use crate::layouts::{FullScreen, Grid, screen_bounds};
    use crate::testing::{Call, CallLog, TestWidgetFactory, calls};

    type Screen<'p> = WidgetsContainer<'p, FrameBuffer, FullScreen, 1, 0>;
    type Quad<'p> = WidgetsContainer<'p, FrameBuffer, Grid, 4, 0>;

    /// View 0 holds one two-page widget, views 1 and 2 are passive.
    fn three_views<'a>(
        screens: &'a mut [PersistentData<1, 0>; 3],
        chart: &TestWidgetFactory,
        clock: &TestWidgetFactory,
    ) -> ViewList<'a, FrameBuffer> {
        let [a, b, c] = screens;
        let mut first = Screen::new(FullScreen::default(), a);
        first.create_widget(0, Some(chart)).unwrap();
        let mut second = Screen::new(FullScreen::default(), b);
        second.create_widget(0, Some(clock)).unwrap();
        let third = Screen::new(FullScreen::default(), c);

        let mut views = ViewList::new();
        views.set(0, first).unwrap();
        views.set(1, second).unwrap();
        views.set(2, third).unwrap();
        views
    }

    fn focus_lost_calls(log: &CallLog) -> usize {
        log.borrow()
            .iter()
            .filter(|call| call.event == Some(FOCUS_LOST))
            .count()
    }

    #[test]
    fn test_starts_uninitialized() {
        let nav = Navigator::default();
        assert_eq!(nav.pages(), None);
        assert!(!nav.screen_is_interactive());
        assert_eq!(nav.current_page(), 0);
        assert_eq!(nav.active_view(), 0);
    }

    #[test]
    fn test_init_is_idempotent() {
        let log = calls();
        let chart = TestWidgetFactory::new("Chart", 2, &log);
        let clock = TestWidgetFactory::new("Clock", 0, &log);
        let mut screens = Default::default();
        let mut views = three_views(&mut screens, &chart, &clock);
        let mut nav = Navigator::default();

        nav.init(&mut views);
        assert_eq!(nav.pages(), Some(2));
        assert_eq!(nav.pending_signal(), Some(FocusSignal::Entering));

        nav.filter_event(None);
        nav.init(&mut views);
        assert_eq!(nav.pending_signal(), None);
    }

    #[test]
    fn test_init_on_missing_view_falls_back_to_first() {
        let log = calls();
        let chart = TestWidgetFactory::new("Chart", 2, &log);
        let clock = TestWidgetFactory::new("Clock", 0, &log);
        let mut screens = Default::default();
        let mut views = three_views(&mut screens, &chart, &clock);
        let mut nav = Navigator::new(4);

        nav.init(&mut views);

        assert_eq!(nav.active_view(), 0);
        assert_eq!(nav.pages(), Some(2));
    }

    #[test]
    fn test_increment_walks_pages_then_views() {
        let log = calls();
        let chart = TestWidgetFactory::new("Chart", 2, &log);
        let clock = TestWidgetFactory::new("Clock", 0, &log);
        let mut screens = Default::default();
        let mut views = three_views(&mut screens, &chart, &clock);
        let mut fb = FrameBuffer::new();
        let mut nav = Navigator::default();
        nav.init(&mut views);

        nav.user_increment_page(&mut views, &mut fb).unwrap();
        assert_eq!((nav.active_view(), nav.current_page()), (0, 1));
        assert!(nav.screen_is_interactive());
        // Single-zone pages are handled by the widget itself.
        assert_eq!(focus_lost_calls(&log), 0);

        nav.user_increment_page(&mut views, &mut fb).unwrap();
        assert_eq!((nav.active_view(), nav.current_page()), (1, 0));
        assert!(!nav.screen_is_interactive());
        assert_eq!(
            log.borrow().last(),
            Some(&Call {
                widget: "Chart",
                event: Some(FOCUS_LOST),
                page: 1
            })
        );
    }

    #[test]
    fn test_increment_wraps_to_first_view() {
        let log = calls();
        let chart = TestWidgetFactory::new("Chart", 2, &log);
        let clock = TestWidgetFactory::new("Clock", 0, &log);
        let mut screens = Default::default();
        let mut views = three_views(&mut screens, &chart, &clock);
        let mut fb = FrameBuffer::new();
        let mut nav = Navigator::default();
        nav.init(&mut views);

        for _ in 0..4 {
            nav.user_increment_page(&mut views, &mut fb).unwrap();
        }

        assert_eq!((nav.active_view(), nav.current_page()), (0, 0));
        assert_eq!(nav.pages(), Some(2));
        assert_eq!(nav.pending_signal(), Some(FocusSignal::Entering));
    }

    #[test]
    fn test_decrement_wraps_to_last_page_of_last_view() {
        let log = calls();
        let chart = TestWidgetFactory::new("Chart", 2, &log);
        let clock = TestWidgetFactory::new("Clock", 0, &log);
        let mut screens = Default::default();
        let mut views = three_views(&mut screens, &chart, &clock);
        let mut fb = FrameBuffer::new();
        let mut nav = Navigator::default();
        nav.init(&mut views);

        nav.user_decrement_page(&mut views, &mut fb).unwrap();
        assert_eq!((nav.active_view(), nav.current_page()), (2, 0));

        nav.user_decrement_page(&mut views, &mut fb).unwrap();
        nav.user_decrement_page(&mut views, &mut fb).unwrap();
        assert_eq!((nav.active_view(), nav.current_page()), (0, 1));
        assert_eq!(nav.last_direction(), NavDirection::Backward);
    }

    #[test]
    fn test_page_stays_in_bounds() {
        let log = calls();
        let chart = TestWidgetFactory::new("Chart", 2, &log);
        let clock = TestWidgetFactory::new("Clock", 0, &log);
        let mut screens = Default::default();
        let mut views = three_views(&mut screens, &chart, &clock);
        let mut fb = FrameBuffer::new();
        let mut nav = Navigator::default();
        nav.init(&mut views);

        for step in 0..20 {
            if step % 3 == 0 {
                nav.user_decrement_page(&mut views, &mut fb).unwrap();
            } else {
                nav.user_increment_page(&mut views, &mut fb).unwrap();
            }
            let pages = nav.pages().unwrap();
            assert!(nav.current_page() < pages.max(1));
            assert!(nav.active_view() < 3);
        }
    }

    #[test]
    fn test_multi_zone_page_change_moves_focus() {
        let log = calls();
        let left = TestWidgetFactory::new("Left", 1, &log);
        let right = TestWidgetFactory::new("Right", 1, &log);
        let mut data = PersistentData::<4, 0>::default();
        let mut quad = Quad::new(Grid::new(screen_bounds(), 2, 2), &mut data);
        quad.create_widget(0, Some(&left)).unwrap();
        quad.create_widget(3, Some(&right)).unwrap();
        let mut views = ViewList::new();
        views.set(0, quad).unwrap();
        let mut fb = FrameBuffer::new();
        let mut nav = Navigator::default();
        nav.init(&mut views);
        assert_eq!(nav.filter_event(None), Some(Event::first(Key::PageDown)));

        nav.user_increment_page(&mut views, &mut fb).unwrap();

        assert_eq!(nav.current_page(), 1);
        assert_eq!(nav.pending_signal(), Some(FocusSignal::Entering));
        assert_eq!(
            log.borrow().as_slice(),
            &[
                Call {
                    widget: "Left",
                    event: Some(FOCUS_LOST),
                    page: 0
                },
                Call {
                    widget: "Right",
                    event: None,
                    page: 0
                },
            ]
        );

        // The newly focused zone gets its synthetic focus event next frame.
        let event = nav.filter_event(None);
        assert_eq!(event, Some(Event::first(Key::PageDown)));
        views
            .get_mut(0)
            .unwrap()
            .refresh(&mut fb, event, nav.current_page())
            .unwrap();
        assert_eq!(
            log.borrow().last(),
            Some(&Call {
                widget: "Right",
                event,
                page: 0
            })
        );
    }

    #[test]
    fn test_single_view_wraps_onto_itself() {
        let log = calls();
        let chart = TestWidgetFactory::new("Chart", 3, &log);
        let mut data = PersistentData::<1, 0>::default();
        let mut screen = Screen::new(FullScreen::default(), &mut data);
        screen.create_widget(0, Some(&chart)).unwrap();
        let mut views = ViewList::new();
        views.set(0, screen).unwrap();
        let mut fb = FrameBuffer::new();
        let mut nav = Navigator::default();

        nav.user_decrement_page(&mut views, &mut fb).unwrap();

        assert_eq!((nav.active_view(), nav.current_page()), (0, 2));
    }

    #[test]
    fn test_empty_view_list_is_inert() {
        let mut views: ViewList<'_, FrameBuffer> = ViewList::new();
        let mut fb = FrameBuffer::new();
        let mut nav = Navigator::default();

        nav.user_increment_page(&mut views, &mut fb).unwrap();

        assert_eq!(nav.available_views_count(&views), 0);
        assert_eq!((nav.active_view(), nav.current_page()), (0, 0));
        assert!(!nav.screen_is_interactive());
    }

    #[test]
    fn test_filter_always_drops_page_keys() {
        let mut nav = Navigator::default();
        for action in [
            KeyAction::First,
            KeyAction::Break,
            KeyAction::Long,
            KeyAction::Repeat,
        ] {
            assert_eq!(nav.filter_event(Some(Event::new(Key::PageUp, action))), None);
            assert_eq!(nav.filter_event(Some(Event::new(Key::PageDown, action))), None);
        }
    }

    #[test]
    fn test_filter_drops_stray_exit_release() {
        let mut nav = Navigator::default();
        assert_eq!(nav.filter_event(Some(Event::release(Key::Exit))), None);

        let press = Some(Event::first(Key::Exit));
        assert_eq!(nav.filter_event(press), press);
        let release = Some(Event::release(Key::Exit));
        assert_eq!(nav.filter_event(release), release);

        // The press was consumed by its release.
        assert_eq!(nav.filter_event(release), None);
    }

    #[test]
    fn test_filter_other_keys_reset_exit_tracking() {
        let mut nav = Navigator::default();
        nav.filter_event(Some(Event::first(Key::Exit)));
        nav.filter_event(Some(Event::first(Key::Plus)));
        assert_eq!(nav.filter_event(Some(Event::release(Key::Exit))), None);
    }

    #[test]
    fn test_filter_injects_signal_once() {
        let mut nav = Navigator::default();
        nav.arm(FocusSignal::Exiting);

        assert_eq!(nav.filter_event(None), Some(Event::long(Key::Exit)));
        assert_eq!(nav.filter_event(None), None);

        nav.arm(FocusSignal::Entering);
        assert_eq!(
            nav.filter_event(Some(Event::first(Key::PageUp))),
            Some(Event::first(Key::PageDown))
        );
        assert_eq!(nav.pending_signal(), None);
    }

    #[test]
    fn test_real_event_defers_signal() {
        let mut nav = Navigator::default();
        nav.arm(FocusSignal::Entering);

        let enter = Some(Event::first(Key::Enter));
        assert_eq!(nav.filter_event(enter), enter);
        assert_eq!(nav.pending_signal(), Some(FocusSignal::Entering));
        assert_eq!(nav.filter_event(None), Some(Event::first(Key::PageDown)));
    }

    #[test]
    fn test_exit_on_passive_view_is_not_handled() {
        let log = calls();
        let chart = TestWidgetFactory::new("Chart", 2, &log);
        let clock = TestWidgetFactory::new("Clock", 0, &log);
        let mut screens = Default::default();
        let mut views = three_views(&mut screens, &chart, &clock);
        let mut fb = FrameBuffer::new();
        let mut input = EventQueue::new();
        input.push(Event::long(Key::Exit));
        let mut nav = Navigator::new(1);
        nav.init(&mut views);

        let handled = nav
            .user_exit_screen(Event::first(Key::Exit), &mut views, &mut fb, &mut input)
            .unwrap();

        assert!(!handled);
        assert_eq!(nav.active_view(), 1);
        assert_eq!(input.len(), 1);
    }

    #[test]
    fn test_exit_leaves_view_in_last_direction() {
        let log = calls();
        let chart = TestWidgetFactory::new("Chart", 2, &log);
        let clock = TestWidgetFactory::new("Clock", 0, &log);
        let mut screens = Default::default();
        let mut views = three_views(&mut screens, &chart, &clock);
        let mut fb = FrameBuffer::new();
        let mut input = EventQueue::new();
        let mut nav = Navigator::default();
        nav.init(&mut views);
        // Back from view 1 onto the last page of view 0.
        nav.user_increment_page(&mut views, &mut fb).unwrap();
        nav.user_increment_page(&mut views, &mut fb).unwrap();
        nav.user_decrement_page(&mut views, &mut fb).unwrap();
        assert_eq!((nav.active_view(), nav.current_page()), (0, 1));

        input.push(Event::long(Key::Exit));
        input.push(Event::first(Key::Plus));
        let handled = nav
            .user_exit_screen(Event::first(Key::Exit), &mut views, &mut fb, &mut input)
            .unwrap();

        assert!(handled);
        assert_eq!((nav.active_view(), nav.current_page()), (2, 0));
        assert!(!nav.screen_is_interactive());
        assert_eq!(input.pop(), Some(Event::first(Key::Plus)));
        assert!(input.is_empty());
        assert_eq!(
            log.borrow().last(),
            Some(&Call {
                widget: "Chart",
                event: Some(FOCUS_LOST),
                page: 1
            })
        );
    }

    #[test]
    fn test_invalidate_notifies_and_resets() {
        let log = calls();
        let chart = TestWidgetFactory::new("Chart", 2, &log);
        let clock = TestWidgetFactory::new("Clock", 0, &log);
        let mut screens = Default::default();
        let mut views = three_views(&mut screens, &chart, &clock);
        let mut fb = FrameBuffer::new();
        let mut nav = Navigator::default();
        nav.init(&mut views);
        nav.user_increment_page(&mut views, &mut fb).unwrap();
        nav.filter_event(None);

        nav.invalidate(&mut views, &mut fb).unwrap();

        assert_eq!(nav.pages(), None);
        assert_eq!(focus_lost_calls(&log), 1);

        nav.init(&mut views);
        assert_eq!(nav.pages(), Some(2));
        assert_eq!(nav.current_page(), 0);
        assert_eq!(nav.pending_signal(), Some(FocusSignal::Entering));
    }

    #[test]
    fn test_invalidate_when_uninitialized_is_silent() {
        let log = calls();
        let chart = TestWidgetFactory::new("Chart", 2, &log);
        let clock = TestWidgetFactory::new("Clock", 0, &log);
        let mut screens = Default::default();
        let mut views = three_views(&mut screens, &chart, &clock);
        let mut fb = FrameBuffer::new();
        let mut nav = Navigator::default();

        nav.invalidate(&mut views, &mut fb).unwrap();

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_select_view_reinitializes_on_new_view() {
        let log = calls();
        let chart = TestWidgetFactory::new("Chart", 2, &log);
        let clock = TestWidgetFactory::new("Clock", 0, &log);
        let mut screens = Default::default();
        let mut views = three_views(&mut screens, &chart, &clock);
        let mut fb = FrameBuffer::new();
        let mut nav = Navigator::default();
        nav.init(&mut views);

        nav.select_view(1, &mut views, &mut fb).unwrap();
        nav.init(&mut views);

        assert_eq!(nav.active_view(), 1);
        assert_eq!(nav.pages(), Some(0));
        assert_eq!(focus_lost_calls(&log), 1);
    }

    #[test]
    fn test_highlight_surrounds_zone() {
        let mut fb = FrameBuffer::new();
        let theme = Theme::default();
        let zone = Rectangle::new(Point::new(100, 100), Size::new(50, 50));

        draw_active_highlight(&mut fb, zone, &theme).unwrap();

        let highlight = Some(theme.palette.highlight);
        assert_eq!(fb.pixel(Point::new(96, 96)), highlight);
        assert_eq!(fb.pixel(Point::new(97, 120)), highlight);
        assert_eq!(fb.pixel(Point::new(153, 153)), highlight);
        assert_eq!(fb.pixel(Point::new(98, 98)), Some(Rgb565::BLACK));
        assert_eq!(fb.pixel(Point::new(120, 120)), Some(Rgb565::BLACK));
        assert_eq!(fb.pixel(Point::new(154, 154)), Some(Rgb565::BLACK));
    }

    #[test]
    fn test_highlight_uses_light_palette() {
        let mut fb = FrameBuffer::new();
        let theme = Theme::light();
        let zone = Rectangle::new(Point::new(100, 100), Size::new(50, 50));

        draw_active_highlight(&mut fb, zone, &theme).unwrap();

        let expected = Some(crate::styling::COLOR_HIGHLIGHT_LIGHT);
        assert_eq!(fb.pixel(Point::new(96, 96)), expected);
        assert_eq!(fb.pixel(Point::new(153, 100)), expected);
    }
}
