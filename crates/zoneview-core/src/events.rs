//! Hardware button events and the pending-input queue.
//!
//! An [`Event`] pairs a physical [`Key`] with the [`KeyAction`] that produced
//! it. "No event" is expressed as `Option<Event>::None` everywhere in the
//! crate.

use heapless::Deque;
use log::debug;

/// Capacity of the [`EventQueue`].
pub const EVENT_QUEUE_LEN: usize = 16;

/// Physical buttons the core knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Exit,
    Enter,
    PageUp,
    PageDown,
    Plus,
    Minus,
}

/// What happened to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Initial press
    First,
    /// Release
    Break,
    /// Held past the long-press threshold
    Long,
    /// Auto-repeat while held
    Repeat,
}

/// A single input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Event {
    pub key: Key,
    pub action: KeyAction,
}

impl Event {
    pub const fn new(key: Key, action: KeyAction) -> Self {
        Self { key, action }
    }

    pub const fn first(key: Key) -> Self {
        Self::new(key, KeyAction::First)
    }

    pub const fn release(key: Key) -> Self {
        Self::new(key, KeyAction::Break)
    }

    pub const fn long(key: Key) -> Self {
        Self::new(key, KeyAction::Long)
    }

    /// Whether this is a page-up or page-down event of any kind.
    pub fn is_page_key(&self) -> bool {
        matches!(self.key, Key::PageUp | Key::PageDown)
    }
}

/// Source of pending input that navigation can flush.
pub trait InputQueue {
    /// Drop every queued event for `key` and ignore that key until it is
    /// released.
    fn discard_pending(&mut self, key: Key);
}

/// Bounded FIFO of raw key events fed by the keypad driver.
#[derive(Debug)]
pub struct EventQueue {
    events: Deque<Event, EVENT_QUEUE_LEN>,
    killed: Option<Key>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            events: Deque::new(),
            killed: None,
        }
    }

    /// Queue an event. Returns `false` if it was dropped, either because the
    /// queue is full or because its key is currently killed.
    pub fn push(&mut self, event: Event) -> bool {
        if self.killed == Some(event.key) {
            if event.action == KeyAction::Break {
                self.killed = None;
            }
            return false;
        }
        self.events.push_back(event).is_ok()
    }

    /// Next event, oldest first.
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue for EventQueue {
    fn discard_pending(&mut self, key: Key) {
        let mut kept: Deque<Event, EVENT_QUEUE_LEN> = Deque::new();
        while let Some(event) = self.events.pop_front() {
            if event.key != key {
                kept.push_back(event).ok();
            }
        }
        self.events = kept;
        self.killed = Some(key);
        debug!(" Discarded pending {:?} events", key);
    }
}
