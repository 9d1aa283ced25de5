//! Change notifications
//!
//! Events are dispatched synchronously, in registration order, from inside
//! the operation that caused them.

use chrono::NaiveDate;
use serde::Serialize;

use crate::selection::DateRange;
use crate::view::CalendarView;

/// Notification emitted by a [`Calendar`](crate::Calendar)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum CalendarEvent {
    /// Current selection list (empty, one or many dates depending on mode)
    SelectionChanged(Vec<NaiveDate>),
    /// Current range, either end possibly absent
    RangeChanged(DateRange),
    /// Active view or anchor month changed
    ViewChanged { view: CalendarView, anchor: NaiveDate },
    /// Secondary click on a day; never changes selection
    DayContextMenu(NaiveDate),
}

/// Listener for calendar events
///
/// Implemented for every `FnMut(&CalendarEvent)` closure.
pub trait CalendarListener {
    /// Handle one event
    fn on_event(&mut self, event: &CalendarEvent);
}

impl<F> CalendarListener for F
where
    F: FnMut(&CalendarEvent),
{
    fn on_event(&mut self, event: &CalendarEvent) {
        self(event)
    }
}

/// Registry of listeners
pub struct EventBus {
    listeners: Vec<Box<dyn CalendarListener>>,
}

impl EventBus {
    /// Create a new empty bus
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register a listener
    pub fn subscribe(&mut self, listener: impl CalendarListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Dispatch one event to every listener
    pub fn emit(&mut self, event: &CalendarEvent) {
        for listener in &mut self.listeners {
            listener.on_event(event);
        }
    }

    /// Dispatch events in order
    pub fn emit_all(&mut self, events: &[CalendarEvent]) {
        for event in events {
            self.emit(event);
        }
    }

    /// Get the number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if no listeners are registered
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
