//! Picker state shared with the popup and input components via Dioxus context.
//!
//! `PickerContext` is provided by `DateTimeRangePicker` with
//! `use_context_provider`; children retrieve it with `use_context::<PickerContext>()`.

use dioxus::prelude::*;
use dtr_core::{Notification, Notifications, RangePicker, RangeValue};

/// The host's callbacks, one per notification kind.
#[derive(Clone, Copy, PartialEq)]
pub struct PickerEvents {
    pub on_change: EventHandler<RangeValue>,
    pub on_calendar_open: Option<EventHandler>,
    pub on_calendar_close: Option<EventHandler>,
    pub on_clock_open: Option<EventHandler>,
    pub on_clock_close: Option<EventHandler>,
    pub on_invalid_change: Option<EventHandler>,
    pub on_focus: Option<EventHandler<FocusEvent>>,
}

impl PickerEvents {
    /// Forward notifications to the host in the order the picker produced them.
    pub fn emit(&self, notifications: Notifications) {
        for notification in notifications {
            match notification {
                Notification::Change(value) => self.on_change.call(value),
                Notification::CalendarOpen => call(self.on_calendar_open),
                Notification::CalendarClose => call(self.on_calendar_close),
                Notification::ClockOpen => call(self.on_clock_open),
                Notification::ClockClose => call(self.on_clock_close),
                Notification::InvalidChange => call(self.on_invalid_change),
            }
        }
    }
}

fn call(handler: Option<EventHandler>) {
    if let Some(handler) = handler {
        handler.call(());
    }
}

/// Shared state for one picker instance.
#[derive(Clone, Copy)]
pub struct PickerContext {
    /// The open/close state machine and change dispatcher
    pub picker: Signal<RangePicker>,
    /// Callbacks of the owning component
    pub events: PickerEvents,
}
