//! The range picker: two input groups, a clear button, a calendar button
//! and the calendar/clock popups.

use crate::components::{CalendarPopup, ClockPopup, InputGroup};
use crate::dom_bridge::{event_key, event_target, DomListenerHost, PickerId};
use crate::state::{PickerContext, PickerEvents};
use dioxus::prelude::*;
use dtr_core::regions::{DocumentListeners, ListenedEvent, RegionKind};
use dtr_core::{Notifications, OpenProps, PickerConfig, RangePicker, RangeValue, Side};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// Props for DateTimeRangePicker
#[derive(Props, Clone, PartialEq)]
pub struct DateTimeRangePickerProps {
    /// DOM id of the wrapper. Popups use `{id}-calendar` and `{id}-clock`.
    pub id: String,
    /// The controlled value
    pub value: RangeValue,
    pub on_change: EventHandler<RangeValue>,
    #[props(default)]
    pub config: PickerConfig,
    /// Forces the calendar open or closed; `None` leaves it to the picker
    #[props(default)]
    pub is_calendar_open: Option<bool>,
    #[props(default)]
    pub is_clock_open: Option<bool>,
    #[props(default)]
    pub on_calendar_open: Option<EventHandler>,
    #[props(default)]
    pub on_calendar_close: Option<EventHandler>,
    #[props(default)]
    pub on_clock_open: Option<EventHandler>,
    #[props(default)]
    pub on_clock_close: Option<EventHandler>,
    #[props(default)]
    pub on_invalid_change: Option<EventHandler>,
    /// Called for every focus on one of the inputs, before routing
    #[props(default)]
    pub on_focus: Option<EventHandler<FocusEvent>>,
}

/// A controlled date/time range picker.
///
/// The component never stores the value: every edit is reported through
/// `on_change` and shown once the host passes it back in.
#[component]
pub fn DateTimeRangePicker(props: DateTimeRangePickerProps) -> Element {
    let open_props = OpenProps {
        calendar: props.is_calendar_open,
        clock: props.is_clock_open,
    };
    let mut picker = use_signal(|| RangePicker::new(props.config.clone(), open_props));

    // Prop changes snap the popups without notifications.
    let config_prop = props.config.clone();
    use_effect(use_reactive!(|(open_props, config_prop)| {
        if picker.peek().host_props_changed(open_props, &config_prop) {
            picker.write().apply_host_props(open_props, config_prop);
        }
    }));

    let events = PickerEvents {
        on_change: props.on_change,
        on_calendar_open: props.on_calendar_open,
        on_calendar_close: props.on_calendar_close,
        on_clock_open: props.on_clock_open,
        on_clock_close: props.on_clock_close,
        on_invalid_change: props.on_invalid_change,
        on_focus: props.on_focus,
    };
    use_context_provider(|| PickerContext { picker, events });

    let picker_id = use_hook(|| PickerId::new(&props.id));
    picker_id.set(&props.id);

    let listener_id = picker_id.clone();
    let listeners = use_hook(move || {
        let host = DomListenerHost::new(move |event: web_sys::Event| {
            let notifications = match ListenedEvent::from_dom_name(&event.type_()) {
                Some(ListenedEvent::KeyDown) => picker.write().on_key_down(&event_key(&event)),
                Some(kind) if kind.is_outside_action() => {
                    let target = event_target(&event);
                    picker
                        .write()
                        .on_outside_action(target.as_ref(), &listener_id.regions())
                }
                _ => Notifications::default(),
            };
            events.emit(notifications);
        });
        Rc::new(RefCell::new(DocumentListeners::new(host)))
    });

    let sync = listeners.clone();
    use_effect(move || {
        let wanted = picker.read().listeners_wanted();
        debug!("document listeners wanted: {}", wanted);
        sync.borrow_mut().sync(wanted);
    });
    use_drop(move || listeners.borrow_mut().release());

    let (class, config, calendar, clock, clock_value) = {
        let current = picker.read();
        let visibility = current.visibility();
        (
            current.wrapper_class(),
            current.config().clone(),
            visibility.calendar(),
            visibility.clock(),
            current.clock_value(&props.value),
        )
    };

    let clear_value = props.value.clone();
    let on_clear = move |_| {
        let notifications = picker.write().clear(&clear_value);
        events.emit(notifications);
    };
    let on_calendar_button = move |_| {
        let notifications = picker.write().toggle_calendar();
        events.emit(notifications);
    };

    let calendar_id = picker_id.region_id(RegionKind::Calendar);
    let clock_id = picker_id.region_id(RegionKind::Clock);
    let show_calendar = !config.disable_calendar && calendar.is_some();
    let show_clock = !config.disable_clock && clock.is_some();

    rsx! {
        div {
            id: "{props.id}",
            class: "{class}",
            style: "position: relative; display: inline-flex; flex-direction: column;",
            div {
                class: "datetimerange-picker__wrapper",
                style: "display: flex; align-items: center; gap: 6px; padding: 4px; border: 1px solid #999;",
                InputGroup { side: Side::From, value: props.value.clone() }
                span { class: "datetimerange-picker__range-divider", "–" }
                InputGroup { side: Side::To, value: props.value.clone() }
                button {
                    class: "datetimerange-picker__clear-button",
                    r#type: "button",
                    disabled: config.disabled,
                    onclick: on_clear,
                    "✕"
                }
                if !config.disable_calendar {
                    button {
                        class: "datetimerange-picker__calendar-button",
                        r#type: "button",
                        disabled: config.disabled,
                        onclick: on_calendar_button,
                        "📅"
                    }
                }
            }
            if show_calendar {
                CalendarPopup {
                    id: calendar_id,
                    value: props.value.clone(),
                    open: calendar == Some(true),
                }
            }
            if show_clock {
                ClockPopup {
                    id: clock_id,
                    value: clock_value,
                    open: clock == Some(true),
                }
            }
        }
    }
}

