//! Numeric date and time fields for one side of the range.

use crate::dom_bridge::today;
use crate::state::PickerContext;
use chrono::{Datelike, Timelike};
use dioxus::prelude::*;
use dtr_core::fields::FieldName;
use dtr_core::focus::FieldFocus;
use dtr_core::{Instant, RangeValue, Side};
use dtr_utils::dates::format_instant;

#[derive(Props, Clone, PartialEq)]
pub struct InputGroupProps {
    pub side: Side,
    pub value: RangeValue,
}

fn field_value(instant: Option<Instant>, field: FieldName) -> String {
    let Some(instant) = instant else {
        return String::new();
    };
    match field {
        FieldName::Day => instant.day().to_string(),
        FieldName::Month => instant.month().to_string(),
        FieldName::Year => instant.year().to_string(),
        FieldName::Hour24 => instant.hour().to_string(),
        FieldName::Hour12 => instant.hour12().1.to_string(),
        FieldName::Minute => format!("{:02}", instant.minute()),
        FieldName::Second => format!("{:02}", instant.second()),
        FieldName::AmPm => if instant.hour12().0 { "pm" } else { "am" }.to_string(),
    }
}

fn field_bounds(field: FieldName) -> (u32, u32) {
    match field {
        FieldName::Day => (1, 31),
        FieldName::Month => (1, 12),
        FieldName::Year => (1, 275759),
        FieldName::Hour12 => (1, 12),
        FieldName::Hour24 => (0, 23),
        FieldName::Minute | FieldName::Second => (0, 59),
        FieldName::AmPm => (0, 1),
    }
}

/// Day, month, year and the time fields down to the configured detail,
/// plus a hidden input carrying the side's value under `{name}_{side}`.
#[component]
pub fn InputGroup(props: InputGroupProps) -> Element {
    let ctx = use_context::<PickerContext>();
    let config = ctx.picker.read().config().clone();
    let side = props.side;
    let instant = props.value.side(side);

    let mut fields = vec![FieldName::Year, FieldName::Month, FieldName::Day, FieldName::Hour24];
    if config.max_detail.renders_minute_hand() {
        fields.push(FieldName::Minute);
    }
    if config.max_detail.renders_second_hand() {
        fields.push(FieldName::Second);
    }

    let hidden_value = instant.as_ref().map(format_instant).unwrap_or_default();

    rsx! {
        div {
            class: "datetimerange-picker__inputGroup",
            style: "display: inline-flex; gap: 2px;",
            input {
                r#type: "hidden",
                name: "{config.input_name(side)}",
                value: "{hidden_value}",
            }
            for field in fields {
                FieldInput {
                    key: "{field.as_str()}",
                    side,
                    field,
                    value: props.value.clone(),
                    disabled: config.disabled,
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct FieldInputProps {
    side: Side,
    field: FieldName,
    value: RangeValue,
    disabled: bool,
}

#[component]
fn FieldInput(props: FieldInputProps) -> Element {
    let PickerContext { mut picker, events } = use_context::<PickerContext>();
    let FieldInputProps { side, field, .. } = props;
    let (min, max) = field_bounds(field);
    let text = field_value(props.value.side(side), field);

    let on_focus = move |evt: FocusEvent| {
        if let Some(handler) = events.on_focus {
            handler.call(evt);
        }
        let notifications = picker.write().on_field_focus(side, FieldFocus::input(field.as_str()));
        events.emit(notifications);
    };

    let value = props.value.clone();
    let on_change = move |evt: Event<FormData>| {
        // An empty side starts from today's midnight so a single field can be edited.
        let raw = evt.value();
        let seeded = match value.side(side) {
            Some(_) => value.clone(),
            None if raw.trim().is_empty() => value.clone(),
            None => match today().and_then(|day| day.and_hms_opt(0, 0, 0)) {
                Some(midnight) => value.apply_range_edit(side, Some(midnight)),
                None => value.clone(),
            },
        };
        let notifications = picker.write().on_field_edit(&seeded, side, field.as_str(), &raw);
        events.emit(notifications);
    };

    rsx! {
        input {
            class: "datetimerange-picker__input datetimerange-picker__input--{field.as_str()}",
            r#type: "number",
            name: "{field.as_str()}",
            min: "{min}",
            max: "{max}",
            placeholder: "--",
            value: "{text}",
            disabled: props.disabled,
            onfocus: on_focus,
            onchange: on_change,
        }
    }
}
