//! Month view used to pick the date part of both ends of the range.

use crate::calendar::{in_range, month_grid, month_start, ordered, shift_month};
use crate::dom_bridge::today;
use crate::state::PickerContext;
use chrono::{Datelike, NaiveDate};
use dioxus::prelude::*;
use dtr_core::{DateSelection, PickerConfig, RangeValue};
use dtr_utils::dates::format_date;

const WEEKDAYS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

#[derive(Props, Clone, PartialEq)]
pub struct CalendarPopupProps {
    /// Element id; clicks inside it do not count as outside actions
    pub id: String,
    pub value: RangeValue,
    pub open: bool,
}

/// Two clicks select a range: the first marks a pending day, the second
/// commits both ends at midnight.
#[component]
pub fn CalendarPopup(props: CalendarPopupProps) -> Element {
    let PickerContext { mut picker, events } = use_context::<PickerContext>();
    let (from, to) = props.value.sides();
    let from_date = from.map(|instant| instant.date());
    let to_date = to.map(|instant| instant.date());

    let initial = from_date.or_else(today).unwrap_or_default();
    let mut view = use_signal(move || month_start(initial));
    let mut pending = use_signal(|| None::<NaiveDate>);

    let config = picker.read().config().clone();
    let start = view();
    let weeks = month_grid(start);
    let title = start.format("%B %Y").to_string();
    let class = if props.open {
        "datetimerange-picker__calendar datetimerange-picker__calendar--open"
    } else {
        "datetimerange-picker__calendar datetimerange-picker__calendar--closed"
    };
    let display = if props.open { "block" } else { "none" };

    let mut on_day = move |day: NaiveDate| {
        let Some(first) = pending() else {
            pending.set(Some(day));
            return;
        };
        pending.set(None);
        let (a, b) = ordered(first, day);
        let selection = DateSelection::Range(a.and_hms_opt(0, 0, 0), b.and_hms_opt(0, 0, 0));
        let notifications = picker.write().on_date_change(&props.value, selection);
        events.emit(notifications);
    };

    rsx! {
        div {
            id: "{props.id}",
            class: "{class}",
            style: "display: {display}; position: absolute; top: 100%; left: 0; z-index: 1; background: white; border: 1px solid #999; padding: 6px;",
            div {
                style: "display: flex; justify-content: space-between; align-items: center;",
                button {
                    r#type: "button",
                    onclick: move |_| view.set(shift_month(start, -1)),
                    "‹"
                }
                span { "{title}" }
                button {
                    r#type: "button",
                    onclick: move |_| view.set(shift_month(start, 1)),
                    "›"
                }
            }
            table {
                thead {
                    tr {
                        for name in WEEKDAYS {
                            th { "{name}" }
                        }
                    }
                }
                tbody {
                    for week in weeks {
                        tr {
                            for cell in week {
                                td {
                                    if let Some(day) = cell {
                                        button {
                                            r#type: "button",
                                            title: "{format_date(&day)}",
                                            disabled: config.disabled || !day_allowed(day, &config),
                                            style: tile_style(day, from_date, to_date, pending()),
                                            onclick: move |_| on_day(day),
                                            "{day.day()}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// A day is selectable when any moment of it falls inside the bounds.
fn day_allowed(day: NaiveDate, config: &PickerConfig) -> bool {
    let (Some(first), Some(last)) = (day.and_hms_opt(0, 0, 0), day.and_hms_opt(23, 59, 59)) else {
        return false;
    };
    let after_min = config.min_date.map_or(true, |min| last >= min);
    let before_max = config.max_date.map_or(true, |max| first <= max);
    after_min && before_max
}

fn tile_style(day: NaiveDate, from: Option<NaiveDate>, to: Option<NaiveDate>, pending: Option<NaiveDate>) -> &'static str {
    if pending == Some(day) {
        "background: #FFE082;"
    } else if in_range(day, from, to) {
        "background: #BBDEFB;"
    } else {
        ""
    }
}
