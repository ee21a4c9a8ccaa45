//! Sample page for the date/time range picker.
//!
//! Data flow:
//! 1. `build.rs` copies `fixtures/picker.json` into `OUT_DIR`.
//! 2. `include_str!` embeds it; on mount it becomes the initial `PickerConfig`.
//! 3. The page owns the value and feeds every `on_change` back into the picker.
//! 4. Notifications are appended to an on-page event log.

use chrono::NaiveDate;
use dioxus::prelude::*;
use dtr_core::{Detail, Instant, PickerConfig, RangeValue};
use dtr_picker_ui::components::DateTimeRangePicker;
use dtr_utils::dates::format_instant;
use log::{info, warn};

const PICKER_JSON: &str = include_str!(concat!(env!("OUT_DIR"), "/picker.json"));

/// DOM id for the picker wrapper.
const PICKER_ID: &str = "demo-picker";

/// Most recent entries kept in the event log.
const LOG_LIMIT: usize = 12;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("range-picker-root"))
        .launch(App);
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Option<Instant> {
    NaiveDate::from_ymd_opt(y, m, d).and_then(|date| date.and_hms_opt(h, min, 0))
}

fn describe(value: &RangeValue) -> String {
    let (from, to) = value.sides();
    let show = |side: Option<Instant>| side.as_ref().map(format_instant).unwrap_or_else(|| "null".to_string());
    format!("[{}, {}]", show(from), show(to))
}

#[component]
fn App() -> Element {
    let mut value = use_signal(RangeValue::default);
    let mut config = use_signal(PickerConfig::default);
    let mut events: Signal<Vec<String>> = use_signal(Vec::new);

    // Load the embedded config once on mount
    use_effect(move || match PickerConfig::from_json(PICKER_JSON) {
        Ok(loaded) => {
            info!("Loaded picker config for '{}'", loaded.name);
            config.set(loaded);
        }
        Err(e) => warn!("Falling back to default picker config: {}", e),
    });

    let mut record = move |entry: String| {
        let mut log = events.write();
        log.insert(0, entry);
        log.truncate(LOG_LIMIT);
    };

    let current = config();
    let detail = match current.max_detail {
        Detail::Hour => "hour",
        Detail::Minute => "minute",
        Detail::Second => "second",
    };

    rsx! {
        div {
            style: "font-family: sans-serif; padding: 16px; max-width: 720px;",
            h2 { "Date/time range picker" }

            DateTimeRangePicker {
                id: PICKER_ID.to_string(),
                value: value(),
                config: current.clone(),
                on_change: move |next: RangeValue| {
                    record(format!("change {}", describe(&next)));
                    value.set(next);
                },
                on_calendar_open: move |_| record("calendar open".to_string()),
                on_calendar_close: move |_| record("calendar close".to_string()),
                on_clock_open: move |_| record("clock open".to_string()),
                on_clock_close: move |_| record("clock close".to_string()),
                on_invalid_change: move |_| record("invalid change".to_string()),
            }

            fieldset {
                style: "margin-top: 160px;",
                legend { "Options" }
                label {
                    input {
                        r#type: "checkbox",
                        checked: current.disabled,
                        onchange: move |evt: Event<FormData>| config.write().disabled = evt.checked(),
                    }
                    " disabled"
                }
                label {
                    input {
                        r#type: "checkbox",
                        checked: current.close_widgets_on_select,
                        onchange: move |evt: Event<FormData>| config.write().close_widgets_on_select = evt.checked(),
                    }
                    " close widgets on select"
                }
                label {
                    input {
                        r#type: "checkbox",
                        checked: current.open_widgets_on_focus,
                        onchange: move |evt: Event<FormData>| config.write().open_widgets_on_focus = evt.checked(),
                    }
                    " open widgets on focus"
                }
                label {
                    " max detail "
                    select {
                        value: "{detail}",
                        onchange: move |evt: Event<FormData>| match evt.value().parse::<Detail>() {
                            Ok(next) => config.write().max_detail = next,
                            Err(e) => warn!("{}", e),
                        },
                        option { value: "hour", "hour" }
                        option { value: "minute", "minute" }
                        option { value: "second", "second" }
                    }
                }
            }

            fieldset {
                legend { "Value" }
                p { "Current: {describe(&value())}" }
                button {
                    onclick: move |_| value.set(RangeValue::Range(at(2019, 1, 1, 8, 30), at(2019, 1, 7, 17, 45))),
                    "First week of 2019"
                }
                button {
                    onclick: move |_| value.set(RangeValue::Single(at(2019, 6, 1, 12, 0).unwrap_or_default())),
                    "Single instant"
                }
                button {
                    onclick: move |_| value.set(RangeValue::Empty),
                    "Empty"
                }
            }

            fieldset {
                legend { "Events" }
                ul {
                    for (i, entry) in events.read().iter().enumerate() {
                        li { key: "{i}", "{entry}" }
                    }
                }
            }
        }
    }
}
