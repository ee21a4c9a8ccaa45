//! Analog clock showing the time of the focused side. Display only.

use crate::clock::hand_angles;
use crate::state::PickerContext;
use dioxus::prelude::*;
use dtr_core::Instant;
use dtr_utils::dates::format_time;

#[derive(Props, Clone, PartialEq)]
pub struct ClockPopupProps {
    pub id: String,
    /// Instant of the active side; an empty side draws the face only
    pub value: Option<Instant>,
    pub open: bool,
}

#[component]
pub fn ClockPopup(props: ClockPopupProps) -> Element {
    let ctx = use_context::<PickerContext>();
    let detail = ctx.picker.read().config().max_detail;
    let angles = props.value.map(|instant| hand_angles(&instant, detail));
    let readout = props
        .value
        .map(|instant| format_time(&instant.time(), detail.renders_second_hand()))
        .unwrap_or_else(|| "--:--".to_string());

    let class = if props.open {
        "datetimerange-picker__clock datetimerange-picker__clock--open"
    } else {
        "datetimerange-picker__clock datetimerange-picker__clock--closed"
    };
    let display = if props.open { "block" } else { "none" };

    rsx! {
        div {
            id: "{props.id}",
            class: "{class}",
            style: "display: {display}; position: absolute; top: 100%; right: 0; z-index: 1; background: white; border: 1px solid #999; padding: 6px;",
            svg {
                width: "120",
                height: "120",
                view_box: "0 0 120 120",
                circle { cx: "60", cy: "60", r: "56", fill: "none", stroke: "#333", stroke_width: "2" }
                for mark in 0..12 {
                    line {
                        x1: "60", y1: "8", x2: "60", y2: "14",
                        stroke: "#333",
                        transform: "rotate({mark * 30} 60 60)",
                    }
                }
                if let Some(angles) = angles {
                    line {
                        class: "datetimerange-picker__clock__hour-hand",
                        x1: "60", y1: "60", x2: "60", y2: "30",
                        stroke: "#000", stroke_width: "4",
                        transform: "rotate({angles.hour} 60 60)",
                    }
                    if let Some(minute) = angles.minute {
                        line {
                            class: "datetimerange-picker__clock__minute-hand",
                            x1: "60", y1: "60", x2: "60", y2: "16",
                            stroke: "#000", stroke_width: "2",
                            transform: "rotate({minute} 60 60)",
                        }
                    }
                    if let Some(second) = angles.second {
                        line {
                            class: "datetimerange-picker__clock__second-hand",
                            x1: "60", y1: "60", x2: "60", y2: "12",
                            stroke: "#C62828", stroke_width: "1",
                            transform: "rotate({second} 60 60)",
                        }
                    }
                }
            }
            div {
                class: "datetimerange-picker__clock__readout",
                style: "text-align: center; font-family: monospace;",
                "{readout}"
            }
        }
    }
}
