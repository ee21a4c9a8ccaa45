//! Dioxus date/time range picker built on `dtr-core`.
//!
//! This crate provides:
//! - `dom_bridge`: document listeners and element containment via `web-sys`
//! - `state`: the picker context shared with child components
//! - `calendar` / `clock`: grid and hand-angle math for the popups
//! - `components`: the `DateTimeRangePicker` component and its parts

pub mod calendar;
pub mod clock;
pub mod components;
pub mod dom_bridge;
pub mod state;
