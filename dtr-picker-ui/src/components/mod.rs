//! Reusable Dioxus RSX components for the picker.

mod calendar_popup;
mod clock_popup;
mod date_time_range_picker;
mod input_group;

pub use calendar_popup::CalendarPopup;
pub use clock_popup::ClockPopup;
pub use date_time_range_picker::{DateTimeRangePicker, DateTimeRangePickerProps};
pub use input_group::InputGroup;
