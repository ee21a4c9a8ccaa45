//! Framework-independent core of the date/time range picker.
//!
//! - `value`: the range value and its date/time merge rules
//! - `fields`: sub-field edits (day, month, hour24, ...) applied to an instant
//! - `config`: picker configuration as consumed by the shells
//! - `visibility`: calendar/clock open-close state machine
//! - `regions`: outside-interaction detection and document listener lifetime
//! - `focus`: maps a focused sub-field to the widget it should open
//! - `picker`: `RangePicker`, which ties the above together and reports
//!   notifications for the host to emit

pub mod config;
pub mod error;
pub mod fields;
pub mod focus;
pub mod picker;
pub mod regions;
pub mod value;
pub mod visibility;

pub use config::{Detail, PickerConfig};
pub use error::{PickerError, Result};
pub use picker::{CloseReason, DateSelection, Notification, Notifications, OpenReason, RangePicker};
pub use value::{Instant, RangeValue, Side};
pub use visibility::{OpenProps, Widget};
