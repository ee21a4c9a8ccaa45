//! Picker configuration.
//!
//! Every field has a default, so a JSON document only needs the keys it
//! overrides:
//!
//! ```rust
//! use dtr_core::config::{Detail, PickerConfig};
//!
//! let config = PickerConfig::from_json(r#"{ "closeWidgets": false, "maxDetail": "second" }"#).unwrap();
//! assert!(!config.close_widgets_on_select);
//! assert!(config.open_widgets_on_focus);
//! assert_eq!(config.max_detail, Detail::Second);
//! ```

use crate::error::{PickerError, Result};
use crate::value::{Instant, Side};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The finest time unit the inputs and the clock expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Detail {
    Hour,
    #[default]
    Minute,
    Second,
}

impl Detail {
    pub fn renders_minute_hand(&self) -> bool {
        *self > Detail::Hour
    }

    pub fn renders_second_hand(&self) -> bool {
        *self > Detail::Minute
    }
}

impl FromStr for Detail {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "hour" => Ok(Detail::Hour),
            "minute" => Ok(Detail::Minute),
            "second" => Ok(Detail::Second),
            other => Err(PickerError::UnknownDetail(other.to_string())),
        }
    }
}

/// Options the host passes in with every render. The core never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PickerConfig {
    /// Base name of the two input groups (`{name}_from`, `{name}_to`)
    pub name: String,
    /// Close the popups after a value is committed from a popup or the clear button
    #[serde(alias = "closeWidgets")]
    pub close_widgets_on_select: bool,
    /// Open the matching popup when a sub-field receives focus
    pub open_widgets_on_focus: bool,
    pub disabled: bool,
    pub disable_calendar: bool,
    pub disable_clock: bool,
    pub max_detail: Detail,
    /// Earliest instant a sub-field edit may produce
    pub min_date: Option<Instant>,
    /// Latest instant a sub-field edit may produce
    pub max_date: Option<Instant>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            name: "datetimerange".to_string(),
            close_widgets_on_select: true,
            open_widgets_on_focus: true,
            disabled: false,
            disable_calendar: false,
            disable_clock: false,
            max_detail: Detail::default(),
            min_date: None,
            max_date: None,
        }
    }
}

impl PickerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Form name of one input group.
    pub fn input_name(&self, side: Side) -> String {
        format!("{}_{}", self.name, side.as_str())
    }

    /// Whether `instant` lies within the configured bounds.
    pub fn allows(&self, instant: &Instant) -> bool {
        self.min_date.map_or(true, |min| *instant >= min) && self.max_date.map_or(true, |max| *instant <= max)
    }
}
