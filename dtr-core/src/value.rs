//! The picker's externally visible value and the rules for merging edits into it.

use crate::error::{PickerError, Result};
use chrono::NaiveDateTime;
use dtr_utils::dates::{format_instant, parse_instant};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar date plus time-of-day, down to sub-second precision.
pub type Instant = NaiveDateTime;

/// Which half of the range an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    From,
    To,
}

impl Side {
    /// Lenient lookup used for UI events; unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Side> {
        match name.trim() {
            "from" => Some(Side::From),
            "to" => Some(Side::To),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::From => "from",
            Side::To => "to",
        }
    }
}

impl FromStr for Side {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self> {
        Side::parse(s).ok_or_else(|| PickerError::UnknownSide(s.to_string()))
    }
}

/// The range value: absent, a single instant, or a (from, to) pair where
/// either side may be missing.
///
/// Serializes as `null`, an ISO string, or a two element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeValue {
    #[default]
    Empty,
    Single(Instant),
    Range(Option<Instant>, Option<Instant>),
}

impl RangeValue {
    /// View any shape as a `(from, to)` pair. A single instant is the
    /// "from" side.
    pub fn sides(&self) -> (Option<Instant>, Option<Instant>) {
        match *self {
            RangeValue::Empty => (None, None),
            RangeValue::Single(from) => (Some(from), None),
            RangeValue::Range(from, to) => (from, to),
        }
    }

    pub fn side(&self, side: Side) -> Option<Instant> {
        let (from, to) = self.sides();
        match side {
            Side::From => from,
            Side::To => to,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == RangeValue::Empty
    }

    /// Replace one side and keep the other verbatim. The result is always a
    /// pair, even when `self` was empty or a single instant.
    pub fn apply_range_edit(&self, side: Side, next: Option<Instant>) -> RangeValue {
        let (from, to) = self.sides();
        match side {
            Side::From => RangeValue::Range(next, to),
            Side::To => RangeValue::Range(from, next),
        }
    }

    /// Apply a from/to pair reported by the calendar at once. Each side keeps
    /// the time-of-day previously held on that side.
    pub fn apply_dual_edit(&self, next: (Option<Instant>, Option<Instant>)) -> RangeValue {
        let (from, to) = self.sides();
        RangeValue::Range(merge_side(from, next.0), merge_side(to, next.1))
    }

    /// The cleared value, whatever shape came before.
    pub fn clear(&self) -> RangeValue {
        RangeValue::Empty
    }
}

/// Take the date from `next_date_only` and the time-of-day (down to
/// nanoseconds) from `previous`. Without a previous instant the new one is
/// returned untouched.
pub fn merge_date_only(previous: Option<Instant>, next_date_only: Instant) -> Instant {
    match previous {
        Some(previous) => next_date_only.date().and_time(previous.time()),
        None => next_date_only,
    }
}

fn merge_side(previous: Option<Instant>, next: Option<Instant>) -> Option<Instant> {
    next.map(|next| merge_date_only(previous, next))
}

/// Parses `""`, a single instant, or `from,to` with either side blank.
impl FromStr for RangeValue {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s == "null" {
            return Ok(RangeValue::Empty);
        }
        let parts: Vec<&str> = s.split(',').collect();
        match parts.as_slice() {
            [single] => Ok(RangeValue::Single(parse_part(single)?)),
            [from, to] => Ok(RangeValue::Range(parse_optional(from)?, parse_optional(to)?)),
            _ => Err(PickerError::TooManyParts(parts.len())),
        }
    }
}

fn parse_part(s: &str) -> Result<Instant> {
    parse_instant(s).map_err(|_| PickerError::InvalidInstant(s.trim().to_string()))
}

fn parse_optional(s: &str) -> Result<Option<Instant>> {
    if s.trim().is_empty() {
        Ok(None)
    } else {
        parse_part(s).map(Some)
    }
}

impl fmt::Display for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |instant: Option<Instant>| instant.map(|i| format_instant(&i)).unwrap_or_default();
        match *self {
            RangeValue::Empty => Ok(()),
            RangeValue::Single(instant) => write!(f, "{}", format_instant(&instant)),
            RangeValue::Range(from, to) => write!(f, "{},{}", show(from), show(to)),
        }
    }
}
