//! Sub-fields of one input group and how an edit to one of them changes
//! the instant the group holds.

use crate::value::Instant;
use crate::visibility::Widget;
use chrono::{Datelike, Timelike};

/// Names the input collaborator gives its sub-fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldName {
    Day,
    Month,
    Year,
    Hour12,
    Hour24,
    Minute,
    Second,
    AmPm,
}

impl FieldName {
    pub fn parse(name: &str) -> Option<FieldName> {
        let field = match name.trim() {
            "day" => FieldName::Day,
            "month" => FieldName::Month,
            "year" => FieldName::Year,
            "hour12" => FieldName::Hour12,
            "hour24" => FieldName::Hour24,
            "minute" => FieldName::Minute,
            "second" => FieldName::Second,
            "amPm" => FieldName::AmPm,
            _ => return None,
        };
        Some(field)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Day => "day",
            FieldName::Month => "month",
            FieldName::Year => "year",
            FieldName::Hour12 => "hour12",
            FieldName::Hour24 => "hour24",
            FieldName::Minute => "minute",
            FieldName::Second => "second",
            FieldName::AmPm => "amPm",
        }
    }

    /// The popup a focus on this field opens, if any.
    pub fn widget(&self) -> Option<Widget> {
        match self {
            FieldName::Day | FieldName::Month | FieldName::Year => Some(Widget::Calendar),
            FieldName::Hour12 | FieldName::Hour24 | FieldName::Minute | FieldName::Second => {
                Some(Widget::Clock)
            }
            FieldName::AmPm => None,
        }
    }

    /// Rebuild `base` with this field set to `raw`. `None` when the text is
    /// not a number in range or the resulting date does not exist (day 32,
    /// February 30).
    pub fn apply(&self, base: Instant, raw: &str) -> Option<Instant> {
        let raw = raw.trim();
        if *self == FieldName::AmPm {
            let pm = match raw.to_ascii_lowercase().as_str() {
                "am" | "0" => false,
                "pm" | "1" => true,
                _ => return None,
            };
            let hour = base.hour() % 12 + if pm { 12 } else { 0 };
            return base.with_hour(hour);
        }
        if *self == FieldName::Year {
            return raw.parse::<i32>().ok().and_then(|year| base.with_year(year));
        }
        let number: u32 = raw.parse().ok()?;
        match self {
            FieldName::Day => base.with_day(number),
            FieldName::Month => base.with_month(number),
            FieldName::Hour24 => base.with_hour(number),
            FieldName::Hour12 => {
                if !(1..=12).contains(&number) {
                    return None;
                }
                let afternoon = if base.hour() >= 12 { 12 } else { 0 };
                base.with_hour(number % 12 + afternoon)
            }
            FieldName::Minute => base.with_minute(number),
            FieldName::Second => base.with_second(number),
            FieldName::Year | FieldName::AmPm => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn base() -> Instant {
        NaiveDate::from_ymd_opt(2019, 1, 31).unwrap().and_hms_opt(21, 40, 11).unwrap()
    }

    #[test]
    fn day_edit_keeps_everything_else() {
        let edited = FieldName::Day.apply(base(), "1").unwrap();
        assert_eq!(edited, NaiveDate::from_ymd_opt(2019, 1, 1).unwrap().and_hms_opt(21, 40, 11).unwrap());
    }

    #[test]
    fn impossible_dates_are_rejected() {
        assert_eq!(FieldName::Day.apply(base(), "32"), None);
        // 31 February does not exist
        assert_eq!(FieldName::Month.apply(base(), "2"), None);
        assert_eq!(FieldName::Minute.apply(base(), "60"), None);
        assert_eq!(FieldName::Hour24.apply(base(), "x"), None);
    }

    #[test]
    fn twelve_hour_fields_keep_the_half_of_day() {
        assert_eq!(FieldName::Hour12.apply(base(), "9").unwrap().hour(), 21);
        assert_eq!(FieldName::Hour12.apply(base(), "12").unwrap().hour(), 12);
        assert_eq!(FieldName::Hour12.apply(base(), "0"), None);
        assert_eq!(FieldName::AmPm.apply(base(), "am").unwrap().hour(), 9);
        assert_eq!(FieldName::AmPm.apply(base(), "pm").unwrap().hour(), 21);
    }

    #[test]
    fn names_map_to_widgets() {
        for name in ["day", "month", "year"] {
            assert_eq!(FieldName::parse(name).and_then(|f| f.widget()), Some(Widget::Calendar));
        }
        for name in ["hour12", "hour24", "minute", "second"] {
            assert_eq!(FieldName::parse(name).and_then(|f| f.widget()), Some(Widget::Clock));
        }
        assert_eq!(FieldName::AmPm.widget(), None);
        assert_eq!(FieldName::parse("weekday"), None);
    }
}
