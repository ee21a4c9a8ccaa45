//! Shared utility functions for dtr crates.

/// Date and time parsing/formatting helpers
pub mod dates {
    use crate::error::DateError;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    /// Accepted full date-time layouts, most specific first.
    const DATE_TIME_FORMATS: [&str; 3] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
    ];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Format a NaiveTime as "HH:MM" or "HH:MM:SS" depending on `with_seconds`
    pub fn format_time(time: &NaiveTime, with_seconds: bool) -> String {
        if with_seconds {
            time.format("%H:%M:%S").to_string()
        } else {
            time.format("%H:%M").to_string()
        }
    }

    /// Format an instant as an ISO local date-time. The fraction is written
    /// with as many digits as it needs, and left out when it is zero.
    pub fn format_instant(instant: &NaiveDateTime) -> String {
        instant.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
    }

    /// Parse an ISO-like local date-time. A bare "YYYY-MM-DD" is midnight
    /// of that day.
    pub fn parse_instant(s: &str) -> anyhow::Result<NaiveDateTime> {
        let s = s.trim();
        for format in DATE_TIME_FORMATS {
            if let Ok(instant) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(instant);
            }
        }
        if let Some(midnight) = parse_date(s).ok().and_then(|d| d.and_hms_opt(0, 0, 0)) {
            return Ok(midnight);
        }
        Err(DateError(format!("unrecognised date-time '{}'", s)).into())
    }

}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: {}", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
