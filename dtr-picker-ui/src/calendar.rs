//! Month grid math for the calendar popup.

use chrono::{Datelike, Months, NaiveDate};

/// One week row, Monday first. Days outside the month are `None`.
pub type Week = [Option<NaiveDate>; 7];

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Shift a month start by `delta` months, saturating at chrono's limits.
pub fn shift_month(start: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        start.checked_add_months(months)
    } else {
        start.checked_sub_months(months)
    };
    shifted.unwrap_or(start)
}

/// The weeks covering the month that starts at `start`.
pub fn month_grid(start: NaiveDate) -> Vec<Week> {
    let start = month_start(start);
    let lead = start.weekday().num_days_from_monday() as usize;
    let days: Vec<NaiveDate> = start
        .iter_days()
        .take_while(|day| day.month() == start.month())
        .collect();

    let mut cells: Vec<Option<NaiveDate>> = vec![None; lead];
    cells.extend(days.into_iter().map(Some));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }
    cells
        .chunks(7)
        .map(|chunk| {
            let mut week: Week = [None; 7];
            week.copy_from_slice(chunk);
            week
        })
        .collect()
}

/// Order a two-click range so the earlier day comes first.
pub fn ordered(a: NaiveDate, b: NaiveDate) -> (NaiveDate, NaiveDate) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Whether `day` lies in the inclusive span between the two (possibly
/// missing) ends of a range.
pub fn in_range(day: NaiveDate, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    match (from, to) {
        (Some(from), Some(to)) => {
            let (from, to) = ordered(from, to);
            from <= day && day <= to
        }
        (Some(only), None) | (None, Some(only)) => day == only,
        (None, None) => false,
    }
}
