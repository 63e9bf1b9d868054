//! Date rules shared by the calendar cells and the booking session.
//!
//! All comparisons work on calendar dates (`NaiveDate`). "Today" is always
//! passed in by the caller so the rules stay deterministic under test.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::DateError;

/// Parse a `YYYY-MM-DD` string as produced by the calendar
pub fn parse_iso_date(date_str: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| DateError::InvalidFormat(date_str.to_string()))
}

/// Format a date the way the calendar reports clicks
pub fn to_iso_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Reformat `YYYY-MM-DD` as `DD/MM/YYYY`.
///
/// This is a plain reordering of the three parts; anything that does not
/// split into three dash-separated parts is returned unchanged.
pub fn format_display_date(iso_date: &str) -> String {
    let parts: Vec<&str> = iso_date.split('-').collect();
    match parts.as_slice() {
        [year, month, day] => format!("{}/{}/{}", day, month, year),
        _ => iso_date.to_string(),
    }
}

/// Strictly before today; today itself is not in the past
pub fn is_past(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Get the human-readable name for a month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "Invalid Month",
    }
}
