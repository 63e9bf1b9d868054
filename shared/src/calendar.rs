//! Calendar rules for the booking widget.
//!
//! The month grid itself is drawn by the frontend; this module decides what
//! goes into it: which cells exist, how each cell is shaded, and which feed
//! events belong to which day. The UI should only handle presentation.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::dates::{is_past, is_weekend, parse_iso_date, to_iso_string};
use crate::CalendarEvent;

/// Shading applied to a day cell when it is mounted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStyle {
    /// Before today
    Past,
    /// Saturday or Sunday, not in the past
    Weekend,
    Plain,
}

impl CellStyle {
    pub fn background_color(&self) -> Option<&'static str> {
        match self {
            CellStyle::Past => Some("#a9a9a9"),
            CellStyle::Weekend => Some("#d3d3d3"),
            CellStyle::Plain => None,
        }
    }

    pub fn opacity(&self) -> Option<&'static str> {
        match self {
            CellStyle::Past => Some("0.7"),
            CellStyle::Weekend => Some("0.8"),
            CellStyle::Plain => None,
        }
    }

    /// Inline CSS for the cell, empty for unstyled days
    pub fn inline_css(&self) -> String {
        match (self.background_color(), self.opacity()) {
            (Some(background), Some(opacity)) => {
                format!("background-color: {}; opacity: {};", background, opacity)
            }
            _ => String::new(),
        }
    }
}

/// Style for a cell as it mounts. Past takes precedence over weekend.
pub fn cell_style(cell_date: NaiveDate, today: NaiveDate) -> CellStyle {
    if is_past(cell_date, today) {
        CellStyle::Past
    } else if is_weekend(cell_date) {
        CellStyle::Weekend
    } else {
        CellStyle::Plain
    }
}

/// Construction options for the month grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarOptions {
    /// Weekends are drawn (but muted) rather than hidden
    pub weekends: bool,
    /// URL of the event feed
    pub events_url: String,
}

impl CalendarOptions {
    pub fn new(events_url: impl Into<String>) -> Self {
        Self {
            weekends: true,
            events_url: events_url.into(),
        }
    }
}

/// Type of calendar day for explicit rendering logic
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CalendarDayType {
    /// Empty padding day before the start of the month
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
}

/// A single cell of the month grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarDay {
    /// Day of month, 0 for padding cells
    pub day: u32,
    pub date: Option<NaiveDate>,
    pub day_type: CalendarDayType,
    pub style: CellStyle,
    pub events: Vec<CalendarEvent>,
}

impl CalendarDay {
    /// ISO string reported on click, `None` for padding cells
    pub fn date_string(&self) -> Option<String> {
        self.date.map(to_iso_string)
    }
}

/// A calendar month laid out as a Sunday-first grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarMonth {
    pub month: u32,
    pub year: i32,
    pub days: Vec<CalendarDay>,
    pub first_day_of_week: u32, // 0 = Sunday, 1 = Monday, etc.
}

/// Generate the grid for a month, shading cells relative to `today` and
/// attaching feed events to their days
pub fn generate_calendar_month(
    month: u32,
    year: i32,
    today: NaiveDate,
    events: &[CalendarEvent],
) -> CalendarMonth {
    let days_in_month = days_in_month(month, year);
    let first_day = first_day_of_month(month, year);
    let mut events_by_day = group_events_by_day(month, year, events);

    debug!(
        "Generating calendar for {}/{}: {} days, first weekday {}",
        month, year, days_in_month, first_day
    );

    let mut days = Vec::with_capacity((first_day + days_in_month) as usize);

    for _ in 0..first_day {
        days.push(CalendarDay {
            day: 0,
            date: None,
            day_type: CalendarDayType::PaddingBefore,
            style: CellStyle::Plain,
            events: Vec::new(),
        });
    }

    for day in 1..=days_in_month {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            continue;
        };
        days.push(CalendarDay {
            day,
            date: Some(date),
            day_type: CalendarDayType::MonthDay,
            style: cell_style(date, today),
            events: events_by_day.remove(&day).unwrap_or_default(),
        });
    }

    CalendarMonth {
        month,
        year,
        days,
        first_day_of_week: first_day,
    }
}

/// Bucket feed events by day of month; events outside the month or with an
/// unreadable start date are dropped
fn group_events_by_day(
    month: u32,
    year: i32,
    events: &[CalendarEvent],
) -> HashMap<u32, Vec<CalendarEvent>> {
    let mut by_day: HashMap<u32, Vec<CalendarEvent>> = HashMap::new();
    for event in events {
        // The feed may carry full timestamps; only the date part matters here
        let date_part = event.start.split('T').next().unwrap_or(&event.start);
        match parse_iso_date(date_part) {
            Ok(date) if date.month() == month && date.year() == year => {
                by_day.entry(date.day()).or_default().push(event.clone());
            }
            Ok(_) => {}
            Err(err) => debug!("Skipping calendar event '{}': {}", event.title, err),
        }
    }
    by_day
}

/// Get the number of days in a given month and year
pub fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        2 => if is_leap_year(year) { 29 } else { 28 },
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Get the first day of month (0 = Sunday, 1 = Monday, etc.)
pub fn first_day_of_month(month: u32, year: i32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// Navigate to the previous month
pub fn previous_month(month: u32, year: i32) -> (u32, i32) {
    if month == 1 {
        (12, year - 1)
    } else {
        (month - 1, year)
    }
}

/// Navigate to the next month
pub fn next_month(month: u32, year: i32) -> (u32, i32) {
    if month == 12 {
        (1, year + 1)
    } else {
        (month + 1, year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(title: &str, start: &str) -> CalendarEvent {
        CalendarEvent {
            title: title.to_string(),
            start: start.to_string(),
            all_day: true,
            color: Some("green".to_string()),
        }
    }

    #[test]
    fn test_cell_style_rules() {
        let today = date(2025, 6, 18); // Wednesday

        assert_eq!(cell_style(date(2025, 6, 17), today), CellStyle::Past);
        assert_eq!(cell_style(today, today), CellStyle::Plain);
        assert_eq!(cell_style(date(2025, 6, 20), today), CellStyle::Plain);
        assert_eq!(cell_style(date(2025, 6, 21), today), CellStyle::Weekend);
        assert_eq!(cell_style(date(2025, 6, 22), today), CellStyle::Weekend);
    }

    #[test]
    fn test_past_weekend_gets_past_style() {
        let today = date(2025, 6, 18);
        // Saturday the 14th is both past and weekend
        assert_eq!(cell_style(date(2025, 6, 14), today), CellStyle::Past);
    }

    #[test]
    fn test_cell_style_css() {
        assert_eq!(
            CellStyle::Past.inline_css(),
            "background-color: #a9a9a9; opacity: 0.7;"
        );
        assert_eq!(
            CellStyle::Weekend.inline_css(),
            "background-color: #d3d3d3; opacity: 0.8;"
        );
        assert_eq!(CellStyle::Plain.inline_css(), "");
    }

    #[test]
    fn test_calendar_options_show_weekends() {
        let options = CalendarOptions::new("/calendar");
        assert!(options.weekends);
        assert_eq!(options.events_url, "/calendar");
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(1, 2025), 31);
        assert_eq!(days_in_month(4, 2025), 30);
        assert_eq!(days_in_month(2, 2025), 28);
        assert_eq!(days_in_month(2, 2024), 29);
        assert_eq!(days_in_month(2, 1900), 28);
        assert_eq!(days_in_month(2, 2000), 29);
    }

    #[test]
    fn test_first_day_of_month() {
        assert_eq!(first_day_of_month(6, 2025), 0); // Sunday
        assert_eq!(first_day_of_month(6, 2099), 1); // Monday
        assert_eq!(first_day_of_month(2, 2024), 4); // Thursday
    }

    #[test]
    fn test_navigation() {
        assert_eq!(previous_month(1, 2025), (12, 2024));
        assert_eq!(previous_month(6, 2025), (5, 2025));
        assert_eq!(next_month(12, 2025), (1, 2026));
        assert_eq!(next_month(6, 2025), (7, 2025));
    }

    #[test]
    fn test_generate_calendar_month() {
        let today = date(2099, 6, 10);
        let calendar = generate_calendar_month(6, 2099, today, &[]);

        assert_eq!(calendar.month, 6);
        assert_eq!(calendar.year, 2099);
        assert_eq!(calendar.first_day_of_week, 1);
        assert_eq!(calendar.days.len(), 31); // 1 padding + 30 days

        let padding = &calendar.days[0];
        assert_eq!(padding.day_type, CalendarDayType::PaddingBefore);
        assert_eq!(padding.date_string(), None);

        let first = &calendar.days[1];
        assert_eq!(first.day, 1);
        assert_eq!(first.date_string().as_deref(), Some("2099-06-01"));
        assert_eq!(first.style, CellStyle::Past);

        let wednesday = &calendar.days[10];
        assert_eq!(wednesday.day, 10);
        assert_eq!(wednesday.style, CellStyle::Plain);

        let saturday = &calendar.days[13];
        assert_eq!(saturday.day, 13);
        assert_eq!(saturday.style, CellStyle::Weekend);
    }

    #[test]
    fn test_events_attached_to_their_day() {
        let today = date(2099, 6, 1);
        let events = vec![
            event("Available", "2099-06-10"),
            event("Fully Booked", "2099-06-11T00:00:00"),
            event("Next month", "2099-07-01"),
            event("Broken", "tomorrow"),
        ];
        let calendar = generate_calendar_month(6, 2099, today, &events);

        let day = |n: u32| calendar.days.iter().find(|d| d.day == n).unwrap();
        assert_eq!(day(10).events.len(), 1);
        assert_eq!(day(10).events[0].title, "Available");
        assert_eq!(day(11).events[0].title, "Fully Booked");

        let total: usize = calendar.days.iter().map(|d| d.events.len()).sum();
        assert_eq!(total, 2);
    }
}
