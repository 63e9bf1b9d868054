use chrono::{Datelike, NaiveDate};

/// Today's date according to the browser's local clock
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_else(|| {
        log::warn!("Browser clock gave an invalid date {}-{}-{}", year, month, day);
        NaiveDate::MIN
    })
}

/// (month, year) of today, the month the calendar opens on
pub fn current_month_year() -> (u32, i32) {
    let today = today();
    (today.month(), today.year())
}
