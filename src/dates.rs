//! Month-granularity date arithmetic
//!
//! Vesting and growth are measured in whole calendar months. Day-of-month is
//! ignored everywhere in this module except `add_years` and `shift_days`.

use chrono::{Datelike, Duration, NaiveDate};

/// Whole months from `start` to `end`, ignoring day-of-month.
///
/// Negative when `end` falls in an earlier month than `start`.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32)
}

/// Elapsed years as a real number, derived from `months_between`
pub fn years_between(start: NaiveDate, end: NaiveDate) -> f64 {
    months_between(start, end) as f64 / 12.0
}

/// Same month and day `years` calendar years later.
///
/// A February 29th start landing on a non-leap year clamps to February 28th.
pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    let target_year = date.year() + years;
    date.with_year(target_year).unwrap_or_else(|| {
        (28..date.day())
            .rev()
            .find_map(|day| NaiveDate::from_ymd_opt(target_year, date.month(), day))
            .unwrap_or(date)
    })
}

/// Evaluation date for a 1-indexed projection year: `year - 1` years after `start`
pub fn projection_year_date(start: NaiveDate, year: u32) -> NaiveDate {
    add_years(start, year as i32 - 1)
}

/// Signed day count from `from` to `to`
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Move a date by a signed number of days, saturating at chrono's date range
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = Duration::try_days(days).and_then(|delta| date.checked_add_signed(delta));
    match shifted {
        Some(d) => d,
        None if days < 0 => NaiveDate::MIN,
        None => NaiveDate::MAX,
    }
}
