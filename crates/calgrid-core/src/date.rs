//! Date-only helpers on top of `chrono::NaiveDate`
//!
//! Weekday indices follow the host convention: 0 = Sunday … 6 = Saturday.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{CalendarError, Result};

/// Calendar-day equality
pub fn same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

/// Normalize any integer to a weekday index in `0..7`
pub fn normalize_weekday(index: i64) -> u32 {
    index.rem_euclid(7) as u32
}

/// Weekday index of a date (0 = Sunday)
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Number of days in the given month (1–12), `None` for an invalid month
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Clamp a date to the first of a month whose whole 42-day grid is
/// representable by chrono
pub fn clamp_anchor(date: NaiveDate) -> NaiveDate {
    let lowest = first_of_month(NaiveDate::MIN)
        .checked_add_months(Months::new(1))
        .unwrap_or(NaiveDate::MIN);
    let highest = first_of_month(NaiveDate::MAX)
        .checked_sub_months(Months::new(1))
        .unwrap_or(NaiveDate::MAX);
    first_of_month(date).clamp(lowest, highest)
}

/// Shift a date by whole months, clamping the day to the target month.
///
/// Saturates (returns `date` unchanged) outside chrono's representable range.
pub fn add_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}

/// Shift a date by whole years
pub fn add_years(date: NaiveDate, delta: i32) -> NaiveDate {
    add_months(date, delta.saturating_mul(12))
}

/// Replace the year of a first-of-month date
pub fn with_year(date: NaiveDate, year: i32) -> NaiveDate {
    date.with_year(year).unwrap_or(date)
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|e| CalendarError::InvalidDate(format!("{}: {}", trimmed, e)))
}
