//! Grid builder
//!
//! The grid always holds 42 cells: trailing days of the previous month,
//! every day of the anchor month, then leading days of the next month.

use chrono::{Datelike, Days, NaiveDate};

use crate::date::{clamp_anchor, normalize_weekday, weekday_index};
use crate::grid::types::{CELLS_PER_GRID, CalendarWeek, DAYS_PER_WEEK, DayCell};

/// Number of previous-month cells before the first of the month
pub fn leading_offset(first_day: NaiveDate, start_of_week: i64) -> u32 {
    let sow = normalize_weekday(start_of_week);
    (weekday_index(first_day) + 7 - sow) % 7
}

/// Build the 42 day cells of the month containing `anchor`
///
/// Anchors within a month of chrono's date limits are clamped inward so the
/// grid stays full.
pub fn build_grid(anchor: NaiveDate, start_of_week: i64) -> Vec<DayCell> {
    let first = clamp_anchor(anchor);
    let offset = leading_offset(first, start_of_week);
    let start = first
        .checked_sub_days(Days::new(u64::from(offset)))
        .unwrap_or(first);

    start
        .iter_days()
        .take(CELLS_PER_GRID)
        .map(|date| {
            let in_current_month = date.year() == first.year() && date.month() == first.month();
            DayCell::new(date, in_current_month)
        })
        .collect()
}

/// Week number of a row starting at `first_day`
///
/// Monday-start rows use the ISO week directly. Other week starts shift the
/// day back to the configured week start first. Weeks may repeat or skip at
/// year boundaries.
pub fn week_number(first_day: NaiveDate, start_of_week: i64) -> u32 {
    let sow = normalize_weekday(start_of_week);
    if sow == 1 {
        return first_day.iso_week().week();
    }

    let diff = (weekday_index(first_day) + 7 - sow) % 7;
    first_day
        .checked_sub_days(Days::new(u64::from(diff)))
        .unwrap_or(first_day)
        .iso_week()
        .week()
}

/// Build the six numbered rows of the month containing `anchor`
pub fn build_weeks(anchor: NaiveDate, start_of_week: i64) -> Vec<CalendarWeek> {
    build_grid(anchor, start_of_week)
        .chunks(DAYS_PER_WEEK)
        .filter_map(|days| {
            let first = days.first()?;
            Some(CalendarWeek {
                week_number: week_number(first.date, start_of_week),
                days: days.to_vec(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::days_in_month;
    use crate::grid::types::WEEKS_PER_GRID;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_grid_shape_for_every_month_and_week_start() {
        for year in [1999, 2000, 2023, 2024, 2100] {
            for month in 1..=12 {
                for sow in 0..7 {
                    let anchor = d(year, month, 1);
                    let grid = build_grid(anchor, sow);
                    assert_eq!(grid.len(), 42, "{}-{} sow={}", year, month, sow);
                    assert_eq!(weekday_index(grid[0].date) as i64, sow);

                    let in_month = grid.iter().filter(|c| c.in_current_month).count() as u32;
                    assert_eq!(Some(in_month), days_in_month(year, month));

                    // 連続した日付であること
                    for pair in grid.windows(2) {
                        assert_eq!(pair[0].date.succ_opt().unwrap(), pair[1].date);
                    }

                    let weeks = build_weeks(anchor, sow);
                    assert_eq!(weeks.len(), WEEKS_PER_GRID);
                    assert!(weeks.iter().all(|w| w.days.len() == 7));
                }
            }
        }
    }

    #[test]
    fn test_grid_stays_full_at_date_limits() {
        for anchor in [NaiveDate::MIN, NaiveDate::MAX] {
            for sow in 0..7 {
                let grid = build_grid(anchor, sow);
                assert_eq!(grid.len(), 42, "{} sow={}", anchor, sow);
                assert_eq!(weekday_index(grid[0].date) as i64, sow);
                assert_eq!(build_weeks(anchor, sow).len(), WEEKS_PER_GRID);
            }
        }
    }

    #[test]
    fn test_march_2024_monday_start() {
        let grid = build_grid(d(2024, 3, 15), 1);
        assert_eq!(grid[0].date, d(2024, 2, 26));
        assert!(!grid[0].in_current_month);
        assert_eq!(grid[4].date, d(2024, 3, 1));
        assert!(grid[4].in_current_month);
        assert_eq!(grid[41].date, d(2024, 4, 7));
        assert!(!grid[41].in_current_month);
    }

    #[test]
    fn test_sunday_start_when_month_starts_on_sunday() {
        // 2024-09-01 は日曜日: 前月の日は 0 個
        let grid = build_grid(d(2024, 9, 1), 0);
        assert_eq!(grid[0].date, d(2024, 9, 1));
        assert!(grid[0].in_current_month);
        assert_eq!(leading_offset(d(2024, 9, 1), 0), 0);
    }

    #[test]
    fn test_out_of_range_week_start_is_normalized() {
        assert_eq!(build_grid(d(2024, 3, 1), 7), build_grid(d(2024, 3, 1), 0));
        assert_eq!(build_grid(d(2024, 3, 1), -6), build_grid(d(2024, 3, 1), 1));
    }

    #[test]
    fn test_week_numbers_monday_start() {
        let weeks = build_weeks(d(2024, 3, 1), 1);
        let numbers: Vec<u32> = weeks.iter().map(|w| w.week_number).collect();
        assert_eq!(numbers, vec![9, 10, 11, 12, 13, 14]);
    }

    #[test]
    fn test_week_numbers_at_year_boundary() {
        // 2021-01: ISO 週 53 (2020) から始まる
        let weeks = build_weeks(d(2021, 1, 1), 1);
        assert_eq!(weeks[0].days[0].date, d(2020, 12, 28));
        assert_eq!(weeks[0].week_number, 53);
        assert_eq!(weeks[1].week_number, 1);
    }

    #[test]
    fn test_week_number_shifts_to_week_start() {
        // 2024-03-06 (水) を日曜始まりで扱うと 2024-03-03 (日) の ISO 週
        assert_eq!(week_number(d(2024, 3, 6), 0), d(2024, 3, 3).iso_week().week());
        // Sunday-start rows report the ISO week of their Sunday
        let weeks = build_weeks(d(2024, 3, 1), 0);
        assert_eq!(weeks[0].days[0].date, d(2024, 2, 25));
        assert_eq!(weeks[0].week_number, 8);
    }
}
