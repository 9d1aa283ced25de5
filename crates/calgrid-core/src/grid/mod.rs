//! Day grid generation
//!
//! This module builds the fixed 6×7 day grid of the days view and
//! assigns week numbers to its rows.

pub mod builder;
pub mod types;

pub use builder::{build_grid, build_weeks, leading_offset, week_number};
pub use types::{CELLS_PER_GRID, CalendarWeek, DAYS_PER_WEEK, DayCell, WEEKS_PER_GRID};
