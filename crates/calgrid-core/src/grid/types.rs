//! Grid types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of rows in every day grid
pub const WEEKS_PER_GRID: usize = 6;

/// Number of cells in every row
pub const DAYS_PER_WEEK: usize = 7;

/// Number of cells in every day grid
pub const CELLS_PER_GRID: usize = WEEKS_PER_GRID * DAYS_PER_WEEK;

/// One grid square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    /// Calendar day of the cell
    pub date: NaiveDate,
    /// Whether the day belongs to the anchor month
    pub in_current_month: bool,
}

impl DayCell {
    /// Create a new cell
    pub fn new(date: NaiveDate, in_current_month: bool) -> Self {
        Self {
            date,
            in_current_month,
        }
    }
}

/// One grid row with its week number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarWeek {
    /// ISO-style week number of the row
    pub week_number: u32,
    /// Seven consecutive cells
    pub days: Vec<DayCell>,
}

impl CalendarWeek {
    /// First cell of the row
    pub fn first_day(&self) -> Option<&DayCell> {
        self.days.first()
    }
}
