//! Navigation and view state
//!
//! Tracks which of the three views is active and the anchor month, and
//! produces the month and year grids.

pub mod navigation;

pub use navigation::{CalendarView, MonthCell, ViewState, YEARS_PER_PAGE};
