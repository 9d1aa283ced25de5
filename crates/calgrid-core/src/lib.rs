//! calgrid-core: Calendar date-grid and selection engine
//!
//! This crate computes the 6×7 day grid of a month view and drives the
//! selection state of a date picker.
//!
//! ## Features
//!
//! - 42-cell day grid spanning the previous, current and next month
//! - Week numbers under a configurable week start
//! - Single, multi and range selection modes
//! - Disabled dates (min/max bounds and explicit set) and legend annotation
//! - Days / months / years navigation views
//! - Synchronous change notifications
//!
//! ## Usage
//!
//! ```rust,ignore
//! use calgrid_core::{Calendar, CalendarConfig, CalendarEvent, SelectionMode};
//! use chrono::NaiveDate;
//!
//! let config = CalendarConfig::default().with_mode(SelectionMode::Range);
//! let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let mut calendar = Calendar::new(config, today);
//!
//! calendar.subscribe(|event: &CalendarEvent| println!("{event:?}"));
//! calendar.select_day(today);
//! calendar.select_day(today + chrono::Duration::days(3));
//!
//! let rendered = calendar.render();
//! ```

pub mod calendar;
pub mod config;
pub mod date;
pub mod error;
pub mod event;
pub mod grid;
pub mod locale;
pub mod render;
pub mod resolver;
pub mod selection;
pub mod view;

pub use calendar::Calendar;
pub use config::{CalendarConfig, LegendEntry, SelectionMode};
pub use error::{CalendarError, Result};
pub use event::{CalendarEvent, CalendarListener, EventBus};
pub use grid::{CalendarWeek, DayCell, build_grid, build_weeks, week_number};
pub use locale::{EnglishLabels, LabelSource, weekday_headers};
pub use render::{RenderedBody, RenderedCalendar, RenderedDay, RenderedHeader};
pub use resolver::Resolver;
pub use selection::{DateRange, SelectionState};
pub use view::{CalendarView, MonthCell, ViewState};

/// Re-export the common types for easy use
pub mod prelude {
    pub use super::{
        Calendar, CalendarConfig, CalendarEvent, CalendarView, DateRange, SelectionMode,
    };
}
