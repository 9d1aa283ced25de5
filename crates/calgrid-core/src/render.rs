//! Render model handed to the host
//!
//! Built fresh by [`Calendar::render`](crate::Calendar::render) on every
//! call, so it always matches the latest state.

use chrono::NaiveDate;
use serde::Serialize;

use crate::view::CalendarView;

/// Complete snapshot of one calendar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCalendar {
    pub header: RenderedHeader,
    pub body: RenderedBody,
}

/// Navigable header: month/year labels plus sizing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedHeader {
    pub view: CalendarView,
    pub month_label: String,
    pub year: i32,
    pub width: u32,
    pub height: u32,
    pub scale: f64,
}

/// Body of the active view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum RenderedBody {
    Days {
        weekdays: Vec<String>,
        weeks: Vec<RenderedWeek>,
    },
    Months {
        months: Vec<RenderedMonth>,
    },
    Years {
        years: Vec<RenderedYear>,
    },
}

/// One row of the days view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedWeek {
    pub week_number: u32,
    pub days: Vec<RenderedDay>,
}

/// One cell of the days view with every display flag resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDay {
    pub date: NaiveDate,
    /// Day of month
    pub day: u32,
    /// Accessible label (`YYYY-MM-DD`)
    pub aria_label: String,
    pub in_current_month: bool,
    pub is_today: bool,
    pub is_weekend: bool,
    pub is_selected: bool,
    pub is_range_start: bool,
    pub is_range_end: bool,
    pub is_in_range: bool,
    pub is_disabled: bool,
    pub legend_color: Option<String>,
    pub legend_info: Vec<String>,
    /// Hover text, empty for days without a legend entry
    pub tooltip: String,
    /// Connector toward the right: range start of a complete range
    pub pipe_start: bool,
    /// Connector toward the left: range end with a start set
    pub pipe_end: bool,
}

/// One cell of the months view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedMonth {
    pub label: String,
    pub date: NaiveDate,
    /// Month of today
    pub is_current: bool,
    /// Anchor month
    pub is_selected: bool,
}

/// One cell of the years view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedYear {
    pub year: i32,
    /// Year of today
    pub is_current: bool,
    /// Anchor year
    pub is_selected: bool,
}

impl RenderedCalendar {
    /// Iterate over day cells (empty outside the days view)
    pub fn days(&self) -> impl Iterator<Item = &RenderedDay> {
        let weeks: &[RenderedWeek] = match &self.body {
            RenderedBody::Days { weeks, .. } => weeks,
            _ => &[],
        };
        weeks.iter().flat_map(|w| w.days.iter())
    }

    /// Find the cell for `date` in the days view
    pub fn day(&self, date: NaiveDate) -> Option<&RenderedDay> {
        self.days().find(|d| d.date == date)
    }
}
