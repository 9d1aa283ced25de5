//! View state transitions

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date::{add_months, add_years, clamp_anchor, with_year};
use crate::locale::LabelSource;

/// Number of years shown on one page of the years view
pub const YEARS_PER_PAGE: i32 = 16;

/// Years shown before the anchor year on the years view
const YEARS_BEFORE_ANCHOR: i32 = 8;

/// Active view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    /// 6×7 day grid
    #[default]
    Days,
    /// 12 months of the anchor year
    Months,
    /// 16 consecutive years
    Years,
}

impl std::fmt::Display for CalendarView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Days => "days",
            Self::Months => "months",
            Self::Years => "years",
        };
        f.write_str(name)
    }
}

/// One entry of the months view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCell {
    /// Locale-provided month name
    pub label: String,
    /// First day of the month
    pub date: NaiveDate,
}

/// Active view plus anchor month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    view: CalendarView,
    anchor: NaiveDate,
}

impl ViewState {
    /// Days view anchored on the month containing `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            view: CalendarView::Days,
            anchor: clamp_anchor(today),
        }
    }

    /// Active view
    pub fn view(&self) -> CalendarView {
        self.view
    }

    /// Anchor month, always the first day of the month
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// Switch to the months view
    pub fn switch_to_months(&mut self) {
        self.view = CalendarView::Months;
    }

    /// Switch to the years view
    pub fn switch_to_years(&mut self) {
        self.view = CalendarView::Years;
    }

    /// Switch back to the days view without moving the anchor
    pub fn switch_to_days(&mut self) {
        self.view = CalendarView::Days;
    }

    /// Anchor on the month containing `date` and show its days
    pub fn choose_month(&mut self, date: NaiveDate) {
        self.anchor = clamp_anchor(date);
        self.view = CalendarView::Days;
    }

    /// Move the anchor to `year`, keeping the month, and show the months
    pub fn choose_year(&mut self, year: i32) {
        self.anchor = clamp_anchor(with_year(self.anchor, year));
        self.view = CalendarView::Months;
    }

    /// First day of `month` (1–12) in the anchor year
    pub fn month_date(&self, month: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.anchor.year(), month, 1)
    }

    /// Step back one unit of the active view
    pub fn prev(&mut self) {
        self.shift(-1);
    }

    /// Step forward one unit of the active view
    pub fn next(&mut self) {
        self.shift(1);
    }

    fn shift(&mut self, direction: i32) {
        let shifted = match self.view {
            CalendarView::Days => add_months(self.anchor, direction),
            CalendarView::Months => add_years(self.anchor, direction),
            CalendarView::Years => add_years(self.anchor, direction * YEARS_PER_PAGE),
        };
        self.anchor = clamp_anchor(shifted);
        debug!(view = %self.view, anchor = %self.anchor, "Navigated");
    }

    /// The 12 months of the anchor year
    pub fn months(&self, labels: &dyn LabelSource) -> Vec<MonthCell> {
        (1..=12)
            .filter_map(|month| {
                let date = self.month_date(month)?;
                Some(MonthCell {
                    label: labels.month_long(month),
                    date,
                })
            })
            .collect()
    }

    /// 16 consecutive years starting 8 before the anchor year
    pub fn years(&self) -> Vec<i32> {
        let first = self.anchor.year() - YEARS_BEFORE_ANCHOR;
        (first..first + YEARS_PER_PAGE).collect()
    }

    /// Whether `date` falls in the anchor month
    pub fn is_selected_month(&self, date: NaiveDate) -> bool {
        date.year() == self.anchor.year() && date.month() == self.anchor.month()
    }

    /// Whether `year` is the anchor year
    pub fn is_selected_year(&self, year: i32) -> bool {
        year == self.anchor.year()
    }
}
