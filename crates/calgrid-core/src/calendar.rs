//! Calendar component
//!
//! One [`Calendar`] owns the view state and the selection of a single date
//! picker. Configuration is read on every operation and never mutated.
//! Every operation runs to completion and notifies listeners before it
//! returns.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::config::CalendarConfig;
use crate::event::{CalendarEvent, CalendarListener, EventBus};
use crate::grid::{CalendarWeek, DayCell, build_grid, build_weeks};
use crate::locale::{EnglishLabels, LabelSource, weekday_headers};
use crate::render::{
    RenderedBody, RenderedCalendar, RenderedDay, RenderedHeader, RenderedMonth, RenderedWeek,
    RenderedYear,
};
use crate::resolver::Resolver;
use crate::selection::{DateRange, SelectionState};
use crate::view::{CalendarView, ViewState};

/// A single calendar widget instance
pub struct Calendar {
    config: CalendarConfig,
    today: NaiveDate,
    view: ViewState,
    selection: SelectionState,
    labels: Box<dyn LabelSource>,
    events: EventBus,
}

impl Calendar {
    /// Create a calendar showing the month of `today` with nothing selected
    pub fn new(config: CalendarConfig, today: NaiveDate) -> Self {
        Self {
            config,
            today,
            view: ViewState::new(today),
            selection: SelectionState::new(),
            labels: Box::new(EnglishLabels),
            events: EventBus::new(),
        }
    }

    /// Create a calendar using the local date as "today"
    pub fn with_local_today(config: CalendarConfig) -> Self {
        Self::new(config, chrono::Local::now().date_naive())
    }

    /// Use a different label source
    pub fn with_labels(mut self, labels: impl LabelSource + 'static) -> Self {
        self.labels = Box::new(labels);
        self
    }

    /// Register a change listener
    pub fn subscribe(&mut self, listener: impl CalendarListener + 'static) {
        self.events.subscribe(listener);
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// Switching to another selection mode clears the selection and
    /// notifies listeners.
    pub fn set_config(&mut self, config: CalendarConfig) {
        let mode_changed = config.mode != self.config.mode;
        if mode_changed {
            debug!(from = ?self.config.mode, to = ?config.mode, "Selection mode changed, clearing selection");
        }
        self.config = config;
        if mode_changed {
            self.clear_selection();
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Move the "today" reference (e.g. after midnight)
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    pub fn view(&self) -> CalendarView {
        self.view.view()
    }

    pub fn anchor(&self) -> NaiveDate {
        self.view.anchor()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_dates(&self) -> &[NaiveDate] {
        self.selection.selected()
    }

    pub fn range(&self) -> DateRange {
        self.selection.range()
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.config)
    }

    // ---- Selection ----

    /// Primary click on a day.
    ///
    /// Returns `false` (and changes nothing) when the day is disabled.
    pub fn select_day(&mut self, date: NaiveDate) -> bool {
        if self.is_disabled(date) {
            debug!(%date, "Ignoring click on disabled day");
            return false;
        }

        let events = self.selection.apply_click(self.config.mode, date);
        self.events.emit_all(&events);
        true
    }

    /// Secondary click on a day. Never changes the selection.
    pub fn right_click(&mut self, date: NaiveDate) {
        debug!(%date, "Right-clicked date");
        self.events.emit(&CalendarEvent::DayContextMenu(date));
    }

    /// Drop every selected date and the range
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.events.emit_all(&[
            CalendarEvent::SelectionChanged(Vec::new()),
            CalendarEvent::RangeChanged(DateRange::empty()),
        ]);
    }

    // ---- Navigation ----

    fn view_changed(&mut self) {
        let event = CalendarEvent::ViewChanged {
            view: self.view.view(),
            anchor: self.view.anchor(),
        };
        self.events.emit(&event);
    }

    pub fn switch_to_months(&mut self) {
        self.view.switch_to_months();
        self.view_changed();
    }

    pub fn switch_to_years(&mut self) {
        self.view.switch_to_years();
        self.view_changed();
    }

    pub fn switch_to_days(&mut self) {
        self.view.switch_to_days();
        self.view_changed();
    }

    /// Pick a month from the months view
    pub fn choose_month(&mut self, date: NaiveDate) {
        self.view.choose_month(date);
        self.view_changed();
    }

    /// Pick month `month` (1–12) of the anchor year.
    ///
    /// Returns `false` for an invalid month number.
    pub fn choose_month_number(&mut self, month: u32) -> bool {
        match self.view.month_date(month) {
            Some(date) => {
                self.choose_month(date);
                true
            }
            None => false,
        }
    }

    /// Pick a year from the years view
    pub fn choose_year(&mut self, year: i32) {
        self.view.choose_year(year);
        self.view_changed();
    }

    pub fn prev(&mut self) {
        self.view.prev();
        self.view_changed();
    }

    pub fn next(&mut self) {
        self.view.next();
        self.view_changed();
    }

    // ---- Derived values ----

    /// The 42 cells of the anchor month
    pub fn grid(&self) -> Vec<DayCell> {
        build_grid(self.view.anchor(), self.config.start_of_week)
    }

    /// The six numbered rows of the anchor month
    pub fn weeks(&self) -> Vec<CalendarWeek> {
        build_weeks(self.view.anchor(), self.config.start_of_week)
    }

    pub fn weekday_headers(&self) -> Vec<String> {
        weekday_headers(self.labels.as_ref(), self.config.start_of_week)
    }

    pub fn is_today(&self, date: NaiveDate) -> bool {
        date == self.today
    }

    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        self.resolver().is_disabled(date)
    }

    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.resolver().is_weekend(date)
    }

    pub fn legend_color(&self, date: NaiveDate) -> Option<&str> {
        self.resolver().legend_color(date)
    }

    pub fn legend_info(&self, date: NaiveDate) -> Vec<String> {
        self.resolver().legend_info(date)
    }

    /// Whether `date` falls in the month of today
    pub fn is_current_month(&self, date: NaiveDate) -> bool {
        date.year() == self.today.year() && date.month() == self.today.month()
    }

    pub fn is_current_year(&self, year: i32) -> bool {
        year == self.today.year()
    }

    // ---- Rendering ----

    /// Build the render model of the active view
    pub fn render(&self) -> RenderedCalendar {
        let anchor = self.view.anchor();
        let header = RenderedHeader {
            view: self.view.view(),
            month_label: self.labels.month_long(anchor.month()),
            year: anchor.year(),
            width: self.config.width,
            height: self.config.height,
            scale: self.config.scale(),
        };

        let body = match self.view.view() {
            CalendarView::Days => RenderedBody::Days {
                weekdays: self.weekday_headers(),
                weeks: self.render_weeks(),
            },
            CalendarView::Months => RenderedBody::Months {
                months: self
                    .view
                    .months(self.labels.as_ref())
                    .into_iter()
                    .map(|m| RenderedMonth {
                        is_current: self.is_current_month(m.date),
                        is_selected: self.view.is_selected_month(m.date),
                        label: m.label,
                        date: m.date,
                    })
                    .collect(),
            },
            CalendarView::Years => RenderedBody::Years {
                years: self
                    .view
                    .years()
                    .into_iter()
                    .map(|year| RenderedYear {
                        year,
                        is_current: self.is_current_year(year),
                        is_selected: self.view.is_selected_year(year),
                    })
                    .collect(),
            },
        };

        RenderedCalendar { header, body }
    }

    fn render_weeks(&self) -> Vec<RenderedWeek> {
        self.weeks()
            .into_iter()
            .map(|week| RenderedWeek {
                week_number: week.week_number,
                days: week.days.iter().map(|cell| self.render_day(cell)).collect(),
            })
            .collect()
    }

    fn render_day(&self, cell: &DayCell) -> RenderedDay {
        let date = cell.date;
        let resolver = self.resolver();
        let range = self.selection.range();
        let is_range_start = self.selection.is_range_start(date);
        let is_range_end = self.selection.is_range_end(date);

        RenderedDay {
            date,
            day: date.day(),
            aria_label: date.format("%Y-%m-%d").to_string(),
            in_current_month: cell.in_current_month,
            is_today: self.is_today(date),
            is_weekend: resolver.is_weekend(date),
            is_selected: self.selection.is_selected(date),
            is_range_start,
            is_range_end,
            is_in_range: self.selection.is_in_range(date),
            is_disabled: resolver.is_disabled(date),
            legend_color: resolver.legend_color(date).map(str::to_string),
            legend_info: resolver.legend_info(date),
            tooltip: resolver.legend_tooltip(date),
            pipe_start: is_range_start && range.end.is_some(),
            pipe_end: is_range_end && range.start.is_some(),
        }
    }
}

impl std::fmt::Debug for Calendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Calendar")
            .field("config", &self.config)
            .field("today", &self.today)
            .field("view", &self.view)
            .field("selection", &self.selection)
            .field("events", &self.events)
            .finish()
    }
}
