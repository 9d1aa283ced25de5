//! Selection transitions

use chrono::NaiveDate;
use tracing::debug;

use crate::config::SelectionMode;
use crate::date::same_day;
use crate::event::CalendarEvent;
use crate::selection::types::DateRange;

/// Current selection of one calendar instance
///
/// `selected` holds at most one date in single mode and a set (kept in
/// insertion order) in multi mode. `range` is only populated in range mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Vec<NaiveDate>,
    range: DateRange,
}

impl SelectionState {
    /// Create an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected dates (single or multi mode)
    pub fn selected(&self) -> &[NaiveDate] {
        &self.selected
    }

    /// Selected range (range mode)
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Apply a click on an enabled day and return the notifications to emit.
    ///
    /// The caller is responsible for ignoring disabled days.
    pub fn apply_click(&mut self, mode: SelectionMode, date: NaiveDate) -> Vec<CalendarEvent> {
        match mode {
            SelectionMode::Single => self.click_single(date),
            SelectionMode::Multi => self.click_multi(date),
            SelectionMode::Range => self.click_range(date),
        }
    }

    fn click_single(&mut self, date: NaiveDate) -> Vec<CalendarEvent> {
        let toggled_off = self
            .selected
            .first()
            .is_some_and(|current| same_day(*current, date));

        if toggled_off {
            self.selected.clear();
        } else {
            self.selected = vec![date];
        }
        self.range = DateRange::empty();

        debug!(%date, toggled_off, "Single selection changed");
        vec![
            CalendarEvent::SelectionChanged(self.selected.clone()),
            CalendarEvent::RangeChanged(self.range),
        ]
    }

    fn click_multi(&mut self, date: NaiveDate) -> Vec<CalendarEvent> {
        let before = self.selected.len();
        self.selected.retain(|d| !same_day(*d, date));
        let removed = self.selected.len() != before;
        if !removed {
            self.selected.push(date);
        }
        self.range = DateRange::empty();

        debug!(%date, removed, count = self.selected.len(), "Multi selection changed");
        vec![
            CalendarEvent::SelectionChanged(self.selected.clone()),
            CalendarEvent::RangeChanged(self.range),
        ]
    }

    fn click_range(&mut self, date: NaiveDate) -> Vec<CalendarEvent> {
        self.range = match (self.range.start, self.range.end) {
            (Some(start), None) => DateRange::between(start, date),
            // 未選択、または完了済みの範囲からやり直し
            _ => DateRange::starting_at(date),
        };
        self.selected.clear();

        debug!(range = %self.range, "Range selection changed");
        vec![
            CalendarEvent::RangeChanged(self.range),
            CalendarEvent::SelectionChanged(Vec::new()),
        ]
    }

    /// Clear every selected date and the range
    pub fn clear(&mut self) {
        self.selected.clear();
        self.range = DateRange::empty();
    }

    /// Whether `date` is one of the selected dates
    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.selected.iter().any(|d| same_day(*d, date))
    }

    /// Whether `date` is the range start
    pub fn is_range_start(&self, date: NaiveDate) -> bool {
        self.range.start.is_some_and(|s| same_day(s, date))
    }

    /// Whether `date` is the range end
    pub fn is_range_end(&self, date: NaiveDate) -> bool {
        self.range.end.is_some_and(|e| same_day(e, date))
    }

    /// Whether `date` lies strictly inside a complete range
    pub fn is_in_range(&self, date: NaiveDate) -> bool {
        self.range.contains_strictly(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_single_toggle_off() {
        let mut state = SelectionState::new();
        state.apply_click(SelectionMode::Single, d(2024, 3, 5));
        assert_eq!(state.selected(), &[d(2024, 3, 5)]);

        let events = state.apply_click(SelectionMode::Single, d(2024, 3, 5));
        assert!(state.selected().is_empty());
        assert_eq!(
            events,
            vec![
                CalendarEvent::SelectionChanged(Vec::new()),
                CalendarEvent::RangeChanged(DateRange::empty()),
            ]
        );
    }

    #[test]
    fn test_single_replace() {
        let mut state = SelectionState::new();
        state.apply_click(SelectionMode::Single, d(2024, 3, 5));
        let events = state.apply_click(SelectionMode::Single, d(2024, 3, 9));
        assert_eq!(state.selected(), &[d(2024, 3, 9)]);
        assert_eq!(events[0], CalendarEvent::SelectionChanged(vec![d(2024, 3, 9)]));
    }

    #[test]
    fn test_multi_toggle() {
        let mut state = SelectionState::new();
        state.apply_click(SelectionMode::Multi, d(2024, 3, 5));
        state.apply_click(SelectionMode::Multi, d(2024, 3, 9));
        let events = state.apply_click(SelectionMode::Multi, d(2024, 3, 5));

        assert_eq!(state.selected(), &[d(2024, 3, 9)]);
        assert_eq!(events[0], CalendarEvent::SelectionChanged(vec![d(2024, 3, 9)]));
        assert!(state.range().is_empty());
    }

    #[test]
    fn test_multi_keeps_insertion_order() {
        let mut state = SelectionState::new();
        for day in [9, 2, 5] {
            state.apply_click(SelectionMode::Multi, d(2024, 3, day));
        }
        assert_eq!(state.selected(), &[d(2024, 3, 9), d(2024, 3, 2), d(2024, 3, 5)]);
    }

    #[test]
    fn test_range_forward() {
        let mut state = SelectionState::new();
        let first = state.apply_click(SelectionMode::Range, d(2024, 3, 5));
        assert_eq!(
            first[0],
            CalendarEvent::RangeChanged(DateRange::starting_at(d(2024, 3, 5)))
        );

        let second = state.apply_click(SelectionMode::Range, d(2024, 3, 9));
        assert_eq!(state.range(), DateRange::between(d(2024, 3, 5), d(2024, 3, 9)));
        assert_eq!(
            second,
            vec![
                CalendarEvent::RangeChanged(state.range()),
                CalendarEvent::SelectionChanged(Vec::new()),
            ]
        );
    }

    #[test]
    fn test_range_swaps_when_end_before_start() {
        let mut state = SelectionState::new();
        state.apply_click(SelectionMode::Range, d(2024, 3, 9));
        state.apply_click(SelectionMode::Range, d(2024, 3, 5));
        assert_eq!(state.range().start, Some(d(2024, 3, 5)));
        assert_eq!(state.range().end, Some(d(2024, 3, 9)));
    }

    #[test]
    fn test_range_same_day_completes() {
        let mut state = SelectionState::new();
        state.apply_click(SelectionMode::Range, d(2024, 3, 5));
        state.apply_click(SelectionMode::Range, d(2024, 3, 5));
        assert_eq!(state.range(), DateRange::between(d(2024, 3, 5), d(2024, 3, 5)));
        assert!(!state.is_in_range(d(2024, 3, 5)));
    }

    #[test]
    fn test_range_restarts_after_completion() {
        let mut state = SelectionState::new();
        state.apply_click(SelectionMode::Range, d(2024, 3, 5));
        state.apply_click(SelectionMode::Range, d(2024, 3, 9));
        state.apply_click(SelectionMode::Range, d(2024, 3, 1));
        assert_eq!(state.range(), DateRange::starting_at(d(2024, 3, 1)));
    }

    #[test]
    fn test_range_queries() {
        let mut state = SelectionState::new();
        state.apply_click(SelectionMode::Range, d(2024, 3, 5));
        assert!(!state.is_in_range(d(2024, 3, 6)));

        state.apply_click(SelectionMode::Range, d(2024, 3, 9));
        assert!(state.is_range_start(d(2024, 3, 5)));
        assert!(state.is_range_end(d(2024, 3, 9)));
        assert!(state.is_in_range(d(2024, 3, 7)));
        assert!(!state.is_in_range(d(2024, 3, 5)));
        assert!(!state.is_in_range(d(2024, 3, 9)));
        assert_eq!(state.range().len_days(), Some(5));
    }

    #[test]
    fn test_range_mode_clears_selected_dates() {
        let mut state = SelectionState::new();
        state.apply_click(SelectionMode::Multi, d(2024, 3, 5));
        state.apply_click(SelectionMode::Range, d(2024, 3, 9));
        assert!(state.selected().is_empty());
        assert!(!state.is_selected(d(2024, 3, 5)));
    }
}
