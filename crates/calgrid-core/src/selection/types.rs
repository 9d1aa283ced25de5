//! Selection types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A start/end pair, either end possibly open
///
/// When both ends are set, `start <= end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// An empty range
    pub fn empty() -> Self {
        Self::default()
    }

    /// A range with only its start set
    pub fn starting_at(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// A completed range, ordering the two ends
    pub fn between(a: NaiveDate, b: NaiveDate) -> Self {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Whether neither end is set
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether both ends are set
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Whether `date` lies strictly between both ends
    pub fn contains_strictly(&self, date: NaiveDate) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => date > start && date < end,
            _ => false,
        }
    }

    /// Number of days covered by a complete range, inclusive
    pub fn len_days(&self) -> Option<i64> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((end - start).num_days() + 1),
            _ => None,
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fmt_end = |d: Option<NaiveDate>| d.map_or_else(|| "…".to_string(), |d| d.to_string());
        write!(f, "{} → {}", fmt_end(self.start), fmt_end(self.end))
    }
}
