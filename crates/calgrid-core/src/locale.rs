//! Month and weekday labels
//!
//! Hosts plug their own [`LabelSource`] to localize the header, the
//! weekday row and the months view.

use chrono::Month;

use crate::date::normalize_weekday;

/// Source of display labels
pub trait LabelSource {
    /// Long month name for `month` (1–12)
    fn month_long(&self, month: u32) -> String;

    /// Short weekday name for `index` (0 = Sunday … 6 = Saturday)
    fn weekday_short(&self, index: u32) -> String;
}

/// English labels
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLabels;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

impl LabelSource for EnglishLabels {
    fn month_long(&self, month: u32) -> String {
        u8::try_from(month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map_or("?", |m| m.name())
            .to_string()
    }

    fn weekday_short(&self, index: u32) -> String {
        WEEKDAYS[(index % 7) as usize].to_string()
    }
}

/// Weekday header row, rotated so the first entry is the week start
pub fn weekday_headers(labels: &dyn LabelSource, start_of_week: i64) -> Vec<String> {
    let start = normalize_weekday(start_of_week);
    (0..7).map(|i| labels.weekday_short((start + i) % 7)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_labels() {
        assert_eq!(EnglishLabels.month_long(1), "January");
        assert_eq!(EnglishLabels.month_long(12), "December");
        assert_eq!(EnglishLabels.month_long(0), "?");
        assert_eq!(EnglishLabels.month_long(13), "?");
    }

    #[test]
    fn test_weekday_headers_rotation() {
        assert_eq!(
            weekday_headers(&EnglishLabels, 1),
            vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        );
        assert_eq!(
            weekday_headers(&EnglishLabels, 0),
            vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        );
        assert_eq!(weekday_headers(&EnglishLabels, 13)[0], "Sat");
    }
}
