//! Disabled-day and legend lookups
//!
//! Every lookup is total: legend misses resolve to documented fallbacks.

use chrono::NaiveDate;

use crate::config::{CalendarConfig, LegendEntry};
use crate::date::{normalize_weekday, same_day, weekday_index};

/// Color used for legend entries without an explicit color
pub const DEFAULT_LEGEND_COLOR: &str = "grey";

/// Info line used when a day has no legend info
pub const NO_INFO: &str = "no info";

/// Per-day predicates over a borrowed configuration
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    config: &'a CalendarConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a CalendarConfig) -> Self {
        Self { config }
    }

    /// Outside `[min_day, max_day]` or explicitly disabled.
    ///
    /// Legend membership never disables a day.
    pub fn is_disabled(&self, date: NaiveDate) -> bool {
        if self.config.min_day.is_some_and(|min| date < min) {
            return true;
        }
        if self.config.max_day.is_some_and(|max| date > max) {
            return true;
        }
        self.config
            .disabled_dates
            .iter()
            .any(|d| same_day(*d, date))
    }

    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        let index = weekday_index(date);
        self.config
            .weekend_days
            .iter()
            .any(|d| normalize_weekday(*d) == index)
    }

    /// First legend entry for `date`
    pub fn legend_entry(&self, date: NaiveDate) -> Option<&'a LegendEntry> {
        self.config.legend.iter().find(|l| same_day(l.date, date))
    }

    /// `None` for unlisted days, grey for entries without a color
    pub fn legend_color(&self, date: NaiveDate) -> Option<&'a str> {
        self.legend_entry(date)
            .map(|entry| entry.color.as_deref().unwrap_or(DEFAULT_LEGEND_COLOR))
    }

    /// Info lines, or `["no info"]` when the day has none
    pub fn legend_info(&self, date: NaiveDate) -> Vec<String> {
        match self.legend_entry(date).and_then(|e| e.info.as_ref()) {
            Some(info) if !info.is_empty() => info.clone(),
            _ => vec![NO_INFO.to_string()],
        }
    }

    /// Hover text: joined info for legend days, empty otherwise
    pub fn legend_tooltip(&self, date: NaiveDate) -> String {
        if self.legend_color(date).is_some() {
            self.legend_info(date).join(", ")
        } else {
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn config() -> CalendarConfig {
        CalendarConfig::default()
            .with_min_day(d(2024, 3, 5))
            .with_max_day(d(2024, 3, 25))
            .with_disabled_dates(vec![d(2024, 3, 10)])
            .with_legend(vec![
                LegendEntry::new(d(2024, 3, 8))
                    .with_color("red")
                    .with_info(["Holiday", "Office closed"]),
                LegendEntry::new(d(2024, 3, 9)),
                LegendEntry::new(d(2024, 3, 11)).with_info(Vec::<String>::new()),
                LegendEntry::new(d(2024, 3, 8)).with_color("blue"),
                LegendEntry::new(d(2024, 3, 1)).with_color("green"),
            ])
    }

    #[test]
    fn test_is_disabled() {
        let config = config();
        let resolver = Resolver::new(&config);

        assert!(resolver.is_disabled(d(2024, 3, 4)));
        assert!(!resolver.is_disabled(d(2024, 3, 5)));
        assert!(!resolver.is_disabled(d(2024, 3, 25)));
        assert!(resolver.is_disabled(d(2024, 3, 26)));
        assert!(resolver.is_disabled(d(2024, 3, 10)));
        assert!(!resolver.is_disabled(d(2024, 3, 11)));
        // 凡例の日付は無効化されない
        assert!(!resolver.is_disabled(d(2024, 3, 8)));
    }

    #[test]
    fn test_no_bounds_nothing_disabled() {
        let config = CalendarConfig::default();
        let resolver = Resolver::new(&config);
        assert!(!resolver.is_disabled(d(1900, 1, 1)));
        assert!(!resolver.is_disabled(d(2999, 12, 31)));
    }

    #[test]
    fn test_legend_color() {
        let config = config();
        let resolver = Resolver::new(&config);

        assert_eq!(resolver.legend_color(d(2024, 3, 8)), Some("red"));
        assert_eq!(resolver.legend_color(d(2024, 3, 9)), Some("grey"));
        assert_eq!(resolver.legend_color(d(2024, 3, 12)), None);
        // legend dates outside the bounds still resolve
        assert_eq!(resolver.legend_color(d(2024, 3, 1)), Some("green"));
    }

    #[test]
    fn test_legend_info() {
        let config = config();
        let resolver = Resolver::new(&config);

        assert_eq!(
            resolver.legend_info(d(2024, 3, 8)),
            vec!["Holiday", "Office closed"]
        );
        assert_eq!(resolver.legend_info(d(2024, 3, 9)), vec!["no info"]);
        assert_eq!(resolver.legend_info(d(2024, 3, 11)), vec!["no info"]);
        assert_eq!(resolver.legend_info(d(2024, 3, 12)), vec!["no info"]);
    }

    #[test]
    fn test_legend_tooltip() {
        let config = config();
        let resolver = Resolver::new(&config);

        assert_eq!(resolver.legend_tooltip(d(2024, 3, 8)), "Holiday, Office closed");
        assert_eq!(resolver.legend_tooltip(d(2024, 3, 9)), "no info");
        assert_eq!(resolver.legend_tooltip(d(2024, 3, 12)), "");
    }

    #[test]
    fn test_is_weekend() {
        let config = CalendarConfig::default().with_weekend_days(vec![5, 13]);
        let resolver = Resolver::new(&config);
        // 2024-03-01 金曜日, 2024-03-02 土曜日 (13 mod 7 = 6)
        assert!(resolver.is_weekend(d(2024, 3, 1)));
        assert!(resolver.is_weekend(d(2024, 3, 2)));
        assert!(!resolver.is_weekend(d(2024, 3, 3)));
    }
}
