//! Calendar configuration
//!
//! 設定は以下の優先順位で読み込まれます:
//! 1. 環境変数 (`CALGRID_*`)
//! 2. calgrid.toml 設定ファイル
//! 3. デフォルト値
//!
//! 設定ファイル内では `${VAR_NAME}` 形式で環境変数を展開できます。
//! Dates are written as quoted `"YYYY-MM-DD"` strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::date::{normalize_weekday, parse_date};
use crate::error::{CalendarError, Result};

/// Default config file locations, in lookup order
const DEFAULT_CONFIG_PATHS: &[&str] = &["calgrid.toml", "config/calgrid.toml"];

/// Reference size the scale factor is computed against
const SCALE_BASE: f64 = 375.0;

/// Selection mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// At most one selected date
    #[default]
    Single,
    /// A set of selected dates
    Multi,
    /// A contiguous start/end range
    Range,
}

impl std::str::FromStr for SelectionMode {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "multi" | "multiple" => Ok(Self::Multi),
            "range" => Ok(Self::Range),
            other => Err(CalendarError::Config(format!(
                "unknown selection mode: {}",
                other
            ))),
        }
    }
}

/// A date annotated with an optional display color and info list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegendEntry {
    /// Annotated date
    pub date: NaiveDate,
    /// Display color (CSS color or token); `None` falls back to grey
    #[serde(default)]
    pub color: Option<String>,
    /// Descriptive text lines
    #[serde(default)]
    pub info: Option<Vec<String>>,
}

impl LegendEntry {
    /// Create a legend entry without color or info
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            color: None,
            info: None,
        }
    }

    /// Set the color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the info lines
    pub fn with_info<I, S>(mut self, info: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.info = Some(info.into_iter().map(Into::into).collect());
        self
    }
}

/// Calendar configuration
///
/// Owned by the host and read on every render; the engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarConfig {
    /// Widget width in pixels
    #[serde(default = "default_size")]
    pub width: u32,

    /// Widget height in pixels
    #[serde(default = "default_size")]
    pub height: u32,

    /// Selection mode
    #[serde(default)]
    pub mode: SelectionMode,

    /// Earliest selectable day (inclusive)
    #[serde(default)]
    pub min_day: Option<NaiveDate>,

    /// Latest selectable day (inclusive)
    #[serde(default)]
    pub max_day: Option<NaiveDate>,

    /// Explicitly disabled days
    #[serde(default)]
    pub disabled_dates: Vec<NaiveDate>,

    /// First day of the week (0 = Sunday … 6 = Saturday, taken modulo 7)
    #[serde(default = "default_start_of_week")]
    pub start_of_week: i64,

    /// Weekend weekday indices (0 = Sunday … 6 = Saturday)
    #[serde(default = "default_weekend_days")]
    pub weekend_days: Vec<i64>,

    /// Legend entries, first match wins
    #[serde(default)]
    pub legend: Vec<LegendEntry>,
}

fn default_size() -> u32 {
    430
}

fn default_start_of_week() -> i64 {
    1
}

fn default_weekend_days() -> Vec<i64> {
    vec![0, 6]
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            width: default_size(),
            height: default_size(),
            mode: SelectionMode::default(),
            min_day: None,
            max_day: None,
            disabled_dates: Vec::new(),
            start_of_week: default_start_of_week(),
            weekend_days: default_weekend_days(),
            legend: Vec::new(),
        }
    }
}

impl CalendarConfig {
    /// Set the selection mode
    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the widget size in pixels
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the inclusive lower bound
    pub fn with_min_day(mut self, min_day: NaiveDate) -> Self {
        self.min_day = Some(min_day);
        self
    }

    /// Set the inclusive upper bound
    pub fn with_max_day(mut self, max_day: NaiveDate) -> Self {
        self.max_day = Some(max_day);
        self
    }

    /// Set the explicitly disabled days
    pub fn with_disabled_dates(mut self, dates: Vec<NaiveDate>) -> Self {
        self.disabled_dates = dates;
        self
    }

    /// Set the first day of the week
    pub fn with_start_of_week(mut self, start_of_week: i64) -> Self {
        self.start_of_week = start_of_week;
        self
    }

    /// Set the weekend weekday indices
    pub fn with_weekend_days(mut self, days: Vec<i64>) -> Self {
        self.weekend_days = days;
        self
    }

    /// Set the legend entries
    pub fn with_legend(mut self, legend: Vec<LegendEntry>) -> Self {
        self.legend = legend;
        self
    }

    /// Start of week as an index in `0..7` (7 → Sunday)
    pub fn start_of_week_normalized(&self) -> u32 {
        normalize_weekday(self.start_of_week)
    }

    /// Responsive scale factor derived from the widget size
    pub fn scale(&self) -> f64 {
        let min = f64::from(self.width.min(self.height)).max(160.0);
        (min / SCALE_BASE).clamp(0.5, 2.5)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_day, self.max_day) {
            if min > max {
                return Err(CalendarError::Config(format!(
                    "min_day {} is after max_day {}",
                    min, max
                )));
            }
        }
        Ok(())
    }

    /// `${VAR_NAME}` 形式の文字列を環境変数の値に置換します。
    /// 環境変数が存在しない場合は空文字列になります。
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::with_capacity(value.len());
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next();

                let mut var_name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    var_name.push(c);
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// TOML 文字列から設定を読み込む
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let expanded = Self::expand_env_vars(content);
        let config: CalendarConfig = toml::from_str(&expanded)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 設定ファイルから設定を読み込む
    ///
    /// 既存の環境変数で上書きします（環境変数が優先）。
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides();
        config.validate()?;

        info!(path = %path.display(), mode = ?config.mode, "Loaded calendar config");
        Ok(config)
    }

    /// デフォルトパスから設定を読み込む
    ///
    /// 以下の順序で設定ファイルを探します:
    /// 1. `./calgrid.toml`
    /// 2. `./config/calgrid.toml`
    /// 3. 見つからない場合はデフォルト値 + 環境変数
    pub fn load() -> Result<Self> {
        for path in DEFAULT_CONFIG_PATHS {
            if Path::new(path).exists() {
                return Self::from_toml_file(path);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 環境変数で設定を上書きする
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(mode) = lookup("CALGRID_MODE") {
            match mode.parse() {
                Ok(mode) => self.mode = mode,
                Err(e) => warn!("Ignoring CALGRID_MODE: {}", e),
            }
        }
        if let Some(value) = lookup("CALGRID_START_OF_WEEK") {
            match value.trim().parse() {
                Ok(sow) => self.start_of_week = sow,
                Err(_) => warn!(value = %value, "Ignoring CALGRID_START_OF_WEEK"),
            }
        }
        if let Some(value) = lookup("CALGRID_WIDTH") {
            match value.trim().parse() {
                Ok(width) => self.width = width,
                Err(_) => warn!(value = %value, "Ignoring CALGRID_WIDTH"),
            }
        }
        if let Some(value) = lookup("CALGRID_HEIGHT") {
            match value.trim().parse() {
                Ok(height) => self.height = height,
                Err(_) => warn!(value = %value, "Ignoring CALGRID_HEIGHT"),
            }
        }
        if let Some(value) = lookup("CALGRID_MIN_DAY") {
            match parse_date(&value) {
                Ok(date) => self.min_day = Some(date),
                Err(e) => warn!("Ignoring CALGRID_MIN_DAY: {}", e),
            }
        }
        if let Some(value) = lookup("CALGRID_MAX_DAY") {
            match parse_date(&value) {
                Ok(date) => self.max_day = Some(date),
                Err(e) => warn!("Ignoring CALGRID_MAX_DAY: {}", e),
            }
        }
        if let Some(value) = lookup("CALGRID_WEEKEND_DAYS") {
            let parsed: std::result::Result<Vec<i64>, _> =
                value.split(',').map(|s| s.trim().parse()).collect();
            match parsed {
                Ok(days) => self.weekend_days = days,
                Err(_) => warn!(value = %value, "Ignoring CALGRID_WEEKEND_DAYS"),
            }
        }
        if let Some(value) = lookup("CALGRID_DISABLED_DATES") {
            let parsed: Result<Vec<NaiveDate>> = value.split(',').map(parse_date).collect();
            match parsed {
                Ok(dates) => self.disabled_dates = dates,
                Err(e) => warn!("Ignoring CALGRID_DISABLED_DATES: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = CalendarConfig::default();
        assert_eq!(config.width, 430);
        assert_eq!(config.height, 430);
        assert_eq!(config.mode, SelectionMode::Single);
        assert_eq!(config.start_of_week_normalized(), 1);
        assert_eq!(config.weekend_days, vec![0, 6]);
    }

    #[test]
    fn test_start_of_week_normalized() {
        let config = CalendarConfig::default().with_start_of_week(7);
        assert_eq!(config.start_of_week_normalized(), 0);
        let config = CalendarConfig::default().with_start_of_week(-1);
        assert_eq!(config.start_of_week_normalized(), 6);
    }

    #[test]
    fn test_scale() {
        assert!((CalendarConfig::default().with_size(375, 500).scale() - 1.0).abs() < 1e-9);
        assert!((CalendarConfig::default().with_size(750, 900).scale() - 2.0).abs() < 1e-9);
        // 160px の下限でも 0.5 が最小値
        assert!((CalendarConfig::default().with_size(100, 100).scale() - 0.5).abs() < 1e-9);
        assert!((CalendarConfig::default().with_size(2000, 2000).scale() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
mode = "range"
start_of_week = 0
min_day = "2024-03-01"
disabled_dates = ["2024-03-10", "2024-03-11"]

[[legend]]
date = "2024-03-08"
color = "red"
info = ["Holiday"]

[[legend]]
date = "2024-03-09"
"#;
        let config = CalendarConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.mode, SelectionMode::Range);
        assert_eq!(config.start_of_week, 0);
        assert_eq!(config.min_day, Some(d(2024, 3, 1)));
        assert_eq!(config.max_day, None);
        assert_eq!(config.disabled_dates.len(), 2);
        assert_eq!(config.legend.len(), 2);
        assert_eq!(config.legend[0].color.as_deref(), Some("red"));
        assert!(config.legend[1].color.is_none());
        assert!(config.legend[1].info.is_none());
        // デフォルト値
        assert_eq!(config.width, 430);
        assert_eq!(config.weekend_days, vec![0, 6]);
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let toml = r#"
min_day = "2024-03-10"
max_day = "2024-03-01"
"#;
        let result = CalendarConfig::from_toml_str(toml);
        assert!(matches!(result, Err(CalendarError::Config(_))));
    }

    #[test]
    fn test_invalid_mode_is_parse_error() {
        let result = CalendarConfig::from_toml_str("mode = \"weekly\"");
        assert!(matches!(result, Err(CalendarError::TomlParse(_))));
    }

    #[test]
    fn test_from_toml_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "mode = \"multi\"").unwrap();
        writeln!(temp_file, "width = 300").unwrap();

        let config = CalendarConfig::from_toml_file(temp_file.path()).unwrap();
        assert_eq!(config.mode, SelectionMode::Multi);
        assert_eq!(config.width, 300);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = CalendarConfig::from_toml_file("/nonexistent/calgrid.toml");
        assert!(matches!(result, Err(CalendarError::Io(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("CALGRID_MODE", "range"),
            ("CALGRID_START_OF_WEEK", "0"),
            ("CALGRID_MIN_DAY", "2024-01-01"),
            ("CALGRID_WEEKEND_DAYS", "5, 6"),
            ("CALGRID_DISABLED_DATES", "2024-01-05,2024-01-06"),
            ("CALGRID_WIDTH", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = CalendarConfig::default();
        config.apply_overrides_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.mode, SelectionMode::Range);
        assert_eq!(config.start_of_week, 0);
        assert_eq!(config.min_day, Some(d(2024, 1, 1)));
        assert_eq!(config.weekend_days, vec![5, 6]);
        assert_eq!(config.disabled_dates, vec![d(2024, 1, 5), d(2024, 1, 6)]);
        // 不正な値は無視される
        assert_eq!(config.width, 430);
    }

    #[test]
    fn test_selection_mode_from_str() {
        assert_eq!("Range".parse::<SelectionMode>().unwrap(), SelectionMode::Range);
        assert_eq!("multiple".parse::<SelectionMode>().unwrap(), SelectionMode::Multi);
        assert!("weekly".parse::<SelectionMode>().is_err());
    }
}
