//! REPL command parsing

use calgrid_core::date::parse_date;
use chrono::{Datelike, NaiveDate};

use crate::error::{CliError, Result};

/// Available commands for autocomplete display
pub const COMMANDS: &[(&str, &str)] = &[
    ("/next", "次へ (日: 1ヶ月, 月: 1年, 年: 16年)"),
    ("/prev", "前へ"),
    ("/days", "日表示に切り替え"),
    ("/months", "月表示に切り替え"),
    ("/years", "年表示に切り替え"),
    ("/month", "月を選択 (/month 1-12)"),
    ("/year", "年を選択 (/year 2024)"),
    ("/click", "日付をクリック (/click 2024-03-05 または /click 5)"),
    ("/info", "日付を右クリック (/info 2024-03-05)"),
    ("/clear", "選択をクリア"),
    ("/selection", "現在の選択を表示"),
    ("/json", "描画モデルを JSON で表示"),
    ("/help", "ヘルプを表示"),
    ("/exit", "プログラムを終了"),
];

/// A day given either as a full date or as a day of the displayed month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRef {
    Date(NaiveDate),
    DayOfMonth(u32),
}

impl DayRef {
    fn parse(arg: &str) -> Result<Self> {
        let arg = arg.trim();
        if arg.is_empty() {
            return Err(CliError::InvalidArgument("日付を指定してください".to_string()));
        }
        if let Ok(day) = arg.parse::<u32>() {
            return Ok(Self::DayOfMonth(day));
        }
        Ok(Self::Date(parse_date(arg)?))
    }

    /// Resolve against the anchor month
    pub fn resolve(self, anchor: NaiveDate) -> Result<NaiveDate> {
        match self {
            Self::Date(date) => Ok(date),
            Self::DayOfMonth(day) => NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), day)
                .ok_or_else(|| {
                    CliError::InvalidArgument(format!(
                        "{}-{:02} に {} 日はありません",
                        anchor.year(),
                        anchor.month(),
                        day
                    ))
                }),
        }
    }
}

/// Parsed REPL command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Days,
    Months,
    Years,
    Month(u32),
    Year(i32),
    Click(DayRef),
    Info(DayRef),
    Clear,
    Selection,
    Json,
    Help,
    Exit,
}

impl Command {
    /// Parse one input line.
    ///
    /// Lines without a leading `/` are treated as a click on a day.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if !input.starts_with('/') {
            return Ok(Self::Click(DayRef::parse(input)?));
        }

        let (name, arg) = match input.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (input, ""),
        };

        match name.to_lowercase().as_str() {
            "/next" | "/n" => Ok(Self::Next),
            "/prev" | "/p" => Ok(Self::Prev),
            "/days" => Ok(Self::Days),
            "/months" => Ok(Self::Months),
            "/years" => Ok(Self::Years),
            "/month" => {
                let month = arg
                    .parse::<u32>()
                    .ok()
                    .filter(|m| (1..=12).contains(m))
                    .ok_or_else(|| CliError::InvalidArgument(format!("月は 1-12: {}", arg)))?;
                Ok(Self::Month(month))
            }
            "/year" => {
                let year = arg
                    .parse::<i32>()
                    .map_err(|_| CliError::InvalidArgument(format!("年が不正です: {}", arg)))?;
                Ok(Self::Year(year))
            }
            "/click" | "/c" => Ok(Self::Click(DayRef::parse(arg)?)),
            "/info" | "/i" => Ok(Self::Info(DayRef::parse(arg)?)),
            "/clear" => Ok(Self::Clear),
            "/selection" | "/sel" => Ok(Self::Selection),
            "/json" => Ok(Self::Json),
            "/help" | "/?" => Ok(Self::Help),
            "/exit" | "/quit" | "/q" => Ok(Self::Exit),
            _ => Err(CliError::UnknownCommand(input.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(Command::parse("/next").unwrap(), Command::Next);
        assert_eq!(Command::parse(" /PREV ").unwrap(), Command::Prev);
        assert_eq!(Command::parse("/month 7").unwrap(), Command::Month(7));
        assert_eq!(Command::parse("/year 1999").unwrap(), Command::Year(1999));
        assert!(Command::parse("/month 13").is_err());
        assert!(Command::parse("/year abc").is_err());
    }

    #[test]
    fn test_parse_click() {
        assert_eq!(
            Command::parse("/click 2024-03-05").unwrap(),
            Command::Click(DayRef::Date(d(2024, 3, 5)))
        );
        assert_eq!(
            Command::parse("12").unwrap(),
            Command::Click(DayRef::DayOfMonth(12))
        );
        assert_eq!(
            Command::parse("/info 3").unwrap(),
            Command::Info(DayRef::DayOfMonth(3))
        );
        assert!(matches!(
            Command::parse("/click"),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            Command::parse("2024-02-30"),
            Err(CliError::Core(_))
        ));
    }

    #[test]
    fn test_unknown_command() {
        assert!(matches!(
            Command::parse("/weekly"),
            Err(CliError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_resolve_day_of_month() {
        let anchor = d(2024, 2, 1);
        assert_eq!(DayRef::DayOfMonth(29).resolve(anchor).unwrap(), d(2024, 2, 29));
        assert!(DayRef::DayOfMonth(30).resolve(anchor).is_err());
        assert_eq!(DayRef::Date(d(2023, 1, 1)).resolve(anchor).unwrap(), d(2023, 1, 1));
    }
}
