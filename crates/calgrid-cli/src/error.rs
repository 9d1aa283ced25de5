//! エラー型定義 (calgrid-cli)

use std::fmt;

/// REPL コマンドのエラー型
#[derive(Debug)]
pub enum CliError {
    /// Core error (date parsing, config)
    Core(calgrid_core::CalendarError),
    /// Unknown command
    UnknownCommand(String),
    /// Missing or malformed argument
    InvalidArgument(String),
    /// JSON serialization error
    Json(serde_json::Error),
    /// Rendering / terminal error
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core(e) => write!(f, "{}", e),
            Self::UnknownCommand(c) => write!(f, "不明なコマンド: {}", c),
            Self::InvalidArgument(e) => write!(f, "引数が不正です: {}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
            Self::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<calgrid_core::CalendarError> for CliError {
    fn from(e: calgrid_core::CalendarError) -> Self {
        Self::Core(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Result 型エイリアス
pub type Result<T> = std::result::Result<T, CliError>;
