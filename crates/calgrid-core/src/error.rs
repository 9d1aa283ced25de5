//! Error types for calgrid-core
//!
//! Grid, selection and navigation operations are total and never fail.
//! Errors only come from loading configuration and parsing dates.

use thiserror::Error;

/// calgrid-core error type
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CalendarError>;
