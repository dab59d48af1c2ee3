//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log line.
///
/// Lower values are more severe. A logger configured with a minimum level
/// drops every record whose level is numerically greater than that minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Fatal = 0,
    Error = 1,
    Warning = 2,
    #[default]
    Info = 3,
    Verbose = 4,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Fatal,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Verbose,
    ];

    /// Tag written between brackets in every line
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Fatal => "fatal",
            LogLevel::Error => "error",
            LogLevel::Warning => "warn",
            LogLevel::Info => "info",
            LogLevel::Verbose => "verbo",
        }
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Fatal | LogLevel::Error => Red,
            LogLevel::Warning => Yellow,
            LogLevel::Info | LogLevel::Verbose => Green,
        }
    }

    /// Whether the console copy of this level goes to stderr
    #[inline]
    pub fn uses_error_stream(&self) -> bool {
        matches!(self, LogLevel::Warning | LogLevel::Error | LogLevel::Fatal)
    }

    /// Whether a record at this level passes a logger whose minimum is `min_level`
    #[inline]
    pub fn passes(&self, min_level: LogLevel) -> bool {
        *self <= min_level
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fatal" => Ok(LogLevel::Fatal),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "info" => Ok(LogLevel::Info),
            "verbo" | "verbose" => Ok(LogLevel::Verbose),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
