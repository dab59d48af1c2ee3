//! Per-call log record

use super::log_level::LogLevel;
use chrono::{DateTime, Local};

/// Everything needed to render one line.
///
/// Built by `Logger::emit` for a single call and consumed right away by the
/// formatter; nothing keeps it afterwards.
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub level: LogLevel,
    pub timestamp: DateTime<Local>,
    pub file: &'a str,
    pub line: u32,
    pub message: String,
}

impl<'a> LogRecord<'a> {
    pub fn new(
        level: LogLevel,
        timestamp: DateTime<Local>,
        file: &'a str,
        line: u32,
        message: String,
    ) -> Self {
        Self {
            level,
            timestamp,
            file,
            line,
            message,
        }
    }

    /// Milliseconds since the Unix epoch
    #[inline]
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}
