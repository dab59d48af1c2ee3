//! # Rust Daily Logger
//!
//! A small process-local logger. Records are filtered by severity, printed to the
//! console with a colored level tag and persisted, without colors, to one file
//! per day by a background thread.
//!
//! ## Features
//!
//! - **Non-blocking**: producers only append to an in-memory buffer; disk I/O
//!   happens on a flush thread about once per second
//! - **Daily files**: `{directory}/{YYYY-MM-DD}.txt`, appended to across restarts
//! - **Fatal means fatal**: a fatal record is flushed synchronously, then the
//!   process aborts
//! - **Wildcard matching**: `*`, `?` and `;`-separated alternatives for file names
//!
//! ```no_run
//! use rust_daily_logger::prelude::*;
//! use rust_daily_logger::{info, warn};
//!
//! let logger = Logger::builder().save_directory("logs").build();
//! info!(logger, "started with {} workers", 4);
//! warn!(logger, "cache is cold");
//! logger.close();
//! ```

pub mod appenders;
pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{AsyncFileSink, ConsoleAppender, SinkOptions};
    pub use crate::core::{
        Clock, LineFormatter, LogLevel, Logger, LoggerBuilder, LoggerConfig, LoggerError,
        LoggerMetrics, Result,
    };
}

pub use crate::appenders::{AsyncFileSink, ConsoleAppender, ErrorHook, SinkOptions};
pub use crate::core::{
    file_name, find_files, pattern_match, strip_color, Clock, FormattedLine, LineFormatter,
    LogLevel, LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
    ManualClock, Result, SharedConfig, SystemClock, MAX_LINE_LENGTH,
};
