//! Core logger types

pub mod clock;
pub mod config;
pub mod error;
pub mod file_search;
pub mod formatter;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod pattern;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{LoggerConfig, SharedConfig};
pub use error::{LoggerError, Result};
pub use file_search::find_files;
pub use formatter::{file_name, strip_color, FormattedLine, LineFormatter, MAX_LINE_LENGTH};
pub use log_level::LogLevel;
pub use log_record::LogRecord;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use pattern::pattern_match;
