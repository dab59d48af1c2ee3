//! Process-wide logger
//!
//! For programs that would rather not pass a [`Logger`] around. The instance is
//! created on first use with default settings. Statics are never dropped, so
//! call [`destroy`] before exiting, or hold the guard returned by [`guard`] in
//! `main`, to get the buffered lines onto disk.
//!
//! ```no_run
//! use rust_daily_logger::{global, info};
//!
//! fn main() {
//!     let _guard = global::guard();
//!     global::set_save_directory("logs");
//!     info!(global::logger(), "hello from {}", "main");
//! }
//! ```

use crate::core::{LogLevel, Logger};
use std::sync::OnceLock;

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// The process-wide logger, created on first call
pub fn logger() -> &'static Logger {
    GLOBAL_LOGGER.get_or_init(Logger::new)
}

pub fn set_save_directory(directory: &str) {
    logger().set_save_directory(directory);
}

pub fn set_log_level(level: LogLevel) {
    logger().set_level(level);
}

/// Flush and stop the flush thread of the process-wide logger, if it exists.
pub fn destroy() {
    if let Some(logger) = GLOBAL_LOGGER.get() {
        logger.close();
    }
}

/// Calls [`destroy`] when dropped
#[must_use = "the logger is closed when the guard is dropped"]
#[derive(Debug)]
pub struct ShutdownGuard {
    _private: (),
}

pub fn guard() -> ShutdownGuard {
    ShutdownGuard { _private: () }
}

impl Drop for ShutdownGuard {
    fn drop(&mut self) {
        destroy();
    }
}
