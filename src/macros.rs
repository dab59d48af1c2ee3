//! Logging macros that capture the call site.
//!
//! Each macro records `file!()` and `line!()` and formats its arguments like
//! `format!`. Arguments are not evaluated into a string when the level is
//! filtered out.
//!
//! # Examples
//!
//! ```
//! use rust_daily_logger::prelude::*;
//! use rust_daily_logger::info;
//!
//! let logger = Logger::builder().console(false).build();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_daily_logger::prelude::*;
/// # let logger = Logger::builder().console(false).build();
/// use rust_daily_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.emit(file!(), line!(), $level, format_args!($($arg)+))
    };
}

/// Log a verbose-level message.
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Verbose, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_daily_logger::prelude::*;
/// # let logger = Logger::builder().console(false).build();
/// use rust_daily_logger::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message, flush it to disk and abort the process.
///
/// ```no_run
/// # use rust_daily_logger::prelude::*;
/// # let logger = Logger::new();
/// use rust_daily_logger::fatal;
/// fatal!(logger, "index {} out of bounds", 7);
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
