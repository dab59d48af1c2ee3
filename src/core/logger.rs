//! Main logger implementation

use super::{
    clock::{Clock, SystemClock},
    config::{LoggerConfig, SharedConfig},
    error::LoggerError,
    formatter::{LineFormatter, MAX_LINE_LENGTH},
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
};
use crate::appenders::async_file::{
    AsyncFileSink, ErrorHook, SinkOptions, DEFAULT_FLUSH_INTERVAL, DEFAULT_POLL_INTERVAL,
};
use crate::appenders::console::ConsoleAppender;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

/// Level-filtered logger writing colored lines to the console and plain lines
/// to daily files.
///
/// Every method takes `&self`, so one instance can be shared across threads
/// behind an `Arc` or a `static`.
///
/// # Example
///
/// ```no_run
/// use rust_daily_logger::prelude::*;
/// use rust_daily_logger::info;
///
/// let logger = Logger::builder()
///     .save_directory("logs")
///     .min_level(LogLevel::Verbose)
///     .build();
///
/// info!(logger, "listening on port {}", 8080);
/// logger.close();
/// ```
pub struct Logger {
    config: Arc<SharedConfig>,
    formatter: LineFormatter,
    console: ConsoleAppender,
    sink: AsyncFileSink,
    clock: Arc<dyn Clock>,
    metrics: Arc<LoggerMetrics>,
    on_error: ErrorHook,
}

impl Logger {
    /// Logger at `Info` without persistence until a save directory is set
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Log one record.
    ///
    /// Records less severe than the configured minimum return before any
    /// formatting. A `Fatal` record is flushed to disk synchronously, after which
    /// the process aborts.
    pub fn emit(&self, file: &str, line: u32, level: LogLevel, args: fmt::Arguments<'_>) {
        if !level.passes(self.config.min_level()) {
            self.metrics.record_filtered();
            return;
        }

        let record = LogRecord::new(level, self.clock.now(), file, line, fmt::format(args));
        let formatted = self.formatter.format(&record);
        self.metrics.record_emitted();

        self.console.append(level, &formatted.console);
        self.sink.write(formatted.plain);

        if level == LogLevel::Fatal {
            self.abort_after_flush();
        }
    }

    /// Log a message at the caller's source location
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        let caller = Location::caller();
        self.emit(caller.file(), caller.line(), level, format_args!("{}", message));
    }

    #[inline]
    #[track_caller]
    pub fn verbose(&self, message: impl fmt::Display) {
        self.log(LogLevel::Verbose, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl fmt::Display) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.log(LogLevel::Error, message);
    }

    /// Log, flush and abort the process.
    #[inline]
    #[track_caller]
    pub fn fatal(&self, message: impl fmt::Display) {
        self.log(LogLevel::Fatal, message);
    }

    /// Set where day files go. The directory is created on the first flush.
    pub fn set_save_directory(&self, directory: &str) {
        self.config.set_save_directory(Some(directory));
    }

    /// Stop persisting; lines still reach the console.
    pub fn clear_save_directory(&self) {
        self.config.set_save_directory(None);
    }

    /// Takes effect on the next emit
    pub fn set_level(&self, level: LogLevel) {
        self.config.set_min_level(level);
    }

    pub fn level(&self) -> LogLevel {
        self.config.min_level()
    }

    pub fn config(&self) -> Arc<LoggerConfig> {
        self.config.snapshot()
    }

    /// Write buffered lines to disk now instead of waiting for the flush thread
    pub fn flush(&self) {
        if let Err(e) = self.sink.flush() {
            (self.on_error)(&e);
        }
        self.console.flush();
    }

    /// Stop the flush thread after a final flush. Later emits restart it.
    pub fn close(&self) {
        self.sink.close();
    }

    /// Lines waiting for the next flush
    pub fn pending_len(&self) -> usize {
        self.sink.pending_len()
    }

    pub fn sink(&self) -> &AsyncFileSink {
        &self.sink
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    fn abort_after_flush(&self) -> ! {
        self.flush();
        std::process::abort();
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.sink.close();

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped lines (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

/// Report flush-path failures as Error lines on the console.
///
/// The report obeys the level filter like any other Error record. It is not
/// queued to the sink: with a broken directory it would only feed the next
/// failing flush.
fn console_error_hook(
    config: Arc<SharedConfig>,
    formatter: LineFormatter,
    console: ConsoleAppender,
    clock: Arc<dyn Clock>,
) -> ErrorHook {
    Arc::new(move |error: &LoggerError| {
        if !LogLevel::Error.passes(config.min_level()) {
            return;
        }
        let record = LogRecord::new(
            LogLevel::Error,
            clock.now(),
            file!(),
            line!(),
            error.to_string(),
        );
        let line = formatter.format(&record);
        console.append(LogLevel::Error, &line.console);
    })
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_daily_logger::prelude::*;
/// use std::time::Duration;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Warning)
///     .flush_interval(Duration::from_millis(500))
///     .colors(false)
///     .build();
///
/// assert_eq!(logger.level(), LogLevel::Warning);
/// ```
pub struct LoggerBuilder {
    config: LoggerConfig,
    flush_interval: Duration,
    poll_interval: Duration,
    colors: Option<bool>,
    console: ConsoleAppender,
    max_line_length: usize,
    clock: Arc<dyn Clock>,
    metrics: Option<Arc<LoggerMetrics>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            poll_interval: DEFAULT_POLL_INTERVAL,
            colors: None,
            console: ConsoleAppender::new(),
            max_line_length: MAX_LINE_LENGTH,
            clock: Arc::new(SystemClock),
            metrics: None,
        }
    }

    /// Start from an existing configuration, e.g. one loaded with serde.
    /// The save directory is normalized like [`save_directory`](Self::save_directory).
    #[must_use = "builder methods return a new value"]
    pub fn config(mut self, config: LoggerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn save_directory(mut self, directory: &str) -> Self {
        self.config = self.config.with_save_directory(directory);
        self
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.config.min_level = level;
        self
    }

    /// Minimum time between background flushes
    #[must_use = "builder methods return a new value"]
    pub fn flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }

    /// How often the flush thread wakes up; clamped to at least 1ms
    #[must_use = "builder methods return a new value"]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Force colors on or off. The default follows the platform.
    #[must_use = "builder methods return a new value"]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.colors = Some(enabled);
        self
    }

    /// Turn console output off, leaving only the day files
    #[must_use = "builder methods return a new value"]
    pub fn console(mut self, enabled: bool) -> Self {
        self.console = if enabled {
            ConsoleAppender::new()
        } else {
            ConsoleAppender::disabled()
        };
        self
    }

    /// Send console lines to a specific appender, e.g. [`ConsoleAppender::buffered`]
    #[must_use = "builder methods return a new value"]
    pub fn console_appender(mut self, console: ConsoleAppender) -> Self {
        self.console = console;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Share a metrics instance with the caller
    #[must_use = "builder methods return a new value"]
    pub fn metrics(mut self, metrics: Arc<LoggerMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        let mut formatter = LineFormatter::new().with_max_line_length(self.max_line_length);
        if let Some(colors) = self.colors {
            formatter = formatter.with_colors(colors);
        }
        let console = self.console;
        let metrics = self.metrics.unwrap_or_default();
        let config = Arc::new(SharedConfig::new(self.config));
        let on_error = console_error_hook(
            Arc::clone(&config),
            formatter.clone(),
            console.clone(),
            Arc::clone(&self.clock),
        );

        let options = SinkOptions::default()
            .with_flush_interval(self.flush_interval)
            .with_poll_interval(self.poll_interval)
            .with_clock(Arc::clone(&self.clock))
            .with_metrics(Arc::clone(&metrics))
            .with_error_hook(Arc::clone(&on_error));
        let sink = AsyncFileSink::with_options(Arc::clone(&config), options);

        Logger {
            config,
            formatter,
            console,
            sink,
            clock: self.clock,
            metrics,
            on_error,
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{strip_color, ManualClock};
    use chrono::{Local, TimeZone};
    use std::fs;
    use tempfile::TempDir;

    fn quiet_logger(dir: &TempDir) -> Logger {
        let start = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 2).unwrap();
        Logger::builder()
            .save_directory(dir.path().to_str().unwrap())
            .console(false)
            .flush_interval(Duration::from_secs(3600))
            .clock(Arc::new(ManualClock::new(start)))
            .build()
    }

    #[test]
    fn test_defaults() {
        let logger = Logger::new();
        assert_eq!(logger.level(), LogLevel::Info);
        assert!(logger.config().save_directory.is_none());
        assert_eq!(logger.pending_len(), 0);
    }

    #[test]
    fn test_filtered_levels_leave_no_trace() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let logger = quiet_logger(&dir);

        logger.emit("main.rs", 1, LogLevel::Verbose, format_args!("hidden {}", 1));
        assert_eq!(logger.pending_len(), 0);
        assert_eq!(logger.metrics().emitted_count(), 0);
        assert_eq!(logger.metrics().filtered_count(), 1);
        assert!(!logger.sink().is_running());

        logger.set_level(LogLevel::Error);
        logger.emit("main.rs", 2, LogLevel::Warning, format_args!("also hidden"));
        assert_eq!(logger.pending_len(), 0);
        assert_eq!(logger.metrics().filtered_count(), 2);
    }

    #[test]
    fn test_emit_persists_plain_line() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let logger = quiet_logger(&dir);

        logger.emit("src/app/main.rs", 42, LogLevel::Error, format_args!("code {}", 500));
        assert_eq!(logger.pending_len(), 1);
        logger.flush();
        assert_eq!(logger.pending_len(), 0);

        let content = fs::read_to_string(dir.path().join("2024-03-09.txt")).unwrap();
        assert_eq!(content, "[2024-03-09 07:05:02][error][main.rs:42]:code 500\n");
    }

    #[test]
    fn test_track_caller_reports_call_site() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let logger = quiet_logger(&dir);

        let line = line!() + 1;
        logger.warn("disk almost full");
        logger.close();

        let content = fs::read_to_string(dir.path().join("2024-03-09.txt")).unwrap();
        assert!(
            content.contains(&format!("[warn][logger.rs:{}]:disk almost full", line)),
            "unexpected content: {}",
            content
        );
    }

    #[test]
    fn test_level_change_takes_effect_on_next_emit() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let logger = quiet_logger(&dir);

        logger.verbose("dropped");
        logger.set_level(LogLevel::Verbose);
        logger.verbose("kept");
        logger.close();

        let content = fs::read_to_string(dir.path().join("2024-03-09.txt")).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("[verbo]"));
        assert!(content.contains("kept"));
    }

    #[test]
    fn test_save_directory_can_change_at_runtime() {
        let first = TempDir::new().expect("Failed to create temp dir");
        let second = TempDir::new().expect("Failed to create temp dir");
        let logger = quiet_logger(&first);

        logger.info("one");
        logger.flush();
        logger.set_save_directory(second.path().to_str().unwrap());
        logger.info("two");
        logger.close();

        let a = fs::read_to_string(first.path().join("2024-03-09.txt")).unwrap();
        let b = fs::read_to_string(second.path().join("2024-03-09.txt")).unwrap();
        assert!(a.contains("one") && !a.contains("two"));
        assert!(b.contains("two") && !b.contains("one"));
    }

    #[test]
    fn test_cleared_directory_disables_persistence() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let logger = quiet_logger(&dir);

        logger.clear_save_directory();
        logger.info("console only");
        logger.close();

        assert!(!dir.path().join("2024-03-09.txt").exists());
        assert_eq!(logger.metrics().emitted_count(), 1);
    }

    #[test]
    fn test_loaded_config_writes_inside_directory() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let logs = dir.path().join("logs");
        let json = format!(r#"{{"save_directory":"{}"}}"#, logs.to_str().unwrap());
        let config: LoggerConfig = serde_json::from_str(&json).unwrap();

        let start = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 2).unwrap();
        let logger = Logger::builder()
            .config(config)
            .console(false)
            .clock(Arc::new(ManualClock::new(start)))
            .build();
        logger.info("inside");
        logger.close();

        assert!(logs.join("2024-03-09.txt").exists());
        assert!(!dir.path().join("logs2024-03-09.txt").exists());
    }

    #[test]
    fn test_flush_failure_report_obeys_level_filter() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let blocker = dir.path().join("file-not-dir");
        fs::write(&blocker, b"").unwrap();

        let console = ConsoleAppender::buffered();
        let start = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 2).unwrap();
        let logger = Logger::builder()
            .save_directory(blocker.join("logs").to_str().unwrap())
            .min_level(LogLevel::Fatal)
            .console_appender(console.clone())
            .flush_interval(Duration::from_secs(3600))
            .clock(Arc::new(ManualClock::new(start)))
            .build();

        logger.sink().write("queued below the filter");
        logger.flush();
        assert_eq!(logger.metrics().flush_failures(), 1);
        assert!(console.lines().is_empty());

        logger.set_level(LogLevel::Error);
        logger.sink().write("queued again");
        logger.flush();
        let lines = console.lines();
        assert_eq!(lines.len(), 1);
        assert!(strip_color(&lines[0]).starts_with("[2024-03-09 07:05:02][error][logger.rs:"));
    }

    #[test]
    fn test_console_receives_colored_line() {
        let console = ConsoleAppender::buffered();
        let logger = Logger::builder()
            .console_appender(console.clone())
            .colors(true)
            .build();
        assert!(logger.formatter.use_colors());

        logger.warn("colored");
        let lines = console.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains('\x1b'));
        assert!(strip_color(&lines[0]).ends_with("]:colored"));
    }
}
