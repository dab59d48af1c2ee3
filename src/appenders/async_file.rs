//! Asynchronous day-file sink
//!
//! Producers append finished lines to a pending buffer under a short lock. A
//! background thread wakes every `poll_interval`, and once `flush_interval` has
//! passed since its last flush it swaps the pending buffer with its own working
//! buffer and writes the batch to `{directory}{YYYY-MM-DD}.txt`.
//!
//! The file is opened and closed within each flush. A file that already exists
//! is appended to, so a process restarted mid-day keeps the earlier lines, and a
//! batch that lands after midnight simply opens the next day's file.
//!
//! Persistence is best effort: if a batch cannot be written its lines are
//! dropped, counted in [`LoggerMetrics`] and handed to the error hook. Nothing is
//! retried and producers are never blocked by disk I/O.

use crate::core::clock::date_string;
use crate::core::{Clock, LoggerError, LoggerMetrics, Result, SharedConfig, SystemClock};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Minimum time between two background flushes
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_millis(1000);

/// How often the background thread checks whether a flush is due
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Callback receiving errors raised on the flush path
pub type ErrorHook = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// Tuning and collaborators for an [`AsyncFileSink`]
#[derive(Clone)]
pub struct SinkOptions {
    pub flush_interval: Duration,
    pub poll_interval: Duration,
    pub clock: Arc<dyn Clock>,
    pub metrics: Arc<LoggerMetrics>,
    pub on_error: Option<ErrorHook>,
}

impl SinkOptions {
    #[must_use]
    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<LoggerMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    #[must_use]
    pub fn with_error_hook(mut self, hook: ErrorHook) -> Self {
        self.on_error = Some(hook);
        self
    }
}

impl Default for SinkOptions {
    fn default() -> Self {
        Self {
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            poll_interval: DEFAULT_POLL_INTERVAL,
            clock: Arc::new(SystemClock),
            metrics: Arc::new(LoggerMetrics::new()),
            on_error: None,
        }
    }
}

/// Buffered, asynchronously flushed writer of daily log files
///
/// # Example
///
/// ```no_run
/// use rust_daily_logger::AsyncFileSink;
///
/// let sink = AsyncFileSink::with_directory("logs");
/// sink.write("[2024-03-09 07:05:02][info][main.rs:3]:hello");
///
/// // Waits for the flush thread to write what is left
/// sink.close();
/// ```
pub struct AsyncFileSink {
    shared: Arc<SinkShared>,
    worker: Mutex<Option<Worker>>,
}

struct Worker {
    /// Dropped to tell the thread to stop
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

struct SinkShared {
    pending: Mutex<Vec<String>>,
    /// Swapped with `pending` on every flush. Holding this lock serializes flushes.
    working: Mutex<Vec<String>>,
    running: AtomicBool,
    config: Arc<SharedConfig>,
    options: SinkOptions,
}

impl AsyncFileSink {
    pub fn new(config: Arc<SharedConfig>) -> Self {
        Self::with_options(config, SinkOptions::default())
    }

    pub fn with_options(config: Arc<SharedConfig>, options: SinkOptions) -> Self {
        Self {
            shared: Arc::new(SinkShared {
                pending: Mutex::new(Vec::with_capacity(1000)),
                working: Mutex::new(Vec::with_capacity(1000)),
                running: AtomicBool::new(false),
                config,
                options,
            }),
            worker: Mutex::new(None),
        }
    }

    /// Sink writing into `directory` with default options
    pub fn with_directory(directory: &str) -> Self {
        let config = SharedConfig::default();
        config.set_save_directory(Some(directory));
        Self::new(Arc::new(config))
    }

    /// Queue a line. Starts the flush thread if it is not running.
    pub fn write(&self, line: impl Into<String>) {
        self.shared.pending.lock().push(line.into());

        if !self.shared.running.load(Ordering::SeqCst) {
            self.start_worker();
        }
    }

    /// Write everything queued so far to today's file, right now.
    ///
    /// Returns the number of lines persisted. An empty buffer touches no file,
    /// and without a save directory the queued lines are discarded.
    pub fn flush(&self) -> Result<usize> {
        self.shared.flush()
    }

    /// Stop the flush thread after one final flush.
    ///
    /// Blocks until that flush is done. Calling it on a stopped sink does nothing,
    /// and a later [`write`](Self::write) starts a fresh thread.
    pub fn close(&self) {
        let mut worker = self.worker.lock();
        let Some(Worker { stop, handle }) = worker.take() else {
            return;
        };

        self.shared.running.store(false, Ordering::SeqCst);
        drop(stop);

        if let Err(e) = handle.join() {
            eprintln!("[LOGGER ERROR] Flush thread panicked during shutdown: {:?}", e);
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Number of lines waiting for the next flush
    pub fn pending_len(&self) -> usize {
        self.shared.pending.lock().len()
    }

    pub fn config(&self) -> &Arc<SharedConfig> {
        &self.shared.config
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.options.metrics
    }

    fn start_worker(&self) {
        let mut worker = self.worker.lock();
        if worker.is_some() {
            return;
        }

        // Nothing is ever sent; dropping the sender is the stop signal
        let (stop, stop_rx) = bounded::<()>(0);
        let shared = Arc::clone(&self.shared);

        self.shared.running.store(true, Ordering::SeqCst);
        let spawned = thread::Builder::new()
            .name("log-flush".to_string())
            .spawn(move || shared.run(stop_rx));

        match spawned {
            Ok(handle) => *worker = Some(Worker { stop, handle }),
            Err(e) => {
                self.shared.running.store(false, Ordering::SeqCst);
                self.shared.report(&LoggerError::WorkerSpawn(e));
            }
        }
    }
}

impl Drop for AsyncFileSink {
    fn drop(&mut self) {
        self.close();
    }
}

impl SinkShared {
    fn run(&self, stop: Receiver<()>) {
        let mut last_flush = Instant::now();

        loop {
            match stop.recv_timeout(self.options.poll_interval) {
                Err(RecvTimeoutError::Timeout) => {
                    if last_flush.elapsed() >= self.options.flush_interval {
                        last_flush = Instant::now();
                        self.flush_and_report();
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        // Stop was signalled; drain whatever is still queued
        self.flush_and_report();
    }

    fn flush(&self) -> Result<usize> {
        let mut working = self.working.lock();
        std::mem::swap(&mut *working, &mut *self.pending.lock());

        if working.is_empty() {
            return Ok(0);
        }

        let result = match self.config.save_directory() {
            Some(directory) => {
                let date = date_string(&self.options.clock.now());
                let path = format!("{}{}.txt", directory, date);
                write_day_file(Path::new(&path), &working)
            }
            None => Ok(0),
        };

        let batch = working.len();
        working.clear();

        match result {
            Ok(written) => {
                self.options.metrics.record_persisted(written);
                Ok(written)
            }
            Err(e) => {
                self.options.metrics.record_flush_failure(batch);
                Err(e)
            }
        }
    }

    fn flush_and_report(&self) {
        if let Err(e) = self.flush() {
            self.report(&e);
        }
    }

    fn report(&self, error: &LoggerError) {
        match self.options.on_error {
            Some(ref hook) => hook(error),
            None => eprintln!("[LOGGER ERROR] {}", error),
        }
    }
}

fn write_day_file(path: &Path, lines: &[String]) -> Result<usize> {
    let file = open_day_file(path)?;
    let mut writer = BufWriter::new(file);

    for line in lines {
        writeln!(writer, "{}", line).map_err(|e| {
            LoggerError::io_operation("writing log file", path.display().to_string(), e)
        })?;
    }
    writer.flush().map_err(|e| {
        LoggerError::io_operation("flushing log file", path.display().to_string(), e)
    })?;

    Ok(lines.len())
}

/// Open the day file, creating its directory on first use.
fn open_day_file(path: &Path) -> Result<File> {
    match open_existing_or_new(path) {
        Ok(file) => Ok(file),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| {
                    LoggerError::directory_creation(parent.display().to_string(), e)
                })?;
            }
            open_existing_or_new(path)
                .map_err(|e| LoggerError::file_open(path.display().to_string(), e))
        }
        Err(e) => Err(LoggerError::file_open(path.display().to_string(), e)),
    }
}

fn open_existing_or_new(path: &Path) -> io::Result<File> {
    if path.exists() {
        OpenOptions::new().append(true).open(path)
    } else {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
    }
}
