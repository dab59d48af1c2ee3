//! Logger metrics for observability
//!
//! Counters for what the emit path let through and what the flush thread
//! managed to put on disk.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_daily_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_emitted();
/// metrics.record_persisted(1);
///
/// assert_eq!(metrics.emitted_count(), 1);
/// assert_eq!(metrics.persisted_count(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records that passed the level filter and were formatted
    emitted: AtomicU64,

    /// Records rejected by the level filter
    filtered: AtomicU64,

    /// Lines written to a day file
    persisted: AtomicU64,

    /// Lines lost because their flush cycle failed
    dropped: AtomicU64,

    /// Flush cycles that failed to open or write the day file
    flush_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            persisted: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            flush_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted_count(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn persisted_count(&self) -> u64 {
        self.persisted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flush_failures(&self) -> u64 {
        self.flush_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_persisted(&self, lines: usize) -> u64 {
        self.persisted.fetch_add(lines as u64, Ordering::Relaxed)
    }

    /// Record a failed flush cycle together with the lines it lost.
    ///
    /// Returns the number of failures before this one.
    pub fn record_flush_failure(&self, lost_lines: usize) -> u64 {
        self.dropped.fetch_add(lost_lines as u64, Ordering::Relaxed);
        self.flush_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Get drop rate as a percentage (0.0 - 100.0) of lines handed to the sink
    ///
    /// Returns 0.0 if nothing has been flushed yet.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = self.persisted_count() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.emitted.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.persisted.store(0, Ordering::Relaxed);
        self.dropped.store(0, Ordering::Relaxed);
        self.flush_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            emitted: AtomicU64::new(self.emitted_count()),
            filtered: AtomicU64::new(self.filtered_count()),
            persisted: AtomicU64::new(self.persisted_count()),
            dropped: AtomicU64::new(self.dropped_count()),
            flush_failures: AtomicU64::new(self.flush_failures()),
        }
    }
}
