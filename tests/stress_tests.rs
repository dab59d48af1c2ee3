//! Stress tests for the flush engine
//!
//! These tests verify:
//! - No line is lost when writes race with repeated close/restart cycles
//! - Fast background flushing under sustained concurrent load

use chrono::{Local, TimeZone};
use rust_daily_logger::prelude::*;
use rust_daily_logger::{ManualClock, SharedConfig};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

fn sink_in(dir: &TempDir, options: SinkOptions) -> AsyncFileSink {
    let config = SharedConfig::default();
    config.set_save_directory(Some(dir.path().to_str().unwrap()));
    let start = Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    AsyncFileSink::with_options(
        Arc::new(config),
        options.with_clock(Arc::new(ManualClock::new(start))),
    )
}

fn persisted_lines(dir: &TempDir) -> Vec<String> {
    std::fs::read_to_string(dir.path().join("2024-06-01.txt"))
        .expect("Failed to read log file")
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn test_writes_racing_close_are_never_lost() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let sink = Arc::new(sink_in(&temp_dir, SinkOptions::default()));
    let done = Arc::new(AtomicBool::new(false));

    let closer = {
        let sink = Arc::clone(&sink);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            while !done.load(Ordering::SeqCst) {
                sink.close();
                thread::sleep(Duration::from_millis(1));
            }
        })
    };

    let producers: Vec<_> = (0..4)
        .map(|t| {
            let sink = Arc::clone(&sink);
            thread::spawn(move || {
                for i in 0..500 {
                    sink.write(format!("t{}-{}", t, i));
                }
            })
        })
        .collect();
    for producer in producers {
        producer.join().expect("producer panicked");
    }
    done.store(true, Ordering::SeqCst);
    closer.join().expect("closer panicked");
    sink.close();

    let lines = persisted_lines(&temp_dir);
    assert_eq!(lines.len(), 2000);
    let unique: HashSet<&String> = lines.iter().collect();
    assert_eq!(unique.len(), 2000, "a line was written twice");
    assert_eq!(sink.pending_len(), 0);
}

#[test]
fn test_fast_flushing_under_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let options = SinkOptions::default()
        .with_flush_interval(Duration::from_millis(5))
        .with_poll_interval(Duration::from_millis(1));
    let sink = Arc::new(sink_in(&temp_dir, options));

    let producers: Vec<_> = (0..4)
        .map(|t| {
            let sink = Arc::clone(&sink);
            thread::spawn(move || {
                for i in 0..2_000 {
                    sink.write(format!("t{}-{}", t, i));
                    if i % 250 == 0 {
                        thread::sleep(Duration::from_millis(2));
                    }
                }
            })
        })
        .collect();
    for producer in producers {
        producer.join().expect("producer panicked");
    }
    sink.close();

    assert_eq!(persisted_lines(&temp_dir).len(), 8_000);
    assert_eq!(sink.metrics().persisted_count(), 8_000);
    assert_eq!(sink.metrics().flush_failures(), 0);
}
