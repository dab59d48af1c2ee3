//! Fatal records flush to disk and abort the process.
//!
//! Aborting would take the test harness down with it, so the parent test
//! re-runs this binary filtered to `fatal_child` and inspects what the child
//! left behind.

use rust_daily_logger::prelude::*;
use rust_daily_logger::{fatal, find_files, info};
use std::fs;
use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;

const CHILD_DIR_ENV: &str = "RUST_DAILY_LOGGER_FATAL_CHILD_DIR";

#[test]
fn fatal_child() {
    let Ok(dir) = std::env::var(CHILD_DIR_ENV) else {
        return;
    };

    // The flush thread would not get a turn for an hour
    let logger = Logger::builder()
        .save_directory(&dir)
        .flush_interval(Duration::from_secs(3600))
        .build();

    info!(logger, "before the end");
    fatal!(logger, "invariant broken: {}", 42);
}

#[test]
fn test_fatal_flushes_then_aborts() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let exe = std::env::current_exe().expect("Failed to locate test binary");

    let status = Command::new(exe)
        .args(["fatal_child", "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_DIR_ENV, temp_dir.path())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .expect("Failed to run child");

    assert!(!status.success(), "child should not exit cleanly");
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        assert_eq!(status.signal(), Some(6), "child should die of SIGABRT");
    }

    let files = find_files(temp_dir.path(), "????-??-??.txt", false, false);
    assert_eq!(files.len(), 1, "expected one day file, found {:?}", files);

    let content = fs::read_to_string(&files[0]).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("[info][fatal_tests.rs:"));
    assert!(lines[0].ends_with("]:before the end"));
    assert!(lines[1].contains("[fatal][fatal_tests.rs:"));
    assert!(lines[1].ends_with("]:invariant broken: 42"));
}
