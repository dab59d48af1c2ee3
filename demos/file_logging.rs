//! File logging example
//!
//! Logs from several threads into daily files, then lists them.
//!
//! Run with: cargo run --example file_logging

use rust_daily_logger::prelude::*;
use rust_daily_logger::{find_files, info, warn};
use std::sync::Arc;
use std::thread;

fn main() {
    println!("=== Rust Daily Logger - File Logging Example ===\n");

    let logger = Arc::new(
        Logger::builder()
            .save_directory("demo_logs")
            .min_level(LogLevel::Verbose)
            .build(),
    );

    info!(logger, "Application started");

    let workers: Vec<_> = (0..4)
        .map(|id| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for item in 1..=5 {
                    info!(logger, "worker {} processed item {}/5", id, item);
                }
                if id == 3 {
                    warn!(logger, "worker {} took longer than expected", id);
                }
            })
        })
        .collect();
    for worker in workers {
        let _ = worker.join();
    }

    info!(logger, "All operations completed");

    // Waits for the flush thread to write the remaining lines
    logger.close();

    println!("\nDay files in demo_logs/:");
    for path in find_files("demo_logs", "????-??-??.txt", false, false) {
        println!("  {}", path.display());
    }
}
