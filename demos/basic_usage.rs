//! Basic usage example
//!
//! Console logging with level filtering.
//!
//! Run with: cargo run --example basic_usage

use rust_daily_logger::prelude::*;
use rust_daily_logger::{error, info, verbose, warn};

fn main() {
    println!("=== Rust Daily Logger - Basic Usage Example ===\n");

    let logger = Logger::new();

    println!("1. Default level (info):");
    verbose!(logger, "This verbose line is filtered out");
    info!(logger, "Application started");
    warn!(logger, "Using default settings for {} options", 2);
    error!(logger, "Failed to load optional plugin");

    println!("\n2. Verbose level:");
    logger.set_level(LogLevel::Verbose);
    verbose!(logger, "Now verbose lines show up");

    println!("\n3. Plain methods record the caller's location:");
    logger.info("Logged through Logger::info");

    println!(
        "\nEmitted {} lines, filtered {}",
        logger.metrics().emitted_count(),
        logger.metrics().filtered_count()
    );
}
