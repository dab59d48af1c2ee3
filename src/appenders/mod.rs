//! Output destinations

pub mod async_file;
pub mod console;

pub use async_file::{AsyncFileSink, ErrorHook, SinkOptions};
pub use console::ConsoleAppender;
