//! Console appender implementation

use crate::core::LogLevel;
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Target {
    Std,
    Off,
    /// Keeps lines in memory instead of printing them
    Buffer(Arc<Mutex<Vec<String>>>),
}

/// Writes console lines to stdout or stderr depending on severity
#[derive(Debug, Clone)]
pub struct ConsoleAppender {
    target: Target,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            target: Target::Std,
        }
    }

    /// A console appender that swallows everything, for file-only logging
    pub fn disabled() -> Self {
        Self {
            target: Target::Off,
        }
    }

    /// A console appender that collects lines in memory; see [`lines`](Self::lines).
    ///
    /// Clones share the same buffer.
    pub fn buffered() -> Self {
        Self {
            target: Target::Buffer(Arc::new(Mutex::new(Vec::new()))),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.target, Target::Off)
    }

    /// Lines collected by a [`buffered`](Self::buffered) appender, oldest first
    pub fn lines(&self) -> Vec<String> {
        match self.target {
            Target::Buffer(ref lines) => lines.lock().clone(),
            _ => Vec::new(),
        }
    }

    /// Write one line. Failures to reach the terminal are ignored.
    pub fn append(&self, level: LogLevel, line: &str) {
        match self.target {
            Target::Off => {}
            Target::Buffer(ref lines) => lines.lock().push(line.to_string()),
            // Route Warning, Error and Fatal to stderr, others to stdout
            Target::Std if level.uses_error_stream() => {
                let _ = writeln!(io::stderr().lock(), "{}", line);
            }
            Target::Std => {
                let _ = writeln!(io::stdout().lock(), "{}", line);
            }
        }
    }

    pub fn flush(&self) {
        if let Target::Std = self.target {
            // Flush both streams since we write to both
            let _ = io::stdout().flush();
            let _ = io::stderr().flush();
        }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}
