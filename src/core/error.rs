//! Error types for the logger system
//!
//! None of these ever reach a caller of `Logger::emit`. They surface through
//! `AsyncFileSink::flush`, the sink's error hook and the metrics counters.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The log directory could not be created
    #[error("mkdirs {path} failed: {source}")]
    DirectoryCreation {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The day file could not be opened
    #[error("Failed to open log file '{path}': {source}")]
    FileOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The background flush thread could not be started
    #[error("Failed to spawn flush thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn directory_creation(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::DirectoryCreation {
            path: path.into(),
            source,
        }
    }

    pub fn file_open(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::FileOpen {
            path: path.into(),
            source,
        }
    }
}
