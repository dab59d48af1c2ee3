//! Runtime configuration shared by the logger and its file sink
//!
//! The configuration is an immutable snapshot behind an [`ArcSwap`]. Readers on the
//! emit path and the flush thread load it without taking a lock; setters publish a
//! whole new snapshot.

use super::log_level::LogLevel;
use arc_swap::ArcSwap;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// Logger settings
///
/// # Example
///
/// ```
/// use rust_daily_logger::{LoggerConfig, LogLevel};
///
/// let config = LoggerConfig::default()
///     .with_save_directory("logs")
///     .with_min_level(LogLevel::Verbose);
///
/// assert_eq!(config.save_directory.as_deref(), Some("logs/"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Directory for day files, always ending in a separator. `None` disables persistence.
    ///
    /// [`SharedConfig::new`] normalizes a value set directly on this field.
    #[serde(default, deserialize_with = "deserialize_directory")]
    pub save_directory: Option<String>,
    #[serde(default)]
    pub min_level: LogLevel,
}

impl LoggerConfig {
    #[must_use]
    pub fn with_save_directory(mut self, directory: &str) -> Self {
        self.save_directory = Some(normalize_directory(directory));
        self
    }

    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// The same config with its save directory in canonical form
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.save_directory = self.save_directory.as_deref().map(normalize_directory);
        self
    }
}

fn deserialize_directory<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let directory = Option::<String>::deserialize(deserializer)?;
    Ok(directory.as_deref().map(normalize_directory))
}

/// Turn a user supplied directory into a prefix for day file names.
///
/// An empty directory means the working directory.
pub fn normalize_directory(directory: &str) -> String {
    let mut normalized = if directory.is_empty() {
        String::from(".")
    } else {
        directory.to_string()
    };

    let has_separator = if cfg!(windows) {
        normalized.ends_with('/') || normalized.ends_with('\\')
    } else {
        normalized.ends_with('/')
    };
    if !has_separator {
        normalized.push('/');
    }
    normalized
}

/// Atomically swappable [`LoggerConfig`]
#[derive(Debug)]
pub struct SharedConfig {
    current: ArcSwap<LoggerConfig>,
}

impl SharedConfig {
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            current: ArcSwap::from_pointee(config.normalized()),
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<LoggerConfig> {
        self.current.load_full()
    }

    #[inline]
    pub fn min_level(&self) -> LogLevel {
        self.current.load().min_level
    }

    pub fn save_directory(&self) -> Option<String> {
        self.current.load().save_directory.clone()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        self.current.rcu(|config| LoggerConfig {
            min_level: level,
            ..LoggerConfig::clone(config)
        });
    }

    /// Publish a new save directory; `None` turns persistence off.
    pub fn set_save_directory(&self, directory: Option<&str>) {
        let directory = directory.map(normalize_directory);
        self.current.rcu(|config| LoggerConfig {
            save_directory: directory.clone(),
            ..LoggerConfig::clone(config)
        });
    }
}

impl Default for SharedConfig {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}
