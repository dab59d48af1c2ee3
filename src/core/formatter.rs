//! Line formatting
//!
//! Every record becomes two strings: a console line with an ANSI colored level
//! tag and a plain copy for the day file.
//!
//! ```text
//! [2024-03-09 07:05:02][info][main.rs:42]:server listening on 8080
//! ```

use super::clock::time_string;
use super::log_level::LogLevel;
use super::log_record::LogRecord;
use colored::Colorize;
use std::fmt::Write;

/// Upper bound, in bytes, of a plain line.
///
/// Messages that would push a line past this bound are cut at the last UTF-8
/// character boundary that fits. The cut is silent.
pub const MAX_LINE_LENGTH: usize = 2048;

const ESC: char = '\x1b';

/// The two renderings of one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedLine {
    pub console: String,
    pub plain: String,
}

#[derive(Debug, Clone)]
pub struct LineFormatter {
    use_colors: bool,
    max_line_length: usize,
}

impl LineFormatter {
    /// Colors are on wherever the terminal speaks ANSI escapes, i.e. not on Windows.
    pub fn new() -> Self {
        Self {
            use_colors: !cfg!(windows),
            max_line_length: MAX_LINE_LENGTH,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    pub fn use_colors(&self) -> bool {
        self.use_colors
    }

    pub fn format(&self, record: &LogRecord<'_>) -> FormattedLine {
        let timestamp = time_string(&record.timestamp);
        let source = file_name(record.file, true);
        let tag = record.level.to_str();

        let mut plain_prefix = String::with_capacity(64);
        let _ = write!(plain_prefix, "[{}][{}][{}:{}]:", timestamp, tag, source, record.line);

        let message = sanitize_message(&record.message);
        let budget = self.max_line_length.saturating_sub(plain_prefix.len());
        let message = truncate_at_boundary(&message, budget);

        let mut console = if self.use_colors {
            let mut prefix = String::with_capacity(plain_prefix.len() + 16);
            let _ = write!(
                prefix,
                "[{}][{}][{}:{}]:",
                timestamp,
                colored_tag(record.level),
                source,
                record.line
            );
            prefix
        } else {
            plain_prefix
        };
        console.push_str(message);

        let plain = strip_color(&console);
        FormattedLine { console, plain }
    }
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn colored_tag(level: LogLevel) -> String {
    let tag = level.to_str().color(level.color_code());
    match level {
        LogLevel::Fatal => tag.bold().to_string(),
        _ => tag.to_string(),
    }
}

/// Keep one record on one line.
fn sanitize_message(message: &str) -> String {
    message.replace('\n', "\\n").replace('\r', "\\r")
}

fn truncate_at_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Remove every `ESC [ ... m` sequence from `line`.
///
/// Text around the sequences is preserved. An ESC that does not start a
/// complete sequence is left alone.
///
/// ```
/// use rust_daily_logger::strip_color;
///
/// assert_eq!(strip_color("[\x1b[31merror\x1b[0m]"), "[error]");
/// assert_eq!(strip_color("no colors"), "no colors");
/// ```
pub fn strip_color(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(start) = rest.find(ESC) {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if tail[ESC.len_utf8()..].starts_with('[') {
            if let Some(end) = tail.find('m') {
                rest = &tail[end + 1..];
                continue;
            }
        }
        out.push(ESC);
        rest = &tail[ESC.len_utf8()..];
    }

    out.push_str(rest);
    out
}

/// Last component of `path`, split on both `/` and `\`.
///
/// Without `include_suffix` the extension is dropped, unless the name starts
/// with its only dot.
pub fn file_name(path: &str, include_suffix: bool) -> &str {
    let start = path.rfind(&['/', '\\'][..]).map_or(0, |p| p + 1);
    let name = &path[start..];
    if include_suffix {
        return name;
    }
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}
