//! Directory walk filtered by wildcard patterns

use super::pattern::pattern_match;
use std::fs;
use std::path::{Path, PathBuf};

/// Collect entries under `directory` whose file name matches `filter`.
///
/// With `find_directories` only directories are returned, otherwise only
/// non-directories. `include_subdirectories` walks the whole tree. Symlinks are
/// reported but never descended into, and unreadable directories are skipped.
/// An empty `directory` means the working directory.
///
/// ```no_run
/// use rust_daily_logger::find_files;
///
/// let logs = find_files("logs", "*.txt", false, false);
/// for path in logs {
///     println!("{}", path.display());
/// }
/// ```
pub fn find_files(
    directory: impl AsRef<Path>,
    filter: &str,
    find_directories: bool,
    include_subdirectories: bool,
) -> Vec<PathBuf> {
    let root = directory.as_ref();
    let root = if root.as_os_str().is_empty() {
        Path::new(".")
    } else {
        root
    };

    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(search_path) = pending.pop() {
        let Ok(entries) = fs::read_dir(&search_path) else {
            continue;
        };

        for entry in entries.flatten() {
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            let is_dir = file_type.is_dir();

            if is_dir == find_directories {
                let name = entry.file_name();
                if pattern_match(&name.to_string_lossy(), filter, false) {
                    found.push(entry.path());
                }
            }

            if include_subdirectories && is_dir {
                pending.push(entry.path());
            }
        }
    }
    found
}
