//! Path utilities for shell-like path expansion.
//!
//! Configuration values such as the font path, the scan root and the icon
//! directory accept `~` and paths relative to the configuration file.

use std::path::{Path, PathBuf};

/// Expands a leading tilde to the user's home directory.
///
/// Absolute and relative paths are returned unchanged; surrounding whitespace
/// is trimmed and an empty input yields an empty path.
#[must_use]
pub fn expand(path: &str) -> PathBuf {
    let path = path.trim();

    if path.is_empty() {
        return PathBuf::new();
    }

    let expanded = shellexpand::tilde(path);
    PathBuf::from(expanded.as_ref())
}

/// Expands a path and resolves it against `base_dir` when it is still relative.
///
/// Used for values read from a configuration file, where relative paths are
/// interpreted relative to the file's directory.
#[must_use]
pub fn expand_and_resolve(path: &str, base_dir: &Path) -> PathBuf {
    let expanded = expand(path);

    if expanded.as_os_str().is_empty() || expanded.is_absolute() {
        return expanded;
    }

    base_dir.join(expanded)
}

/// Returns the path shown in a wallpaper header.
///
/// Falls back to the path as given when it cannot be made absolute.
#[must_use]
pub fn display_path(path: &Path) -> String {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()).display().to_string()
}
