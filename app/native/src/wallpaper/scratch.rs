//! Scoped scratch files.
//!
//! Every intermediate image or SVG gets its own uniquely named temporary file.
//! The file is removed when the returned handle is dropped, on success and on
//! error paths alike.

use std::io::Write;

use tempfile::NamedTempFile;

use crate::constants::APP_NAME;
use crate::error::Result;

/// Creates an empty scratch file ending in `suffix` (e.g. `.png`).
///
/// # Errors
///
/// Returns an error if the temporary directory is not writable.
pub fn scratch_file(suffix: &str) -> Result<NamedTempFile> {
    let file = tempfile::Builder::new()
        .prefix(&format!("{APP_NAME}-"))
        .suffix(suffix)
        .tempfile()?;
    Ok(file)
}

/// Creates a scratch file ending in `suffix` holding `contents`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_scratch(contents: &[u8], suffix: &str) -> Result<NamedTempFile> {
    let mut file = scratch_file(suffix)?;
    file.write_all(contents)?;
    file.flush()?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scratch_file_is_named_and_removed_on_drop() {
        let file = scratch_file(".svg").unwrap();
        let path = file.path().to_path_buf();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();

        assert!(name.starts_with("codepaper-"));
        assert!(name.ends_with(".svg"));
        assert!(path.exists());

        drop(file);
        assert!(!path.exists());
    }

    #[test]
    fn test_write_scratch_contents() {
        let file = write_scratch(b"<svg/>", ".svg").unwrap();
        assert_eq!(std::fs::read(file.path()).unwrap(), b"<svg/>");
    }

    #[test]
    fn test_scratch_files_are_unique() {
        let first = scratch_file(".png").unwrap();
        let second = scratch_file(".png").unwrap();
        assert_ne!(first.path(), second.path());
    }
}
