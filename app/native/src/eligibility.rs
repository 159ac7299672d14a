//! Decides which files are worth rendering.
//!
//! A file is rendered only when a lexer exists for its name, it has content,
//! and none of its lines is pathologically long (minified or binary data).

use std::fmt;
use std::fs;
use std::path::Path;

use crate::highlight::SyntaxRegistry;

/// Outcome of the eligibility check for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// The file can be rendered.
    Renderable,
    /// No lexer matches the file name.
    LexerMissing,
    /// The file could not be read as UTF-8 text.
    ReadError(String),
    /// The file has no content.
    EmptyFile,
    /// A line is at least the configured maximum length.
    LineTooLong {
        /// 1-based line number.
        line: usize,
        /// Length in characters.
        length: usize,
    },
}

impl Eligibility {
    #[must_use]
    pub const fn is_renderable(&self) -> bool { matches!(self, Self::Renderable) }
}

impl fmt::Display for Eligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Renderable => write!(f, "renderable"),
            Self::LexerMissing => write!(f, "no lexer"),
            Self::ReadError(err) => write!(f, "unreadable: {err}"),
            Self::EmptyFile => write!(f, "empty"),
            Self::LineTooLong { line, length } => {
                write!(f, "line {line} is {length} characters long")
            }
        }
    }
}

/// Classifies `path`. Never fails; every problem maps to an outcome.
#[must_use]
pub fn check(syntaxes: &SyntaxRegistry, path: &Path, max_line_length: usize) -> Eligibility {
    if syntaxes.find_for_path(path).is_none() {
        return Eligibility::LexerMissing;
    }

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => return Eligibility::ReadError(err.to_string()),
    };
    if text.is_empty() {
        return Eligibility::EmptyFile;
    }

    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.chars().count()))
        .find(|&(_, length)| length >= max_line_length)
        .map_or(Eligibility::Renderable, |(line, length)| Eligibility::LineTooLong {
            line,
            length,
        })
}

/// Returns whether `path` can be rendered.
#[must_use]
pub fn can_render(syntaxes: &SyntaxRegistry, path: &Path, max_line_length: usize) -> bool {
    check(syntaxes, path, max_line_length).is_renderable()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::constants::DEFAULT_MAX_LINE_LENGTH;

    fn fixture(dir: &TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_small_python_file_is_renderable() {
        let dir = TempDir::new().unwrap();
        let body: String = (0..10).map(|i| format!("x{i} = {i}\n")).collect();
        let path = fixture(&dir, "small.py", body.as_bytes());

        let syntaxes = SyntaxRegistry::load_defaults();
        assert_eq!(check(&syntaxes, &path, DEFAULT_MAX_LINE_LENGTH), Eligibility::Renderable);
        assert!(can_render(&syntaxes, &path, DEFAULT_MAX_LINE_LENGTH));
    }

    #[test]
    fn test_unknown_extension_is_lexer_missing() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir, "blob.qqq", &[0, 159, 146, 150]);

        let syntaxes = SyntaxRegistry::load_defaults();
        assert_eq!(check(&syntaxes, &path, DEFAULT_MAX_LINE_LENGTH), Eligibility::LexerMissing);
        assert!(!can_render(&syntaxes, &path, DEFAULT_MAX_LINE_LENGTH));
    }

    #[test]
    fn test_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir, "empty.rs", b"");

        let syntaxes = SyntaxRegistry::load_defaults();
        assert_eq!(check(&syntaxes, &path, DEFAULT_MAX_LINE_LENGTH), Eligibility::EmptyFile);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let syntaxes = SyntaxRegistry::load_defaults();
        let outcome = check(&syntaxes, &dir.path().join("gone.rs"), DEFAULT_MAX_LINE_LENGTH);
        assert!(matches!(outcome, Eligibility::ReadError(_)));
    }

    #[test]
    fn test_invalid_utf8_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = fixture(&dir, "latin1.py", &[b'#', b' ', 0xe9, b'\n']);

        let syntaxes = SyntaxRegistry::load_defaults();
        assert!(matches!(
            check(&syntaxes, &path, DEFAULT_MAX_LINE_LENGTH),
            Eligibility::ReadError(_)
        ));
    }

    #[test]
    fn test_line_length_threshold() {
        let dir = TempDir::new().unwrap();
        let syntaxes = SyntaxRegistry::load_defaults();

        let below = fixture(&dir, "below.js", format!("a\n{}\n", "x".repeat(499)).as_bytes());
        assert!(can_render(&syntaxes, &below, 500));

        let at = fixture(&dir, "at.js", format!("a\n{}\n", "x".repeat(500)).as_bytes());
        assert_eq!(
            check(&syntaxes, &at, 500),
            Eligibility::LineTooLong { line: 2, length: 500 }
        );
    }

    #[test]
    fn test_line_length_counts_characters() {
        let dir = TempDir::new().unwrap();
        let syntaxes = SyntaxRegistry::load_defaults();
        // 300 two-byte characters: 600 bytes, 300 characters.
        let path = fixture(&dir, "wide.py", format!("s = '{}'\n", "é".repeat(300)).as_bytes());
        assert!(can_render(&syntaxes, &path, 500));
    }

    #[test]
    fn test_display() {
        assert_eq!(Eligibility::Renderable.to_string(), "renderable");
        assert_eq!(
            Eligibility::LineTooLong { line: 3, length: 812 }.to_string(),
            "line 3 is 812 characters long"
        );
    }
}
