//! Error types for Codepaper.
//!
//! A render batch distinguishes exactly one recoverable condition, a file whose
//! name has no lexer, from everything else, which aborts the batch.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while generating wallpapers.
#[derive(Debug, Error)]
pub enum CodepaperError {
    /// No lexer is registered for the file name.
    ///
    /// The driver skips the file and continues with the next candidate.
    #[error("Failed to find lexer for {0}")]
    LexerNotFound(String),
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Font could not be loaded or parsed.
    #[error("Font error: {0}")]
    Font(String),
    /// Syntax highlighting failed.
    #[error("Highlight error: {0}")]
    Highlight(String),
    /// SVG icon could not be parsed or rasterized.
    #[error("SVG error: {0}")]
    Svg(String),
    /// Image decoding or encoding failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodepaperError {
    /// Returns whether the batch may skip the current file and continue.
    #[must_use]
    pub const fn is_skippable(&self) -> bool { matches!(self, Self::LexerNotFound(_)) }
}

impl From<syntect::Error> for CodepaperError {
    fn from(err: syntect::Error) -> Self { Self::Highlight(err.to_string()) }
}

/// Convenience alias used across the crate.
pub type Result<T, E = CodepaperError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_not_found_display() {
        let err = CodepaperError::LexerNotFound("blob.bin".to_string());
        assert_eq!(err.to_string(), "Failed to find lexer for blob.bin");
    }

    #[test]
    fn test_lexer_not_found_is_skippable() {
        assert!(CodepaperError::LexerNotFound("a.xyz".to_string()).is_skippable());
    }

    #[test]
    fn test_io_error_is_fatal() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CodepaperError = io_err.into();
        assert!(matches!(err, CodepaperError::Io(_)));
        assert!(!err.is_skippable());
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_invalid_arguments_display() {
        let err = CodepaperError::InvalidArguments("Invalid size '12'".to_string());
        assert_eq!(err.to_string(), "Invalid size '12'");
    }

    #[test]
    fn test_font_error_display() {
        let err = CodepaperError::Font("no faces".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Font error"));
        assert!(msg.contains("no faces"));
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err: CodepaperError = ConfigError::UnknownTheme("solar".to_string()).into();
        assert!(err.to_string().contains("solar"));
        assert!(!err.is_skippable());
    }

    #[test]
    fn test_error_is_debug() {
        let err = CodepaperError::Svg("bad markup".to_string());
        let debug_str = format!("{err:?}");
        assert!(debug_str.contains("Svg"));
    }
}
