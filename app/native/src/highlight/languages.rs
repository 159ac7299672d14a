//! File name to short language identifier table.
//!
//! The identifier keys the header icon lookup. Patterns are checked in table
//! order and the first match wins, so more specific entries come first.

/// Ordered `(pattern, identifier)` pairs.
///
/// A pattern `*.ext` matches any file name ending in `.ext`; any other pattern
/// must equal the file name.
pub const LANGUAGE_TABLE: &[(&str, &str)] = &[
    ("Cargo.toml", "rust"),
    ("Cargo.lock", "rust"),
    ("Dockerfile", "docker"),
    ("Makefile", "make"),
    ("*.rs", "rust"),
    ("*.py", "python"),
    ("*.pyi", "python"),
    ("*.pyw", "python"),
    ("*.js", "javascript"),
    ("*.mjs", "javascript"),
    ("*.cjs", "javascript"),
    ("*.jsx", "javascript"),
    ("*.ts", "typescript"),
    ("*.tsx", "typescript"),
    ("*.go", "go"),
    ("*.c", "c"),
    ("*.h", "c"),
    ("*.cc", "cpp"),
    ("*.cpp", "cpp"),
    ("*.cxx", "cpp"),
    ("*.hpp", "cpp"),
    ("*.java", "java"),
    ("*.sh", "shell"),
    ("*.bash", "shell"),
    ("*.zsh", "shell"),
    ("*.md", "markdown"),
    ("*.markdown", "markdown"),
    ("*.html", "html"),
    ("*.htm", "html"),
    ("*.css", "css"),
    ("*.json", "json"),
    ("*.toml", "toml"),
    ("*.yml", "yaml"),
    ("*.yaml", "yaml"),
    ("*.rb", "ruby"),
    ("*.lua", "lua"),
];

/// Returns whether a file name matches a table pattern.
fn matches_pattern(file_name: &str, pattern: &str) -> bool {
    pattern.strip_prefix('*').map_or_else(
        || file_name == pattern,
        |suffix| file_name.len() > suffix.len() && file_name.ends_with(suffix),
    )
}

/// Returns the short language identifier for a file name, if any.
#[must_use]
pub fn short_identifier(file_name: &str) -> Option<&'static str> {
    LANGUAGE_TABLE
        .iter()
        .find(|(pattern, _)| matches_pattern(file_name, pattern))
        .map(|(_, identifier)| *identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_match() {
        assert_eq!(short_identifier("main.rs"), Some("rust"));
        assert_eq!(short_identifier("app.py"), Some("python"));
        assert_eq!(short_identifier("index.tsx"), Some("typescript"));
    }

    #[test]
    fn test_exact_name_match() {
        assert_eq!(short_identifier("Makefile"), Some("make"));
        assert_eq!(short_identifier("Dockerfile"), Some("docker"));
    }

    #[test]
    fn test_first_match_wins() {
        // Cargo.toml is listed before the generic *.toml entry.
        assert_eq!(short_identifier("Cargo.toml"), Some("rust"));
        assert_eq!(short_identifier("pyproject.toml"), Some("toml"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(short_identifier("archive.tar.xz"), None);
        assert_eq!(short_identifier("README"), None);
        assert_eq!(short_identifier(""), None);
    }

    #[test]
    fn test_bare_extension_is_not_a_match() {
        assert_eq!(short_identifier(".rs"), None);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert_eq!(short_identifier("MAIN.RS"), None);
    }
}
