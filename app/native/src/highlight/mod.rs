//! Syntax lookup, fonts and code image formatting.
//!
//! - [`SyntaxRegistry`] resolves a file name to a `syntect` syntax (the lexer)
//! - [`languages`] maps file names to the short identifiers used for icons
//! - [`fonts`] loads and draws text with `ab_glyph`
//! - [`formatter`] turns highlighted source into a PNG code image

pub mod fonts;
pub mod formatter;
pub mod languages;

use std::path::Path;

use syntect::parsing::{SyntaxReference, SyntaxSet};

pub use fonts::{FontFace, Ink};
pub use formatter::{FormatterOptions, ImageFormatter};
pub use languages::short_identifier;

/// Registry of the syntaxes shipped with `syntect`.
pub struct SyntaxRegistry {
    syntaxes: SyntaxSet,
}

impl SyntaxRegistry {
    /// Loads the default syntax definitions.
    #[must_use]
    pub fn load_defaults() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Finds the syntax for a file name.
    ///
    /// The full name is tried first (for names like `Makefile`), then the extension.
    #[must_use]
    pub fn find(&self, file_name: &str) -> Option<&SyntaxReference> {
        if file_name.is_empty() {
            return None;
        }

        self.syntaxes.find_syntax_by_extension(file_name).or_else(|| {
            Path::new(file_name)
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(|ext| self.syntaxes.find_syntax_by_extension(ext))
        })
    }

    /// Finds the syntax for the file name component of a path.
    #[must_use]
    pub fn find_for_path(&self, path: &Path) -> Option<&SyntaxReference> {
        path.file_name().and_then(|name| name.to_str()).and_then(|name| self.find(name))
    }

    /// Returns the underlying syntax set.
    #[must_use]
    pub const fn syntax_set(&self) -> &SyntaxSet { &self.syntaxes }
}

impl Default for SyntaxRegistry {
    fn default() -> Self { Self::load_defaults() }
}

impl std::fmt::Debug for SyntaxRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxRegistry")
            .field("syntaxes", &self.syntaxes.syntaxes().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_extension() {
        let registry = SyntaxRegistry::load_defaults();
        assert_eq!(registry.find("main.rs").unwrap().name, "Rust");
        assert_eq!(registry.find("script.py").unwrap().name, "Python");
    }

    #[test]
    fn test_find_by_full_name() {
        let registry = SyntaxRegistry::load_defaults();
        assert!(registry.find("Makefile").is_some());
    }

    #[test]
    fn test_find_missing() {
        let registry = SyntaxRegistry::load_defaults();
        assert!(registry.find("image.qqq").is_none());
        assert!(registry.find("").is_none());
        assert!(registry.find("noextension").is_none());
    }

    #[test]
    fn test_find_for_path_uses_file_name() {
        let registry = SyntaxRegistry::load_defaults();
        assert!(registry.find_for_path(Path::new("/tmp/project/lib.rs")).is_some());
        assert!(registry.find_for_path(Path::new("/tmp/project/")).is_none());
    }
}
