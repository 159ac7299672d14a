//! Configuration module for Codepaper.
//!
//! This module provides the configuration types and loading functionality.
//! The configuration file supports JSONC format (JSON with comments).
//!
//! Configuration is loaded once per invocation and handed to the renderer as an
//! immutable value; nothing here is global.

pub mod color;
pub mod types;

use std::path::{Path, PathBuf};

pub use color::{Rgba, parse_hex_color};
pub use types::{
    CodepaperConfig, ConfigError, FontConfig, IconConfig, ScreenConfig, ThemeConfig,
    config_paths, load_config, load_config_from_path,
};

use crate::platform::path::{expand, expand_and_resolve};

/// A configuration together with the location it was read from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// The parsed configuration.
    pub config: CodepaperConfig,
    /// The file the configuration came from, if any.
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    /// Loads configuration from `custom_path` or, when absent, from the default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly requested file does not exist, or if
    /// a configuration file cannot be read or parsed.
    pub fn load(custom_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = custom_path {
            let config = load_config_from_path(path)?;
            tracing::debug!("config: loaded {}", path.display());
            return Ok(Self {
                config,
                source: Some(path.to_path_buf()),
            });
        }

        let (config, source) = load_config()?;
        match &source {
            Some(path) => tracing::debug!("config: loaded {}", path.display()),
            None => tracing::debug!("config: no configuration file found, using defaults"),
        }
        Ok(Self { config, source })
    }

    /// Resolves an asset path (font, icon directory) from the configuration.
    ///
    /// Relative paths are resolved against the configuration file's directory;
    /// without a configuration file they stay relative to the working directory.
    #[must_use]
    pub fn resolve_asset(&self, value: &str) -> PathBuf {
        match self.source.as_deref().and_then(Path::parent) {
            Some(dir) => expand_and_resolve(value, dir),
            None => expand(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_custom_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "output": "wallpapers" }}"#).unwrap();

        let loaded = LoadedConfig::load(Some(file.path())).unwrap();
        assert_eq!(loaded.config.output, "wallpapers");
        assert_eq!(loaded.source.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_load_missing_custom_path_fails() {
        let result = LoadedConfig::load(Some(Path::new("/nonexistent/config.jsonc")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_resolve_asset_relative_to_config_file() {
        let loaded = LoadedConfig {
            config: CodepaperConfig::default(),
            source: Some(PathBuf::from("/etc/codepaper/config.jsonc")),
        };
        assert_eq!(
            loaded.resolve_asset("fonts/mono.ttf"),
            PathBuf::from("/etc/codepaper/fonts/mono.ttf")
        );
    }

    #[test]
    fn test_resolve_asset_without_config_file() {
        let loaded = LoadedConfig::default();
        assert_eq!(loaded.resolve_asset("resources/font.ttf"), PathBuf::from("resources/font.ttf"));
    }
}
