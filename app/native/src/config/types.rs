//! Configuration types for Codepaper.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Every field is optional; missing fields take the defaults below.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    APP_NAME, DEFAULT_FONT_PATH, DEFAULT_FONT_SIZE, DEFAULT_HEADER_HEIGHT, DEFAULT_ICON_DPI,
    DEFAULT_MAX_LINE_LENGTH, DEFAULT_MAX_LINES, DEFAULT_OUTPUT_DIR, DEFAULT_THEME,
};

/// Errors that can occur while loading or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {0}")]
    NotFound(String),
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file contains invalid JSON.
    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
    /// A color value is not a valid hex color.
    #[error("Invalid color '{value}' for '{key}'")]
    InvalidColor { key: String, value: String },
    /// A theme override names a token category that does not exist.
    #[error("Unknown token category '{0}'")]
    UnknownCategory(String),
    /// The requested theme is not built in.
    #[error("Unknown theme '{0}'")]
    UnknownTheme(String),
    /// A numeric setting is out of range.
    #[error("Invalid value '{value}' for '{key}'")]
    InvalidValue { key: String, value: String },
}

/// Screen resolution override.
///
/// A zero width or height means "not configured".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ScreenConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl ScreenConfig {
    /// Returns whether both dimensions are set.
    #[must_use]
    pub const fn is_set(&self) -> bool { self.width > 0 && self.height > 0 }
}

/// Font configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct FontConfig {
    /// Path to a TrueType/OpenType font file.
    ///
    /// When the file does not exist, an installed monospace font is used instead.
    pub path: String,

    /// Font size in pixels for the code body (before scaling to the screen).
    pub size: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_FONT_PATH.to_string(),
            size: DEFAULT_FONT_SIZE,
        }
    }
}

/// Header icon configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct IconConfig {
    /// Directory with `<identifier>.svg` files that replace the built-in icons.
    pub directory: String,

    /// Resolution used to rasterize icons.
    pub dpi: f32,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            directory: String::new(),
            dpi: DEFAULT_ICON_DPI,
        }
    }
}

/// Theme selection and color overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Name of the built-in theme.
    pub name: String,

    /// Hex colors keyed by token category (e.g. `"keyword": "#ff8800"`).
    ///
    /// Besides token categories, `background`, `highlight`, `header-background`,
    /// `header-foreground`, `line-number-background` and `line-number-foreground`
    /// are accepted.
    pub colors: BTreeMap<String, String>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_THEME.to_string(),
            colors: BTreeMap::new(),
        }
    }
}

/// Root configuration structure for Codepaper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CodepaperConfig {
    /// Directory scanned for source files.
    pub root: String,

    /// Directory the wallpapers are written to.
    pub output: String,

    /// Scan `root` recursively instead of only its top level.
    pub recursive: bool,

    /// Output resolution. Falls back to 2560x1440 when unset.
    pub screen: ScreenConfig,

    /// Maximum number of source lines per wallpaper.
    pub max_lines: usize,

    /// Files containing a line at least this long are skipped.
    pub max_line_length: usize,

    /// Height of the filename header in pixels.
    pub header_height: u32,

    /// Seed for window and highlight selection. Random when unset.
    pub seed: Option<u64>,

    /// Font settings.
    pub font: FontConfig,

    /// Header icon settings.
    pub icons: IconConfig,

    /// Theme settings.
    pub theme: ThemeConfig,
}

impl Default for CodepaperConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            output: DEFAULT_OUTPUT_DIR.to_string(),
            recursive: false,
            screen: ScreenConfig::default(),
            max_lines: DEFAULT_MAX_LINES,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            header_height: DEFAULT_HEADER_HEIGHT,
            seed: None,
            font: FontConfig::default(),
            icons: IconConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Returns the possible configuration file paths in priority order.
///
/// 1. `$XDG_CONFIG_HOME/codepaper/config.jsonc` or `config.json`
/// 2. `~/.config/codepaper/config.jsonc` or `config.json`
/// 3. The platform configuration directory (e.g. `~/Library/Application Support/codepaper/`)
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut dirs_to_check = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        dirs_to_check.push(PathBuf::from(xdg_config).join(APP_NAME));
    }

    if let Some(home) = dirs::home_dir() {
        dirs_to_check.push(home.join(".config").join(APP_NAME));
    }

    if let Some(config_dir) = dirs::config_dir() {
        dirs_to_check.push(config_dir.join(APP_NAME));
    }

    let mut paths = Vec::new();
    for dir in dirs_to_check {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }
    paths
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist, `ConfigError::Io`
/// if it cannot be read and `ConfigError::Parse` if it is not valid JSONC.
pub fn load_config_from_path(path: &Path) -> Result<CodepaperConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let file = fs::File::open(path)?;
    let reader = json_comments::StripComments::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Loads the first configuration file found in [`config_paths`].
///
/// Returns the default configuration and `None` when no file exists.
///
/// # Errors
///
/// Returns an error if a configuration file exists but cannot be read or parsed.
pub fn load_config() -> Result<(CodepaperConfig, Option<PathBuf>), ConfigError> {
    for path in config_paths() {
        if path.exists() {
            let config = load_config_from_path(&path)?;
            return Ok((config, Some(path)));
        }
    }

    Ok((CodepaperConfig::default(), None))
}
