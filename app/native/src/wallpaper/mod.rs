//! Wallpaper rendering.
//!
//! A wallpaper is a header banner (icon and file path) stacked on top of a
//! highlighted window of the file's source, both sized to the screen.
//!
//! ```text
//! +--------------------------------------+  0
//! | [icon] /path/to/file.rs              |
//! +--------------------------------------+  header height
//! |  41 | fn main() {                    |
//! |  42 |     ...                        |
//! +--------------------------------------+  screen height
//! ```

pub mod header;
pub mod icons;
pub mod processing;
pub mod scratch;
pub mod source;

use std::fs;
use std::path::{Path, PathBuf};

use image::{RgbImage, imageops};
use rand::Rng;

pub use header::render_header;
pub use icons::{IconStore, resolve_icon};
pub use processing::ScreenSize;
pub use source::LineWindow;

use crate::config::{ConfigError, LoadedConfig};
use crate::constants::{
    DEFAULT_FONT_SIZE, DEFAULT_HEADER_HEIGHT, DEFAULT_ICON_DPI, DEFAULT_MAX_LINES,
};
use crate::error::{CodepaperError, Result};
use crate::highlight::{FontFace, SyntaxRegistry};
use crate::platform::path::display_path;
use crate::theme::Theme;

/// Fixed rendering parameters shared by every file of a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Font size of the code body before scaling.
    pub font_size: f32,
    /// Height of the header banner.
    pub header_height: u32,
    /// Resolution icons are rasterized at.
    pub icon_dpi: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            header_height: DEFAULT_HEADER_HEIGHT,
            icon_dpi: DEFAULT_ICON_DPI,
        }
    }
}

/// One file to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub path: PathBuf,
    pub size: ScreenSize,
    pub max_lines: usize,
}

impl RenderRequest {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, size: ScreenSize) -> Self {
        Self {
            path: path.into(),
            size,
            max_lines: DEFAULT_MAX_LINES,
        }
    }

    #[must_use]
    pub const fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }
}

/// Renders files into wallpapers.
///
/// Holds everything that stays fixed for a batch. Randomness is supplied per
/// call.
#[derive(Debug)]
pub struct Renderer {
    settings: RenderSettings,
    theme: Theme,
    font: FontFace,
    syntaxes: SyntaxRegistry,
    icons: IconStore,
}

impl Renderer {
    #[must_use]
    pub fn new(settings: RenderSettings, theme: Theme, font: FontFace, icons: IconStore) -> Self {
        Self {
            settings,
            theme,
            font,
            syntaxes: SyntaxRegistry::load_defaults(),
            icons,
        }
    }

    /// Builds a renderer from configuration.
    ///
    /// `font_override` replaces the configured font path.
    ///
    /// # Errors
    ///
    /// Returns an error if the font size is not positive, the theme is unknown,
    /// a theme color is invalid, or no font can be loaded.
    pub fn from_config(loaded: &LoadedConfig, font_override: Option<&Path>) -> Result<Self> {
        let config = &loaded.config;

        if config.font.size <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "font.size".to_string(),
                value: config.font.size.to_string(),
            }
            .into());
        }

        let theme = Theme::by_name(&config.theme.name)?.with_overrides(&config.theme.colors)?;

        let font_path = font_override.map_or_else(
            || loaded.resolve_asset(&config.font.path),
            Path::to_path_buf,
        );
        let font = FontFace::load(&font_path)?;

        let icons = if config.icons.directory.is_empty() {
            IconStore::builtin()
        } else {
            IconStore::new(Some(loaded.resolve_asset(&config.icons.directory)))
        };

        let settings = RenderSettings {
            font_size: config.font.size,
            header_height: config.header_height,
            icon_dpi: config.icons.dpi,
        };

        tracing::debug!("renderer: theme {}, font {}", theme.name, font_path.display());
        Ok(Self::new(settings, theme, font, icons))
    }

    #[must_use]
    pub const fn settings(&self) -> &RenderSettings { &self.settings }

    #[must_use]
    pub const fn theme(&self) -> &Theme { &self.theme }

    #[must_use]
    pub const fn syntaxes(&self) -> &SyntaxRegistry { &self.syntaxes }

    /// Renders one file into an image of exactly `request.size`.
    ///
    /// # Errors
    ///
    /// Returns `CodepaperError::LexerNotFound` when no syntax matches the file
    /// name, or any I/O, highlighting or image error.
    pub fn render_file<R: Rng + ?Sized>(&self, request: &RenderRequest, rng: &mut R) -> Result<RgbImage> {
        let name = request
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let syntax = self
            .syntaxes
            .find(&name)
            .ok_or_else(|| CodepaperError::LexerNotFound(name.clone()))?;

        let text = fs::read_to_string(&request.path)?;
        let lines: Vec<&str> = text.split_inclusive('\n').collect();
        let window = LineWindow::select(lines.len(), request.max_lines, rng);
        tracing::debug!(
            "renderer: {} lines {}..{} of {}",
            name,
            window.start_line(),
            window.offset + window.len,
            lines.len()
        );

        let size = request.size;
        let header_height = self.settings.header_height.min(size.height);
        let icon = resolve_icon(&self.icons, &name, self.settings.icon_dpi);
        let header = render_header(
            &self.font,
            &display_path(&request.path),
            ScreenSize::new(size.width, header_height),
            self.theme.header_foreground,
            self.theme.header_background,
            &icon,
        );

        let body = self.render_source(
            syntax,
            &window.slice(&lines),
            size.below(header_height),
            window.start_line(),
            rng,
        )?;

        let mut canvas = RgbImage::from_pixel(size.width, size.height, self.theme.background);
        imageops::replace(&mut canvas, &header, 0, 0);
        imageops::replace(&mut canvas, &body, 0, i64::from(header_height));
        Ok(canvas)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::highlight::fonts::tests::system_font;

    fn renderer() -> Option<Renderer> {
        let font = system_font()?;
        let settings = RenderSettings {
            font_size: 20.0,
            ..RenderSettings::default()
        };
        Some(Renderer::new(settings, Theme::ayu_mirage(), font, IconStore::builtin()))
    }

    fn write_lines(dir: &Path, name: &str, count: usize) -> PathBuf {
        let path = dir.join(name);
        let body: String = (0..count).map(|i| format!("value_{i} = {i}\n")).collect();
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_render_request_defaults() {
        let request = RenderRequest::new("/tmp/a.py", ScreenSize::new(10, 10));
        assert_eq!(request.max_lines, 40);
        assert_eq!(request.with_max_lines(5).max_lines, 5);
    }

    #[test]
    fn test_render_file_has_requested_size() {
        let Some(renderer) = renderer() else { return };
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_lines(dir.path(), "short.py", 10);

        let size = ScreenSize::new(640, 360);
        let image = renderer
            .render_file(&RenderRequest::new(&path, size), &mut StdRng::seed_from_u64(0))
            .unwrap();
        assert_eq!(image.dimensions(), (640, 360));
        // Header occupies the top 70 rows.
        assert_eq!(image.get_pixel(639, 0), &renderer.theme().header_background);
    }

    #[test]
    fn test_render_file_unknown_lexer() {
        let Some(renderer) = renderer() else { return };
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("blob.qqq");
        fs::write(&path, "data\n").unwrap();

        let result = renderer.render_file(&RenderRequest::new(&path, ScreenSize::new(100, 100)), &mut StdRng::seed_from_u64(0));
        assert!(matches!(result, Err(CodepaperError::LexerNotFound(name)) if name == "blob.qqq"));
    }

    #[test]
    fn test_render_file_is_reproducible_with_seed() {
        let Some(renderer) = renderer() else { return };
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_lines(dir.path(), "long.py", 200);
        let request = RenderRequest::new(&path, ScreenSize::new(480, 270));

        let first = renderer.render_file(&request, &mut StdRng::seed_from_u64(11)).unwrap();
        let second = renderer.render_file(&request, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_file_header_taller_than_screen() {
        let Some(renderer) = renderer() else { return };
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_lines(dir.path(), "tiny.py", 3);

        let image = renderer
            .render_file(&RenderRequest::new(&path, ScreenSize::new(200, 50)), &mut StdRng::seed_from_u64(0))
            .unwrap();
        assert_eq!(image.dimensions(), (200, 50));
    }

    #[test]
    fn test_from_config_rejects_unknown_theme() {
        let mut loaded = LoadedConfig::default();
        loaded.config.theme.name = "solarized".to_string();
        let result = Renderer::from_config(&loaded, None);
        assert!(matches!(result, Err(CodepaperError::Config(ConfigError::UnknownTheme(_)))));
    }

    #[test]
    fn test_from_config_rejects_non_positive_font_size() {
        let mut loaded = LoadedConfig::default();
        loaded.config.font.size = 0.0;
        let result = Renderer::from_config(&loaded, None);
        assert!(matches!(result, Err(CodepaperError::Config(ConfigError::InvalidValue { .. }))));
    }
}
