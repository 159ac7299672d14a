//! Header icons.
//!
//! A file name is mapped to a short language identifier, the identifier to SVG
//! markup, and the markup to a flat white silhouette whose alpha follows the
//! icon's ink. Any failure degrades to an empty image so the header is drawn
//! without an icon.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat, Rgba, RgbaImage};
use resvg::{tiny_skia, usvg};

use super::scratch::{scratch_file, write_scratch};
use crate::error::{CodepaperError, Result};
use crate::highlight::short_identifier;

/// SVG markup bundled with the binary, keyed by short identifier.
const BUILTIN_ICONS: &[(&str, &str)] = &[
    ("c", include_str!("../../assets/icons/c.svg")),
    ("cpp", include_str!("../../assets/icons/cpp.svg")),
    ("docker", include_str!("../../assets/icons/docker.svg")),
    ("go", include_str!("../../assets/icons/go.svg")),
    ("html", include_str!("../../assets/icons/html.svg")),
    ("javascript", include_str!("../../assets/icons/javascript.svg")),
    ("json", include_str!("../../assets/icons/json.svg")),
    ("markdown", include_str!("../../assets/icons/markdown.svg")),
    ("python", include_str!("../../assets/icons/python.svg")),
    ("rust", include_str!("../../assets/icons/rust.svg")),
    ("shell", include_str!("../../assets/icons/shell.svg")),
    ("typescript", include_str!("../../assets/icons/typescript.svg")),
];

/// Source of icon markup.
///
/// Files named `<identifier>.svg` in the optional directory take precedence
/// over the built-in set.
#[derive(Debug, Clone, Default)]
pub struct IconStore {
    directory: Option<PathBuf>,
}

impl IconStore {
    #[must_use]
    pub const fn new(directory: Option<PathBuf>) -> Self { Self { directory } }

    /// Store with only the built-in icons.
    #[must_use]
    pub const fn builtin() -> Self { Self { directory: None } }

    /// Returns the SVG markup registered for `identifier`.
    #[must_use]
    pub fn markup(&self, identifier: &str) -> Option<Cow<'static, str>> {
        if let Some(dir) = &self.directory {
            let path = dir.join(format!("{identifier}.svg"));
            if path.is_file() {
                match fs::read_to_string(&path) {
                    Ok(markup) => return Some(Cow::Owned(markup)),
                    Err(err) => tracing::warn!("icons: failed to read {}: {err}", path.display()),
                }
            }
        }

        BUILTIN_ICONS
            .iter()
            .find(|(id, _)| *id == identifier)
            .map(|(_, markup)| Cow::Borrowed(*markup))
    }
}

/// Resolves the header icon for `filename`.
///
/// Returns a 0x0 image when the name matches no language, no icon is
/// registered, or rasterization fails. Never fails.
#[must_use]
pub fn resolve_icon(store: &IconStore, filename: &str, dpi: f32) -> RgbaImage {
    let name = Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(filename);

    let Some(identifier) = short_identifier(name) else {
        return empty_icon();
    };
    let Some(markup) = store.markup(identifier) else {
        tracing::debug!("icons: no icon registered for {identifier}");
        return empty_icon();
    };

    match rasterize(&markup, dpi) {
        Ok(icon) => icon,
        Err(err) => {
            tracing::warn!("icons: failed to render icon {identifier}: {err}");
            empty_icon()
        }
    }
}

/// Zero-size placeholder.
#[must_use]
pub fn empty_icon() -> RgbaImage { RgbaImage::new(0, 0) }

/// Rasterizes SVG markup at `dpi` and converts it to a silhouette.
///
/// The markup and the raster pass through their own scratch files, which are
/// removed when this function returns.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rasterize(markup: &str, dpi: f32) -> Result<RgbaImage> {
    let svg_file = write_scratch(markup.as_bytes(), ".svg")?;
    let data = fs::read(svg_file.path())?;

    let options = usvg::Options {
        dpi,
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_data(&data, &options).map_err(|err| CodepaperError::Svg(err.to_string()))?;

    let scale = dpi / 96.0;
    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| CodepaperError::Svg(format!("invalid icon size {width}x{height}")))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    let raster = RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or_else(|| CodepaperError::Svg("pixmap size mismatch".to_string()))?;

    let png_file = scratch_file(".png")?;
    raster.save_with_format(png_file.path(), ImageFormat::Png)?;
    let luma = image::open(png_file.path())?.to_luma8();

    Ok(silhouette(&luma))
}

/// Inverts a grayscale raster and uses the result as both color and alpha.
///
/// Dark ink on a white page becomes opaque white on a transparent page.
#[must_use]
pub fn silhouette(luma: &GrayImage) -> RgbaImage {
    RgbaImage::from_fn(luma.width(), luma.height(), |x, y| {
        let value = 255 - luma.get_pixel(x, y)[0];
        Rgba([value, value, value, value])
    })
}
