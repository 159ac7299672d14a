//! Font loading, metrics and text drawing.
//!
//! Glyph outlines come from `ab_glyph`; coverage is alpha-blended straight onto
//! RGB canvases.

use std::path::Path;

use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont, point};
use image::{Rgb, RgbImage};

use crate::error::{CodepaperError, Result};

/// Vertical and horizontal metrics at a given pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the tallest glyph.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the lowest glyph (negative).
    pub descent: f32,
    /// Advance width of `M`, used as the monospace cell width.
    pub cell_width: f32,
}

impl FontMetrics {
    /// Height of a line without padding.
    #[must_use]
    pub fn height(&self) -> f32 { self.ascent - self.descent }
}

/// A loaded font face.
pub struct FontFace {
    font: FontVec,
}

impl FontFace {
    /// Parses a font from raw TTF/OTF bytes.
    ///
    /// # Errors
    ///
    /// Returns `CodepaperError::Font` if the data is not a valid font.
    pub fn from_bytes(data: Vec<u8>, index: u32) -> Result<Self> {
        FontVec::try_from_vec_and_index(data, index)
            .map(|font| Self { font })
            .map_err(|err| CodepaperError::Font(err.to_string()))
    }

    /// Loads a font file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data, 0)
            .map_err(|err| CodepaperError::Font(format!("{}: {err}", path.display())))
    }

    /// Loads an installed monospace font, or any installed font when no
    /// monospace family is available.
    ///
    /// # Errors
    ///
    /// Returns `CodepaperError::Font` if no usable system font exists.
    pub fn system_monospace() -> Result<Self> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let query = fontdb::Query {
            families: &[fontdb::Family::Monospace],
            ..fontdb::Query::default()
        };
        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|face| face.id))
            .ok_or_else(|| CodepaperError::Font("no system fonts installed".to_string()))?;

        db.with_face_data(id, |data, index| Self::from_bytes(data.to_vec(), index))
            .unwrap_or_else(|| Err(CodepaperError::Font("failed to read system font".to_string())))
    }

    /// Loads the configured font, falling back to a system monospace font when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file is not a valid font, or if the
    /// fallback finds no font.
    pub fn load(path: &Path) -> Result<Self> {
        if path.is_file() {
            tracing::debug!("fonts: loading {}", path.display());
            return Self::from_file(path);
        }

        tracing::warn!("fonts: {} not found, using a system monospace font", path.display());
        Self::system_monospace()
    }

    /// Returns the metrics at `px` pixels.
    #[must_use]
    pub fn metrics(&self, px: f32) -> FontMetrics {
        let scaled = self.font.as_scaled(PxScale::from(px));
        FontMetrics {
            ascent: scaled.ascent(),
            descent: scaled.descent(),
            cell_width: scaled.h_advance(scaled.glyph_id('M')),
        }
    }

    /// Draws `text` with its baseline at `baseline`, starting at `x`.
    ///
    /// Pixels outside the canvas are clipped. Returns the x position after the
    /// last glyph.
    pub fn draw_text(
        &self,
        canvas: &mut RgbImage,
        px: f32,
        x: f32,
        baseline: f32,
        text: &str,
        color: Rgb<u8>,
    ) -> f32 {
        self.draw_run(canvas, px, (x, baseline), text, 0.0, color)
    }

    /// Draws a single character with its origin at the left edge of a
    /// monospace cell.
    ///
    /// The code formatter advances by whole cells, so columns stay aligned even
    /// when the font's advance differs slightly between glyphs. Bold and italic
    /// are synthesized from the regular face.
    pub fn draw_char(
        &self,
        canvas: &mut RgbImage,
        px: f32,
        cell_x: f32,
        baseline: f32,
        ch: char,
        ink: Ink,
    ) {
        let mut buf = [0u8; 4];
        let text = ch.encode_utf8(&mut buf);
        let slant = if ink.italic { ITALIC_SLANT } else { 0.0 };

        self.draw_run(canvas, px, (cell_x, baseline), text, slant, ink.color);
        if ink.bold {
            let offset = (px / 24.0).round().max(1.0);
            self.draw_run(canvas, px, (cell_x + offset, baseline), text, slant, ink.color);
        }
    }

    /// Draws glyphs from `origin` (x, baseline), shearing each pixel right by
    /// `slant` times its height above the baseline.
    fn draw_run(
        &self,
        canvas: &mut RgbImage,
        px: f32,
        origin: (f32, f32),
        text: &str,
        slant: f32,
        color: Rgb<u8>,
    ) -> f32 {
        let (x, baseline) = origin;
        let scale = PxScale::from(px);
        let scaled = self.font.as_scaled(scale);
        let mut caret = x;
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
                    let (px_x, px_y) = {
                        let y = bounds.min.y as i64 + i64::from(gy);
                        let shear = ((baseline - y as f32) * slant).round() as i64;
                        (bounds.min.x as i64 + i64::from(gx) + shear, y)
                    };
                    blend_pixel(canvas, px_x, px_y, color, coverage);
                });
            }
        }

        caret
    }
}

/// Horizontal shear of synthesized italics.
const ITALIC_SLANT: f32 = 0.2;

/// Color and synthesized style of a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ink {
    pub color: Rgb<u8>,
    pub bold: bool,
    pub italic: bool,
}

impl Ink {
    /// Regular weight, upright.
    #[must_use]
    pub const fn plain(color: Rgb<u8>) -> Self {
        Self {
            color,
            bold: false,
            italic: false,
        }
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace").field("glyphs", &self.font.glyph_count()).finish()
    }
}

/// Blends `color` into the pixel at (`x`, `y`) with the given coverage.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn blend_pixel(canvas: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>, coverage: f32) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    let Some(pixel) = canvas.get_pixel_mut_checked(x, y) else {
        return;
    };

    let alpha = coverage.clamp(0.0, 1.0);
    for channel in 0..3 {
        let bg = f32::from(pixel[channel]);
        let fg = f32::from(color[channel]);
        pixel[channel] = alpha.mul_add(fg - bg, bg).round() as u8;
    }
}
