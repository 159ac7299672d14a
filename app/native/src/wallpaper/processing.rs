//! Image processing for wallpapers.
//!
//! Screen sizes, fit scaling onto a fixed-size canvas, alpha compositing of
//! icons and PNG output.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgb, RgbImage, RgbaImage};

use crate::error::{CodepaperError, Result};

/// Screen dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self { Self { width, height } }

    /// Returns a default screen size (2K), used when no size is configured.
    #[must_use]
    pub const fn default_2k() -> Self { Self { width: 2560, height: 1440 } }

    /// Returns the size left below a banner of `height` pixels.
    #[must_use]
    pub const fn below(self, height: u32) -> Self {
        Self {
            width: self.width,
            height: self.height.saturating_sub(height),
        }
    }
}

impl Default for ScreenSize {
    fn default() -> Self { Self::default_2k() }
}

impl fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for ScreenSize {
    type Err = CodepaperError;

    /// Parses `WIDTHxHEIGHT`, e.g. `1920x1080`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CodepaperError::InvalidArguments(format!("Invalid size '{s}', expected WIDTHxHEIGHT"));

        let (width, height) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width: u32 = width.trim().parse().map_err(|_| invalid())?;
        let height: u32 = height.trim().parse().map_err(|_| invalid())?;

        if width == 0 || height == 0 {
            return Err(invalid());
        }

        Ok(Self { width, height })
    }
}

/// Source crop and scaled size used by [`fit_onto_canvas`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FitGeometry {
    crop_width: u32,
    crop_height: u32,
    scaled_width: u32,
    scaled_height: u32,
}

impl FitGeometry {
    /// Computes the part of a `width`x`height` image that remains visible on
    /// `size` after cover scaling, and the size it is scaled to.
    ///
    /// The scale is the same as for the whole image, so the scaled crop
    /// overshoots `size` by less than one source pixel.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn new(width: u32, height: u32, size: ScreenSize) -> Self {
        let scale_x = f64::from(size.width) / f64::from(width);
        let scale_y = f64::from(size.height) / f64::from(height);
        let scale = scale_x.max(scale_y);

        let crop_width = ((f64::from(size.width) / scale).ceil() as u32).clamp(1, width);
        let crop_height = ((f64::from(size.height) / scale).ceil() as u32).clamp(1, height);

        Self {
            crop_width,
            crop_height,
            scaled_width: ((f64::from(crop_width) * scale).round() as u32).max(1),
            scaled_height: ((f64::from(crop_height) * scale).round() as u32).max(1),
        }
    }
}

/// Scales `img` to fill `size` while preserving its aspect ratio and places it
/// at the top-left of a `background` canvas of exactly `size`.
///
/// The scale factor is the larger of the two axis factors, so one axis is
/// covered exactly and the other is cropped. Only the visible part of `img` is
/// resampled.
#[must_use]
pub fn fit_onto_canvas(img: &DynamicImage, size: ScreenSize, background: Rgb<u8>) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(size.width, size.height, background);

    let (img_width, img_height) = img.dimensions();
    if img_width == 0 || img_height == 0 || size.width == 0 || size.height == 0 {
        return canvas;
    }

    let fit = FitGeometry::new(img_width, img_height, size);
    let resized = img
        .crop_imm(0, 0, fit.crop_width, fit.crop_height)
        .resize_exact(fit.scaled_width, fit.scaled_height, FilterType::CatmullRom)
        .to_rgb8();
    imageops::replace(&mut canvas, &resized, 0, 0);
    canvas
}

/// Composites `overlay` onto `canvas` at (`x`, `y`) using the overlay's alpha.
///
/// Pixels outside the canvas are clipped.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn blend_rgba_onto(canvas: &mut RgbImage, overlay: &RgbaImage, x: i64, y: i64) {
    for (ox, oy, pixel) in overlay.enumerate_pixels() {
        let alpha = u32::from(pixel[3]);
        if alpha == 0 {
            continue;
        }

        let (Ok(cx), Ok(cy)) = (u32::try_from(x + i64::from(ox)), u32::try_from(y + i64::from(oy)))
        else {
            continue;
        };
        let Some(target) = canvas.get_pixel_mut_checked(cx, cy) else {
            continue;
        };

        for channel in 0..3 {
            let fg = u32::from(pixel[channel]);
            let bg = u32::from(target[channel]);
            target[channel] = ((fg * alpha + bg * (255 - alpha) + 127) / 255) as u8;
        }
    }
}

/// Resizes an RGBA image so its height is `height`, keeping the aspect ratio.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn scale_to_height(img: &RgbaImage, height: u32) -> RgbaImage {
    let (width, current) = img.dimensions();
    if width == 0 || current == 0 || height == 0 {
        return RgbaImage::new(0, 0);
    }

    let new_width = ((f64::from(width) * f64::from(height) / f64::from(current)).round() as u32).max(1);
    imageops::resize(img, new_width, height, FilterType::CatmullRom)
}

/// Saves an RGB image as PNG.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_png(img: &RgbImage, path: &Path) -> Result<()> {
    img.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}
