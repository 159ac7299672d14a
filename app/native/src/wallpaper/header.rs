//! Header banner with the file icon and title.

use image::{Rgb, RgbImage, RgbaImage};

use super::processing::{ScreenSize, blend_rgba_onto, scale_to_height};
use crate::highlight::FontFace;

/// Distance of the icon (or the title, without icon) from the left edge.
const LEFT_MARGIN: u32 = 10;
/// Space between the icon and the title.
const ICON_GAP: u32 = 15;
/// Icon height relative to the banner height.
const ICON_SCALE: f64 = 0.6;
/// Title font size relative to the banner height.
const TITLE_SCALE: f32 = 0.45;

/// Renders a banner of `size` filled with `bg`, with `icon` and `title` on the
/// left, both vertically centered.
///
/// An empty `icon` is skipped and the title moves to the left margin.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn render_header(
    font: &FontFace,
    title: &str,
    size: ScreenSize,
    fg: Rgb<u8>,
    bg: Rgb<u8>,
    icon: &RgbaImage,
) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(size.width, size.height, bg);
    let height = size.height;

    let mut text_x = LEFT_MARGIN;
    if icon.width() > 0 && icon.height() > 0 {
        let icon_height = (f64::from(height) * ICON_SCALE).round() as u32;
        let scaled = scale_to_height(icon, icon_height);
        let top = (height.saturating_sub(scaled.height())) / 2;
        blend_rgba_onto(&mut canvas, &scaled, i64::from(LEFT_MARGIN), i64::from(top));
        text_x = LEFT_MARGIN + scaled.width() + ICON_GAP;
    }

    let px = height as f32 * TITLE_SCALE;
    let metrics = font.metrics(px);
    let baseline = (height as f32 - metrics.height()) / 2.0 + metrics.ascent;
    font.draw_text(&mut canvas, px, text_x as f32, baseline, title, fg);

    canvas
}
