//! Hex colour parsing for theme configuration.

use image::Rgb;

/// An RGBA colour as written in configuration (`#rgb`, `#rrggbb` or `#rrggbbaa`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Creates an opaque colour.
    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a: 255 } }

    /// Drops the alpha channel.
    #[must_use]
    pub const fn to_rgb(self) -> Rgb<u8> { Rgb([self.r, self.g, self.b]) }

    /// Composites this colour over an opaque background.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn over(self, background: Rgb<u8>) -> Rgb<u8> {
        let alpha = u32::from(self.a);
        let mix = |fg: u8, bg: u8| -> u8 {
            ((u32::from(fg) * alpha + u32::from(bg) * (255 - alpha) + 127) / 255) as u8
        };
        Rgb([
            mix(self.r, background[0]),
            mix(self.g, background[1]),
            mix(self.b, background[2]),
        ])
    }
}

/// Parses a hex colour string.
///
/// Accepts an optional leading `#` and 3, 6 or 8 hex digits.
#[must_use]
pub fn parse_hex_color(value: &str) -> Option<Rgba> {
    let hex = value.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();

    match hex.len() {
        3 => {
            let short = |idx: usize| channel(idx..idx + 1).map(|v| v * 17);
            Some(Rgba::opaque(short(0)?, short(1)?, short(2)?))
        }
        6 => Some(Rgba::opaque(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        8 => Some(Rgba {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
            a: channel(6..8)?,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit_hex() {
        assert_eq!(parse_hex_color("#1f2430"), Some(Rgba::opaque(0x1f, 0x24, 0x30)));
    }

    #[test]
    fn test_parse_without_hash_and_uppercase() {
        assert_eq!(parse_hex_color("FFAD66"), Some(Rgba::opaque(0xff, 0xad, 0x66)));
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(parse_hex_color("#fff"), Some(Rgba::opaque(255, 255, 255)));
        assert_eq!(parse_hex_color("#08f"), Some(Rgba::opaque(0, 0x88, 0xff)));
    }

    #[test]
    fn test_parse_hex_with_alpha() {
        let color = parse_hex_color("#8a919966").unwrap();
        assert_eq!(color.a, 0x66);
        assert_eq!(color.to_rgb(), Rgb([0x8a, 0x91, 0x99]));
    }

    #[test]
    fn test_parse_rejects_invalid() {
        assert_eq!(parse_hex_color(""), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
        assert_eq!(parse_hex_color("#ffé"), None);
    }

    #[test]
    fn test_over_opaque_keeps_foreground() {
        let fg = Rgba::opaque(10, 20, 30);
        assert_eq!(fg.over(Rgb([200, 200, 200])), Rgb([10, 20, 30]));
    }

    #[test]
    fn test_over_transparent_keeps_background() {
        let fg = Rgba { r: 255, g: 0, b: 0, a: 0 };
        assert_eq!(fg.over(Rgb([1, 2, 3])), Rgb([1, 2, 3]));
    }

    #[test]
    fn test_over_half_alpha_mixes() {
        let fg = Rgba { r: 255, g: 255, b: 255, a: 128 };
        let mixed = fg.over(Rgb([0, 0, 0]));
        assert_eq!(mixed, Rgb([128, 128, 128]));
    }
}
