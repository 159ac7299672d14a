//! Code body rendering.

use std::collections::BTreeSet;

use image::RgbImage;
use rand::Rng;
use syntect::parsing::SyntaxReference;

use super::Renderer;
use super::processing::{ScreenSize, fit_onto_canvas};
use super::scratch::write_scratch;
use crate::error::Result;
use crate::highlight::{FormatterOptions, ImageFormatter};

/// Contiguous run of lines taken from a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineWindow {
    /// 0-based index of the first line.
    pub offset: usize,
    /// Number of lines in the window.
    pub len: usize,
}

impl LineWindow {
    /// 1-based number of the first line, as shown in the gutter.
    #[must_use]
    pub const fn start_line(&self) -> usize { self.offset + 1 }

    /// Picks the lines to render from a file of `total` lines.
    ///
    /// Files of at most `max_lines` lines are shown whole. Longer files get a
    /// window of exactly `max_lines` lines at a uniformly random offset in
    /// `0..total - max_lines`.
    pub fn select<R: Rng + ?Sized>(total: usize, max_lines: usize, rng: &mut R) -> Self {
        if max_lines == 0 || total <= max_lines {
            return Self { offset: 0, len: total };
        }

        Self {
            offset: rng.random_range(0..total - max_lines),
            len: max_lines,
        }
    }

    /// Joins the selected lines. Lines must keep their terminators.
    #[must_use]
    pub fn slice(&self, lines: &[&str]) -> String {
        lines.iter().skip(self.offset).take(self.len).copied().collect()
    }
}

/// Picks the 1-based line of a `len`-line window to highlight.
pub fn pick_highlight_line<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Option<usize> {
    (len > 0).then(|| rng.random_range(1..=len))
}

impl Renderer {
    /// Renders `source` with `syntax` onto a background canvas of `size`.
    ///
    /// Line numbers start at `start_line`; one random line of `source` is
    /// highlighted. The code image is scaled to cover the canvas with its
    /// aspect ratio kept, anchored at the top-left.
    ///
    /// # Errors
    ///
    /// Returns an error if highlighting fails or the intermediate image cannot
    /// be written or decoded.
    pub fn render_source<R: Rng + ?Sized>(
        &self,
        syntax: &SyntaxReference,
        source: &str,
        size: ScreenSize,
        start_line: usize,
        rng: &mut R,
    ) -> Result<RgbImage> {
        let line_count = source.lines().count();
        let highlight_lines: BTreeSet<usize> = pick_highlight_line(line_count, rng).into_iter().collect();

        let options = FormatterOptions {
            font_size: self.settings.font_size,
            line_number_start: start_line.max(1),
            line_number_separator: false,
            highlight_lines,
            ..FormatterOptions::default()
        };
        let formatter = ImageFormatter::new(&self.font, &self.theme, options);
        let png = formatter.format(self.syntaxes.syntax_set(), syntax, source)?;

        let code = {
            let scratch = write_scratch(&png, ".png")?;
            image::open(scratch.path())?
        };

        tracing::debug!(
            "source: code image {}x{} fitted to {size}",
            code.width(),
            code.height()
        );

        Ok(fit_onto_canvas(&code, size, self.theme.background))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    // ========================================================================
    // Window selection
    // ========================================================================

    #[test]
    fn test_short_file_is_shown_whole() {
        let mut rng = StdRng::seed_from_u64(1);
        let window = LineWindow::select(10, 40, &mut rng);
        assert_eq!(window, LineWindow { offset: 0, len: 10 });
        assert_eq!(window.start_line(), 1);
    }

    #[test]
    fn test_exact_length_file_is_shown_whole() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(LineWindow::select(40, 40, &mut rng), LineWindow { offset: 0, len: 40 });
    }

    #[test]
    fn test_long_file_window_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2000 {
            let window = LineWindow::select(1000, 40, &mut rng);
            assert_eq!(window.len, 40);
            assert!(window.offset <= 959);
            assert!((1..=960).contains(&window.start_line()));
        }
    }

    #[test]
    fn test_long_file_window_varies() {
        let mut rng = StdRng::seed_from_u64(3);
        let offsets: BTreeSet<usize> = (0..50).map(|_| LineWindow::select(1000, 40, &mut rng).offset).collect();
        assert!(offsets.len() > 1);
    }

    #[test]
    fn test_window_selection_is_seedable() {
        let first = LineWindow::select(500, 40, &mut StdRng::seed_from_u64(42));
        let second = LineWindow::select(500, 40, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_slice_keeps_line_endings() {
        let lines = ["a\n", "b\n", "c\n", "d\n"];
        let window = LineWindow { offset: 1, len: 2 };
        assert_eq!(window.slice(&lines), "b\nc\n");
    }

    // ========================================================================
    // Highlight line
    // ========================================================================

    #[test]
    fn test_highlight_line_within_window() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..500 {
            let line = pick_highlight_line(40, &mut rng).unwrap();
            assert!((1..=40).contains(&line));
        }
        assert_eq!(pick_highlight_line(1, &mut rng), Some(1));
        assert_eq!(pick_highlight_line(0, &mut rng), None);
    }
}
