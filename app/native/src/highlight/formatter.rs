//! Code image formatter.
//!
//! Lays highlighted source out on a monospace grid with a line-number gutter and
//! optional highlighted lines, then encodes the result as PNG.
//!
//! ```text
//! +---------------------------------------------+
//! |  pad                                        |
//! |   12 | fn main() {                          |
//! |   13 |     println!("hi");   <- highlighted |
//! |   14 | }                                    |
//! |  pad                                        |
//! +---------------------------------------------+
//! ```

use std::collections::BTreeSet;
use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style, Theme as SyntectTheme};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use super::fonts::{FontFace, FontMetrics, Ink};
use crate::constants::DEFAULT_FONT_SIZE;
use crate::error::Result;
use crate::theme::Theme;

/// Layout options of the formatter.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatterOptions {
    /// Font size in pixels.
    pub font_size: f32,
    /// Padding around the whole image.
    pub image_pad: u32,
    /// Extra vertical space between lines.
    pub line_pad: u32,
    /// Whether to draw the line-number gutter.
    pub line_numbers: bool,
    /// Number shown next to the first line.
    pub line_number_start: usize,
    /// Minimum gutter width in characters.
    pub line_number_chars: usize,
    /// Horizontal padding on both sides of the line numbers.
    pub line_number_pad: u32,
    /// Draw a vertical line between the gutter and the code.
    pub line_number_separator: bool,
    /// 1-based lines of the input to paint with the highlight color.
    pub highlight_lines: BTreeSet<usize>,
    /// Columns per tab stop.
    pub tab_width: usize,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            image_pad: 10,
            line_pad: 2,
            line_numbers: true,
            line_number_start: 1,
            line_number_chars: 2,
            line_number_pad: 6,
            line_number_separator: true,
            highlight_lines: BTreeSet::new(),
            tab_width: 4,
        }
    }
}

/// Renders highlighted source code to PNG images.
pub struct ImageFormatter<'a> {
    font: &'a FontFace,
    theme: &'a Theme,
    highlighting: SyntectTheme,
    options: FormatterOptions,
}

/// Pixel geometry derived from the font and the options.
#[derive(Debug, Clone, Copy)]
struct Layout {
    metrics: FontMetrics,
    char_width: f32,
    line_height: f32,
    line_number_chars: usize,
    line_number_width: f32,
}

impl Layout {
    #[allow(clippy::cast_precision_loss)]
    fn new(font: &FontFace, options: &FormatterOptions, line_count: usize) -> Self {
        let metrics = font.metrics(options.font_size);
        let char_width = metrics.cell_width.ceil().max(1.0);
        let line_height = metrics.height().ceil() + options.line_pad as f32;

        let last_number = options.line_number_start + line_count.saturating_sub(1);
        let line_number_chars = options.line_number_chars.max(last_number.to_string().len());
        let line_number_width = if options.line_numbers {
            (line_number_chars as f32).mul_add(char_width, options.line_number_pad as f32 * 2.0)
        } else {
            0.0
        };

        Self {
            metrics,
            char_width,
            line_height,
            line_number_chars,
            line_number_width,
        }
    }

    /// Top of the given 0-based line.
    #[allow(clippy::cast_precision_loss)]
    fn line_top(&self, options: &FormatterOptions, line: usize) -> f32 {
        (line as f32).mul_add(self.line_height, options.image_pad as f32)
    }

    /// Left edge of the given 0-based column.
    #[allow(clippy::cast_precision_loss)]
    fn column_left(&self, options: &FormatterOptions, column: usize) -> f32 {
        (column as f32).mul_add(self.char_width, options.image_pad as f32 + self.line_number_width)
    }

    /// Right edge of the gutter background.
    #[allow(clippy::cast_precision_loss)]
    fn gutter_right(&self, options: &FormatterOptions) -> f32 {
        options.image_pad as f32 + self.line_number_width - options.line_number_pad as f32
    }
}

impl<'a> ImageFormatter<'a> {
    #[must_use]
    pub fn new(font: &'a FontFace, theme: &'a Theme, options: FormatterOptions) -> Self {
        Self {
            font,
            theme,
            highlighting: theme.to_syntect(),
            options,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &FormatterOptions { &self.options }

    /// Highlights `source` with `syntax` and returns the rendered image.
    ///
    /// # Errors
    ///
    /// Returns an error if `syntect` fails to parse a line.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn render(
        &self,
        syntaxes: &SyntaxSet,
        syntax: &SyntaxReference,
        source: &str,
    ) -> Result<RgbImage> {
        let lines = self.highlight(syntaxes, syntax, source)?;
        let layout = Layout::new(self.font, &self.options, lines.len());
        let opts = &self.options;

        let max_columns = lines
            .iter()
            .map(|line| line.iter().map(|(_, text)| text.chars().count()).sum::<usize>())
            .max()
            .unwrap_or(0);
        let width = (max_columns as f32)
            .mul_add(layout.char_width, opts.image_pad as f32 * 2.0 + layout.line_number_width)
            .ceil() as u32;
        let height = (lines.len() as f32)
            .mul_add(layout.line_height, opts.image_pad as f32 * 2.0)
            .ceil() as u32;

        let mut canvas = RgbImage::from_pixel(width.max(1), height.max(1), self.theme.background);

        if opts.line_numbers {
            let right = layout.gutter_right(opts);
            fill_rect(&mut canvas, 0.0, 0.0, right, height as f32, self.theme.line_number_background);
            if opts.line_number_separator {
                fill_rect(
                    &mut canvas,
                    right,
                    0.0,
                    right + 1.0,
                    height as f32,
                    self.theme.line_number_foreground,
                );
            }
        }

        for &line in &opts.highlight_lines {
            if line == 0 || line > lines.len() {
                continue;
            }
            let top = layout.line_top(opts, line - 1);
            let left = (layout.gutter_right(opts) + 1.0).max(0.0);
            fill_rect(
                &mut canvas,
                left,
                top,
                width as f32,
                top + layout.line_height,
                self.theme.highlight,
            );
        }

        for (index, line) in lines.iter().enumerate() {
            let baseline = layout.line_top(opts, index) + layout.metrics.ascent;

            if opts.line_numbers {
                let number = format!(
                    "{:>width$}",
                    opts.line_number_start + index,
                    width = layout.line_number_chars
                );
                let mut x = opts.image_pad as f32 + opts.line_number_pad as f32;
                for ch in number.chars() {
                    self.font.draw_char(
                        &mut canvas,
                        opts.font_size,
                        x,
                        baseline,
                        ch,
                        Ink::plain(self.theme.line_number_foreground),
                    );
                    x += layout.char_width;
                }
            }

            let mut column = 0;
            for (style, text) in line {
                let ink = ink_for(style);
                for ch in text.chars() {
                    if !ch.is_whitespace() {
                        let x = layout.column_left(opts, column);
                        self.font.draw_char(&mut canvas, opts.font_size, x, baseline, ch, ink);
                    }
                    column += 1;
                }
            }
        }

        Ok(canvas)
    }

    /// Renders `source` and encodes it as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if highlighting or encoding fails.
    pub fn format(
        &self,
        syntaxes: &SyntaxSet,
        syntax: &SyntaxReference,
        source: &str,
    ) -> Result<Vec<u8>> {
        let image = self.render(syntaxes, syntax, source)?;
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Runs the highlighter and returns styled segments per line, with tabs
    /// expanded and line endings stripped.
    fn highlight(
        &self,
        syntaxes: &SyntaxSet,
        syntax: &SyntaxReference,
        source: &str,
    ) -> Result<Vec<Vec<(Style, String)>>> {
        let mut highlighter = HighlightLines::new(syntax, &self.highlighting);
        let mut lines = Vec::new();

        for line in LinesWithEndings::from(source) {
            let ranges = highlighter.highlight_line(line, syntaxes)?;
            let mut column = 0;
            let mut segments = Vec::with_capacity(ranges.len());
            for (style, text) in ranges {
                let expanded = expand_tabs(text, &mut column, self.options.tab_width);
                if !expanded.is_empty() {
                    segments.push((style, expanded));
                }
            }
            lines.push(segments);
        }

        Ok(lines)
    }
}

impl std::fmt::Debug for ImageFormatter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFormatter")
            .field("theme", &self.theme.name)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Maps a highlighted segment's style to glyph ink.
fn ink_for(style: &Style) -> Ink {
    Ink {
        color: Rgb([style.foreground.r, style.foreground.g, style.foreground.b]),
        bold: style.font_style.contains(FontStyle::BOLD),
        italic: style.font_style.contains(FontStyle::ITALIC),
    }
}

/// Expands tabs to the next tab stop and drops line terminators.
///
/// `column` carries the position across segments of the same line.
fn expand_tabs(text: &str, column: &mut usize, tab_width: usize) -> String {
    let tab_width = tab_width.max(1);
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\n' | '\r' => {}
            '\t' => {
                let spaces = tab_width - (*column % tab_width);
                out.extend(std::iter::repeat_n(' ', spaces));
                *column += spaces;
            }
            _ => {
                out.push(ch);
                *column += 1;
            }
        }
    }
    out
}

/// Fills the rectangle `[x0, x1) x [y0, y1)`, clipped to the canvas.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fill_rect(canvas: &mut RgbImage, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgb<u8>) {
    let (width, height) = canvas.dimensions();
    let clamp = |value: f32, max: u32| (value.round().max(0.0) as u32).min(max);

    for y in clamp(y0, height)..clamp(y1, height) {
        for x in clamp(x0, width)..clamp(x1, width) {
            canvas.put_pixel(x, y, color);
        }
    }
}
