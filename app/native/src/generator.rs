//! Batch driver.
//!
//! Enumerates candidate files under a root, filters them, renders each
//! eligible one and writes `bg_<n>.png` files. Files are processed strictly in
//! order on the calling thread.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use natord::compare;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{CodepaperConfig, ScreenConfig};
use crate::constants::{DEFAULT_MAX_LINE_LENGTH, DEFAULT_MAX_LINES};
use crate::eligibility;
use crate::error::{CodepaperError, Result};
use crate::wallpaper::processing::save_png;
use crate::wallpaper::{RenderRequest, Renderer, ScreenSize};

/// Options of one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Directory the candidates are taken from.
    pub root: PathBuf,
    /// Directory the wallpapers are written to.
    pub output: PathBuf,
    /// Size of every wallpaper.
    pub size: ScreenSize,
    /// Maximum number of source lines per wallpaper.
    pub max_lines: usize,
    /// Files with a line at least this long are skipped.
    pub max_line_length: usize,
    /// Walk the whole tree instead of the root's direct children.
    pub recursive: bool,
    /// Seed for window and highlight selection.
    pub seed: Option<u64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from(crate::constants::DEFAULT_OUTPUT_DIR),
            size: ScreenSize::default_2k(),
            max_lines: DEFAULT_MAX_LINES,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            recursive: false,
            seed: None,
        }
    }
}

impl GenerateOptions {
    /// Builds options from configuration values.
    ///
    /// `size` takes precedence over the configured screen size.
    #[must_use]
    pub fn from_config(config: &CodepaperConfig, size: Option<ScreenSize>) -> Self {
        Self {
            root: crate::platform::path::expand(&config.root),
            output: crate::platform::path::expand(&config.output),
            size: resolve_screen_size(size, &config.screen),
            max_lines: config.max_lines,
            max_line_length: config.max_line_length,
            recursive: config.recursive,
            seed: config.seed,
        }
    }

    /// Rejects limits that would make every file unrenderable.
    ///
    /// # Errors
    ///
    /// Returns `CodepaperError::InvalidArguments` when `max_lines` or
    /// `max_line_length` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_lines == 0 {
            return Err(CodepaperError::InvalidArguments(
                "max lines must be at least 1".to_string(),
            ));
        }
        if self.max_line_length == 0 {
            return Err(CodepaperError::InvalidArguments(
                "max line length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Progress notifications emitted while a batch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// An eligible file is about to be rendered.
    Rendering(PathBuf),
    /// Rendering was abandoned because no lexer matches the file name.
    LexerMissing(String),
    /// A wallpaper was written.
    Written(PathBuf),
    /// The batch finished.
    Done,
}

/// Outcome of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Written wallpapers, in order.
    pub written: Vec<PathBuf>,
    /// Candidates rejected by the eligibility filter.
    pub ineligible: usize,
    /// Candidates abandoned during rendering for lack of a lexer.
    pub lexer_missing: usize,
}

/// Picks the screen size: explicit value, then configuration, then 2560x1440.
#[must_use]
pub fn resolve_screen_size(explicit: Option<ScreenSize>, config: &ScreenConfig) -> ScreenSize {
    if let Some(size) = explicit {
        return size;
    }
    if config.is_set() {
        return ScreenSize::new(config.width, config.height);
    }

    let fallback = ScreenSize::default_2k();
    tracing::info!("generator: no screen size configured, using {fallback}");
    fallback
}

/// Returns the random source for a batch.
#[must_use]
pub fn batch_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(|| StdRng::from_rng(&mut rand::rng()), StdRng::seed_from_u64)
}

/// Lists candidate files under `root` in natural order.
///
/// Hidden files and paths excluded by ignore files are skipped. Only the
/// root's direct children are listed unless `recursive` is set.
///
/// # Errors
///
/// Returns an error if `root` is not a directory.
pub fn discover(root: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(CodepaperError::InvalidArguments(format!(
            "Root directory not found: {}",
            root.display()
        )));
    }

    let mut files: Vec<PathBuf> = WalkBuilder::new(root)
        .max_depth(if recursive { None } else { Some(1) })
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("generator: skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|file_type| file_type.is_file()))
        .map(ignore::DirEntry::into_path)
        .collect();

    files.sort_by(|a, b| compare(a.to_string_lossy().as_ref(), b.to_string_lossy().as_ref()));
    tracing::debug!("generator: {} candidates under {}", files.len(), root.display());
    Ok(files)
}

/// Path of the `index`-th wallpaper in `output`.
#[must_use]
pub fn output_path(output: &Path, index: usize) -> PathBuf { output.join(format!("bg_{index}.png")) }

/// Runs a batch.
///
/// Ineligible files are skipped silently. A file whose lexer disappears during
/// rendering is reported and skipped. Any other error aborts the batch.
///
/// # Errors
///
/// Returns an error if discovery fails, the output directory cannot be
/// created, or a render or write fails for a reason other than a missing lexer.
pub fn generate<F>(renderer: &Renderer, options: &GenerateOptions, mut on_progress: F) -> Result<GenerateReport>
where
    F: FnMut(&Progress),
{
    options.validate()?;
    let candidates = discover(&options.root, options.recursive)?;
    fs::create_dir_all(&options.output)?;

    let mut rng = batch_rng(options.seed);
    let mut report = GenerateReport::default();

    for path in candidates {
        let outcome = eligibility::check(renderer.syntaxes(), &path, options.max_line_length);
        if !outcome.is_renderable() {
            tracing::debug!("generator: skipping {}: {outcome}", path.display());
            report.ineligible += 1;
            continue;
        }

        on_progress(&Progress::Rendering(path.clone()));

        let request = RenderRequest::new(&path, options.size).with_max_lines(options.max_lines);
        let image = match renderer.render_file(&request, &mut rng) {
            Ok(image) => image,
            Err(CodepaperError::LexerNotFound(name)) => {
                on_progress(&Progress::LexerMissing(name));
                report.lexer_missing += 1;
                continue;
            }
            Err(err) => return Err(err),
        };

        let target = output_path(&options.output, report.written.len());
        save_png(&image, &target)?;
        on_progress(&Progress::Written(target.clone()));
        report.written.push(target);
    }

    on_progress(&Progress::Done);
    Ok(report)
}
