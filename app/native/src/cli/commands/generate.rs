//! `codepaper generate`.

use std::path::PathBuf;

use clap::Args;

use super::super::output;
use crate::config::LoadedConfig;
use crate::error::CodepaperError;
use crate::generator::{self, GenerateOptions};
use crate::wallpaper::{Renderer, ScreenSize};

/// Arguments of the generate command. Flags override configuration values.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Directory to take source files from.
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Directory to write wallpapers to.
    #[arg(long, short, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Wallpaper size as WIDTHxHEIGHT.
    #[arg(long, short, value_name = "WxH")]
    pub size: Option<ScreenSize>,

    /// Maximum number of source lines per wallpaper.
    #[arg(long, value_name = "N")]
    pub max_lines: Option<usize>,

    /// Seed for line window and highlight selection.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Walk the whole directory tree instead of its top level.
    #[arg(long, short)]
    pub recursive: bool,

    /// Font file to render with.
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,
}

impl GenerateArgs {
    /// Merges the flags over the configuration.
    #[must_use]
    pub fn options(&self, loaded: &LoadedConfig) -> GenerateOptions {
        let config = &loaded.config;
        let defaults = GenerateOptions::from_config(config, self.size);

        GenerateOptions {
            root: self.root.clone().unwrap_or(defaults.root),
            output: self.out.clone().unwrap_or(defaults.output),
            size: defaults.size,
            max_lines: self.max_lines.unwrap_or(defaults.max_lines),
            max_line_length: defaults.max_line_length,
            recursive: self.recursive || defaults.recursive,
            seed: self.seed.or(defaults.seed),
        }
    }
}

/// Execute the generate command.
pub fn execute(args: &GenerateArgs, loaded: &LoadedConfig) -> Result<(), CodepaperError> {
    let options = args.options(loaded);
    options.validate()?;

    let renderer = Renderer::from_config(loaded, args.font.as_deref())?;
    tracing::debug!(
        "generate: {} -> {} at {}",
        options.root.display(),
        options.output.display(),
        options.size
    );

    generator::generate(&renderer, &options, output::print_progress)?;
    Ok(())
}
