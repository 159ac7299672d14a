//! CLI command definitions using Clap.
//!
//! - `generate` - Render wallpapers for a directory
//! - `check` - Show which files the eligibility filter accepts

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::config::LoadedConfig;
use crate::constants::APP_NAME;
use crate::error::CodepaperError;
use crate::schema;

pub mod check;
pub mod generate;

pub use check::CheckArgs;
pub use generate::GenerateArgs;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Codepaper - render the source files of a project as wallpapers.
#[derive(Parser, Debug)]
#[command(name = "codepaper")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging (overrides `RUST_LOG`).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Render wallpapers for the source files in a directory.
    ///
    /// Every renderable file becomes one `bg_<n>.png` in the output
    /// directory, numbered in discovery order.
    #[command(
        verbatim_doc_comment,
        after_long_help = r#"Examples:
  codepaper generate                         # Current directory into ./out
  codepaper generate ~/src/project -o walls  # Custom root and output
  codepaper generate --size 3840x2160        # Explicit resolution
  codepaper generate --seed 42 --recursive   # Reproducible, whole tree"#
    )]
    Generate(GenerateArgs),

    /// Show whether files would be rendered, and why not.
    Check(CheckArgs),

    /// Output the configuration JSON Schema.
    ///
    /// Outputs a JSON Schema to stdout that describes the structure of the
    /// configuration file. Can be redirected to a file for use with editors
    /// that support JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    /// Can be used with eval or redirected to a file.
    ///
    /// Usage:
    ///   eval "$(codepaper completions --shell zsh)"
    ///   codepaper completions --shell fish > ~/.config/fish/completions/codepaper.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), CodepaperError> {
        match &self.command {
            Commands::Generate(args) => generate::execute(args, &self.load_config()?),
            Commands::Check(args) => check::execute(args, &self.load_config()?),

            Commands::Schema => {
                println!("{}", schema::generate_schema_json());
                Ok(())
            }

            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Loads configuration from `--config` or the default locations.
    fn load_config(&self) -> Result<LoadedConfig, CodepaperError> {
        Ok(LoadedConfig::load(self.config.as_deref())?)
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, APP_NAME, &mut io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallpaper::ScreenSize;

    // ========================================================================
    // CLI parsing tests
    // ========================================================================

    #[test]
    fn test_cli_definition_is_valid() { Cli::command().debug_assert(); }

    #[test]
    fn test_cli_parses_schema() {
        let cli = Cli::try_parse_from(["codepaper", "schema"]).unwrap();
        assert!(matches!(cli.command, Commands::Schema));
    }

    #[test]
    fn test_cli_parses_completions_zsh() {
        let cli = Cli::try_parse_from(["codepaper", "completions", "--shell", "zsh"]).unwrap();
        match cli.command {
            Commands::Completions { shell } => assert_eq!(shell, Shell::Zsh),
            _ => panic!("Expected Completions command"),
        }
    }

    #[test]
    fn test_cli_parses_generate_defaults() {
        let cli = Cli::try_parse_from(["codepaper", "generate"]).unwrap();
        match cli.command {
            Commands::Generate(args) => {
                assert!(args.root.is_none());
                assert!(args.out.is_none());
                assert!(args.size.is_none());
                assert!(args.seed.is_none());
                assert!(!args.recursive);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_parses_generate_flags() {
        let cli = Cli::try_parse_from([
            "codepaper",
            "generate",
            "src",
            "--out",
            "walls",
            "--size",
            "1920x1080",
            "--max-lines",
            "25",
            "--seed",
            "7",
            "--recursive",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.root, Some(PathBuf::from("src")));
                assert_eq!(args.out, Some(PathBuf::from("walls")));
                assert_eq!(args.size, Some(ScreenSize::new(1920, 1080)));
                assert_eq!(args.max_lines, Some(25));
                assert_eq!(args.seed, Some(7));
                assert!(args.recursive);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_size() {
        assert!(Cli::try_parse_from(["codepaper", "generate", "--size", "big"]).is_err());
    }

    #[test]
    fn test_cli_parses_check_paths() {
        let cli = Cli::try_parse_from(["codepaper", "check", "a.rs", "b.py"]).unwrap();
        match cli.command {
            Commands::Check(args) => assert_eq!(args.paths.len(), 2),
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_check_requires_a_path() {
        assert!(Cli::try_parse_from(["codepaper", "check"]).is_err());
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from(["codepaper", "generate", "--config", "/tmp/c.jsonc", "-v"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.jsonc")));
        assert!(cli.verbose);
    }
}
