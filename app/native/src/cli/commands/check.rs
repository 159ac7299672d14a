//! `codepaper check`.

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::super::output;
use crate::config::LoadedConfig;
use crate::eligibility::{self, Eligibility};
use crate::error::CodepaperError;
use crate::highlight::{SyntaxRegistry, short_identifier};

/// Arguments of the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files to check.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

#[derive(Tabled)]
struct CheckRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Syntax")]
    syntax: String,
    #[tabled(rename = "Icon")]
    icon: String,
    #[tabled(rename = "Render")]
    render: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

/// Execute the check command.
pub fn execute(args: &CheckArgs, loaded: &LoadedConfig) -> Result<(), CodepaperError> {
    let syntaxes = SyntaxRegistry::load_defaults();
    let max_line_length = loaded.config.max_line_length;

    let outcomes: Vec<(&PathBuf, Eligibility)> = args
        .paths
        .iter()
        .map(|path| (path, eligibility::check(&syntaxes, path, max_line_length)))
        .collect();
    let renderable = outcomes.iter().filter(|(_, outcome)| outcome.is_renderable()).count();

    let rows: Vec<CheckRow> = outcomes
        .into_iter()
        .map(|(path, outcome)| {
            let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            CheckRow {
                file: output::truncate(&path.display().to_string(), 60),
                syntax: syntaxes
                    .find(&name)
                    .map_or_else(|| "-".dimmed().to_string(), |syntax| syntax.name.clone()),
                icon: short_identifier(&name).unwrap_or("-").to_string(),
                render: output::format_bool(outcome.is_renderable()),
                reason: match outcome {
                    Eligibility::Renderable => String::new(),
                    other => other.to_string(),
                },
            }
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..4)).with(Alignment::center()))
        .to_string();

    println!("{}", format!("Files ({renderable}/{} renderable)", args.paths.len()).bold());
    println!("{table}");
    Ok(())
}
