#![allow(clippy::multiple_crate_versions)]

//! Codepaper - render the source files of a project as wallpapers.

fn main() {
    if let Err(err) = codepaper_lib::cli::run() {
        eprintln!("codepaper: {err}");
        std::process::exit(1);
    }
}
