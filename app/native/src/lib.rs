//! Codepaper - render the source files of a project as wallpapers.
//!
//! Each eligible source file becomes a screen-sized PNG: a header banner with
//! the file's icon and path above a syntax-highlighted window of its lines.
//!
//! The library exposes the rendering pipeline; the `codepaper` binary wraps it
//! in a CLI.

// Core modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod schema;

// Rendering pipeline
pub mod eligibility;
pub mod generator;
pub mod highlight;
pub mod platform;
pub mod theme;
pub mod wallpaper;

pub use error::{CodepaperError, Result};
