//! Platform helpers for Codepaper.
//!
//! - [`path`] - Tilde expansion and config-relative path resolution

pub mod path;
