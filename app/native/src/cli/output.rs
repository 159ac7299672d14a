//! CLI output formatting utilities.

use colored::Colorize;

use crate::generator::Progress;

/// Formats a batch progress event, or `None` for events that are not shown.
#[must_use]
pub fn format_progress(progress: &Progress) -> Option<String> {
    match progress {
        Progress::Rendering(path) => Some(format!("{} {}", "Rendering".cyan(), path.display())),
        Progress::LexerMissing(name) => Some(format!("Failed to find lexer for {name}").yellow().to_string()),
        Progress::Written(_) => None,
        Progress::Done => Some("Done".green().bold().to_string()),
    }
}

/// Prints a batch progress event to stdout.
pub fn print_progress(progress: &Progress) {
    if let Some(line) = format_progress(progress) {
        println!("{line}");
    }
}

/// Shortens a path-like string to at most `max_chars` characters, keeping its
/// end (the file name) and marking the cut with a leading ellipsis.
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();

    if char_count <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        "…".to_string()
    } else {
        let skip = char_count - (max_chars - 1);
        let tail: String = s.chars().skip(skip).collect();
        format!("…{tail}")
    }
}

/// Formats a boolean as a colored mark.
#[must_use]
pub fn format_bool(value: bool) -> String {
    if value {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}
