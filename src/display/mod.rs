//! Display formatting for terminal output
//!
//! Formats windows, run summaries and settings for the CLI commands.

pub mod settings;
pub mod summary;

pub use settings::format_settings;
pub use summary::{format_outcome, format_summary, format_window};

/// Truncate a string to a maximum length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Right-align text in a field of given width
pub fn right_align(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}

/// Left-align text in a field of given width
pub fn left_align(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}
