//! Shared helper functions for CLI commands

use std::io::{self, IsTerminal};

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Counts characters, not bytes, so multi-byte names are cut safely.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Flatten a cell for one-line-per-row formats
pub fn single_line(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}

/// Whether prompts can be shown (stdin and stderr are terminals)
pub fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}
