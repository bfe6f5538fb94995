//! Supporting helpers for user-facing diagnostics on stderr.

use owo_colors::OwoColorize;

fn stderr_colors() -> bool {
    use std::io::IsTerminal;
    std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
}

/// `error:` prefix, red when stderr is a terminal.
pub fn error_prefix() -> String {
    if stderr_colors() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// `note:` prefix, blue when stderr is a terminal.
pub fn note_prefix() -> String {
    if stderr_colors() {
        "note:".blue().bold().to_string()
    } else {
        "note:".to_string()
    }
}
