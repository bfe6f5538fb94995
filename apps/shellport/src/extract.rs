//! Split one shell line into simple commands and pick out their flags.
//!
//! This is not a shell parser. Comments are cut at the first `#` without
//! regard to quoting, so `echo "#x"; sed -i f` loses the `sed`. `|`, `;`
//! and `&` all act as plain segment separators with no precedence.

use crate::compat_db::CompatDb;
use crate::models::CommandInvocation;
use regex::Regex;
use std::sync::LazyLock;

static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[|;&]+").unwrap());

/// Drop a trailing `#` comment and surrounding whitespace.
pub fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(at) => line[..at].trim(),
        None => line.trim(),
    }
}

/// Extract the commands on `line` that the knowledge base models.
///
/// Segments whose command is unknown are dropped silently, as are empty
/// segments produced by consecutive separators.
pub fn extract_commands(line: &str, db: &CompatDb) -> Vec<CommandInvocation> {
    let line = strip_comment(line);
    if line.is_empty() {
        return Vec::new();
    }
    SEPARATORS
        .split(line)
        .filter_map(|segment| {
            let mut tokens = segment.split_whitespace();
            let first = tokens.next()?;
            let command = first.rsplit('/').next().unwrap_or(first);
            if !db.knows_command(command) {
                return None;
            }
            let flags = tokens
                .filter(|t| t.starts_with('-'))
                .map(str::to_string)
                .collect();
            Some(CommandInvocation::new(command, flags))
        })
        .collect()
}
