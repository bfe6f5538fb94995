//! Output rendering for scan results.
//!
//! Supports `text` (default) and `json`. Text output is two lines per
//! finding: a location/summary line and an indented fix line. JSON output
//! is the ordered finding array as-is.

use crate::config::OutputFormat;
use crate::models::{Finding, Severity};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Printed by the text renderer when a scan finds nothing.
pub const NO_ISSUES: &str = "No portability issues found.";

/// Colors only for an interactive stdout, and never when `NO_COLOR` is set.
pub fn use_colors(no_color: bool) -> bool {
    !no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Print scan results in the requested format.
pub fn print_scan(
    findings: &[Finding],
    format: OutputFormat,
    color: bool,
) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Json => println!("{}", render_json(findings)?),
        OutputFormat::Text => println!("{}", render_text(findings, color)),
    }
    Ok(())
}

/// Render findings as text, without a trailing newline.
pub fn render_text(findings: &[Finding], color: bool) -> String {
    if findings.is_empty() {
        return NO_ISSUES.to_string();
    }
    let mut out: Vec<String> = Vec::with_capacity(findings.len() * 2);
    for f in findings {
        let sev = f.severity();
        let label = format!("[{}]", sev.label());
        let label = match (color, sev) {
            (false, _) => label,
            (true, Severity::Error) => label.red().bold().to_string(),
            (true, Severity::Warning) => label.yellow().bold().to_string(),
        };
        let location = format!("{}:{}", f.file, f.line);
        let location = if color {
            location.bold().to_string()
        } else {
            location
        };
        let missing: Vec<&str> = f.unsupported.iter().map(|p| p.as_str()).collect();
        out.push(format!(
            "{}  {}  `{} {}`  missing on: {}",
            location,
            label,
            f.command,
            f.flag,
            missing.join(", ")
        ));
        let fix = if color {
            f.fix.clone().cyan().to_string()
        } else {
            f.fix.clone()
        };
        out.push(format!("  -> {}", fix));
    }
    out.join("\n")
}

/// Pretty JSON array of findings (pure) for printing and tests.
pub fn render_json(findings: &[Finding]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(findings)
}
