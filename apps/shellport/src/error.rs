//! Configuration errors. These are the only failures that stop a run;
//! everything that goes wrong during a scan degrades to fewer findings.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown platform(s): {}. Valid: {}", .invalid.join(", "), .valid.join(", "))]
    UnknownPlatforms {
        invalid: Vec<String>,
        valid: Vec<String>,
    },

    #[error("no target platforms given. Valid: {}", .valid.join(", "))]
    NoTargets { valid: Vec<String> },

    #[error("unknown output format '{0}' (expected text|json)")]
    UnknownFormat(String),

    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid exclude pattern '{pattern}': {source}")]
    Exclude {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("rule override for `{command} {flag}`: {source}")]
    Rule {
        command: String,
        flag: String,
        #[source]
        source: Box<ConfigError>,
    },
}
