//! Shared data models for scan results and configuration schemas.

pub mod platform;
pub mod rules;

use platform::Platform;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One simple command recovered from a shell line.
pub struct CommandInvocation {
    /// Base name of the command (text after the last `/`).
    pub command: String,
    /// Flag-shaped tokens in their original order.
    pub flags: Vec<String>,
}

impl CommandInvocation {
    pub fn new(command: impl Into<String>, flags: Vec<String>) -> Self {
        Self {
            command: command.into(),
            flags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A flag that is unsupported on at least one requested platform.
///
/// `supported` and `unsupported` partition the target set and are sorted by
/// platform name; `unsupported` is never empty.
pub struct Finding {
    pub file: String,
    pub line: usize,
    pub command: String,
    pub flag: String,
    pub supported: Vec<Platform>,
    pub unsupported: Vec<Platform>,
    pub fix: String,
}

impl Finding {
    /// Attach file provenance; the checker leaves it blank.
    pub fn located(mut self, file: &str, line: usize) -> Self {
        self.file = file.to_string();
        self.line = line;
        self
    }

    /// Report-time classification; nothing stores it.
    pub fn severity(&self) -> Severity {
        if self.supported.is_empty() {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Works on some targets.
    Warning,
    /// Works on none of the targets.
    Error,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }
}
