//! Knowledge-base override schema read from `[[rules]]` in the config file.
//!
//! Each entry replaces the support set of an existing `(command, flag)`
//! pair or adds a new one. `fix` is optional; when omitted an existing fix
//! is kept and new entries fall back to the generic advice.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
/// One `(command, flag)` support entry supplied by the user.
pub struct RuleOverride {
    pub command: String,
    pub flag: String,
    /// Platform names on which the flag behaves as expected.
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub fix: Option<String>,
}
