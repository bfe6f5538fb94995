//! Target platforms a scan evaluates portability against.
//!
//! The set is closed: `alpine` (musl/busybox), `linux` (GNU coreutils)
//! and `macos` (BSD userland). Variants are declared in name order so the
//! derived `Ord` yields the sorted-by-name output findings rely on.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// One target platform.
pub enum Platform {
    Alpine,
    Linux,
    Macos,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Alpine, Platform::Linux, Platform::Macos];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Alpine => "alpine",
            Platform::Linux => "linux",
            Platform::Macos => "macos",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alpine" => Ok(Platform::Alpine),
            "linux" => Ok(Platform::Linux),
            "macos" => Ok(Platform::Macos),
            _ => Err(ConfigError::UnknownPlatforms {
                invalid: vec![s.to_string()],
                valid: valid_names(),
            }),
        }
    }
}

/// Ordered set of platforms; iteration is always by name.
pub type TargetSet = BTreeSet<Platform>;

/// Every known platform.
pub fn all_platforms() -> TargetSet {
    Platform::ALL.into_iter().collect()
}

/// Parse platform names, collecting every unknown name into one error.
///
/// Names are trimmed and empty entries ignored, so `"linux, macos,"` is
/// accepted. An input with no names at all is rejected as well.
pub fn parse_platforms<S: AsRef<str>>(names: &[S]) -> Result<TargetSet, ConfigError> {
    let mut set = TargetSet::new();
    let mut invalid: BTreeSet<String> = BTreeSet::new();
    for name in names.iter().map(|n| n.as_ref().trim()).filter(|n| !n.is_empty()) {
        if let Ok(p) = name.parse::<Platform>() {
            set.insert(p);
        } else {
            invalid.insert(name.to_string());
        }
    }
    if !invalid.is_empty() {
        return Err(ConfigError::UnknownPlatforms {
            invalid: invalid.into_iter().collect(),
            valid: valid_names(),
        });
    }
    if set.is_empty() {
        return Err(ConfigError::NoTargets {
            valid: valid_names(),
        });
    }
    Ok(set)
}

/// Parse a comma-separated list such as `linux,macos`.
pub fn parse_target_list(list: &str) -> Result<TargetSet, ConfigError> {
    let names: Vec<&str> = list.split(',').collect();
    parse_platforms(&names)
}

fn valid_names() -> Vec<String> {
    Platform::ALL.iter().map(|p| p.to_string()).collect()
}
