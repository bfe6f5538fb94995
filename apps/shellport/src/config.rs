//! Configuration discovery and effective settings resolution.
//!
//! Shellport reads `shellport.toml|yaml|yml` from the scan root (or the
//! closest ancestor, stopping at a `.git` directory) and merges it with CLI
//! flags to produce an `Effective` config.
//! Defaults:
//! - `targets`: every known platform
//! - `format`: `text`
//! - `exclude`: none
//! - `rules`: none (builtin knowledge base only)
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::ConfigError;
use crate::models::platform::{all_platforms, parse_platforms, parse_target_list, TargetSet};
use crate::models::rules::RuleOverride;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

const CONFIG_NAMES: [&str; 3] = ["shellport.toml", "shellport.yaml", "shellport.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `shellport.toml|yaml`.
pub struct ShellportConfig {
    pub targets: Option<Vec<String>>,
    pub format: Option<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub rules: Vec<RuleOverride>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by `scan` after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub targets: TargetSet,
    pub format: OutputFormat,
    pub exclude: Vec<glob::Pattern>,
    pub rules: Vec<RuleOverride>,
}

/// Walk upward from `start` looking for a config file.
///
/// Stops at the first directory holding a config file, or at a directory
/// containing `.git` (the repository root), whichever comes first.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut cur = start;
    loop {
        for name in CONFIG_NAMES {
            let p = cur.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
        if cur.join(".git").exists() {
            return None;
        }
        cur = cur.parent()?;
    }
}

/// Parse a config file; the extension selects TOML or YAML.
pub fn load_config(path: &Path) -> Result<ShellportConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let parsed = if is_yaml {
        serde_yaml::from_str::<ShellportConfig>(&s).map_err(|e| e.to_string())
    } else {
        toml::from_str::<ShellportConfig>(&s).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Resolve `Effective` by merging CLI flags, the config file, and defaults.
///
/// `cli_config` names a config file explicitly and disables discovery.
pub fn resolve_effective(
    cli_path: Option<&str>,
    cli_targets: Option<&str>,
    cli_format: Option<&str>,
    cli_config: Option<&str>,
) -> Result<Effective, ConfigError> {
    let root = PathBuf::from(cli_path.unwrap_or("."));
    let config_path = match cli_config {
        Some(p) => Some(PathBuf::from(p)),
        None => {
            let start = fs::canonicalize(&root).unwrap_or_else(|_| root.clone());
            find_config(&start)
        }
    };
    let cfg = match config_path.as_ref() {
        Some(p) => {
            debug!(config = %p.display(), "loading config");
            load_config(p)?
        }
        None => ShellportConfig::default(),
    };

    let targets = match (cli_targets, cfg.targets.as_ref()) {
        (Some(list), _) => parse_target_list(list)?,
        (None, Some(names)) => parse_platforms(names)?,
        (None, None) => all_platforms(),
    };

    let format = match (cli_format, cfg.format.as_deref()) {
        (Some(f), _) | (None, Some(f)) => f.parse::<OutputFormat>()?,
        (None, None) => OutputFormat::default(),
    };

    let exclude = cfg
        .exclude
        .iter()
        .map(|pattern| {
            glob::Pattern::new(pattern).map_err(|source| ConfigError::Exclude {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Effective {
        root,
        config_path,
        targets,
        format,
        exclude,
        rules: cfg.rules,
    })
}
