//! Compiled-in compatibility knowledge base.
//!
//! Maps command -> flag -> platforms where the flag behaves as expected,
//! plus optional portable-rewrite suggestions. The table is a denylist by
//! presence: a pair that is not listed has no portability data and is
//! treated as portable.

use crate::error::ConfigError;
use crate::models::platform::{parse_platforms, Platform, TargetSet};
use crate::models::rules::RuleOverride;
use std::collections::HashMap;

use Platform::{Alpine as A, Linux as L, Macos as M};

/// Advice used when a flagged pair has no dedicated suggestion.
pub const DEFAULT_FIX: &str = "Check POSIX spec for portable alternative";

pub(crate) const FLAGS: &[(&str, &str, &[Platform])] = &[
    ("sed", "-i", &[L, A]),
    ("sed", "-r", &[L, A]),
    ("sed", "-E", &[L, M, A]),
    ("grep", "-P", &[L]),
    ("grep", "-E", &[L, M, A]),
    ("grep", "-o", &[L, M, A]),
    ("grep", "-r", &[L, M]),
    ("grep", "-R", &[L, M, A]),
    ("grep", "-w", &[L, M, A]),
    ("readlink", "-f", &[L, A]),
    ("readlink", "-e", &[L, A]),
    ("date", "-d", &[L, A]),
    ("date", "-j", &[M]),
    ("date", "-I", &[L, A]),
    ("mktemp", "-d", &[L, M, A]),
    ("mktemp", "--tmpdir", &[L, A]),
    ("stat", "-c", &[L, A]),
    ("stat", "-f", &[M]),
    ("find", "-regextype", &[L, A]),
    ("find", "-maxdepth", &[L, M, A]),
    ("find", "-print0", &[L, M, A]),
    ("sort", "-V", &[L, A]),
    ("sort", "-h", &[L, A]),
    ("sort", "-R", &[L]),
    ("tar", "--wildcards", &[L, A]),
    ("tar", "--exclude", &[L, M, A]),
    ("xargs", "-r", &[L, A]),
    ("xargs", "-0", &[L, M, A]),
    ("cp", "--reflink", &[L]),
    ("cp", "-a", &[L, M, A]),
    ("ln", "-r", &[L, A]),
    ("install", "-D", &[L, A]),
];

const FIXES: &[(&str, &str, &str)] = &[
    ("sed", "-i", "sed -i.bak 's/.../' f && rm f.bak  (portable across GNU & BSD)"),
    ("sed", "-r", "Use sed -E instead (portable extended regex)"),
    ("grep", "-P", "Use grep -E (ERE) or install ripgrep for PCRE"),
    ("readlink", "-f", "Use: cd $(dirname $0) && pwd -P  (POSIX alternative)"),
    ("readlink", "-e", "Use: cd $(dirname $0) && pwd -P  (POSIX alternative)"),
    ("date", "-d", "Use python3/perl for portable date arithmetic"),
    ("date", "-j", "Use python3/perl for portable date arithmetic"),
    ("date", "-I", "Use: date '+%Y-%m-%d'  (POSIX format string)"),
    ("stat", "-c", "Write a wrapper: stat -c on Linux, stat -f on macOS"),
    ("stat", "-f", "Write a wrapper: stat -c on Linux, stat -f on macOS"),
    ("sort", "-V", "Use sort -t. -k1,1n -k2,2n for version-like sorting"),
    ("sort", "-R", "Use: awk 'BEGIN{srand()}{print rand(),$0}' | sort -n | cut -d' ' -f2-"),
    ("xargs", "-r", "Guard with: if [ -n \"$input\" ]; then ... fi"),
    ("cp", "--reflink", "Use plain cp -a (loses reflink optimization)"),
    ("ln", "-r", "Compute relative path manually with realpath"),
    ("install", "-D", "mkdir -p $(dirname dest) && cp src dest"),
    ("find", "-regextype", "Use -name with glob patterns instead"),
    ("tar", "--wildcards", "Omit --wildcards (default on BSD tar)"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of looking up one `(command, flag)` pair.
pub enum Support<'a> {
    /// The pair is modeled; the flag works on exactly these platforms.
    Known(&'a TargetSet),
    /// No data. Never reported.
    Unknown,
}

#[derive(Debug, Clone, Default)]
/// Immutable lookup tables shared by the extractor and the checker.
pub struct CompatDb {
    flags: HashMap<String, HashMap<String, TargetSet>>,
    fixes: HashMap<(String, String), String>,
}

impl CompatDb {
    /// The compiled-in GNU / BSD / busybox table.
    pub fn builtin() -> Self {
        let mut db = CompatDb::default();
        for (cmd, flag, platforms) in FLAGS {
            db.insert(cmd, flag, platforms.iter().copied().collect());
        }
        for (cmd, flag, fix) in FIXES {
            db.fixes
                .insert((cmd.to_string(), flag.to_string()), fix.to_string());
        }
        db
    }

    /// The builtin table with user overrides applied in order.
    pub fn with_overrides(overrides: &[RuleOverride]) -> Result<Self, ConfigError> {
        let mut db = Self::builtin();
        db.apply_overrides(overrides)?;
        Ok(db)
    }

    /// Replace or add entries. A rule with an unknown platform name fails
    /// the whole batch before anything is changed.
    pub fn apply_overrides(&mut self, overrides: &[RuleOverride]) -> Result<(), ConfigError> {
        let mut parsed = Vec::with_capacity(overrides.len());
        for rule in overrides {
            let set = parse_override_platforms(rule)?;
            parsed.push((rule, set));
        }
        for (rule, set) in parsed {
            self.insert(&rule.command, &rule.flag, set);
            if let Some(fix) = rule.fix.as_ref() {
                self.fixes
                    .insert((rule.command.clone(), rule.flag.clone()), fix.clone());
            }
        }
        Ok(())
    }

    fn insert(&mut self, cmd: &str, flag: &str, platforms: TargetSet) {
        self.flags
            .entry(cmd.to_string())
            .or_default()
            .insert(flag.to_string(), platforms);
    }

    /// Whether any flag of `cmd` is modeled.
    pub fn knows_command(&self, cmd: &str) -> bool {
        self.flags.contains_key(cmd)
    }

    pub fn support(&self, cmd: &str, flag: &str) -> Support<'_> {
        match self.flags.get(cmd).and_then(|m| m.get(flag)) {
            Some(set) => Support::Known(set),
            None => Support::Unknown,
        }
    }

    /// Suggested rewrite, or the generic advice.
    pub fn fix_for(&self, cmd: &str, flag: &str) -> &str {
        self.fixes
            .get(&(cmd.to_string(), flag.to_string()))
            .map(String::as_str)
            .unwrap_or(DEFAULT_FIX)
    }
}

/// An override may legitimately list no platforms (flag works nowhere),
/// so only unknown names are rejected here.
fn parse_override_platforms(rule: &RuleOverride) -> Result<TargetSet, ConfigError> {
    if rule.platforms.iter().all(|p| p.trim().is_empty()) {
        return Ok(TargetSet::new());
    }
    parse_platforms(&rule.platforms).map_err(|e| ConfigError::Rule {
        command: rule.command.clone(),
        flag: rule.flag.clone(),
        source: Box::new(e),
    })
}
