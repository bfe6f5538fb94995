//! Turn extracted flags into findings using the knowledge base.

use crate::compat_db::{CompatDb, Support};
use crate::models::platform::TargetSet;
use crate::models::Finding;

/// Check each flag of `command` against `targets`, in flag order.
///
/// Unmodeled pairs are portable by omission. A modeled pair yields a
/// finding only when at least one target lacks it. The returned findings
/// have no file provenance yet.
pub fn check_compat<S: AsRef<str>>(
    command: &str,
    flags: &[S],
    targets: &TargetSet,
    db: &CompatDb,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    for flag in flags.iter().map(|f| f.as_ref()) {
        let known = match db.support(command, flag) {
            Support::Known(set) => set,
            Support::Unknown => continue,
        };
        let unsupported: Vec<_> = targets.difference(known).copied().collect();
        if unsupported.is_empty() {
            continue;
        }
        findings.push(Finding {
            file: String::new(),
            line: 0,
            command: command.to_string(),
            flag: flag.to_string(),
            supported: targets.intersection(known).copied().collect(),
            unsupported,
            fix: db.fix_for(command, flag).to_string(),
        });
    }
    findings
}
