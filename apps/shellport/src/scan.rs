//! Scan orchestration: walk a tree, classify each eligible file, and
//! collect findings with file/line provenance.
//!
//! Files are checked in parallel; output order is always path
//! (component-wise) then line, independent of completion order.

use crate::check::check_compat;
use crate::classify::{classify, FileKind};
use crate::compat_db::CompatDb;
use crate::extract::extract_commands;
use crate::models::platform::TargetSet;
use crate::models::Finding;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Version-control metadata directories never descended into.
const VCS_DIRS: [&str; 3] = [".git", ".hg", ".svn"];

#[derive(Debug, Clone, Default)]
/// Knobs beyond the root and target set.
pub struct ScanOptions {
    /// Globs matched against root-relative paths; matches are skipped.
    pub exclude: Vec<glob::Pattern>,
}

/// Scan `root` and return every finding, ordered by file then line.
///
/// A missing or empty tree yields no findings. Unreadable files are
/// skipped; invalid UTF-8 is replaced rather than rejected.
pub fn scan(
    root: &Path,
    targets: &TargetSet,
    db: &CompatDb,
    options: &ScanOptions,
) -> Vec<Finding> {
    let files = collect_files(root, &options.exclude);
    let mut findings: Vec<Finding> = files
        .par_iter()
        .map(|(abs, rel)| scan_file(abs, rel, targets, db))
        .flatten()
        .collect();
    // Stable: findings on one line keep their extraction order
    findings.sort_by(|a, b| {
        Path::new(&a.file)
            .cmp(Path::new(&b.file))
            .then(a.line.cmp(&b.line))
    });
    info!(
        files = files.len(),
        findings = findings.len(),
        "scan complete"
    );
    findings
}

/// Eligible regular files under `root` as `(absolute, relative)` pairs,
/// sorted by relative path.
///
/// Symlinked directories are not descended into, so aliases and cycles
/// cannot repeat a file. A symlink to a regular file is still scanned.
pub fn collect_files(root: &Path, exclude: &[glob::Pattern]) -> Vec<(PathBuf, PathBuf)> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_vcs_dir(e));
    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!(root = %root.display(), error = %e, "skipping unwalkable entry");
                continue;
            }
        };
        let regular = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !regular {
            continue;
        }
        let abs = entry.into_path();
        let Some(rel) = pathdiff::diff_paths(&abs, root) else {
            continue;
        };
        if FileKind::detect(&rel).is_none() || exclude.iter().any(|p| p.matches_path(&rel)) {
            continue;
        }
        files.push((abs, rel));
    }
    files.sort_by(|a, b| a.1.cmp(&b.1));
    files
}

fn is_vcs_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && VCS_DIRS.iter().any(|v| entry.file_name() == *v)
}

/// Findings for one file. Read failures produce none.
fn scan_file(abs: &Path, rel: &Path, targets: &TargetSet, db: &CompatDb) -> Vec<Finding> {
    let bytes = match fs::read(abs) {
        Ok(b) => b,
        Err(e) => {
            debug!(file = %abs.display(), error = %e, "skipping unreadable file");
            return Vec::new();
        }
    };
    let text = String::from_utf8_lossy(&bytes);
    let file = rel.to_string_lossy();
    let mut out = Vec::new();
    for raw in classify(rel, &text) {
        for inv in extract_commands(raw.text, db) {
            out.extend(
                check_compat(&inv.command, &inv.flags, targets, db)
                    .into_iter()
                    .map(|f| f.located(&file, raw.line)),
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::platform::{all_platforms, Platform};
    use tempfile::tempdir;

    fn linux_macos() -> TargetSet {
        [Platform::Linux, Platform::Macos].into_iter().collect()
    }

    fn run(root: &Path, targets: &TargetSet) -> Vec<Finding> {
        scan(root, targets, &CompatDb::builtin(), &ScanOptions::default())
    }

    #[test]
    fn test_scan_shell_script() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("test.sh"),
            "#!/bin/bash\ngrep -P 'foo' bar\nreadlink -f /tmp\n",
        )
        .unwrap();
        let res = run(dir.path(), &all_platforms());
        assert_eq!(res.len(), 2);
        assert_eq!((res[0].command.as_str(), res[0].line), ("grep", 2));
        assert_eq!((res[1].command.as_str(), res[1].line), ("readlink", 3));
        assert_eq!(res[0].file, "test.sh");
    }

    #[test]
    fn test_scan_dockerfile() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("Dockerfile"),
            "FROM ubuntu\nRUN sed -i 's/a/b/' /etc/foo\nCOPY . .\n",
        )
        .unwrap();
        let res = run(dir.path(), &linux_macos());
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].command, "sed");
        assert_eq!(res[0].flag, "-i");
        assert_eq!(res[0].line, 2);
        assert_eq!(res[0].unsupported, vec![Platform::Macos]);
    }

    #[test]
    fn test_scan_makefile_and_mk_fragment() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("Makefile"),
            "build:\n\tstat -c '%s' file\n\techo done\n",
        )
        .unwrap();
        fs::write(dir.path().join("rules.mk"), "x:\n\tsort -V v\n").unwrap();
        let res = run(dir.path(), &linux_macos());
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].file, "Makefile");
        assert_eq!(res[0].command, "stat");
        assert_eq!(res[1].file, "rules.mk");
        assert_eq!(res[1].command, "sort");
    }

    #[test]
    fn test_scan_yaml_run_block() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("ci.yml"),
            "steps:\n  - name: test\n    run: |\n      grep -P 'x' f\n",
        )
        .unwrap();
        let res = run(dir.path(), &linux_macos());
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].command, "grep");
        assert_eq!(res[0].flag, "-P");
        assert_eq!(res[0].line, 4);
    }

    #[test]
    fn test_scan_empty_and_missing_trees() {
        let dir = tempdir().unwrap();
        assert!(run(dir.path(), &all_platforms()).is_empty());
        assert!(run(&dir.path().join("nope"), &all_platforms()).is_empty());
    }

    #[test]
    fn test_scan_clean_repo_no_issues() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("test.sh"),
            "#!/bin/bash\necho hello\nls -la\ngrep -E 'foo' bar\n",
        )
        .unwrap();
        assert!(run(dir.path(), &all_platforms()).is_empty());
    }

    #[test]
    fn test_scan_orders_by_path_then_line_and_skips_vcs_and_other_files() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("b/.git/hooks")).unwrap();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("b/.git/hooks/pre-commit.sh"), "sed -i x f\n").unwrap();
        fs::write(root.join("b/deploy.sh"), "sort -V a\nsed -i x f\n").unwrap();
        fs::write(root.join("a/z.sh"), "xargs -r echo\n").unwrap();
        fs::write(root.join("notes.txt"), "sed -i x f\n").unwrap();
        let res = run(root, &all_platforms());
        let got: Vec<(String, usize)> = res.iter().map(|f| (f.file.clone(), f.line)).collect();
        let a = Path::new("a").join("z.sh").to_string_lossy().to_string();
        let b = Path::new("b").join("deploy.sh").to_string_lossy().to_string();
        assert_eq!(got, vec![(a, 1), (b.clone(), 1), (b, 2)]);
    }

    #[test]
    fn test_scan_repeats_are_not_deduplicated() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("t.sh"), "sed -i a f\nsed -i a f; sed -i b g\n").unwrap();
        let res = run(dir.path(), &linux_macos());
        let lines: Vec<usize> = res.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![1, 2, 2]);
    }

    #[test]
    fn test_scan_tolerates_invalid_utf8() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("t.sh"), b"echo \xff\xfe\nreadlink -f x\n").unwrap();
        let res = run(dir.path(), &linux_macos());
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].line, 2);
    }

    #[test]
    fn test_scan_honors_exclude_patterns() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("vendor/lib")).unwrap();
        fs::write(root.join("vendor/lib/x.sh"), "sed -i a f\n").unwrap();
        fs::write(root.join("y.sh"), "sed -i a f\n").unwrap();
        let opts = ScanOptions {
            exclude: vec![glob::Pattern::new("vendor/**").unwrap()],
        };
        let res = scan(root, &linux_macos(), &CompatDb::builtin(), &opts);
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].file, "y.sh");
    }

    #[test]
    fn test_scan_is_idempotent() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        for (i, name) in ["a.sh", "b.bash", "c.zsh", "d.yaml"].iter().enumerate() {
            let body = if name.ends_with("yaml") {
                "run: |\n  sort -R x\n".to_string()
            } else {
                format!("date -d now\n{}\ngrep -P x | sort -V\n", "echo x;".repeat(i))
            };
            fs::write(root.join(name), body).unwrap();
        }
        let first = serde_json::to_string(&run(root, &all_platforms())).unwrap();
        let second = serde_json::to_string(&run(root, &all_platforms())).unwrap();
        assert_eq!(first, second);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_does_not_follow_directory_symlink_cycles() {
        use std::os::unix::fs::symlink;
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("scripts")).unwrap();
        fs::write(root.join("scripts/a.sh"), "sed -i x f\n").unwrap();
        symlink("..", root.join("scripts/up")).unwrap();
        symlink("..", root.join("scripts/back")).unwrap();
        let res = run(root, &linux_macos());
        assert_eq!(res.len(), 1);
        assert_eq!(Path::new(&res[0].file), Path::new("scripts").join("a.sh"));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_reports_aliased_directory_once() {
        use std::os::unix::fs::symlink;
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("releases/v2")).unwrap();
        fs::write(root.join("releases/v2/a.sh"), "sed -i x f\n").unwrap();
        symlink("releases/v2", root.join("current")).unwrap();
        let res = run(root, &linux_macos());
        assert_eq!(res.len(), 1);
        assert_eq!(Path::new(&res[0].file), Path::new("releases/v2/a.sh"));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_includes_symlinked_file() {
        use std::os::unix::fs::symlink;
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("real.txt"), "sed -i x f\n").unwrap();
        symlink("real.txt", root.join("link.sh")).unwrap();
        let res = run(root, &linux_macos());
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].file, "link.sh");
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_unreadable_file_and_keeps_going() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        let root = dir.path();
        let locked = root.join("a_locked.sh");
        fs::write(&locked, "sed -i x f\n").unwrap();
        fs::write(root.join("b_open.sh"), "readlink -f x\n").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        // Privileged users can still read mode-000 files
        let denied = fs::read(&locked).is_err();

        let res = run(root, &linux_macos());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

        let files: Vec<&str> = res.iter().map(|f| f.file.as_str()).collect();
        assert!(files.contains(&"b_open.sh"));
        if denied {
            assert_eq!(files, vec!["b_open.sh"]);
        } else {
            assert_eq!(files, vec!["a_locked.sh", "b_open.sh"]);
        }
    }
}
