//! Recover shell-like lines from host files.
//!
//! Dispatch is purely by file name or extension, never by content. Each
//! file kind has its own extraction rule; see [`FileKind`]. The YAML rule
//! is a heuristic state machine and does not track indentation, so deeply
//! nested or irregularly indented `run:` blocks can be misclassified.
//!
//! Line numbers count every line break, including a bare `\r`, vertical
//! tab, form feed and the Unicode line/paragraph separators, not only
//! `\n` and `\r\n`.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// `run:` alone, optionally with a block scalar indicator (`|`, `>-`, ...).
static RUN_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^run\s*:\s*(?:[|>][-+]?)?\s*$").unwrap());

/// Start of a new mapping entry such as `name:` or `working-directory:`.
static MAPPING_KEY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w[\w-]*:").unwrap());

const SHELL_EXTS: [&str; 3] = ["sh", "bash", "zsh"];
const YAML_EXTS: [&str; 2] = ["yml", "yaml"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How shell lines are found inside a file.
pub enum FileKind {
    /// `.sh`, `.bash`, `.zsh`: every non-empty line.
    Shell,
    /// `Dockerfile`: `RUN ` instructions.
    Dockerfile,
    /// `Makefile`, `Justfile`, `*.mk`: tab-indented recipe lines.
    Recipe,
    /// `.yml`, `.yaml`: bodies of `run:` blocks.
    Yaml,
}

impl FileKind {
    /// Classify by base name first, then by extension.
    pub fn detect(path: &Path) -> Option<FileKind> {
        let name = path.file_name()?.to_str()?;
        match name {
            "Dockerfile" => return Some(FileKind::Dockerfile),
            "Makefile" | "Justfile" => return Some(FileKind::Recipe),
            _ => {}
        }
        let ext = path.extension()?.to_str()?;
        if SHELL_EXTS.contains(&ext) {
            Some(FileKind::Shell)
        } else if YAML_EXTS.contains(&ext) {
            Some(FileKind::Yaml)
        } else if ext == "mk" {
            Some(FileKind::Recipe)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One candidate shell line with its 1-based position in the file.
pub struct RawLine<'a> {
    pub file: &'a Path,
    pub line: usize,
    pub text: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Scope tracking for YAML files.
pub enum YamlState {
    Outside,
    InRunBlock,
}

impl YamlState {
    /// Advance on one trimmed line; returns the new state and whether the
    /// line is a shell candidate.
    pub fn step(self, trimmed: &str) -> (YamlState, bool) {
        if RUN_KEY.is_match(trimmed) {
            return (YamlState::InRunBlock, false);
        }
        let is_key = MAPPING_KEY.is_match(trimmed);
        match self {
            YamlState::InRunBlock if !trimmed.is_empty() && !is_key => {
                (YamlState::InRunBlock, true)
            }
            _ if is_key => (YamlState::Outside, false),
            state => (state, false),
        }
    }
}

/// Splits text at any line break; `\r\n` counts as one.
struct LineBreaks<'a> {
    rest: &'a str,
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

impl<'a> Iterator for LineBreaks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let text = self.rest;
        let Some(at) = text.find(is_line_break) else {
            self.rest = "";
            return Some(text);
        };
        let tail = &text[at..];
        let width = if tail.starts_with("\r\n") {
            2
        } else {
            tail.chars().next().map_or(1, char::len_utf8)
        };
        self.rest = &tail[width..];
        Some(&text[..at])
    }
}

/// Lazy, single-pass iterator over the shell lines of one file.
pub struct Classified<'a> {
    file: &'a Path,
    kind: Option<FileKind>,
    lines: LineBreaks<'a>,
    line_no: usize,
    yaml: YamlState,
}

/// Yield the shell-like lines of `text`, interpreted according to the
/// kind detected from `path`. Unrecognized files yield nothing.
pub fn classify<'a>(path: &'a Path, text: &'a str) -> Classified<'a> {
    Classified {
        file: path,
        kind: FileKind::detect(path),
        lines: LineBreaks { rest: text },
        line_no: 0,
        yaml: YamlState::Outside,
    }
}

fn candidate<'a>(kind: FileKind, yaml: &mut YamlState, line: &'a str) -> Option<&'a str> {
    match kind {
        FileKind::Shell => (!line.trim().is_empty()).then_some(line),
        FileKind::Dockerfile => {
            let s = line.trim();
            match s.get(..4) {
                Some(head) if head.eq_ignore_ascii_case("RUN ") => Some(&s[4..]),
                _ => None,
            }
        }
        FileKind::Recipe => line.starts_with('\t').then(|| line.trim()),
        FileKind::Yaml => {
            let s = line.trim();
            let (next, take) = yaml.step(s);
            *yaml = next;
            take.then_some(s)
        }
    }
}

impl<'a> Iterator for Classified<'a> {
    type Item = RawLine<'a>;

    fn next(&mut self) -> Option<RawLine<'a>> {
        let kind = self.kind?;
        for line in self.lines.by_ref() {
            self.line_no += 1;
            if let Some(text) = candidate(kind, &mut self.yaml, line) {
                return Some(RawLine {
                    file: self.file,
                    line: self.line_no,
                    text,
                });
            }
        }
        None
    }
}
