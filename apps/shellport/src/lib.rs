//! Shellport core library.
//!
//! Scans a project tree for shell command invocations and reports
//! command-line flags that are not portable across the requested target
//! platforms, each with a suggested portable rewrite.
//!
//! High-level modules:
//! - `classify`: Recover shell-like lines from scripts, Dockerfiles,
//!   Makefiles/Justfiles and YAML `run:` blocks.
//! - `extract`: Split a line into simple commands and collect their flags.
//! - `compat_db`: Compiled-in knowledge base of flag support per platform.
//! - `check`: Turn flags into findings for a target set.
//! - `scan`: Walk a tree and aggregate findings in (file, line) order.
//! - `config`: Discovery and effective configuration resolution.
//! - `output`: Text/JSON printers.
//! - `models`: Platforms, findings and config schemas.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `error`: Configuration errors.
//! - `utils`: Supporting helpers.
pub mod check;
pub mod classify;
pub mod cli;
pub mod compat_db;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod output;
pub mod scan;
pub mod utils;
