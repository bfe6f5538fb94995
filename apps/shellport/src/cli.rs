//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "shellport",
    version,
    about = "Shell command portability analyzer",
    long_about = "Shellport scans shell scripts, Dockerfiles, Makefiles/Justfiles and YAML CI files for command-line flags that do not work on every target platform (linux, macos, alpine).\n\nConfiguration precedence: CLI > shellport.toml > defaults.",
    after_help = "Examples:\n  shellport scan\n  shellport scan ./infra --target linux,macos\n  shellport scan --format json > findings.json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(short, long, global = true, action = clap::ArgAction::SetTrue, help = "Enable debug logging on stderr")]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a tree for non-portable flags
    #[command(
        about = "Scan for non-portable command flags",
        long_about = "Walk PATH, extract shell commands from recognized files, and report flags unsupported on any target platform. Exits 1 when findings exist, 2 on configuration errors.",
        after_help = "Examples:\n  shellport scan . --target linux,alpine\n  shellport scan --format json"
    )]
    Scan {
        #[arg(help = "Directory to scan (default: current dir)")]
        path: Option<String>,
        #[arg(long, help = "Comma-separated platforms: linux,macos,alpine (default: all)")]
        target: Option<String>,
        #[arg(long, value_enum, help = "Output format: text|json (default: text)")]
        format: Option<FormatArg>,
        #[arg(long, help = "Config file to use instead of discovering shellport.toml")]
        config: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Disable colored output")]
        no_color: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl FormatArg {
    pub fn as_str(self) -> &'static str {
        match self {
            FormatArg::Text => "text",
            FormatArg::Json => "json",
        }
    }
}
