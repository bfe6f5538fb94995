//! Shellport CLI binary entry point.
//! Resolves configuration, runs the scan, and prints results.

use clap::Parser;
use shellport::cli::{Cli, Commands, FormatArg};
use shellport::compat_db::CompatDb;
use shellport::scan::{scan, ScanOptions};
use shellport::{config, output, utils};
use tracing_subscriber::EnvFilter;

/// Exit status when the configuration is invalid and nothing was scanned.
const EXIT_CONFIG: i32 = 2;

fn init_logging(verbose: bool) {
    let default = if verbose { "shellport=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("SHELLPORT_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", utils::error_prefix(), msg);
    std::process::exit(EXIT_CONFIG);
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Commands::Scan {
            path,
            target,
            format,
            config: config_file,
            no_color,
        } => {
            let eff = config::resolve_effective(
                path.as_deref(),
                target.as_deref(),
                format.map(FormatArg::as_str),
                config_file.as_deref(),
            )
            .unwrap_or_else(|e| fail(e));
            let db = CompatDb::with_overrides(&eff.rules).unwrap_or_else(|e| fail(e));
            if !eff.root.exists() {
                eprintln!(
                    "{} {} does not exist; nothing to scan.",
                    utils::note_prefix(),
                    eff.root.display()
                );
            }
            let options = ScanOptions {
                exclude: eff.exclude.clone(),
            };
            let findings = scan(&eff.root, &eff.targets, &db, &options);
            if let Err(e) = output::print_scan(&findings, eff.format, output::use_colors(no_color))
            {
                fail(e);
            }
            if !findings.is_empty() {
                std::process::exit(1);
            }
        }
    }
}
