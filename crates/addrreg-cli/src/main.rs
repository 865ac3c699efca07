//! # addrreg CLI entry point
//!
//! Parses command-line arguments, sets up logging, and dispatches to the
//! subcommand handlers. Handlers return the exit code; any error they return
//! is an operational failure and exits with 3.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use addrreg_cli::qc::{run_qc, QcArgs};
use addrreg_cli::validate::{run_validate, ValidateArgs};
use addrreg_cli::EXIT_ERROR;

/// Address register toolchain.
///
/// Validates GeoJSON address data against the address register JSON Schema
/// and runs quality-control checks over it.
#[derive(Parser, Debug)]
#[command(name = "addrreg", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a collection, feature, or properties object against the schema.
    Validate(ValidateArgs),

    /// Report duplicate house numbers per street within a ULB.
    Qc(QcArgs),
}

fn main() -> ExitCode {
    // clap exits with 2 on usage errors, which is reserved for shape
    // mismatches here.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_ERROR)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Initialize tracing based on verbosity level. Logs go to stderr so
    // stdout carries only reports.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "addrreg starting");

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Qc(args) => run_qc(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}
