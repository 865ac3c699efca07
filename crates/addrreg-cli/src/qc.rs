//! # QC Subcommand
//!
//! Duplicate house-number check. Independent of the schema: any document
//! with a `features` array can be checked.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use addrreg_qc::QcReport;

use crate::output::{print_json, OutputFormat, Status};

/// Arguments for the `addrreg qc` subcommand.
#[derive(Args, Debug)]
pub struct QcArgs {
    /// Input GeoJSON FeatureCollection.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct QcSummary<'a> {
    status: Status,
    input: String,
    #[serde(flatten)]
    report: &'a QcReport,
}

/// Execute the qc subcommand.
///
/// Returns exit code: 0 when no duplicates are found, 1 otherwise.
pub fn run_qc(args: &QcArgs) -> Result<u8> {
    let data = addrreg_core::load_json(&args.input)
        .with_context(|| format!("failed to load input: {}", args.input.display()))?;

    let report = addrreg_qc::check(&data);
    let status = if report.passed() {
        Status::Passed
    } else {
        Status::Failed
    };

    match args.format {
        OutputFormat::Json => print_json(&QcSummary {
            status,
            input: args.input.display().to_string(),
            report: &report,
        })?,
        OutputFormat::Text if report.passed() => println!("{report}"),
        OutputFormat::Text => eprintln!("{report}"),
    }

    Ok(status.exit_code())
}
