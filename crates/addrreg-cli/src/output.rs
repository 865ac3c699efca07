//! # Output Formats
//!
//! Text output goes to stdout on success and stderr on failure. JSON output
//! always goes to stdout as one pretty-printed document, so it can be piped;
//! the exit code is the same in both formats.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

/// Report format for `validate` and `qc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

/// Overall result of a run, as reported in JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Passed,
    Failed,
    ShapeMismatch,
}

impl Status {
    /// The process exit code for this status.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Passed => crate::EXIT_OK,
            Self::Failed => crate::EXIT_FAILED,
            Self::ShapeMismatch => crate::EXIT_SHAPE_MISMATCH,
        }
    }
}

/// Print `report` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(report: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_exit_codes_are_distinct() {
        assert_eq!(Status::Passed.exit_code(), 0);
        assert_eq!(Status::Failed.exit_code(), 1);
        assert_eq!(Status::ShapeMismatch.exit_code(), 2);
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(Status::ShapeMismatch).unwrap(),
            serde_json::json!("shape_mismatch")
        );
    }
}
