//! # Validate Subcommand
//!
//! Validates an input document against the address register schema for a
//! chosen target. The schema is loaded before the input, and both are read
//! in full before any validation runs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use addrreg_schema::{
    EngineConfig, EngineError, GeometryCheck, SchemaBundle, SchemaDraft, Target,
    ValidationEngine, ValidationMode, Violations, DEFAULT_SCHEMA_PATH,
};

use crate::config::Settings;
use crate::output::{print_json, OutputFormat, Status};

/// Arguments for the `addrreg validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Input JSON document (FeatureCollection, Feature, or properties object).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// JSON Schema for address features [default: specs/address-register.schema.json].
    #[arg(long, value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// What the input represents: collection, feature, or properties.
    #[arg(long, value_name = "TARGET", default_value = "collection")]
    pub schema_target: Target,

    /// Start from the legacy engine: draft 7, no format checks, per-feature.
    #[arg(long)]
    pub legacy: bool,

    /// JSON Schema draft to compile under (draft7 or draft2020-12).
    #[arg(long, value_name = "DRAFT")]
    pub draft: Option<SchemaDraft>,

    /// Do not assert `format` keywords.
    #[arg(long)]
    pub no_formats: bool,

    /// Validate each feature's properties on their own and require Point geometry.
    #[arg(long)]
    pub per_feature: bool,

    /// When to require Point geometry (per-feature-only or always).
    #[arg(long, value_name = "WHEN")]
    pub geometry_check: Option<GeometryCheck>,

    /// YAML file with default schema path and engine options.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ValidateArgs {
    /// Engine options after applying flags over `base`.
    pub fn engine_config(&self, base: EngineConfig) -> EngineConfig {
        let mut config = if self.legacy { EngineConfig::legacy() } else { base };
        if let Some(draft) = self.draft {
            config.draft = draft;
        }
        if self.no_formats {
            config.validate_formats = false;
        }
        if self.per_feature {
            config.mode = ValidationMode::PerFeature;
        }
        if let Some(check) = self.geometry_check {
            config.geometry_check = check;
        }
        config
    }

    /// Schema path: flag, then config file, then the default location.
    pub fn schema_path(&self, settings: &Settings) -> PathBuf {
        self.schema
            .clone()
            .or_else(|| settings.schema.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SCHEMA_PATH))
    }
}

/// JSON form of a validation run.
#[derive(Debug, Serialize)]
struct ValidationSummary<'a> {
    status: Status,
    target: Target,
    schema: String,
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    violations: &'a Violations,
}

/// Execute the validate subcommand.
///
/// Returns the exit code: 0 valid, 1 violations, 2 wrong top-level shape.
/// Operational failures are returned as errors.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let settings = Settings::load_or_default(args.config.as_deref())?;
    let config = args.engine_config(settings.engine);
    let schema_path = args.schema_path(&settings);

    let bundle = SchemaBundle::load(&schema_path)
        .with_context(|| format!("failed to load schema: {}", schema_path.display()))?;
    let data = addrreg_core::load_json(&args.input)
        .with_context(|| format!("failed to load input: {}", args.input.display()))?;

    tracing::info!(
        input = %args.input.display(),
        schema = %schema_path.display(),
        target = %args.schema_target,
        mode = ?config.mode,
        "validating"
    );

    let engine = ValidationEngine::new(bundle, config);
    let empty = Violations::new();

    let (status, message, violations) = match engine.validate(&data, args.schema_target) {
        Ok(v) if v.is_empty() => (Status::Passed, None, v),
        Ok(v) => (Status::Failed, None, v),
        Err(e @ EngineError::ShapeMismatch { .. }) => {
            (Status::ShapeMismatch, Some(e.to_string()), empty)
        }
        Err(e) => return Err(e).context("validation could not run"),
    };

    match args.format {
        OutputFormat::Json => print_json(&ValidationSummary {
            status,
            target: args.schema_target,
            schema: schema_path.display().to_string(),
            input: args.input.display().to_string(),
            message,
            violations: &violations,
        })?,
        OutputFormat::Text => match status {
            Status::Passed => println!("Validation OK"),
            Status::Failed => eprintln!("{}", violations.report()),
            Status::ShapeMismatch => eprintln!("{}", message.unwrap_or_default()),
        },
    }

    Ok(status.exit_code())
}
