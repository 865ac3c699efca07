//! # Configuration File
//!
//! Optional YAML settings passed with `--config`. Precedence is command-line
//! flags, then this file, then built-in defaults.
//!
//! ```yaml
//! schema: specs/address-register.schema.json
//! engine:
//!   draft: draft2020-12
//!   validate_formats: true
//!   mode: whole
//!   geometry_check: per-feature-only
//! ```
//!
//! A relative `schema` path is resolved against the config file's directory
//! when the file exists there.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use addrreg_schema::EngineConfig;

/// Settings loaded from a config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Schema document to validate against.
    pub schema: Option<PathBuf>,
    /// Engine options.
    pub engine: EngineConfig,
}

impl Settings {
    /// Load settings from `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not valid settings YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let mut settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config YAML: {}", path.display()))?;

        if let Some(schema) = settings.schema.take() {
            let base = path.parent().unwrap_or(Path::new("."));
            settings.schema = Some(crate::resolve_path(&schema, base));
        }

        tracing::debug!(config = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Load from `path` if given, else defaults.
    ///
    /// # Errors
    ///
    /// As [`load`](Self::load).
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}
