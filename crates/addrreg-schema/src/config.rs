//! # Engine Configuration
//!
//! Both historical validator behaviors are expressed as one
//! [`EngineConfig`]: the current default (draft 2020-12, format checking,
//! whole-document validation) and [`EngineConfig::legacy`] (draft 7, no
//! format checking, each feature's properties validated on their own).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// JSON Schema draft used to compile the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SchemaDraft {
    /// Draft 7.
    #[serde(rename = "draft7")]
    Draft7,
    /// Draft 2020-12.
    #[default]
    #[serde(rename = "draft2020-12")]
    Draft202012,
}

impl SchemaDraft {
    /// The meta-schema URI written into the compiled schema's `$schema`.
    pub fn meta_schema_uri(self) -> &'static str {
        match self {
            Self::Draft7 => "http://json-schema.org/draft-07/schema#",
            Self::Draft202012 => "https://json-schema.org/draft/2020-12/schema",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft7 => "draft7",
            Self::Draft202012 => "draft2020-12",
        }
    }
}

impl From<SchemaDraft> for jsonschema::Draft {
    fn from(draft: SchemaDraft) -> Self {
        match draft {
            SchemaDraft::Draft7 => jsonschema::Draft::Draft7,
            SchemaDraft::Draft202012 => jsonschema::Draft::Draft202012,
        }
    }
}

impl fmt::Display for SchemaDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaDraft {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft7" | "draft-07" | "7" => Ok(Self::Draft7),
            "draft2020-12" | "draft-2020-12" | "2020-12" => Ok(Self::Draft202012),
            other => Err(format!(
                "unknown schema draft '{other}': expected draft7 or draft2020-12"
            )),
        }
    }
}

/// How a `collection` target is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    /// Validate the whole document against the root schema.
    #[default]
    Whole,
    /// Validate each feature's `properties` against `AddressProperties` and
    /// check each geometry is a `Point`. Violations carry their feature index.
    PerFeature,
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "whole" => Ok(Self::Whole),
            "per-feature" => Ok(Self::PerFeature),
            other => Err(format!(
                "unknown validation mode '{other}': expected whole or per-feature"
            )),
        }
    }
}

/// When the `geometry.type == "Point"` assertion runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeometryCheck {
    /// Only in [`ValidationMode::PerFeature`].
    #[default]
    PerFeatureOnly,
    /// Also for the `feature` target and for every feature of a whole-mode
    /// `collection`.
    Always,
}

impl FromStr for GeometryCheck {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-feature-only" => Ok(Self::PerFeatureOnly),
            "always" => Ok(Self::Always),
            other => Err(format!(
                "unknown geometry check '{other}': expected per-feature-only or always"
            )),
        }
    }
}

/// Options for a [`ValidationEngine`](crate::ValidationEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Draft the schema is compiled under. Overrides the document's `$schema`.
    pub draft: SchemaDraft,
    /// Whether `format` keywords are asserted.
    pub validate_formats: bool,
    /// Whole-document or per-feature validation of collections.
    pub mode: ValidationMode,
    /// When geometry shape is checked.
    pub geometry_check: GeometryCheck,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            draft: SchemaDraft::Draft202012,
            validate_formats: true,
            mode: ValidationMode::Whole,
            geometry_check: GeometryCheck::PerFeatureOnly,
        }
    }
}

impl EngineConfig {
    /// Draft 7, no format checking, per-feature validation.
    pub fn legacy() -> Self {
        Self {
            draft: SchemaDraft::Draft7,
            validate_formats: false,
            mode: ValidationMode::PerFeature,
            geometry_check: GeometryCheck::PerFeatureOnly,
        }
    }

    /// Whether the Point assertion applies in whole-document validation.
    pub fn checks_geometry_always(&self) -> bool {
        self.geometry_check == GeometryCheck::Always
    }
}
