//! # Schema Bundle
//!
//! One loaded schema document and the lookup from a validation [`Target`]
//! to the sub-schema that validates it:
//!
//! | target       | sub-schema                 |
//! |--------------|----------------------------|
//! | `collection` | document root              |
//! | `feature`    | `$defs.Feature`            |
//! | `properties` | `$defs.AddressProperties`  |

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

use addrreg_core::DocumentError;

/// Schema location used when none is given.
pub const DEFAULT_SCHEMA_PATH: &str = "specs/address-register.schema.json";

/// Name of the feature sub-schema under `$defs`.
pub const FEATURE_DEFINITION: &str = "Feature";
/// Name of the properties sub-schema under `$defs`.
pub const PROPERTIES_DEFINITION: &str = "AddressProperties";

/// Keys copied from the document root into a scoped sub-schema so that
/// intra-document `$ref`s keep resolving.
const SCOPE_KEYS: [&str; 4] = ["$schema", "$id", "$defs", "definitions"];

/// What the input document represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// A GeoJSON `FeatureCollection` of address features.
    #[default]
    Collection,
    /// A single GeoJSON `Feature` with address properties.
    Feature,
    /// A bare address properties object, without geometry.
    Properties,
}

impl Target {
    /// All targets, in CLI order.
    pub const ALL: [Target; 3] = [Target::Collection, Target::Feature, Target::Properties];

    /// Lowercase name as accepted on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Feature => "feature",
            Self::Properties => "properties",
        }
    }

    /// The `$defs` entry this target validates against, or `None` for the root.
    pub fn definition(self) -> Option<&'static str> {
        match self {
            Self::Collection => None,
            Self::Feature => Some(FEATURE_DEFINITION),
            Self::Properties => Some(PROPERTIES_DEFINITION),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A target name outside `collection`, `feature`, `properties`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid schema target '{given}': expected one of collection, feature, properties")]
pub struct InvalidTargetError {
    /// The rejected input.
    pub given: String,
}

impl FromStr for Target {
    type Err = InvalidTargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| InvalidTargetError {
                given: s.to_string(),
            })
    }
}

/// Errors from loading a schema document or resolving a target in it.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema document could not be read or parsed.
    #[error("schema load error: {0}")]
    Load(#[from] DocumentError),

    /// The requested target name is not recognized.
    #[error(transparent)]
    InvalidTarget(#[from] InvalidTargetError),

    /// The document has no `$defs` entry for the requested target.
    #[error("schema lookup error: '$defs.{definition}' not found in {source_name} (required for target '{target}')")]
    Lookup {
        /// Target that was requested.
        target: Target,
        /// Missing `$defs` entry.
        definition: &'static str,
        /// Where the schema document came from.
        source_name: String,
    },
}

/// A loaded schema document.
///
/// The bundle owns the document for the duration of a run and hands out
/// borrowed sub-schemas through [`resolve`](Self::resolve).
#[derive(Debug, Clone)]
pub struct SchemaBundle {
    document: Value,
    source: String,
}

impl SchemaBundle {
    /// Load a schema document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Load`] if the file cannot be read or is not JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let document = addrreg_core::load_json(path)?;
        Ok(Self::from_value(document, path.display().to_string()))
    }

    /// Wrap an already-parsed schema document. `source` names it in errors.
    pub fn from_value(document: Value, source: impl Into<String>) -> Self {
        Self {
            document,
            source: source.into(),
        }
    }

    /// Where the document came from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The whole schema document.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// The document's `$id`, if declared.
    pub fn id(&self) -> Option<&str> {
        self.document.get("$id").and_then(Value::as_str)
    }

    /// Select the sub-schema for `target`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Lookup`] when `feature` or `properties` is
    /// requested and the matching `$defs` entry is missing.
    pub fn resolve(&self, target: Target) -> Result<&Value, SchemaError> {
        let Some(definition) = target.definition() else {
            return Ok(&self.document);
        };
        self.document
            .get("$defs")
            .and_then(|defs| defs.get(definition))
            .ok_or_else(|| SchemaError::Lookup {
                target,
                definition,
                source_name: self.source.clone(),
            })
    }

    /// Parse `target` and resolve it in one step.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidTarget`] before any lookup if the name
    /// is unknown, otherwise as [`resolve`](Self::resolve).
    pub fn resolve_named(&self, target: &str) -> Result<&Value, SchemaError> {
        let target: Target = target.parse()?;
        self.resolve(target)
    }

    /// The schema to compile for `target`.
    ///
    /// For the root this is the document itself. For a sub-schema it is a
    /// wrapper carrying the document's `$schema`, `$id` and definitions, with
    /// an `allOf` reference to the sub-schema, so `#/$defs/...` references
    /// inside it still resolve against this document.
    ///
    /// # Errors
    ///
    /// As [`resolve`](Self::resolve).
    pub fn scoped(&self, target: Target) -> Result<Value, SchemaError> {
        self.resolve(target)?;
        let Some(definition) = target.definition() else {
            return Ok(self.document.clone());
        };

        let mut wrapper = Map::new();
        if let Some(root) = self.document.as_object() {
            for key in SCOPE_KEYS {
                if let Some(value) = root.get(key) {
                    wrapper.insert(key.to_string(), value.clone());
                }
            }
        }
        wrapper.insert(
            "allOf".to_string(),
            json!([{ "$ref": format!("#/$defs/{definition}") }]),
        );
        Ok(Value::Object(wrapper))
    }
}
