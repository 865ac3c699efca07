//! # Validation Engine
//!
//! Runs schema validation of a document for a [`Target`] and the structural
//! checks the schema language cannot express.
//!
//! ## Outcomes
//!
//! [`ValidationEngine::validate`] separates three results:
//!
//! - `Err(EngineError::ShapeMismatch)`: the top-level `type` is wrong for
//!   the target; no schema rule was evaluated.
//! - `Ok(violations)` with entries: the shape is right, the content is not.
//! - `Ok(violations)` empty: valid.
//!
//! Every violation is collected; validation never stops at the first.

use std::collections::HashMap;

use jsonschema::{Retrieve, Uri, Validator};
use serde_json::{Map, Value};
use thiserror::Error;

use addrreg_core::{document_type, features, geometry_type, FEATURE, FEATURE_COLLECTION, POINT};

use crate::bundle::{SchemaBundle, SchemaError, Target};
use crate::config::{EngineConfig, ValidationMode};
use crate::violation::{Violation, Violations};

/// Errors that end a validation run before any violations are reported.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The document's top-level `type` does not match the target.
    #[error("Input is not a GeoJSON {expected} (found {})", describe_type(.found.as_deref()))]
    ShapeMismatch {
        /// Discriminator the target requires.
        expected: &'static str,
        /// Discriminator the document carries, if any.
        found: Option<String>,
    },

    /// Target resolution failed.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The resolved schema could not be compiled.
    #[error("failed to compile schema for target '{target}': {reason}")]
    Compile {
        /// Target being compiled.
        target: Target,
        /// Compiler diagnostic.
        reason: String,
    },
}

impl EngineError {
    /// True for the wrong-top-level-shape outcome.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::ShapeMismatch { .. })
    }
}

fn describe_type(found: Option<&str>) -> String {
    match found {
        Some(t) => format!("type \"{t}\""),
        None => "no type".to_string(),
    }
}

/// Resolves `$ref` URIs to the bundle's own document and refuses everything
/// else, so compilation never makes network requests.
struct LocalRetriever {
    schemas_by_uri: HashMap<String, Value>,
}

impl LocalRetriever {
    fn for_bundle(bundle: &SchemaBundle) -> Self {
        let mut schemas_by_uri = HashMap::new();
        if let Some(id) = bundle.id() {
            let uri = id.trim_end_matches('#').to_string();
            schemas_by_uri.insert(uri, bundle.document().clone());
        }
        Self { schemas_by_uri }
    }
}

impl Retrieve for LocalRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        self.schemas_by_uri
            .get(uri_str.trim_end_matches('#'))
            .cloned()
            .ok_or_else(|| {
                format!("external schema reference not available offline: {uri_str}").into()
            })
    }
}

/// Validates documents against one [`SchemaBundle`] with a fixed
/// [`EngineConfig`].
///
/// The engine holds no state between calls, so a single instance can serve
/// any number of documents and produces the same result for the same input.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    bundle: SchemaBundle,
    config: EngineConfig,
}

impl ValidationEngine {
    pub fn new(bundle: SchemaBundle, config: EngineConfig) -> Self {
        Self { bundle, config }
    }

    /// Compile the schema that validates `target`.
    ///
    /// The configured draft replaces the document's `$schema`, and format
    /// assertion is set explicitly for either draft.
    ///
    /// # Errors
    ///
    /// [`EngineError::Schema`] if the target's sub-schema is missing,
    /// [`EngineError::Compile`] if it is not a valid schema.
    pub fn compile(&self, target: Target) -> Result<Validator, EngineError> {
        let mut schema = self.bundle.scoped(target)?;
        let meta_schema = self.config.draft.meta_schema_uri();
        if let Some(root) = schema.as_object_mut() {
            if let Some(declared) = root.get("$schema").and_then(Value::as_str) {
                if declared.trim_end_matches('#') != meta_schema.trim_end_matches('#') {
                    tracing::debug!(
                        declared,
                        configured = %self.config.draft,
                        "overriding schema draft"
                    );
                }
            }
            root.insert("$schema".to_string(), Value::String(meta_schema.to_string()));
        }

        let mut opts = jsonschema::options();
        opts.with_draft(self.config.draft.into())
            .should_validate_formats(self.config.validate_formats)
            .with_retriever(LocalRetriever::for_bundle(&self.bundle));

        let validator = opts.build(&schema).map_err(|e| EngineError::Compile {
            target,
            reason: e.to_string(),
        })?;

        tracing::debug!(
            %target,
            draft = %self.config.draft,
            formats = self.config.validate_formats,
            source = self.bundle.source(),
            "compiled validator"
        );
        Ok(validator)
    }

    /// Validate `data` as `target`.
    ///
    /// # Errors
    ///
    /// [`EngineError::ShapeMismatch`] for a wrong top-level `type`; schema
    /// lookup and compile failures as in [`compile`](Self::compile).
    pub fn validate(&self, data: &Value, target: Target) -> Result<Violations, EngineError> {
        let violations = match target {
            Target::Collection => {
                expect_shape(data, FEATURE_COLLECTION)?;
                match self.config.mode {
                    ValidationMode::Whole => self.validate_collection(data)?,
                    ValidationMode::PerFeature => self.validate_each_feature(data)?,
                }
            }
            Target::Feature => {
                expect_shape(data, FEATURE)?;
                let validator = self.compile(Target::Feature)?;
                let mut violations = collect(&validator, data);
                if self.config.checks_geometry_always() {
                    violations.extend(point_check(data, "/geometry/type"));
                }
                violations
            }
            Target::Properties => {
                let validator = self.compile(Target::Properties)?;
                collect(&validator, data)
            }
        };

        tracing::info!(
            %target,
            violations = violations.len(),
            "validation pass complete"
        );
        Ok(violations)
    }

    /// Parse `target` and validate. Unknown names fail before any work.
    ///
    /// # Errors
    ///
    /// [`EngineError::Schema`] wrapping
    /// [`SchemaError::InvalidTarget`](crate::SchemaError::InvalidTarget),
    /// otherwise as [`validate`](Self::validate).
    pub fn validate_named(&self, data: &Value, target: &str) -> Result<Violations, EngineError> {
        let target: Target = target.parse().map_err(SchemaError::from)?;
        self.validate(data, target)
    }

    fn validate_collection(&self, data: &Value) -> Result<Violations, EngineError> {
        let validator = self.compile(Target::Collection)?;
        let mut violations = collect(&validator, data);
        if self.config.checks_geometry_always() {
            for (i, feature) in features(data).iter().enumerate() {
                let path = format!("/features/{i}/geometry/type");
                violations.extend(point_check(feature, &path).map(|v| v.at_feature(i)));
            }
        }
        Ok(violations)
    }

    /// Each feature's `properties` against `AddressProperties`, plus the
    /// Point assertion, all tagged with the feature index.
    fn validate_each_feature(&self, data: &Value) -> Result<Violations, EngineError> {
        let validator = self.compile(Target::Properties)?;
        let empty = Value::Object(Map::new());
        let mut violations: Violations = features_array_check(data).into_iter().collect();

        for (i, feature) in features(data).iter().enumerate() {
            let props = feature.get("properties").unwrap_or(&empty);
            violations.extend(collect(&validator, props).into_iter().map(|v| v.at_feature(i)));
            violations.extend(point_check(feature, "/geometry/type").map(|v| v.at_feature(i)));
        }
        Ok(violations)
    }
}

fn expect_shape(data: &Value, expected: &'static str) -> Result<(), EngineError> {
    match document_type(data) {
        Some(t) if t == expected => Ok(()),
        found => Err(EngineError::ShapeMismatch {
            expected,
            found: found.map(str::to_string),
        }),
    }
}

fn collect(validator: &Validator, instance: &Value) -> Violations {
    validator.iter_errors(instance).map(Violation::from).collect()
}

/// A collection must carry a `features` array. Per-feature validation never
/// sees the root schema, so this is asserted here.
fn features_array_check(data: &Value) -> Option<Violation> {
    let message = match data.get("features") {
        Some(Value::Array(_)) => return None,
        Some(other) => format!("{other} is not of type \"array\""),
        None => "\"features\" is a required property".to_string(),
    };
    Some(Violation {
        feature_index: None,
        instance_path: "/features".to_string(),
        schema_path: String::new(),
        message,
    })
}

/// `geometry.type` must be `"Point"`.
fn point_check(feature: &Value, instance_path: &str) -> Option<Violation> {
    let geometry = geometry_type(feature);
    if geometry == Some(POINT) {
        return None;
    }
    let found = match geometry {
        Some(t) => format!("\"{t}\""),
        None => "none".to_string(),
    };
    Some(Violation {
        feature_index: None,
        instance_path: instance_path.to_string(),
        schema_path: String::new(),
        message: format!("geometry type must be \"Point\", found {found}"),
    })
}
