//! # addrreg-schema: Schema Resolution & Validation
//!
//! Validates address-register documents against a single JSON Schema
//! document that plays two roles: its root describes a whole
//! `FeatureCollection`, and its `$defs` hold the `Feature` and
//! `AddressProperties` sub-schemas.
//!
//! ## Schema Resolution (`bundle`)
//!
//! [`SchemaBundle`] is the loaded document with an explicit lookup
//! operation, [`SchemaBundle::resolve`], keyed by [`Target`]. A missing
//! sub-schema is a typed [`SchemaError::Lookup`], never a panic.
//!
//! ## Validation (`engine`)
//!
//! [`ValidationEngine`] compiles the resolved schema with the `jsonschema`
//! crate using an explicit [`EngineConfig`] (draft, format checking, per-feature
//! mode, geometry check) and returns every violation it finds. A document
//! with the wrong top-level shape is rejected with
//! [`EngineError::ShapeMismatch`] before any schema rule runs.
//!
//! ## Crate Policy
//!
//! - Depends only on `addrreg-core` internally.
//! - No process-wide state: bundles and engines are built and passed explicitly.
//! - Schema evaluation never touches the network; unknown remote `$ref`s fail.

pub mod bundle;
pub mod config;
pub mod engine;
pub mod violation;

pub use bundle::{InvalidTargetError, SchemaBundle, SchemaError, Target, DEFAULT_SCHEMA_PATH};
pub use config::{EngineConfig, GeometryCheck, SchemaDraft, ValidationMode};
pub use engine::{EngineError, ValidationEngine};
pub use violation::{Violation, Violations};
