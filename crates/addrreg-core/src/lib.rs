//! # addrreg-core: Foundational Types for the Address Register
//!
//! Address-register data travels as GeoJSON feature collections, but the
//! tooling must be able to look at documents that are *not* valid GeoJSON
//! (that is what it is checking for). Everything here therefore works on
//! untyped [`serde_json::Value`] trees rather than a strict GeoJSON model.
//!
//! ## Modules
//!
//! - [`document`]: load a JSON document from disk ([`load_json`]).
//! - [`geojson`]: accessors for the `type` discriminator, `features`,
//!   `properties` and `geometry.type`.
//! - [`field`]: [`FieldValue`], a hashable JSON scalar used for grouping.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `addrreg-*` crates (this is the leaf of the DAG).
//! - No `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod field;
pub mod geojson;

pub use document::load_json;
pub use error::DocumentError;
pub use field::FieldValue;
pub use geojson::{
    document_type, features, geometry_type, properties, FEATURE, FEATURE_COLLECTION, POINT,
};
