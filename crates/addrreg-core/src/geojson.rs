//! # GeoJSON Accessors
//!
//! Lenient accessors over untyped JSON. None of these functions fail: a
//! missing or mistyped member reads as absent, and deciding whether that is
//! an error is left to the caller.

use serde_json::{Map, Value};

/// `type` discriminator of a GeoJSON feature collection.
pub const FEATURE_COLLECTION: &str = "FeatureCollection";
/// `type` discriminator of a GeoJSON feature.
pub const FEATURE: &str = "Feature";
/// The only geometry type allowed for an address point.
pub const POINT: &str = "Point";

/// The top-level `type` member, if it is a string.
pub fn document_type(doc: &Value) -> Option<&str> {
    doc.get("type").and_then(Value::as_str)
}

/// The `features` array of a collection. Empty when absent or not an array.
pub fn features(doc: &Value) -> &[Value] {
    doc.get("features")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// The `properties` object of a feature.
pub fn properties(feature: &Value) -> Option<&Map<String, Value>> {
    feature.get("properties").and_then(Value::as_object)
}

/// The `geometry.type` member of a feature.
pub fn geometry_type(feature: &Value) -> Option<&str> {
    feature.pointer("/geometry/type").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_discriminator() {
        assert_eq!(document_type(&json!({"type": "Feature"})), Some(FEATURE));
        assert_eq!(document_type(&json!({"type": 7})), None);
        assert_eq!(document_type(&json!([])), None);
    }

    #[test]
    fn features_defaults_to_empty() {
        assert!(features(&json!({"type": "FeatureCollection"})).is_empty());
        assert!(features(&json!({"features": {"not": "an array"}})).is_empty());
        assert_eq!(features(&json!({"features": [{}, {}]})).len(), 2);
    }

    #[test]
    fn reads_feature_members() {
        let feature = json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [77.2, 28.6]},
            "properties": {"ulb_lgd": "U1"}
        });
        assert_eq!(geometry_type(&feature), Some(POINT));
        assert_eq!(properties(&feature).unwrap()["ulb_lgd"], "U1");

        let bare = json!({"type": "Feature", "properties": null});
        assert_eq!(geometry_type(&bare), None);
        assert!(properties(&bare).is_none());
    }
}
