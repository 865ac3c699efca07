//! # Field Values
//!
//! [`FieldValue`] wraps an optional JSON member so it can be used as a
//! grouping key. A missing member and an explicit `null` are the same value.
//! Other values compare by their JSON text, so the string `"12"` and the
//! number `12` stay distinct. Numbers compare by numeric value: `1` and
//! `1.0` are the same key.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A comparable, hashable JSON member value.
#[derive(Debug, Clone)]
pub struct FieldValue {
    value: Option<Value>,
    key: String,
}

impl FieldValue {
    /// Wrap an optional JSON value. `Some(Value::Null)` is treated as absent.
    pub fn new(value: Option<&Value>) -> Self {
        let value = value.filter(|v| !v.is_null()).cloned();
        let key = value.as_ref().map_or_else(|| "null".to_string(), grouping_key);
        Self { value, key }
    }

    /// The absent value.
    pub fn absent() -> Self {
        Self::new(None)
    }

    /// Read member `name` from a JSON object.
    pub fn from_member(object: &Map<String, Value>, name: &str) -> Self {
        Self::new(object.get(name))
    }

    /// True when the member was missing or `null`.
    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

}

/// JSON text, except that an integral float is written as the integer it
/// equals.
fn grouping_key(value: &Value) -> String {
    // Integers up to 2^53 are exact in f64.
    const EXACT: f64 = 9_007_199_254_740_992.0;
    if let Value::Number(n) = value {
        if let Some(f) = n.as_f64().filter(|_| n.is_f64()) {
            if f.fract() == 0.0 && f.abs() <= EXACT {
                return format!("{}", f as i64);
            }
        }
    }
    value.to_string()
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FieldValue {}

impl Hash for FieldValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

/// Strings print bare, everything else as JSON text, absent as `null`.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(Value::String(s)) => f.write_str(s),
            Some(other) => write!(f, "{other}"),
            None => f.write_str("null"),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.value {
            Some(v) => v.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::new(Some(&Value::String(s.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn missing_and_null_are_equal() {
        assert_eq!(FieldValue::new(None), FieldValue::new(Some(&Value::Null)));
        assert!(FieldValue::new(Some(&Value::Null)).is_absent());
    }

    #[test]
    fn string_and_number_differ() {
        assert_ne!(FieldValue::from("12"), FieldValue::new(Some(&json!(12))));
    }

    #[test]
    fn integral_float_equals_integer() {
        assert_eq!(FieldValue::new(Some(&json!(1))), FieldValue::new(Some(&json!(1.0))));
        assert_eq!(FieldValue::new(Some(&json!(-0.0))), FieldValue::new(Some(&json!(0))));
        assert_ne!(FieldValue::new(Some(&json!(1.5))), FieldValue::new(Some(&json!(1))));
        assert_ne!(FieldValue::from("1"), FieldValue::new(Some(&json!(1.0))));

        let mut seen = HashSet::new();
        assert!(seen.insert(FieldValue::new(Some(&json!(7)))));
        assert!(!seen.insert(FieldValue::new(Some(&json!(7.0)))));
    }

    #[test]
    fn display_keeps_original_number_text() {
        assert_eq!(FieldValue::new(Some(&json!(1.0))).to_string(), "1.0");
    }

    #[test]
    fn usable_as_set_member() {
        let mut seen = HashSet::new();
        assert!(seen.insert(FieldValue::from("12")));
        assert!(!seen.insert(FieldValue::from("12")));
        assert!(seen.insert(FieldValue::absent()));
        assert!(!seen.insert(FieldValue::new(Some(&Value::Null))));
    }

    #[test]
    fn display_format() {
        assert_eq!(FieldValue::from("S1").to_string(), "S1");
        assert_eq!(FieldValue::new(Some(&json!(12))).to_string(), "12");
        assert_eq!(FieldValue::absent().to_string(), "null");
    }

    #[test]
    fn serializes_as_json_value() {
        assert_eq!(serde_json::to_value(FieldValue::from("12")).unwrap(), json!("12"));
        assert_eq!(serde_json::to_value(FieldValue::absent()).unwrap(), Value::Null);
    }
}
