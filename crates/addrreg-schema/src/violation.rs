//! # Violations
//!
//! A [`Violation`] is one schema-rule or structural-check failure. A
//! validation pass collects them into [`Violations`], which is rendered
//! once into the failure report.

use std::fmt;

use serde::Serialize;

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Index of the offending feature, set in per-feature checks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_index: Option<usize>,
    /// JSON Pointer to the violating value, relative to the validated object.
    pub instance_path: String,
    /// JSON Pointer within the schema. Empty for structural checks.
    pub schema_path: String,
    /// Human-readable description, as reported by the validator.
    pub message: String,
}

impl Violation {
    /// Attach a feature index.
    pub fn at_feature(mut self, index: usize) -> Self {
        self.feature_index = Some(index);
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.feature_index {
            Some(i) => write!(f, "feature[{i}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl From<jsonschema::ValidationError<'_>> for Violation {
    fn from(e: jsonschema::ValidationError<'_>) -> Self {
        Self {
            feature_index: None,
            instance_path: e.instance_path.to_string(),
            schema_path: e.schema_path.to_string(),
            message: e.to_string(),
        }
    }
}

/// Ordered list of violations from one pass. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Returns the violations tagged with feature `index`.
    pub fn for_feature(&self, index: usize) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(move |v| v.feature_index == Some(index))
    }

    /// The failure report: a header line followed by one `- ` line per
    /// violation.
    pub fn report(&self) -> String {
        format!("Validation failed:\n{self}")
    }
}

impl Extend<Violation> for Violations {
    fn extend<I: IntoIterator<Item = Violation>>(&mut self, iter: I) {
        self.violations.extend(iter);
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "- {v}")?;
        }
        Ok(())
    }
}
