//! # Duplicate House Numbers
//!
//! Features are grouped by `(ulb_lgd, street)` where the street key is
//! `street_id`, or `street_name` when the feature has no `street_id` member
//! at all. Within a group the first occurrence of a house number is
//! accepted and every later one is reported.
//!
//! Missing and `null` members are ordinary values here: two features of the
//! same group that both lack a house number are duplicates.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use addrreg_core::{document_type, features, properties, FieldValue, FEATURE_COLLECTION};

const ULB_FIELD: &str = "ulb_lgd";
const STREET_ID_FIELD: &str = "street_id";
const STREET_NAME_FIELD: &str = "street_name";
const HOUSE_NUMBER_FIELD: &str = "house_number";

/// Uniqueness scope for house numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub ulb: FieldValue,
    pub street: FieldValue,
}

impl GroupKey {
    /// Build the key from a feature's properties.
    pub fn from_properties(props: &Map<String, Value>) -> Self {
        let street_field = if props.contains_key(STREET_ID_FIELD) {
            STREET_ID_FIELD
        } else {
            STREET_NAME_FIELD
        };
        Self {
            ulb: FieldValue::from_member(props, ULB_FIELD),
            street: FieldValue::from_member(props, street_field),
        }
    }
}

/// A repeated house number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateRecord {
    /// Index of the repeating feature in the collection.
    pub feature_index: usize,
    pub ulb: FieldValue,
    pub street: FieldValue,
    pub house_number: FieldValue,
}

impl fmt::Display for DuplicateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "feature[{}] ULB={} street={} house={}",
            self.feature_index, self.ulb, self.street, self.house_number
        )
    }
}

/// Every repeated house number in `collection`, in feature order.
pub fn find_duplicates(collection: &Value) -> Vec<DuplicateRecord> {
    let empty = Map::new();
    let mut seen: HashMap<GroupKey, HashSet<FieldValue>> = HashMap::new();
    let mut duplicates = Vec::new();

    for (i, feature) in features(collection).iter().enumerate() {
        let props = properties(feature).unwrap_or(&empty);
        let key = GroupKey::from_properties(props);
        let house_number = FieldValue::from_member(props, HOUSE_NUMBER_FIELD);

        let numbers = seen.entry(key.clone()).or_default();
        if numbers.contains(&house_number) {
            tracing::debug!(feature = i, %house_number, "duplicate house number");
            duplicates.push(DuplicateRecord {
                feature_index: i,
                ulb: key.ulb,
                street: key.street,
                house_number,
            });
        } else {
            numbers.insert(house_number);
        }
    }

    duplicates
}

/// Summary of one QC pass.
#[derive(Debug, Clone, Serialize)]
pub struct QcReport {
    /// Number of features inspected.
    pub checked: usize,
    /// Findings, in feature order.
    pub duplicates: Vec<DuplicateRecord>,
}

impl QcReport {
    pub fn passed(&self) -> bool {
        self.duplicates.is_empty()
    }
}

impl fmt::Display for QcReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed() {
            return f.write_str("QC OK: no duplicates per street");
        }
        f.write_str("Duplicate house numbers found:")?;
        for record in &self.duplicates {
            write!(f, "\n - {record}")?;
        }
        Ok(())
    }
}

/// Run the duplicate check over `collection`.
pub fn check(collection: &Value) -> QcReport {
    if document_type(collection) != Some(FEATURE_COLLECTION) {
        tracing::warn!("QC input is not a GeoJSON FeatureCollection; checking any features present");
    }
    let report = QcReport {
        checked: features(collection).len(),
        duplicates: find_duplicates(collection),
    };
    tracing::info!(
        checked = report.checked,
        duplicates = report.duplicates.len(),
        "QC pass complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection(props: Vec<Value>) -> Value {
        let features: Vec<Value> = props
            .into_iter()
            .map(|p| json!({"type": "Feature", "geometry": {"type": "Point"}, "properties": p}))
            .collect();
        json!({"type": "FeatureCollection", "features": features})
    }

    #[test]
    fn second_occurrence_is_flagged() {
        let data = collection(vec![
            json!({"ulb_lgd": "U1", "street_id": "S1", "house_number": "12"}),
            json!({"ulb_lgd": "U1", "street_id": "S1", "house_number": "12"}),
        ]);
        let dups = find_duplicates(&data);
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].feature_index, 1);
        assert_eq!(dups[0].to_string(), "feature[1] ULB=U1 street=S1 house=12");
    }

    #[test]
    fn n_occurrences_give_n_minus_one_records() {
        let same = json!({"ulb_lgd": "U1", "street_id": "S1", "house_number": "7"});
        let other = json!({"ulb_lgd": "U1", "street_id": "S1", "house_number": "8"});
        let data = collection(vec![
            same.clone(),
            other,
            same.clone(),
            same.clone(),
            same,
        ]);
        let indices: Vec<usize> = find_duplicates(&data).iter().map(|d| d.feature_index).collect();
        assert_eq!(indices, vec![2, 3, 4]);
    }

    #[test]
    fn different_groups_never_collide() {
        let data = collection(vec![
            json!({"ulb_lgd": "U1", "street_id": "S1", "house_number": "12"}),
            json!({"ulb_lgd": "U1", "street_id": "S2", "house_number": "12"}),
            json!({"ulb_lgd": "U2", "street_id": "S1", "house_number": "12"}),
        ]);
        assert!(find_duplicates(&data).is_empty());
    }

    #[test]
    fn street_name_is_fallback_key() {
        let data = collection(vec![
            json!({"ulb_lgd": "U1", "street_name": "MG Road", "house_number": "3"}),
            json!({"ulb_lgd": "U1", "street_name": "MG Road", "house_number": "3"}),
        ]);
        let dups = find_duplicates(&data);
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].street.to_string(), "MG Road");
    }

    #[test]
    fn street_id_member_takes_precedence_even_when_null() {
        // Both features carry street_id: null, so street_name is not consulted.
        let data = collection(vec![
            json!({"ulb_lgd": "U1", "street_id": null, "street_name": "A", "house_number": "3"}),
            json!({"ulb_lgd": "U1", "street_id": null, "street_name": "B", "house_number": "3"}),
        ]);
        let dups = find_duplicates(&data);
        assert_eq!(dups.len(), 1);
        assert!(dups[0].street.is_absent());
    }

    #[test]
    fn missing_house_numbers_are_duplicates() {
        let data = collection(vec![
            json!({"ulb_lgd": "U1", "street_id": "S1"}),
            json!({"ulb_lgd": "U1", "street_id": "S1", "house_number": null}),
        ]);
        let dups = find_duplicates(&data);
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].to_string(), "feature[1] ULB=U1 street=S1 house=null");
    }

    #[test]
    fn string_and_numeric_house_numbers_differ() {
        let data = collection(vec![
            json!({"ulb_lgd": "U1", "street_id": "S1", "house_number": "12"}),
            json!({"ulb_lgd": "U1", "street_id": "S1", "house_number": 12}),
        ]);
        assert!(find_duplicates(&data).is_empty());
    }

    #[test]
    fn integral_float_house_number_matches_integer() {
        let data = collection(vec![
            json!({"ulb_lgd": "U1", "street_id": "S1", "house_number": 1}),
            json!({"ulb_lgd": "U1", "street_id": "S1", "house_number": 1.0}),
        ]);
        let dups = find_duplicates(&data);
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].feature_index, 1);
    }

    #[test]
    fn features_without_properties_share_empty_group() {
        let data = json!({
            "type": "FeatureCollection",
            "features": [{"type": "Feature"}, {"type": "Feature", "properties": null}]
        });
        assert_eq!(find_duplicates(&data).len(), 1);
    }

    #[test]
    fn input_without_features_is_clean() {
        let report = check(&json!({"type": "Feature"}));
        assert_eq!(report.checked, 0);
        assert!(report.passed());
    }

    #[test]
    fn report_lists_every_record() {
        let data = collection(vec![
            json!({"ulb_lgd": "U1", "street_id": "S1", "house_number": "1"}),
            json!({"ulb_lgd": "U1", "street_id": "S1", "house_number": "1"}),
            json!({"ulb_lgd": "U1", "street_id": "S1", "house_number": "1"}),
        ]);
        let report = check(&data);
        assert_eq!(report.checked, 3);
        assert_eq!(
            report.to_string(),
            "Duplicate house numbers found:\n \
             - feature[1] ULB=U1 street=S1 house=1\n \
             - feature[2] ULB=U1 street=S1 house=1"
        );
    }

    #[test]
    fn passing_report_message() {
        let report = check(&collection(vec![]));
        assert_eq!(report.to_string(), "QC OK: no duplicates per street");
    }
}
