//! Record model for eprintviews
//!
//! A record is one decoded catalog entry. The aggregator never validates
//! record shape: every field is optional and a missing field only means the
//! record does not take part in the facet that reads it.
//!
//! # Accessors
//!
//! Field access goes through the pure helpers in [`fields`], each taking a
//! `&Record` and returning an `Option`. Key normalization lives in [`labels`].

pub mod fields;
pub mod labels;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use labels::{make_label, slugify};

/// A single catalog entry
///
/// Serializes exactly as the wrapped JSON value so that group `objects`
/// round-trip to renderers unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

impl Record {
    /// Wrap a decoded JSON value
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Look up a top-level field.
    ///
    /// Non-object records have no fields.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.as_object().and_then(|obj| obj.get(field))
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Decode a JSON array of records.
///
/// A top-level value that is not an array is rejected.
pub fn records_from_value(value: Value) -> Result<Vec<Record>, String> {
    match value {
        Value::Array(items) => Ok(items.into_iter().map(Record::new).collect()),
        other => Err(format!(
            "expected a JSON array of records, found {}",
            json_kind(&other)
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_on_object() {
        let record = Record::new(json!({"date": "2020-01-01"}));
        assert_eq!(record.get("date"), Some(&json!("2020-01-01")));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_get_on_non_object() {
        let record = Record::new(json!("not a record"));
        assert_eq!(record.get("date"), None);
    }

    #[test]
    fn test_serializes_transparently() {
        let raw = json!({"eprint_id": "7", "title": "A"});
        let record = Record::new(raw.clone());
        assert_eq!(serde_json::to_value(&record).unwrap(), raw);
    }

    #[test]
    fn test_records_from_array() {
        let records = records_from_value(json!([{"eprint_id": "1"}, {"eprint_id": "2"}])).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_records_from_non_array() {
        let err = records_from_value(json!({"eprint_id": "1"})).unwrap_err();
        assert!(err.contains("an object"));
    }
}
