//! Field accessors for records
//!
//! Every accessor is stateless and total. A field that is absent, or whose
//! value is not a scalar, reads as `None`. JSON numbers are stringified so
//! identifiers exported as either `"42"` or `42` behave the same.

use serde_json::Value;

use super::Record;

/// One entry of a record's `creators` list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Creator {
    /// Contributor identifier (`id`)
    pub id: Option<String>,
    /// Display name (`display_name`)
    pub display_name: Option<String>,
}

impl Creator {
    fn from_value(value: &Value) -> Self {
        Self {
            id: value.get("id").and_then(scalar_string),
            display_name: value.get("display_name").and_then(scalar_string),
        }
    }

    /// Returns the identifier if it is present and non-empty
    pub fn identifier(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Stringify a scalar JSON value.
///
/// Strings are returned as-is, numbers in their canonical form. Everything
/// else is `None`.
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a top-level scalar field as a string
pub fn string_field(record: &Record, field: &str) -> Option<String> {
    record.get(field).and_then(scalar_string)
}

/// Year of the record: the first four characters of `date`, trimmed
pub fn date_year(record: &Record) -> Option<String> {
    string_field(record, "date").map(|date| truncate(&date, 4).trim().to_string())
}

/// Record identifier (`eprint_id`)
pub fn eprint_id(record: &Record) -> Option<String> {
    string_field(record, "eprint_id")
}

/// Object type code (`type`)
pub fn object_type(record: &Record) -> Option<String> {
    string_field(record, "type")
}

/// Full last-modified timestamp (`lastmod`)
pub fn lastmod(record: &Record) -> Option<String> {
    string_field(record, "lastmod")
}

/// Date portion of `lastmod`: its first ten characters
pub fn lastmod_date(record: &Record) -> Option<String> {
    lastmod(record).map(|stamp| truncate(&stamp, 10))
}

/// All creators of the record, in record order
pub fn creators(record: &Record) -> Vec<Creator> {
    record
        .get("creators")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(Creator::from_value).collect())
        .unwrap_or_default()
}

/// Returns true if any creator carries a non-empty identifier
pub fn has_creator_ids(record: &Record) -> bool {
    creators(record)
        .iter()
        .any(|creator| creator.identifier().is_some())
}

/// Subject codes from `subjects.items`.
///
/// `None` when the record has no subject list at all.
pub fn subject_codes(record: &Record) -> Option<Vec<String>> {
    let items = record.get("subjects")?.get("items")?.as_array()?;
    Some(items.iter().filter_map(scalar_string).collect())
}

fn truncate(s: &str, chars: usize) -> String {
    s.chars().take(chars).collect()
}
