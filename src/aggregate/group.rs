//! Group descriptors and the per-call group arena

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::record::Record;

/// One bucket of a facet result.
///
/// The serialized field names (`key`, `label`, `count`, `objects` and the
/// flattened extras) are consumed verbatim by page renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupDescriptor<'a> {
    /// Grouping key, unique within one facet result
    pub key: String,
    /// Display string
    pub label: String,
    /// Number of records in `objects`
    pub count: usize,
    /// Facet-specific fields such as `year` or `subject_id`
    #[serde(flatten)]
    pub extras: BTreeMap<&'static str, String>,
    /// Member records in scan order
    pub objects: Vec<&'a Record>,
}

impl<'a> GroupDescriptor<'a> {
    /// Creates an empty group
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            count: 0,
            extras: BTreeMap::new(),
            objects: Vec::new(),
        }
    }

    /// Attach a facet-specific field
    pub fn with_extra(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.extras.insert(name, value.into());
        self
    }

    /// Returns a facet-specific field
    pub fn extra(&self, name: &str) -> Option<&str> {
        self.extras.get(name).map(String::as_str)
    }

    /// Append a member record
    pub fn push(&mut self, record: &'a Record) {
        self.count += 1;
        self.objects.push(record);
    }
}

/// Accumulator for one facet scan.
///
/// Groups live in a vector in first-seen order; the map only resolves a key
/// to its slot. Materializing is a move of the vector, so the later stable
/// sort breaks ties by first appearance.
#[derive(Debug, Default)]
pub struct GroupSet<'a> {
    slots: HashMap<String, usize>,
    groups: Vec<GroupDescriptor<'a>>,
}

impl<'a> GroupSet<'a> {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `record` to the group under `key`.
    ///
    /// `init` builds the group the first time the key is seen; later calls
    /// keep the first label and extras.
    pub fn add_with<F>(&mut self, key: &str, record: &'a Record, init: F)
    where
        F: FnOnce() -> GroupDescriptor<'a>,
    {
        let slot = match self.slots.get(key) {
            Some(&slot) => slot,
            None => {
                let slot = self.groups.len();
                let mut group = init();
                group.key = key.to_string();
                self.groups.push(group);
                self.slots.insert(key.to_string(), slot);
                slot
            }
        };
        self.groups[slot].push(record);
    }

    /// Release the groups in first-seen order
    pub fn into_groups(self) -> Vec<GroupDescriptor<'a>> {
        self.groups
    }
}
