//! Subject directory: subject code to display label

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::errors::DirectoryResult;
use super::file::load_label_map;

const BUILTIN_SUBJECTS: [(&str, &str); 19] = [
    ("subjects", "Sets"),
    ("name", "All Records"),
    ("sub", "Subjects"),
    ("adm", "Administration"),
    ("sem", "Alumni Seminar Day"),
    ("ast", "Astronomy"),
    ("bio", "Biology"),
    ("caltech_womens_club", "Caltech Women's Club"),
    ("chem", "Chemistry"),
    ("eng", "Engineering"),
    ("geo", "Geology"),
    ("hum", "Humanities"),
    ("jpl", "Jet Propulsion Laboratory"),
    ("Keck-Observator", "Keck"),
    ("ligo", "LIGO"),
    ("math", "Mathematics"),
    ("phy", "Physics"),
    ("policy", "Policy Documents"),
    ("soc", "Social Sciences"),
];

/// Resolves subject codes to human-readable labels.
///
/// Implementations must be safe to share between threads if facet calls
/// run concurrently.
pub trait SubjectDirectory {
    /// Returns the label for `code`, or `None` if the code is unknown
    fn resolve(&self, code: &str) -> Option<String>;
}

impl SubjectDirectory for HashMap<String, String> {
    fn resolve(&self, code: &str) -> Option<String> {
        self.get(code).cloned()
    }
}

impl SubjectDirectory for BTreeMap<String, String> {
    fn resolve(&self, code: &str) -> Option<String> {
        self.get(code).cloned()
    }
}

/// Map-backed subject directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectMap {
    names: HashMap<String, String>,
}

impl SubjectMap {
    /// Creates an empty directory; every code resolves to `None`
    pub fn new() -> Self {
        Self::default()
    }

    /// The subject listing used when no directory file is given
    pub fn builtin() -> Self {
        BUILTIN_SUBJECTS.iter().copied().collect()
    }

    /// Load a `{"code": "Label"}` JSON file. The result replaces the
    /// built-in listing, it does not extend it.
    pub fn load(path: &Path) -> DirectoryResult<Self> {
        Ok(load_label_map(path)?.into_iter().collect())
    }

    /// Add or replace one entry
    pub fn insert(&mut self, code: impl Into<String>, label: impl Into<String>) {
        self.names.insert(code.into(), label.into());
    }

    /// Number of known codes
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SubjectMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = SubjectMap::new();
        for (code, label) in iter {
            map.insert(code, label);
        }
        map
    }
}

impl SubjectDirectory for SubjectMap {
    fn resolve(&self, code: &str) -> Option<String> {
        self.names.get(code).cloned()
    }
}
