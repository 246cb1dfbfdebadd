//! View registry: which browse views a site publishes

use std::path::Path;

use crate::aggregate::FacetKind;
use crate::observability::{log_event_with_fields, Event};

use super::errors::DirectoryResult;
use super::file::load_label_map;

const DEFAULT_VIEWS: [(&str, &str); 8] = [
    ("ids", "Eprint ID"),
    ("types", "Document Type"),
    ("subjects", "Subject"),
    ("publication", "Publication Title"),
    ("issn", "ISSN"),
    ("year", "Year"),
    ("person", "Person"),
    ("person-az", "People A to Z"),
];

/// Ordered set of view ids with their display names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRegistry {
    views: Vec<(String, String)>,
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self {
            views: DEFAULT_VIEWS
                .iter()
                .map(|(id, name)| (id.to_string(), name.to_string()))
                .collect(),
        }
    }
}

impl ViewRegistry {
    /// Load a `{"view_id": "View Name"}` file. The defaults are replaced,
    /// not extended.
    pub fn load(path: &Path) -> DirectoryResult<Self> {
        Ok(Self {
            views: load_label_map(path)?,
        })
    }

    /// Registered view ids, in registry order
    pub fn supported_views(&self) -> Vec<&str> {
        self.views.iter().map(|(id, _)| id.as_str()).collect()
    }

    pub fn has_view(&self, id: &str) -> bool {
        self.views.iter().any(|(view, _)| view == id)
    }

    /// Display name of a view; unknown ids are returned unchanged
    pub fn normalize_view<'a>(&'a self, id: &'a str) -> &'a str {
        self.views
            .iter()
            .find(|(view, _)| view == id)
            .map(|(_, name)| name.as_str())
            .unwrap_or(id)
    }

    /// Facets behind the registered views, in registry order.
    ///
    /// A view id that names no facet is skipped with a warning.
    pub fn facets(&self) -> Vec<FacetKind> {
        self.views
            .iter()
            .filter_map(|(id, _)| match FacetKind::from_view(id) {
                Ok(kind) => Some(kind),
                Err(_) => {
                    log_event_with_fields(Event::ViewUnsupported, &[("view", id.as_str())]);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_views() {
        let registry = ViewRegistry::default();
        assert_eq!(registry.supported_views().len(), 8);
        assert!(registry.has_view("person-az"));
        assert!(!registry.has_view("latest"));
        assert_eq!(registry.normalize_view("issn"), "ISSN");
        assert_eq!(registry.normalize_view("committee"), "committee");
    }

    #[test]
    fn test_default_facets() {
        let facets = ViewRegistry::default().facets();
        assert_eq!(
            facets,
            vec![
                FacetKind::Ids,
                FacetKind::Types,
                FacetKind::Subjects,
                FacetKind::Publication,
                FacetKind::Issn,
                FacetKind::Year,
                FacetKind::People,
                FacetKind::People,
            ]
        );
    }

    #[test]
    fn test_load_replaces_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"event": "Conference", "latest": "Recent Additions"}"#)
            .unwrap();

        let registry = ViewRegistry::load(file.path()).unwrap();
        assert_eq!(registry.supported_views(), vec!["event", "latest"]);
        assert!(!registry.has_view("ids"));
        assert_eq!(
            registry.facets(),
            vec![FacetKind::Event, FacetKind::Latest]
        );
    }

    #[test]
    fn test_unknown_view_is_skipped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"year": "Year", "committee": "Committee"}"#)
            .unwrap();

        let registry = ViewRegistry::load(file.path()).unwrap();
        assert!(registry.has_view("committee"));
        assert_eq!(registry.facets(), vec![FacetKind::Year]);
    }

    #[test]
    fn test_only_unknown_views_yield_no_facets() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"advisor": "Advisor"}"#).unwrap();

        let registry = ViewRegistry::load(file.path()).unwrap();
        assert!(registry.facets().is_empty());
    }
}
