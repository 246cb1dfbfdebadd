//! Facet kinds and the view names that select them

use std::fmt;
use std::str::FromStr;

use super::errors::{AggregateError, AggregateResult};

/// One grouping dimension over a record set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FacetKind {
    /// By record identifier
    Ids,
    /// By contributor
    People,
    /// By publication year
    Year,
    /// By publication title
    Publication,
    /// By ISSN
    Issn,
    /// By collection
    Collection,
    /// By conference event
    Event,
    /// By subject heading
    Subjects,
    /// By object type
    Types,
    /// By last-modified timestamp within the past week
    Latest,
}

impl FacetKind {
    /// Every facet, in canonical order
    pub const ALL: [FacetKind; 10] = [
        FacetKind::Ids,
        FacetKind::People,
        FacetKind::Year,
        FacetKind::Publication,
        FacetKind::Issn,
        FacetKind::Collection,
        FacetKind::Event,
        FacetKind::Subjects,
        FacetKind::Types,
        FacetKind::Latest,
    ];

    /// Canonical facet name, used as the key of multi-facet results
    pub fn as_str(&self) -> &'static str {
        match self {
            FacetKind::Ids => "ids",
            FacetKind::People => "person",
            FacetKind::Year => "year",
            FacetKind::Publication => "publication",
            FacetKind::Issn => "issn",
            FacetKind::Collection => "collection",
            FacetKind::Event => "event",
            FacetKind::Subjects => "subjects",
            FacetKind::Types => "types",
            FacetKind::Latest => "latest",
        }
    }

    /// Resolve a view name.
    ///
    /// `person`, `person-az` and `author` are the same contributor facet
    /// under the names repository sites publish it as.
    pub fn from_view(name: &str) -> AggregateResult<Self> {
        match name {
            "ids" => Ok(FacetKind::Ids),
            "people" | "person" | "person-az" | "author" => Ok(FacetKind::People),
            "year" => Ok(FacetKind::Year),
            "publication" => Ok(FacetKind::Publication),
            "issn" => Ok(FacetKind::Issn),
            "collection" => Ok(FacetKind::Collection),
            "event" => Ok(FacetKind::Event),
            "subjects" => Ok(FacetKind::Subjects),
            "types" => Ok(FacetKind::Types),
            "latest" => Ok(FacetKind::Latest),
            other => Err(AggregateError::unknown_facet(other)),
        }
    }
}

impl FromStr for FacetKind {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_view(s)
    }
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::errors::AggregateErrorCode;

    #[test]
    fn test_canonical_names_round_trip() {
        for kind in FacetKind::ALL {
            assert_eq!(FacetKind::from_view(kind.as_str()), Ok(kind));
        }
    }

    #[test]
    fn test_contributor_canonical_name_is_registry_id() {
        assert_eq!(FacetKind::People.as_str(), "person");
        assert_eq!(FacetKind::People.to_string(), "person");
    }

    #[test]
    fn test_contributor_aliases() {
        for name in ["people", "person", "person-az", "author"] {
            assert_eq!(name.parse::<FacetKind>(), Ok(FacetKind::People));
        }
    }

    #[test]
    fn test_unknown_view() {
        let err = FacetKind::from_view("group").unwrap_err();
        assert_eq!(err.code(), AggregateErrorCode::UnknownFacet);
        assert_eq!(err.subject(), "group");
    }
}
