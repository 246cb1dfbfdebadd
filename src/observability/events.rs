//! Observable events for eprintviews
//!
//! Events are explicit and typed. Scoped begin/complete pairs are emitted by
//! [`super::ObservationScope`] instead.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Inputs
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Record set decoded
    RecordsLoaded,
    /// Subject directory loaded
    SubjectsLoaded,
    /// View registry loaded
    ViewsLoaded,
    /// A registered view names no facet and is not built
    ViewUnsupported,

    // Aggregation
    /// A facet produced no groups
    FacetEmpty,
}

impl Event {
    /// Returns the event name as logged
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::RecordsLoaded => "RECORDS_LOADED",
            Event::SubjectsLoaded => "SUBJECTS_LOADED",
            Event::ViewsLoaded => "VIEWS_LOADED",
            Event::ViewUnsupported => "VIEW_UNSUPPORTED",
            Event::FacetEmpty => "FACET_EMPTY",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::ViewUnsupported | Event::FacetEmpty => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
