//! eprintviews - faceted browse views over repository deposit records
//!
//! Groups an in-memory set of bibliographic records by contributor, year,
//! venue, collection, event, subject, type, identifier and recent
//! modification, producing deterministically ordered group lists ready to be
//! rendered as browse pages.

pub mod aggregate;
pub mod cli;
pub mod lookup;
pub mod observability;
pub mod record;

pub use aggregate::{AggregateError, AggregateResult, Aggregator, FacetKind, GroupDescriptor};
pub use lookup::{SubjectDirectory, SubjectMap, ViewRegistry};
pub use record::Record;
