//! Faceted aggregation subsystem for eprintviews
//!
//! Groups an in-memory record set along one facet at a time and emits a
//! deterministically ordered list of group descriptors.
//!
//! # Aggregation Flow
//!
//! 1. Scan every record once, deriving the facet key(s) for it
//! 2. Add the record to its group in a fresh per-call arena
//! 3. Release the groups in first-seen order
//! 4. Apply the facet's stable sort
//!
//! # Invariants
//!
//! - Keys are unique within one facet result
//! - `count` equals the number of `objects` in every group
//! - Same records in, same groups out, in the same order
//! - Only the identifier facet can fail

mod aggregator;
mod errors;
mod facet;
mod group;
mod sorter;

pub use aggregator::{Aggregator, LATEST_WINDOW_DAYS};
pub use errors::{AggregateError, AggregateErrorCode, AggregateResult, Severity};
pub use facet::FacetKind;
pub use group::{GroupDescriptor, GroupSet};
pub use sorter::{GroupSorter, SortDirection, SortField, SortSpec};
