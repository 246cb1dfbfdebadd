//! Lookup tables consulted around aggregation
//!
//! - Subject directory: subject code to label, used by the subject facet
//! - View registry: which views a site publishes and their display names
//!
//! Both load from flat `{"code": "Label"}` JSON files.

mod errors;
mod file;
mod subjects;
mod views;

pub use errors::{DirectoryError, DirectoryResult};
pub use subjects::{SubjectDirectory, SubjectMap};
pub use views::ViewRegistry;
