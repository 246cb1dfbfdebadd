//! Observability subsystem for eprintviews
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle events
//! - Scoped begin/complete tracing with elapsed time
//!
//! # Principles
//!
//! 1. Observability is read-only: it never changes a result
//! 2. No async or background threads
//! 3. Deterministic output for the same event and fields
//!
//! # Usage
//!
//! ```ignore
//! use eprintviews::observability::{Logger, Event, ObservationScope};
//!
//! Logger::info("RECORDS_LOADED", &[("count", "42")]);
//!
//! let scope = ObservationScope::new("VIEWS");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::{ObservationScope, Timer};

/// Log a lifecycle event at its own severity
pub fn log_event(event: Event) {
    Logger::log(event.severity(), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
