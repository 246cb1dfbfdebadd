//! Aggregation error types
//!
//! Error codes:
//! - EPV_AGGREGATE_MALFORMED_KEY (ERROR)
//! - EPV_AGGREGATE_UNKNOWN_FACET (ERROR)
//!
//! Missing fields and unresolved subject codes are never errors; they only
//! exclude a record from a facet.

use std::fmt;

/// Severity levels for aggregation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The facet call failed, other facets are unaffected
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// Aggregation error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateErrorCode {
    /// A grouping key could not be ordered numerically
    MalformedKey,
    /// A view name does not map to any facet
    UnknownFacet,
}

impl AggregateErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            AggregateErrorCode::MalformedKey => "EPV_AGGREGATE_MALFORMED_KEY",
            AggregateErrorCode::UnknownFacet => "EPV_AGGREGATE_UNKNOWN_FACET",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Error
    }
}

impl fmt::Display for AggregateErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Aggregation error with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateError {
    code: AggregateErrorCode,
    message: String,
    /// Offending key or view name
    subject: String,
}

impl AggregateError {
    /// A key that the facet must compare numerically is not an integer
    pub fn malformed_key(facet: &str, key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            code: AggregateErrorCode::MalformedKey,
            message: format!("{} key '{}' is not an integer", facet, key),
            subject: key,
        }
    }

    /// A view name with no facet behind it
    pub fn unknown_facet(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: AggregateErrorCode::UnknownFacet,
            message: format!("no facet named '{}'", name),
            subject: name,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> AggregateErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the key or view name that caused the error
    pub fn subject(&self) -> &str {
        &self.subject
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )
    }
}

impl std::error::Error for AggregateError {}

/// Result type for aggregation operations
pub type AggregateResult<T> = Result<T, AggregateError>;
