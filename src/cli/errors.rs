//! CLI-specific error types

use std::fmt;
use std::io;

use crate::aggregate::AggregateError;
use crate::lookup::DirectoryError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration or lookup file error
    ConfigError,
    /// Bad command-line value
    InvalidArgument,
    /// I/O error (files, stdout)
    IoError,
    /// A facet could not be built
    AggregateError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "EPV_CLI_CONFIG_ERROR",
            Self::InvalidArgument => "EPV_CLI_INVALID_ARGUMENT",
            Self::IoError => "EPV_CLI_IO_ERROR",
            Self::AggregateError => "EPV_CLI_AGGREGATE_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// Invalid argument
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArgument, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<AggregateError> for CliError {
    fn from(e: AggregateError) -> Self {
        Self::new(CliErrorCode::AggregateError, e.to_string())
    }
}

impl From<DirectoryError> for CliError {
    fn from(e: DirectoryError) -> Self {
        Self::config_error(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_aggregate_error() {
        let err: CliError = AggregateError::malformed_key("ids", "abc").into();
        assert_eq!(err.code(), &CliErrorCode::AggregateError);
        assert!(err.message().contains("EPV_AGGREGATE_MALFORMED_KEY"));
    }

    #[test]
    fn test_display() {
        let err = CliError::config_error("records is required");
        assert_eq!(err.to_string(), "EPV_CLI_CONFIG_ERROR: records is required");
    }
}
