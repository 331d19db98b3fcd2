//! # Console Error Type
//!
//! Unified error type for console commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tesouraria                             │
//! │                                                                         │
//! │  Operator                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  > add out 3 1                                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<Outcome, CliError>                                       │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Line malformed? ─── clap / shell-words error ────┐             │  │
//! │  │         │                                         │             │  │
//! │  │         ▼                                         ▼             │  │
//! │  │  Rejected by core? ─── CoreError::Unknown... ─── CliError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  error [NOT_FOUND]: Denomination not found: R$ 3,00                     │
//! │  (the session keeps running)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tesouraria_core::{CoreError, ValidationError};

use crate::state::ConfigError;

/// Error returned from console commands.
///
/// ## Serialization
/// A failing line that carried `--json` prints its error as:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Transaction not found: #7"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("error [{code}]: {message}")]
pub struct CliError {
    /// Machine-readable error code for scripts driving the console
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for console responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Denomination, extra entry or transaction does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// The command line could not be understood
    Usage,

    /// Configuration could not be loaded or is invalid
    ConfigError,

    /// Input/output or other unexpected failure
    Internal,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::Usage => "USAGE",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CliError {
    /// Creates a new console error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a usage error (unknown command, missing argument, bad quoting).
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Usage, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to console errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownDenomination(value) => CliError::not_found("Denomination", value),
            CoreError::Validation(e) => CliError::from(e),
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        // Log the actual error but return a generic message
        tracing::error!("Console I/O failed: {}", err);
        CliError::internal("Console input/output failed")
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON rendering failed: {}", err);
        CliError::internal("Could not render JSON output")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tesouraria_core::Money;

    #[test]
    fn test_unknown_denomination_maps_to_not_found() {
        let err = CliError::from(CoreError::UnknownDenomination(Money::from_cents(300)));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Denomination not found: R$ 3,00");
    }

    #[test]
    fn test_validation_maps_to_validation_error() {
        let err = CliError::from(CoreError::Validation(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "quantity must be positive");
    }

    #[test]
    fn test_display_and_json() {
        let err = CliError::not_found("Transaction", "#7");
        assert_eq!(err.to_string(), "error [NOT_FOUND]: Transaction not found: #7");

        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r##"{"code":"NOT_FOUND","message":"Transaction not found: #7"}"##);
    }
}
