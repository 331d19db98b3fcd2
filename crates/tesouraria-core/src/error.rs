//! # Error Types
//!
//! Domain-specific error types for tesouraria-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tesouraria-core errors (this file)                                    │
//! │  ├── CoreError        - Rejected ledger operations                     │
//! │  └── ValidationError  - Input / configuration validation failures      │
//! │                                                                         │
//! │  Console errors (in app)                                               │
//! │  └── CliError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → Operator               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## When Errors Are NOT Raised
//! The ledger follows a clamp-or-ignore policy for typed-in values: a
//! negative count becomes zero, a non-numeric amount becomes zero, an unknown
//! id is a no-op. Errors only exist where the caller must be told that
//! nothing happened: a transaction that was not created, or a denomination
//! table that cannot be used.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The denomination value is not in the configured table.
    ///
    /// ## When This Occurs
    /// - A transaction references a value such as R$ 3,00
    /// - The draft form is pointed at a value outside the table
    #[error("Denomination {0} is not configured")]
    UnknownDenomination(Money),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., the same denomination listed twice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownDenomination(Money::from_cents(300));
        assert_eq!(err.to_string(), "Denomination R$ 3,00 is not configured");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");

        let err = ValidationError::Duplicate {
            field: "denomination value".to_string(),
            value: "R$ 2,00".to_string(),
        };
        assert_eq!(err.to_string(), "denomination value 'R$ 2,00' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Validation error: quantity is required");
    }
}
