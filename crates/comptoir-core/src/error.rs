//! # Error Types
//!
//! Domain-specific error types for comptoir-core.
//!
//! ## Error Hierarchy
//! ```text
//! comptoir-core errors (this file)
//! ├── CoreError        - General domain errors
//! └── ValidationError  - Input validation failures
//!
//! comptoir-store errors (separate crate)
//! └── StoreError       - Persistence failures, not-found
//!
//! comptoir-session errors (separate crate)
//! └── SessionError     - Lifecycle state violations
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (reference, id, field)
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Core business logic errors.
///
/// These represent domain rule violations. They are caught by the caller
/// and translated into a user-facing message; none of them is fatal.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Line item id absent from the document's ledger.
    #[error("Line item not found: {0}")]
    LineItemNotFound(String),

    /// Payment entry id absent from the document's payment ledger.
    #[error("Payment entry not found: {0}")]
    PaymentNotFound(String),

    /// Document already carries the maximum number of line items.
    #[error("Document cannot have more than {max} line items")]
    TooManyLineItems { max: usize },

    /// Discount outside [0, 10000] basis points.
    #[error("Discount {bps} bps is out of range (0-10000)")]
    DiscountOutOfRange { bps: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Input validation errors.
///
/// Required-field validation happens at the UI boundary before the core is
/// reached; these validators exist for that boundary and for tests.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed reference or email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::PaymentNotFound("pay-42".to_string());
        assert_eq!(err.to_string(), "Payment entry not found: pay-42");

        let err = CoreError::TooManyLineItems { max: 200 };
        assert_eq!(
            err.to_string(),
            "Document cannot have more than 200 line items"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
