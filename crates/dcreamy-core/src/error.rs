//! # Error Types
//!
//! Domain-specific error types for dcreamy-core.
//!
//! ## Error Hierarchy
//! ```text
//! ValidationError  - input fails a business rule before any I/O
//! CoreError        - domain logic failures (wraps ValidationError)
//! DbError          - database failures, lives in dcreamy-db
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (names, ids, limits)
//! 3. Errors are enum variants, never String
//! 4. Insufficient stock is NOT an error anywhere in this system; it is
//!    advisory data returned by the deduction service

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id does not resolve to an active catalog row.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Stock item id does not resolve to an active row.
    #[error("Stock item not found: {0}")]
    StockItemNotFound(String),

    /// Shop id does not resolve.
    #[error("Shop not found: {0}")]
    ShopNotFound(String),

    /// A staff invite code was presented after its expiry instant.
    #[error("Invite code '{code}' has expired")]
    InviteExpired { code: String },

    /// A staff invite code was presented a second time.
    #[error("Invite code '{code}' was already used")]
    InviteAlreadyUsed { code: String },

    /// An operation reserved for the owner was attempted by staff.
    #[error("Operation requires the owner role")]
    OwnerRequired,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before business logic runs.
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

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., invalid UUID, malformed invite code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
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
        let err = CoreError::InviteExpired {
            code: "DCRMY1".to_string(),
        };
        assert_eq!(err.to_string(), "Invite code 'DCRMY1' has expired");

        let err = CoreError::ProductNotFound("prod-9".to_string());
        assert_eq!(err.to_string(), "Product not found: prod-9");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");
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
