//! # Validation Module
//!
//! Input validation for the owner-facing forms.
//!
//! Validation runs in layers: the frontend gives immediate feedback, these
//! functions enforce the business rules before a write, and the database
//! schema (NOT NULL, CHECK, UNIQUE, foreign keys) is the last line.
//!
//! ## Usage
//! ```rust
//! use dcreamy_core::validation::{validate_price, validate_quantity};
//!
//! validate_price("sell_price", 8_000).unwrap();
//! validate_quantity(3).unwrap();
//! ```

use crate::error::ValidationError;
use crate::{MAX_NAME_LENGTH, MAX_SALE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (product, stock item, shop).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_NAME_LENGTH`] characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a stock item unit label ("pcs", "botol", "kg").
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 20 characters
pub fn validate_unit(unit: &str) -> ValidationResult<()> {
    let unit = unit.trim();

    if unit.is_empty() {
        return Err(ValidationError::Required {
            field: "unit".to_string(),
        });
    }

    if unit.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "unit".to_string(),
            max: 20,
        });
    }

    Ok(())
}

/// Validates a staff invite code.
///
/// ## Rules
/// - 6 to 12 characters
/// - Uppercase letters and digits only, so codes survive being read out
///   loud over the counter
pub fn validate_invite_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "invite_code".to_string(),
        });
    }

    if code.len() < 6 || code.len() > 12 {
        return Err(ValidationError::OutOfRange {
            field: "invite_code".to_string(),
            min: 6,
            max: 12,
        });
    }

    if !code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "invite_code".to_string(),
            reason: "must contain only uppercase letters and digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a UUID string.
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_SALE_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_SALE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_SALE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price or amount in whole Rupiah.
///
/// Zero is allowed: giveaway products and zero-amount corrections exist.
pub fn validate_price(field: &str, rupiah: i64) -> ValidationResult<()> {
    if rupiah < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a transaction amount in whole Rupiah.
///
/// Unlike prices, a ledger entry of zero is meaningless; direction comes
/// from the transaction kind, so the amount itself must be positive.
pub fn validate_amount(rupiah: i64) -> ValidationResult<()> {
    if rupiah <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a minimum-stock threshold.
pub fn validate_min_stock(min_stock: i64) -> ValidationResult<()> {
    if min_stock < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "min_stock".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
