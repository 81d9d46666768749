//! # Money Module
//!
//! Provides the `Money` type for handling Rupiah amounts safely.
//!
//! ## Why Integer Money?
//! Floating point cannot represent money: `0.1 + 0.2 != 0.3`, and over a
//! ledger of thousands of warung transactions the drift is real money.
//! All amounts in this system are whole Rupiah stored as `i64`. IDR has a
//! sen subunit on paper but no price in the shop ever uses it, which is
//! also how the amounts are stored in the transactions table.
//!
//! ## Usage
//! ```rust
//! use dcreamy_core::money::Money;
//!
//! let price = Money::from_rupiah(15_000); // Rp15.000 per cup
//! let line_total = price * 3i64;
//! assert_eq!(line_total.rupiah(), 45_000);
//! assert_eq!(line_total.to_string(), "Rp45.000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole Indonesian Rupiah.
///
/// ## Design Decisions
/// - **i64 (signed)**: negative values represent losses and refunds
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Transparent serde**: serializes as the bare integer the database
///   and the frontend both expect
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates an amount from whole Rupiah.
    #[inline]
    pub const fn from_rupiah(rupiah: i64) -> Self {
        Money(rupiah)
    }

    /// Returns the amount in whole Rupiah.
    #[inline]
    pub const fn rupiah(&self) -> i64 {
        self.0
    }

    /// Zero amount.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the amount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the amount is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the amount is less than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies a unit price by a quantity sold.
    ///
    /// ## Example
    /// ```rust
    /// use dcreamy_core::money::Money;
    ///
    /// let unit_price = Money::from_rupiah(8_000);
    /// assert_eq!(unit_price.multiply_quantity(3).rupiah(), 24_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Subtraction that saturates instead of wrapping.
    ///
    /// Used for margin math where a data-entry error (buy price above sell
    /// price) must not panic a report.
    #[inline]
    pub const fn saturating_sub(&self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders the Indonesian convention: `Rp15.000`, dots as thousand
/// separators, no decimal part.
///
/// Debug-quality formatting; the frontend owns proper localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }

        write!(f, "{}Rp{}", sign, grouped)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Sums line totals into a grand total.
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
