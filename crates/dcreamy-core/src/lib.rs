//! # dcreamy-core: Pure Business Logic for D'Creamy Finance
//!
//! This crate is the heart of the D'Creamy warung point-of-sale and
//! bookkeeping system. It contains all business logic as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  D'Creamy Finance Architecture                  │
//! │                                                                 │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │          Web application (out of scope here)              │  │
//! │  │    POS forms ──► Stock pages ──► Reports ──► Staff mgmt   │  │
//! │  └──────────────────────────────┬────────────────────────────┘  │
//! │                                 │                               │
//! │  ┌──────────────────────────────▼────────────────────────────┐  │
//! │  │              ★ dcreamy-core (THIS CRATE) ★                │  │
//! │  │                                                           │  │
//! │  │  ┌──────────────┐ ┌───────┐ ┌────────┐ ┌────────────┐     │  │
//! │  │  │ business_day │ │ money │ │ types  │ │ validation │     │  │
//! │  │  │ 21:00 cutoff │ │ IDR   │ │ domain │ │ rules      │     │  │
//! │  │  └──────────────┘ └───────┘ └────────┘ └────────────┘     │  │
//! │  │                                                           │  │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS       │  │
//! │  └──────────────────────────────┬────────────────────────────┘  │
//! │                                 │                               │
//! │  ┌──────────────────────────────▼────────────────────────────┐  │
//! │  │               dcreamy-db (Database Layer)                 │  │
//! │  │       SQLite queries, migrations, stock deduction         │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`business_day`] - The 21:00 WIB trading-day window and countdown
//! - [`money`] - Rupiah amounts with integer arithmetic (no floating point!)
//! - [`types`] - Domain types (Product, Transaction, StockItem, etc.)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are whole Rupiah (i64), never floats
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use dcreamy_core::business_day::BusinessDayClock;
//!
//! let clock = BusinessDayClock::default();
//!
//! // 2026-02-05 08:00 WIB is 2026-02-05 01:00 UTC
//! let morning = Utc.with_ymd_and_hms(2026, 2, 5, 1, 0, 0).unwrap();
//!
//! // The trading window opened at yesterday's 21:00 WIB
//! let (start, end) = clock.business_day_range_for(morning);
//! assert_eq!(start, Utc.with_ymd_and_hms(2026, 2, 4, 14, 0, 0).unwrap());
//! assert_eq!(end - start, chrono::Duration::hours(24));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod business_day;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use dcreamy_core::Money` instead of
// `use dcreamy_core::money::Money`

pub use business_day::BusinessDayClock;
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Hour of the day (24h, shop local time) at which one business day ends and
/// the next begins. Staff cash out at 21:00, so sales after that hour count
/// towards the next trading day rather than the calendar day.
pub const DAILY_CUTOFF_HOUR: u32 = 21;

/// The shop's fixed UTC offset in hours (WIB, UTC+7).
///
/// ## Why a constant?
/// This is a business rule, not timezone handling: the shop trades in WIB,
/// WIB has no daylight saving, and the reporting windows must be stable.
/// A static offset is added to UTC; no timezone database is consulted.
pub const SHOP_UTC_OFFSET_HOURS: i32 = 7;

/// Maximum quantity accepted for a single sale line.
///
/// ## Business Reason
/// Prevents accidental over-entry (e.g., typing 1000 instead of 10).
pub const MAX_SALE_QUANTITY: i64 = 999;

/// Maximum length accepted for free-text names (products, stock items).
pub const MAX_NAME_LENGTH: usize = 200;
