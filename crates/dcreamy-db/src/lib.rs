//! # dcreamy-db: Database Layer for D'Creamy Finance
//!
//! SQLite persistence for the warung POS and bookkeeping system, using
//! sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   D'Creamy Finance Data Flow                    │
//! │                                                                 │
//! │  Application (record sale, restock, open report)                │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                  dcreamy-db (THIS CRATE)                  │  │
//! │  │                                                           │  │
//! │  │  ┌──────────┐  ┌──────────────┐  ┌────────────────────┐   │  │
//! │  │  │ Database │  │ Repositories │  │ StockDeduction     │   │  │
//! │  │  │ (pool)   │◄─┤ shop profile │◄─┤ Service            │   │  │
//! │  │  │          │  │ product tx   │  │ (best-effort)      │   │  │
//! │  │  │          │  │ stock        │  │                    │   │  │
//! │  │  └──────────┘  └──────────────┘  └────────────────────┘   │  │
//! │  │        embedded migrations from migrations/sqlite/        │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  SQLite database file (WAL mode, foreign keys on)               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dcreamy_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/dcreamy.db")).await?;
//!
//! let products = db.products().list_active(&shop_id).await?;
//! let outcome = db.stock_deduction().deduct(&product_id, 2).await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod stock_deduction;

#[cfg(test)]
pub(crate) mod testutil;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use stock_deduction::{DeductionOutcome, StockDeductionService};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::profile::{ProfileRepository, RedeemOutcome};
pub use repository::shop::ShopRepository;
pub use repository::stock::{DecrementOutcome, StockRepository};
pub use repository::transaction::{CategoryTotal, LedgerSummary, TransactionRepository};
