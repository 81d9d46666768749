//! # Stock Deduction Service
//!
//! When a sale is recorded, every stock item the product consumes gets
//! decremented by its usage rule times the quantity sold.
//!
//! ## Deduction Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  deduct("es-krim-vanilla", 3)                                   │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  rules_for_product ──── fetch fails ──► success: false, stop    │
//! │       │                                                         │
//! │       ├── no rules ──► success: true, nothing to do             │
//! │       │                                                         │
//! │       ▼  per rule: required = quantity_used × 3                 │
//! │  try_decrement(stock_item, required)                            │
//! │       ├── Applied          count reduced, move on               │
//! │       ├── Floored { name } count now 0, name reported           │
//! │       ├── Missing          rule is a dead link, skip            │
//! │       └── Err(_)           logged and skipped, move on          │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  success: true, insufficient_items: [names]                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Best-effort by policy
//! Deduction is non-atomic across items: the sale has already happened at
//! the counter, so nothing here may block or reverse it.
//! Individual failures are logged and skipped; insufficiency is advisory
//! data for a warning banner, never an error. Within a single item the
//! decrement IS atomic (a conditional `UPDATE ... WHERE quantity >= ?`),
//! so concurrent sales cannot lose each other's updates or drive a count
//! negative.

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::repository::stock::{DecrementOutcome, StockRepository};
use dcreamy_core::validation::validate_quantity;

// =============================================================================
// Result Record
// =============================================================================

/// Outcome of one deduction pass.
///
/// `success: false` means the usage rules could not be fetched and nothing
/// was deducted. `insufficient_items` lists the display names of items
/// whose on-hand count was short of the required amount; those were
/// floored to zero and the caller may warn the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionOutcome {
    pub success: bool,
    pub insufficient_items: Vec<String>,
}

impl DeductionOutcome {
    fn succeeded(insufficient_items: Vec<String>) -> Self {
        DeductionOutcome {
            success: true,
            insufficient_items,
        }
    }

    fn failed() -> Self {
        DeductionOutcome {
            success: false,
            insufficient_items: Vec::new(),
        }
    }

    /// True when every linked item had enough stock on hand.
    pub fn fully_covered(&self) -> bool {
        self.success && self.insufficient_items.is_empty()
    }
}

// =============================================================================
// Service
// =============================================================================

/// Deducts linked stock items when a product is sold.
///
/// Holds its repository by value; construct one per database handle via
/// [`crate::Database::stock_deduction`] or directly in tests with an
/// in-memory repository.
#[derive(Debug, Clone)]
pub struct StockDeductionService {
    stock: StockRepository,
}

impl StockDeductionService {
    /// Creates the service over a stock repository.
    pub fn new(stock: StockRepository) -> Self {
        StockDeductionService { stock }
    }

    /// Deducts stock for a sale of `quantity` units of `product_id`.
    ///
    /// Never returns an error and never blocks the sale: failures are
    /// logged to the diagnostic channel and degrade per the flow above.
    pub async fn deduct(&self, product_id: &str, quantity: i64) -> DeductionOutcome {
        if let Err(e) = validate_quantity(quantity) {
            warn!(product_id = %product_id, quantity = %quantity, error = %e,
                "Rejecting deduction with invalid quantity");
            return DeductionOutcome::failed();
        }

        let rules = match self.stock.rules_for_product(product_id).await {
            Ok(rules) => rules,
            Err(e) => {
                error!(product_id = %product_id, error = %e, "Failed to fetch usage rules");
                return DeductionOutcome::failed();
            }
        };

        if rules.is_empty() {
            // Product consumes no tracked supplies
            return DeductionOutcome::succeeded(Vec::new());
        }

        let mut insufficient_items = Vec::new();

        for rule in &rules {
            let required = rule.required_for(quantity);

            match self.stock.try_decrement(&rule.stock_item_id, required).await {
                Ok(DecrementOutcome::Applied) => {}
                Ok(DecrementOutcome::Floored { name }) => {
                    warn!(
                        stock_item = %name,
                        required = %required,
                        "Insufficient stock, floored to zero"
                    );
                    insufficient_items.push(name);
                }
                Ok(DecrementOutcome::Missing) => {
                    warn!(
                        stock_item_id = %rule.stock_item_id,
                        product_id = %product_id,
                        "Usage rule points at a missing stock item, skipping"
                    );
                }
                Err(e) => {
                    // Per-item failures never abort the pass
                    error!(
                        stock_item_id = %rule.stock_item_id,
                        error = %e,
                        "Failed to decrement stock item, skipping"
                    );
                }
            }
        }

        DeductionOutcome::succeeded(insufficient_items)
    }

    /// Deducts stock for a single-unit sale.
    pub async fn deduct_one(&self, product_id: &str) -> DeductionOutcome {
        self.deduct(product_id, 1).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
