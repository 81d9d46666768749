//! # Domain Types
//!
//! Core domain types for D'Creamy Finance, one struct per stored table.
//!
//! ## Entities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Shop ──< Profile (owner/staff)        Shop ──< StaffInvite     │
//! │    │                                                            │
//! │    ├──< Product ──< Transaction (income/expense ledger)         │
//! │    │        │                                                   │
//! │    │        └──< UsageRule >── StockItem                        │
//! │    └──< StockItem        (per-sale consumption mapping)         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entity carries a UUID v4 string id. Rows that owner-facing forms
//! can remove use soft deletion (`is_active`) so historical transactions
//! keep resolving.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Enums
// =============================================================================

/// Role attached to an authenticated profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Owns the shop: full access, manages staff.
    Owner,
    /// Records sales and restocks; cannot manage accounts.
    Staff,
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Staff
    }
}

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money in: a sale or other revenue.
    Income,
    /// Money out: supplies, rent, wages.
    Expense,
}

/// How the customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash in the till.
    Cash,
    /// QRIS scan-to-pay.
    Qris,
    /// Bank transfer.
    Transfer,
}

// =============================================================================
// Profile
// =============================================================================

/// A user account, keyed by the id the external auth provider issued.
///
/// This repository never authenticates anyone; it only stores the profile
/// row the surrounding application attaches to a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Profile {
    /// Auth-provider user id (UUID).
    pub id: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    /// Shop this account works at. `None` for staff awaiting assignment.
    pub shop_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Checks whether this account may manage the shop and its staff.
    #[inline]
    pub fn is_owner(&self) -> bool {
        self.role == UserRole::Owner
    }
}

// =============================================================================
// Shop
// =============================================================================

/// A warung. One owner, any number of staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Shop {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Staff Invite
// =============================================================================

/// A single-use code the owner hands to a new staff member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StaffInvite {
    pub id: String,
    pub shop_id: String,
    pub invite_code: String,
    pub expires_at: DateTime<Utc>,
    /// Profile id that redeemed the code, if any.
    pub used_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StaffInvite {
    /// Checks whether the invite has passed its expiry instant.
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks whether the invite was already redeemed.
    #[inline]
    pub fn is_used(&self) -> bool {
        self.used_by.is_some()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog item the shop sells.
///
/// `stock` is the sellable count shown on the POS grid. It is distinct from
/// [`StockItem`], which tracks back-room supplies (cups, straws, syrup)
/// consumed per sale through [`UsageRule`] mappings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: String,
    pub shop_id: String,
    pub name: String,
    pub category: String,
    /// Emoji shown on the POS grid tile.
    pub emoji: Option<String>,
    pub image_url: Option<String>,
    /// Purchase cost per unit, whole Rupiah.
    pub buy_price: i64,
    /// Selling price per unit, whole Rupiah.
    pub sell_price: i64,
    /// On-hand sellable units.
    pub stock: i64,
    /// Soft-delete flag.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Selling price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_rupiah(self.sell_price)
    }

    /// Purchase cost as Money.
    #[inline]
    pub fn unit_cost(&self) -> Money {
        Money::from_rupiah(self.buy_price)
    }

    /// Per-unit margin. Negative when the catalog has the prices inverted;
    /// reports must render that rather than panic.
    #[inline]
    pub fn margin(&self) -> Money {
        self.unit_price().saturating_sub(self.unit_cost())
    }

    /// Checks whether `quantity` units can be sold from the on-hand count.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.is_active && self.stock >= quantity
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// One ledger entry: a sale (income) or an expense.
///
/// Sales recorded from the POS grid carry the product id and quantity;
/// free-form entries (a cash expense, a catering payment) carry neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Transaction {
    pub id: String,
    pub shop_id: String,
    pub kind: TransactionKind,
    /// Whole Rupiah, always positive; direction comes from `kind`.
    pub amount: i64,
    pub product_id: Option<String>,
    pub quantity: Option<i64>,
    pub category: String,
    pub note: Option<String>,
    pub receipt_url: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    /// Profile id of the user who recorded the entry.
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// The amount with its ledger sign: positive income, negative expense.
    #[inline]
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => Money::from_rupiah(self.amount),
            TransactionKind::Expense => Money::from_rupiah(-self.amount),
        }
    }

    /// Checks whether this entry is revenue.
    #[inline]
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

// =============================================================================
// Stock Item
// =============================================================================

/// A back-room supply tracked by count: cups, straws, a syrup bottle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StockItem {
    pub id: String,
    pub shop_id: String,
    pub name: String,
    /// On-hand count. Never below zero; deduction floors there.
    pub quantity: i64,
    /// Unit label shown next to the count ("pcs", "botol", "kg").
    pub unit: String,
    /// Threshold below which the low-stock warning fires.
    pub min_stock: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StockItem {
    /// Checks whether the on-hand count has fallen below the warning
    /// threshold.
    #[inline]
    pub fn is_below_minimum(&self) -> bool {
        self.quantity < self.min_stock
    }
}

// =============================================================================
// Usage Rule
// =============================================================================

/// How many units of one stock item a single sale of one product consumes.
///
/// Unique per (product, stock item) pair. A product with no rules simply
/// consumes no tracked supplies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct UsageRule {
    pub id: String,
    pub product_id: String,
    pub stock_item_id: String,
    /// Units consumed per product sold.
    pub quantity_used: i64,
}

impl UsageRule {
    /// Total units this rule consumes for a sale of `quantity` products.
    #[inline]
    pub fn required_for(&self, quantity: i64) -> i64 {
        self.quantity_used * quantity
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn stock_item(quantity: i64, min_stock: i64) -> StockItem {
        StockItem {
            id: "si-1".to_string(),
            shop_id: "shop-1".to_string(),
            name: "Cup 12oz".to_string(),
            quantity,
            unit: "pcs".to_string(),
            min_stock,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_below_minimum_threshold() {
        assert!(stock_item(4, 5).is_below_minimum());
        assert!(!stock_item(5, 5).is_below_minimum());
        assert!(!stock_item(6, 5).is_below_minimum());
    }

    #[test]
    fn test_signed_amount_direction() {
        let mut tx = Transaction {
            id: "tx-1".to_string(),
            shop_id: "shop-1".to_string(),
            kind: TransactionKind::Income,
            amount: 15_000,
            product_id: None,
            quantity: None,
            category: "penjualan".to_string(),
            note: None,
            receipt_url: None,
            payment_method: Some(PaymentMethod::Cash),
            created_by: "user-1".to_string(),
            created_at: Utc::now(),
        };

        assert_eq!(tx.signed_amount().rupiah(), 15_000);
        assert!(tx.is_income());

        tx.kind = TransactionKind::Expense;
        assert_eq!(tx.signed_amount().rupiah(), -15_000);
        assert!(!tx.is_income());
    }

    #[test]
    fn test_invite_expiry_and_use() {
        let now = Utc::now();
        let invite = StaffInvite {
            id: "inv-1".to_string(),
            shop_id: "shop-1".to_string(),
            invite_code: "DCRMY1".to_string(),
            expires_at: now + Duration::hours(24),
            used_by: None,
            created_at: now,
        };

        assert!(!invite.is_expired(now));
        assert!(invite.is_expired(now + Duration::hours(24)));
        assert!(!invite.is_used());
    }

    #[test]
    fn test_usage_rule_required_for() {
        let rule = UsageRule {
            id: "rule-1".to_string(),
            product_id: "prod-1".to_string(),
            stock_item_id: "si-1".to_string(),
            quantity_used: 2,
        };

        assert_eq!(rule.required_for(1), 2);
        assert_eq!(rule.required_for(3), 6);
    }

    #[test]
    fn test_enum_wire_format() {
        // The database CHECK constraints and the frontend both expect the
        // lowercase names
        assert_eq!(serde_json::to_string(&UserRole::Owner).unwrap(), "\"owner\"");
        assert_eq!(
            serde_json::to_string(&TransactionKind::Income).unwrap(),
            "\"income\""
        );
        assert_eq!(serde_json::to_string(&PaymentMethod::Qris).unwrap(), "\"qris\"");
        assert_eq!(
            serde_json::from_str::<PaymentMethod>("\"transfer\"").unwrap(),
            PaymentMethod::Transfer
        );
    }

    #[test]
    fn test_product_margin_and_can_sell() {
        let product = Product {
            id: "prod-1".to_string(),
            shop_id: "shop-1".to_string(),
            name: "Es Krim Coklat".to_string(),
            category: "es krim".to_string(),
            emoji: Some("🍫".to_string()),
            image_url: None,
            buy_price: 5_000,
            sell_price: 8_000,
            stock: 10,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(product.margin().rupiah(), 3_000);
        assert!(product.can_sell(10));
        assert!(!product.can_sell(11));
    }
}
