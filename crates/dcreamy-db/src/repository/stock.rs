//! # Stock Repository
//!
//! Stock items (back-room supplies) and the usage rules that map products
//! onto them. The write primitives here are all deltas or conditional
//! updates, never read-modify-write, so concurrent sales cannot lose each
//! other's decrements.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use dcreamy_core::{StockItem, UsageRule};

/// Result of one conditional stock decrement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecrementOutcome {
    /// The full amount was subtracted.
    Applied,
    /// On-hand count was short; the quantity was floored to zero and the
    /// item's name is reported for the insufficiency warning.
    Floored { name: String },
    /// No active stock item with this id (deleted since the rule was
    /// configured).
    Missing,
}

/// Repository for stock items and product usage rules.
#[derive(Debug, Clone)]
pub struct StockRepository {
    pool: SqlitePool,
}

const STOCK_ITEM_COLUMNS: &str = "id, shop_id, name, quantity, unit, min_stock, \
     is_active, created_at, updated_at";

impl StockRepository {
    /// Creates a new StockRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StockRepository { pool }
    }

    // -------------------------------------------------------------------------
    // Stock items
    // -------------------------------------------------------------------------

    /// Lists the active stock items of a shop, sorted by name.
    pub async fn list_active(&self, shop_id: &str) -> DbResult<Vec<StockItem>> {
        let items = sqlx::query_as::<_, StockItem>(&format!(
            "SELECT {STOCK_ITEM_COLUMNS} FROM stock_items \
             WHERE shop_id = ?1 AND is_active = 1 \
             ORDER BY name"
        ))
        .bind(shop_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets a stock item by its ID, active or not.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<StockItem>> {
        let item = sqlx::query_as::<_, StockItem>(&format!(
            "SELECT {STOCK_ITEM_COLUMNS} FROM stock_items WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts a new stock item.
    pub async fn insert(&self, item: &StockItem) -> DbResult<()> {
        debug!(id = %item.id, name = %item.name, "Inserting stock item");

        sqlx::query(
            r#"
            INSERT INTO stock_items (
                id, shop_id, name, quantity, unit, min_stock,
                is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&item.id)
        .bind(&item.shop_id)
        .bind(&item.name)
        .bind(item.quantity)
        .bind(&item.unit)
        .bind(item.min_stock)
        .bind(item.is_active)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates a stock item's editable fields (name, unit, threshold).
    ///
    /// The on-hand quantity is not written here; counts only move through
    /// [`StockRepository::restock`] and
    /// [`StockRepository::try_decrement`].
    pub async fn update(&self, item: &StockItem) -> DbResult<()> {
        debug!(id = %item.id, "Updating stock item");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE stock_items SET
                name = ?2,
                unit = ?3,
                min_stock = ?4,
                is_active = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(&item.unit)
        .bind(item.min_stock)
        .bind(item.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Stock item", &item.id));
        }

        Ok(())
    }

    /// Adds `quantity` units to a stock item (a delivery arrived).
    pub async fn restock(&self, id: &str, quantity: i64) -> DbResult<()> {
        debug!(id = %id, quantity = %quantity, "Restocking item");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE stock_items SET
                quantity = quantity + ?2,
                updated_at = ?3
            WHERE id = ?1 AND is_active = 1
            "#,
        )
        .bind(id)
        .bind(quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Stock item", id));
        }

        Ok(())
    }

    /// Subtracts `amount` units if the full amount is on hand.
    ///
    /// Two statements, both atomic on their own:
    /// 1. a conditional decrement that only applies when
    ///    `quantity >= amount`, so concurrent sales can never drive the
    ///    count negative or lose an update;
    /// 2. if that matched nothing, a floor-to-zero that reports the item's
    ///    name for the insufficiency warning.
    ///
    /// The caller treats [`DecrementOutcome::Floored`] as advisory data,
    /// not an error; the sale that triggered the deduction proceeds.
    pub async fn try_decrement(&self, id: &str, amount: i64) -> DbResult<DecrementOutcome> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE stock_items SET
                quantity = quantity - ?2,
                updated_at = ?3
            WHERE id = ?1 AND is_active = 1 AND quantity >= ?2
            "#,
        )
        .bind(id)
        .bind(amount)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(DecrementOutcome::Applied);
        }

        // Short on stock (or gone). Floor to zero and pick up the name in
        // the same statement.
        let name: Option<String> = sqlx::query_scalar(
            r#"
            UPDATE stock_items SET
                quantity = 0,
                updated_at = ?2
            WHERE id = ?1 AND is_active = 1
            RETURNING name
            "#,
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        match name {
            Some(name) => Ok(DecrementOutcome::Floored { name }),
            None => Ok(DecrementOutcome::Missing),
        }
    }

    /// Soft-deletes a stock item. Usage rules pointing at it become
    /// dead links that the deduction service skips.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting stock item");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE stock_items SET
                is_active = 0,
                updated_at = ?2
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Stock item", id));
        }

        Ok(())
    }

    /// Lists active items whose on-hand count is below their minimum-stock
    /// threshold (the low-stock warning banner).
    pub async fn below_minimum(&self, shop_id: &str) -> DbResult<Vec<StockItem>> {
        let items = sqlx::query_as::<_, StockItem>(&format!(
            "SELECT {STOCK_ITEM_COLUMNS} FROM stock_items \
             WHERE shop_id = ?1 AND is_active = 1 AND quantity < min_stock \
             ORDER BY name"
        ))
        .bind(shop_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    // -------------------------------------------------------------------------
    // Usage rules
    // -------------------------------------------------------------------------

    /// Lists the usage rules configured for a product.
    pub async fn rules_for_product(&self, product_id: &str) -> DbResult<Vec<UsageRule>> {
        let rules = sqlx::query_as::<_, UsageRule>(
            r#"
            SELECT id, product_id, stock_item_id, quantity_used
            FROM product_stock_usage
            WHERE product_id = ?1
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rules)
    }

    /// Links a product to a stock item with a per-sale consumption count.
    ///
    /// One rule per (product, stock item) pair; a second link surfaces as
    /// [`DbError::UniqueViolation`].
    pub async fn link_usage(
        &self,
        product_id: &str,
        stock_item_id: &str,
        quantity_used: i64,
    ) -> DbResult<UsageRule> {
        let rule = UsageRule {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.to_string(),
            stock_item_id: stock_item_id.to_string(),
            quantity_used,
        };

        debug!(
            product_id = %product_id,
            stock_item_id = %stock_item_id,
            quantity_used = %quantity_used,
            "Linking usage rule"
        );

        sqlx::query(
            r#"
            INSERT INTO product_stock_usage (
                id, product_id, stock_item_id, quantity_used
            ) VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&rule.id)
        .bind(&rule.product_id)
        .bind(&rule.stock_item_id)
        .bind(rule.quantity_used)
        .execute(&self.pool)
        .await?;

        Ok(rule)
    }

    /// Removes the usage rule between a product and a stock item.
    pub async fn unlink_usage(&self, product_id: &str, stock_item_id: &str) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM product_stock_usage
            WHERE product_id = ?1 AND stock_item_id = ?2
            "#,
        )
        .bind(product_id)
        .bind(stock_item_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Usage rule", product_id));
        }

        Ok(())
    }
}

/// Helper to generate a new stock item ID.
pub fn generate_stock_item_id() -> String {
    Uuid::new_v4().to_string()
}
