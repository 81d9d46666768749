//! # Product Repository
//!
//! Catalog operations for the POS grid and the product management forms.
//!
//! Search is a plain `LIKE` over the name column. The catalog of a single
//! warung is tens of rows, so there is nothing for an index-backed
//! full-text engine to win here.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use dcreamy_core::Product;

/// Repository for product catalog operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

const PRODUCT_COLUMNS: &str = "id, shop_id, name, category, emoji, image_url, \
     buy_price, sell_price, stock, is_active, created_at, updated_at";

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists the active catalog of a shop, sorted by name.
    pub async fn list_active(&self, shop_id: &str) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE shop_id = ?1 AND is_active = 1 \
             ORDER BY name"
        ))
        .bind(shop_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Lists active products of one category (the POS grid tabs).
    pub async fn list_by_category(&self, shop_id: &str, category: &str) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE shop_id = ?1 AND category = ?2 AND is_active = 1 \
             ORDER BY name"
        ))
        .bind(shop_id)
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Searches active products by name substring.
    pub async fn search(&self, shop_id: &str, query: &str, limit: u32) -> DbResult<Vec<Product>> {
        let query = query.trim();

        debug!(query = %query, limit = %limit, "Searching products");

        if query.is_empty() {
            return self.list_active(shop_id).await;
        }

        let pattern = format!("%{}%", query);

        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE shop_id = ?1 AND is_active = 1 AND name LIKE ?2 \
             ORDER BY name \
             LIMIT ?3"
        ))
        .bind(shop_id)
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Gets a product by its ID, active or not. Historical transactions
    /// reference soft-deleted products and must still resolve them.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product (id generated beforehand).
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, shop_id, name, category, emoji, image_url,
                buy_price, sell_price, stock,
                is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&product.id)
        .bind(&product.shop_id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(&product.emoji)
        .bind(&product.image_url)
        .bind(product.buy_price)
        .bind(product.sell_price)
        .bind(product.stock)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Updates an existing product's editable fields.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                category = ?3,
                emoji = ?4,
                image_url = ?5,
                buy_price = ?6,
                sell_price = ?7,
                stock = ?8,
                is_active = ?9,
                updated_at = ?10
            WHERE id = ?1
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(&product.emoji)
        .bind(&product.image_url)
        .bind(product.buy_price)
        .bind(product.sell_price)
        .bind(product.stock)
        .bind(product.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", &product.id));
        }

        Ok(())
    }

    /// Adjusts the sellable stock count by a delta.
    ///
    /// Delta updates (`stock = stock + ?`) instead of absolute writes, so
    /// two terminals selling the same product both land their decrement.
    /// Negative for sales, positive for restocking.
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> DbResult<()> {
        debug!(id = %id, delta = %delta, "Adjusting product stock");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                stock = stock + ?2,
                updated_at = ?3
            WHERE id = ?1 AND is_active = 1
            "#,
        )
        .bind(id)
        .bind(delta)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Soft-deletes a product. Historical sales still reference it, so the
    /// row stays.
    pub async fn soft_delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Soft-deleting product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
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
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts active products in a shop (for diagnostics).
    pub async fn count(&self, shop_id: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products WHERE shop_id = ?1 AND is_active = 1",
        )
        .bind(shop_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use crate::testutil::{sample_product, sample_shop, test_database};

    #[tokio::test]
    async fn test_insert_get_update() {
        let db = test_database().await;
        let (shop, _) = sample_shop(&db).await;
        let mut product = sample_product(&db, &shop.id, "Es Krim Vanilla", 8_000).await;

        let fetched = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Es Krim Vanilla");
        assert_eq!(fetched.unit_price().rupiah(), 8_000);

        product.sell_price = 9_000;
        db.products().update(&product).await.unwrap();
        let fetched = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fetched.sell_price, 9_000);
    }

    #[tokio::test]
    async fn test_search_and_category_listing() {
        let db = test_database().await;
        let (shop, _) = sample_shop(&db).await;
        sample_product(&db, &shop.id, "Es Krim Vanilla", 8_000).await;
        sample_product(&db, &shop.id, "Es Krim Coklat", 8_000).await;
        sample_product(&db, &shop.id, "Teh Botol", 5_000).await;

        let hits = db.products().search(&shop.id, "krim", 20).await.unwrap();
        assert_eq!(hits.len(), 2);

        // Empty query lists the whole active catalog
        let all = db.products().search(&shop.id, "  ", 20).await.unwrap();
        assert_eq!(all.len(), 3);

        let category = db
            .products()
            .list_by_category(&shop.id, "es krim")
            .await
            .unwrap();
        assert_eq!(category.len(), 3); // fixture puts everything in one category
    }

    #[tokio::test]
    async fn test_adjust_stock_delta() {
        let db = test_database().await;
        let (shop, _) = sample_shop(&db).await;
        let product = sample_product(&db, &shop.id, "Es Krim Vanilla", 8_000).await;

        db.products().adjust_stock(&product.id, -3).await.unwrap();
        db.products().adjust_stock(&product.id, 10).await.unwrap();

        let fetched = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(fetched.stock, product.stock - 3 + 10);
    }

    #[tokio::test]
    async fn test_soft_delete_hides_from_listings() {
        let db = test_database().await;
        let (shop, _) = sample_shop(&db).await;
        let product = sample_product(&db, &shop.id, "Es Krim Vanilla", 8_000).await;

        db.products().soft_delete(&product.id).await.unwrap();

        assert_eq!(db.products().list_active(&shop.id).await.unwrap().len(), 0);
        assert_eq!(db.products().count(&shop.id).await.unwrap(), 0);

        // Still resolvable by id for history
        let fetched = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert!(!fetched.is_active);

        // But no longer a valid stock-adjustment target
        let err = db.products().adjust_stock(&product.id, 1).await.unwrap_err();
        assert!(matches!(err, crate::DbError::NotFound { .. }));
    }
}
