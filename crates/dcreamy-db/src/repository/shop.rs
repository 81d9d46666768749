//! # Shop Repository

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use dcreamy_core::Shop;

/// Repository for shop (warung) rows.
#[derive(Debug, Clone)]
pub struct ShopRepository {
    pool: SqlitePool,
}

impl ShopRepository {
    /// Creates a new ShopRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ShopRepository { pool }
    }

    /// Inserts a new shop.
    pub async fn insert(&self, shop: &Shop) -> DbResult<()> {
        debug!(id = %shop.id, name = %shop.name, "Inserting shop");

        sqlx::query(
            r#"
            INSERT INTO shops (
                id, owner_id, name, address, phone, logo_url,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&shop.id)
        .bind(&shop.owner_id)
        .bind(&shop.name)
        .bind(&shop.address)
        .bind(&shop.phone)
        .bind(&shop.logo_url)
        .bind(shop.created_at)
        .bind(shop.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a shop by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Shop>> {
        let shop = sqlx::query_as::<_, Shop>(
            r#"
            SELECT id, owner_id, name, address, phone, logo_url,
                   created_at, updated_at
            FROM shops
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shop)
    }

    /// Updates the shop's profile fields (name, address, phone, logo).
    pub async fn update(&self, shop: &Shop) -> DbResult<()> {
        debug!(id = %shop.id, "Updating shop");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE shops SET
                name = ?2,
                address = ?3,
                phone = ?4,
                logo_url = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&shop.id)
        .bind(&shop.name)
        .bind(&shop.address)
        .bind(&shop.phone)
        .bind(&shop.logo_url)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Shop", &shop.id));
        }

        Ok(())
    }
}
