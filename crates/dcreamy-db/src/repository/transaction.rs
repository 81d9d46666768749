//! # Transaction Repository
//!
//! The bookkeeping ledger: every sale and expense lands here, and the
//! report queries aggregate over it.
//!
//! ## Business-Day Windows
//! "Today" on the dashboard is not a calendar day. Callers compute the
//! trading window with [`dcreamy_core::BusinessDayClock`] and pass its
//! `(start, end)` UTC bounds to the range queries here:
//!
//! ```rust,ignore
//! let clock = BusinessDayClock::default();
//! let (start, end) = clock.business_day_range_for(Utc::now());
//! let summary = db.transactions().summary_between(&shop_id, start, end).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use dcreamy_core::{Money, Transaction, TransactionKind};

// =============================================================================
// Report Records
// =============================================================================

/// Aggregated totals for one reporting window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    /// Income total, whole Rupiah.
    pub income: i64,
    /// Expense total, whole Rupiah.
    pub expense: i64,
    /// Number of ledger entries in the window.
    pub entries: i64,
}

impl LedgerSummary {
    /// Net result of the window: income minus expense.
    #[inline]
    pub fn net(&self) -> Money {
        Money::from_rupiah(self.income - self.expense)
    }
}

/// Per-category total within a reporting window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub kind: TransactionKind,
    pub category: String,
    /// Whole Rupiah.
    pub total: i64,
    pub entries: i64,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for the transaction ledger.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

const TRANSACTION_COLUMNS: &str = "id, shop_id, kind, amount, product_id, quantity, \
     category, note, receipt_url, payment_method, created_by, created_at";

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Inserts a ledger entry.
    pub async fn insert(&self, tx: &Transaction) -> DbResult<()> {
        debug!(id = %tx.id, kind = ?tx.kind, amount = %tx.amount, "Inserting transaction");

        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, shop_id, kind, amount, product_id, quantity,
                category, note, receipt_url, payment_method,
                created_by, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&tx.id)
        .bind(&tx.shop_id)
        .bind(tx.kind)
        .bind(tx.amount)
        .bind(&tx.product_id)
        .bind(tx.quantity)
        .bind(&tx.category)
        .bind(&tx.note)
        .bind(&tx.receipt_url)
        .bind(tx.payment_method)
        .bind(&tx.created_by)
        .bind(tx.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a ledger entry by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Transaction>> {
        let tx = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tx)
    }

    /// Lists the most recent entries for a shop, newest first.
    pub async fn list_recent(&self, shop_id: &str, limit: u32) -> DbResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions \
             WHERE shop_id = ?1 \
             ORDER BY created_at DESC \
             LIMIT ?2"
        ))
        .bind(shop_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Lists entries in `[start, end)`, oldest first. The bounds come from
    /// `BusinessDayClock::business_day_range_for`.
    pub async fn list_between(
        &self,
        shop_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions \
             WHERE shop_id = ?1 AND created_at >= ?2 AND created_at < ?3 \
             ORDER BY created_at"
        ))
        .bind(shop_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Deletes a ledger entry (the owner correcting a typo). Hard delete;
    /// the ledger keeps no tombstones.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting transaction");

        let result = sqlx::query("DELETE FROM transactions WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Transaction", id));
        }

        Ok(())
    }

    /// Aggregated totals for `[start, end)`.
    pub async fn summary_between(
        &self,
        shop_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<LedgerSummary> {
        let summary = sqlx::query_as::<_, LedgerSummary>(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN kind = 'income' THEN amount ELSE 0 END), 0) AS income,
                COALESCE(SUM(CASE WHEN kind = 'expense' THEN amount ELSE 0 END), 0) AS expense,
                COUNT(*) AS entries
            FROM transactions
            WHERE shop_id = ?1 AND created_at >= ?2 AND created_at < ?3
            "#,
        )
        .bind(shop_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }

    /// Per-category totals for `[start, end)`, largest first.
    pub async fn category_breakdown(
        &self,
        shop_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> DbResult<Vec<CategoryTotal>> {
        let rows = sqlx::query_as::<_, CategoryTotal>(
            r#"
            SELECT kind, category, SUM(amount) AS total, COUNT(*) AS entries
            FROM transactions
            WHERE shop_id = ?1 AND created_at >= ?2 AND created_at < ?3
            GROUP BY kind, category
            ORDER BY total DESC
            "#,
        )
        .bind(shop_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Helper to generate a new transaction ID.
pub fn generate_transaction_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{insert_transaction, sample_shop, test_database};
    use chrono::TimeZone;
    use dcreamy_core::BusinessDayClock;

    #[tokio::test]
    async fn test_insert_list_delete() {
        let db = test_database().await;
        let (shop, owner) = sample_shop(&db).await;

        let id = insert_transaction(
            &db,
            &shop.id,
            &owner.id,
            TransactionKind::Income,
            15_000,
            Utc::now(),
        )
        .await;

        let recent = db.transactions().list_recent(&shop.id, 10).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].signed_amount().rupiah(), 15_000);

        db.transactions().delete(&id).await.unwrap();
        assert!(db.transactions().get_by_id(&id).await.unwrap().is_none());

        let err = db.transactions().delete(&id).await.unwrap_err();
        assert!(matches!(err, crate::DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_summary_over_business_day_window() {
        let db = test_database().await;
        let (shop, owner) = sample_shop(&db).await;
        let clock = BusinessDayClock::default();

        // 20:30 WIB on Feb 5: the old business day
        let before_cutoff = Utc.with_ymd_and_hms(2026, 2, 5, 13, 30, 0).unwrap();
        // 21:30 WIB on Feb 5: the new business day
        let after_cutoff = Utc.with_ymd_and_hms(2026, 2, 5, 14, 30, 0).unwrap();

        insert_transaction(&db, &shop.id, &owner.id, TransactionKind::Income, 20_000, before_cutoff)
            .await;
        insert_transaction(&db, &shop.id, &owner.id, TransactionKind::Income, 50_000, after_cutoff)
            .await;
        insert_transaction(&db, &shop.id, &owner.id, TransactionKind::Expense, 12_000, after_cutoff)
            .await;

        // The window of the new business day excludes the 20:30 sale
        let (start, end) = clock.business_day_range_for(after_cutoff);
        let summary = db
            .transactions()
            .summary_between(&shop.id, start, end)
            .await
            .unwrap();

        assert_eq!(summary.income, 50_000);
        assert_eq!(summary.expense, 12_000);
        assert_eq!(summary.entries, 2);
        assert_eq!(summary.net().rupiah(), 38_000);

        let listed = db
            .transactions()
            .list_between(&shop.id, start, end)
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);

        // The old day's window sees only the 20:30 sale
        let (start, end) = clock.business_day_range_for(before_cutoff);
        let summary = db
            .transactions()
            .summary_between(&shop.id, start, end)
            .await
            .unwrap();
        assert_eq!(summary.income, 20_000);
        assert_eq!(summary.entries, 1);
    }

    #[tokio::test]
    async fn test_empty_window_summary_is_zero() {
        let db = test_database().await;
        let (shop, _) = sample_shop(&db).await;

        let start = Utc.with_ymd_and_hms(2026, 2, 4, 14, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 2, 5, 14, 0, 0).unwrap();

        let summary = db
            .transactions()
            .summary_between(&shop.id, start, end)
            .await
            .unwrap();

        assert_eq!(summary.income, 0);
        assert_eq!(summary.expense, 0);
        assert_eq!(summary.entries, 0);
        assert_eq!(summary.net().rupiah(), 0);
    }

    #[tokio::test]
    async fn test_category_breakdown() {
        let db = test_database().await;
        let (shop, owner) = sample_shop(&db).await;

        let at = Utc.with_ymd_and_hms(2026, 2, 5, 3, 0, 0).unwrap();
        insert_transaction(&db, &shop.id, &owner.id, TransactionKind::Income, 30_000, at).await;
        insert_transaction(&db, &shop.id, &owner.id, TransactionKind::Income, 20_000, at).await;
        insert_transaction(&db, &shop.id, &owner.id, TransactionKind::Expense, 10_000, at).await;

        let start = at - chrono::Duration::hours(1);
        let end = at + chrono::Duration::hours(1);
        let breakdown = db
            .transactions()
            .category_breakdown(&shop.id, start, end)
            .await
            .unwrap();

        // Fixture writes income as "penjualan" and expense as "bahan baku"
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].kind, TransactionKind::Income);
        assert_eq!(breakdown[0].total, 50_000);
        assert_eq!(breakdown[0].entries, 2);
        assert_eq!(breakdown[1].kind, TransactionKind::Expense);
        assert_eq!(breakdown[1].total, 10_000);
    }
}
