//! # Transaction Repository
//!
//! Read access to committed sales. Transactions are written only by
//! [`crate::checkout::CheckoutEngine`] and never updated afterwards.

use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};

use crate::error::DbResult;
use crate::store::TransactionStore;
use kasir_core::{Transaction, TransactionDetail, TransactionWithDetails};

/// Repository for transaction reads.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Line items of a transaction, in insertion order.
    pub async fn details_on(
        conn: &mut SqliteConnection,
        transaction_id: i64,
    ) -> DbResult<Vec<TransactionDetail>> {
        let details = sqlx::query_as::<_, TransactionDetail>(
            r#"
            SELECT id, transaction_id, product_id, product_name, product_price, quantity, subtotal
            FROM transaction_details
            WHERE transaction_id = ?1
            ORDER BY id
            "#,
        )
        .bind(transaction_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(details)
    }

    /// Number of committed transactions (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl TransactionStore for TransactionRepository {
    async fn get_by_id(&self, id: i64) -> DbResult<Option<TransactionWithDetails>> {
        let mut tx = self.pool.begin().await?;

        let header = sqlx::query_as::<_, Transaction>(
            "SELECT id, total_amount, created_at FROM transactions WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(transaction) = header else {
            return Ok(None);
        };

        let details = Self::details_on(&mut tx, id).await?;
        tx.commit().await?;

        Ok(Some(TransactionWithDetails {
            transaction,
            details,
        }))
    }

    async fn list_recent(&self, limit: u32) -> DbResult<Vec<Transaction>> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, total_amount, created_at
            FROM transactions
            ORDER BY created_at DESC, id DESC
            LIMIT ?1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }
}
