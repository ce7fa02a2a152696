//! # Report Engine
//!
//! Read-only aggregation of sales over a window of UTC calendar days.
//!
//! ## Query Plan
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN (one read snapshot for all three aggregates)                    │
//! │                                                                         │
//! │  1. transactions WHERE sale_date BETWEEN start AND end                 │
//! │     → COALESCE(SUM(total_amount), 0), COUNT(*)                         │
//! │                                                                         │
//! │  2. transaction_details ⋈ transactions (same window)                   │
//! │     GROUP BY product_id                                                │
//! │     ORDER BY SUM(quantity) DESC, product_id ASC   ← ties: lowest id    │
//! │     LIMIT 1                                                            │
//! │     name = snapshot name of the latest detail for that product         │
//! │                                                                         │
//! │  COMMIT                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The products table is never read, so deleting or renaming a product
//! does not change any report.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::store::ReportService;
use kasir_core::{BestSeller, DateRange, SalesReport};

/// Aggregates committed transactions into sales reports.
#[derive(Debug, Clone)]
pub struct ReportEngine {
    pool: SqlitePool,
}

impl ReportEngine {
    /// Creates a new ReportEngine.
    pub fn new(pool: SqlitePool) -> Self {
        ReportEngine { pool }
    }

    /// Builds the report for an already validated window.
    pub async fn report_for(&self, range: DateRange) -> DbResult<SalesReport> {
        let (start, end) = (range.start(), range.end());
        debug!(%start, %end, "Building sales report");

        let mut tx = self.pool.begin().await?;

        let (total_revenue, transaction_count): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(total_amount), 0), COUNT(*)
            FROM transactions
            WHERE sale_date BETWEEN ?1 AND ?2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&mut *tx)
        .await?;

        if transaction_count == 0 {
            tx.commit().await?;
            return Ok(SalesReport::empty(range));
        }

        let best_seller = sqlx::query_as::<_, BestSeller>(
            r#"
            SELECT
                d.product_id AS product_id,
                (
                    SELECT d2.product_name
                    FROM transaction_details d2
                    JOIN transactions t2 ON t2.id = d2.transaction_id
                    WHERE d2.product_id = d.product_id
                      AND t2.sale_date BETWEEN ?1 AND ?2
                    ORDER BY t2.created_at DESC, d2.id DESC
                    LIMIT 1
                ) AS name,
                SUM(d.quantity) AS quantity_sold
            FROM transaction_details d
            JOIN transactions t ON t.id = d.transaction_id
            WHERE t.sale_date BETWEEN ?1 AND ?2
            GROUP BY d.product_id
            ORDER BY quantity_sold DESC, d.product_id ASC
            LIMIT 1
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(SalesReport {
            start_date: start,
            end_date: end,
            total_revenue,
            transaction_count,
            best_seller,
        })
    }
}

#[async_trait]
impl ReportService for ReportEngine {
    async fn daily_report(&self) -> DbResult<SalesReport> {
        self.report_for(DateRange::today()).await
    }

    async fn range_report(&self, start: NaiveDate, end: NaiveDate) -> DbResult<SalesReport> {
        let range = DateRange::new(start, end)?;
        self.report_for(range).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
