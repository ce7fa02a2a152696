//! # Checkout Engine
//!
//! Turns a list of requested items into one committed sale.
//!
//! ## Unit of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout([{product 1, qty 3}])                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  normalize_items()            ← kasir-core: empty? qty? merge dupes    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pre-check on the pool        ← fast NotFound / InsufficientStock      │
//! │       │                          without taking the write lock         │
//! │       ▼                                                                 │
//! │  BEGIN                                                                 │
//! │   ├── UPDATE products SET stock = stock - q                            │
//! │   │   WHERE id = ? AND stock >= q RETURNING name, price   (per item)   │
//! │   │     └── 0 rows → NotFound / InsufficientStock → ROLLBACK           │
//! │   ├── price_lines() on the returned snapshots                          │
//! │   ├── INSERT transactions (total, created_at, sale_date)               │
//! │   └── INSERT transaction_details (name/price snapshots)   (per item)   │
//! │  COMMIT                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first statement inside the transaction is a write, so SQLite takes
//! the write lock before reading anything and concurrent checkouts queue on
//! the busy timeout instead of failing on a stale snapshot. Stock is checked
//! again by the conditional UPDATE itself, so a checkout that loses a race
//! fails cleanly and stock never goes negative.
//!
//! Dropping the `sqlx::Transaction` before `commit` rolls everything back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::product::ProductRepository;
use crate::store::CheckoutService;
use kasir_core::checkout::{normalize_items, price_lines, PricedCheckout, ProductSnapshot};
use kasir_core::{
    CheckoutItem, CoreError, Transaction, TransactionDetail, TransactionWithDetails,
};

/// Executes checkouts against the SQLite pool.
#[derive(Debug, Clone)]
pub struct CheckoutEngine {
    pool: SqlitePool,
    products: ProductRepository,
}

impl CheckoutEngine {
    /// Creates a new CheckoutEngine.
    pub fn new(pool: SqlitePool) -> Self {
        CheckoutEngine {
            products: ProductRepository::new(pool.clone()),
            pool,
        }
    }

    /// Checks out with an explicit sale timestamp.
    ///
    /// `checkout` uses the current time; this variant exists for seeding
    /// history and for tests that need a fixed sale date.
    pub async fn checkout_at(
        &self,
        items: &[CheckoutItem],
        now: DateTime<Utc>,
    ) -> DbResult<TransactionWithDetails> {
        let items = normalize_items(items)?;

        debug!(lines = items.len(), "Starting checkout");

        if let Err(err) = self.precheck(&items).await {
            warn!(error = %err, "Checkout rejected");
            return Err(err);
        }

        let result = self.commit_sale(&items, now).await;

        match &result {
            Ok(sale) => info!(
                transaction_id = sale.transaction.id,
                total = sale.transaction.total_amount,
                lines = sale.details.len(),
                "Checkout committed"
            ),
            Err(err) => warn!(error = %err, "Checkout rolled back"),
        }

        result
    }

    /// Validates against current stock without locking. The write phase
    /// repeats the check atomically.
    async fn precheck(&self, items: &[CheckoutItem]) -> DbResult<()> {
        let mut snapshots = Vec::with_capacity(items.len());
        for item in items {
            let snapshot = self
                .products
                .snapshot(item.product_id)
                .await?
                .ok_or(CoreError::ProductNotFound(item.product_id))?;
            snapshots.push(snapshot);
        }

        price_lines(items, &snapshots)?;
        Ok(())
    }

    async fn commit_sale(
        &self,
        items: &[CheckoutItem],
        now: DateTime<Utc>,
    ) -> DbResult<TransactionWithDetails> {
        let mut tx = self.pool.begin().await?;

        let mut snapshots = Vec::with_capacity(items.len());
        for item in items {
            let snapshot = take_stock(&mut tx, item).await?;
            snapshots.push(snapshot);
        }

        let priced = price_lines(items, &snapshots)?;
        let sale = record_sale(&mut tx, &priced, now).await?;
        debug_assert!(sale.is_consistent());

        tx.commit()
            .await
            .map_err(|e| match DbError::from(e) {
                err @ DbError::Conflict(_) => err,
                other => DbError::TransactionFailed(other.to_string()),
            })?;

        Ok(sale)
    }
}

/// Conditionally decrements one line's stock, explaining a refusal.
async fn take_stock(conn: &mut SqliteConnection, item: &CheckoutItem) -> DbResult<ProductSnapshot> {
    if let Some(snapshot) =
        ProductRepository::decrement_stock(conn, item.product_id, item.quantity).await?
    {
        return Ok(snapshot);
    }

    let err = match ProductRepository::stock_on(conn, item.product_id).await? {
        None => CoreError::ProductNotFound(item.product_id),
        Some(available) => CoreError::InsufficientStock {
            product_id: item.product_id,
            available,
            requested: item.quantity,
        },
    };
    Err(err.into())
}

/// Inserts the header and one detail row per priced line.
async fn record_sale(
    conn: &mut SqliteConnection,
    priced: &PricedCheckout,
    now: DateTime<Utc>,
) -> DbResult<TransactionWithDetails> {
    let transaction_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO transactions (total_amount, created_at, sale_date)
        VALUES (?1, ?2, ?3)
        RETURNING id
        "#,
    )
    .bind(priced.total.units())
    .bind(now)
    .bind(now.date_naive())
    .fetch_one(&mut *conn)
    .await?;

    let mut details = Vec::with_capacity(priced.lines.len());
    for line in &priced.lines {
        let detail_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO transaction_details (
                transaction_id, product_id, product_name, product_price, quantity, subtotal
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id
            "#,
        )
        .bind(transaction_id)
        .bind(line.product_id)
        .bind(&line.product_name)
        .bind(line.product_price.units())
        .bind(line.quantity)
        .bind(line.subtotal.units())
        .fetch_one(&mut *conn)
        .await?;

        details.push(TransactionDetail {
            id: detail_id,
            transaction_id,
            product_id: line.product_id,
            product_name: line.product_name.clone(),
            product_price: line.product_price.units(),
            quantity: line.quantity,
            subtotal: line.subtotal.units(),
        });
    }

    Ok(TransactionWithDetails {
        transaction: Transaction {
            id: transaction_id,
            total_amount: priced.total.units(),
            created_at: now,
        },
        details,
    })
}

#[async_trait]
impl CheckoutService for CheckoutEngine {
    async fn checkout(&self, items: &[CheckoutItem]) -> DbResult<TransactionWithDetails> {
        self.checkout_at(items, Utc::now()).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
