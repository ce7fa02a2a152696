//! # Store Traits
//!
//! The seams between the HTTP layer and persistence. Each repository in
//! [`crate::repository`] implements one of these; the API holds them as
//! `Arc<dyn ...>` so handlers never name a concrete SQLite type.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  kasir-api handlers                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CategoryStore  ProductStore  TransactionStore  CheckoutService        │
//! │       │              │               │               │    ReportService │
//! │       ▼              ▼               ▼               ▼         ▼        │
//! │  CategoryRepo   ProductRepo   TransactionRepo   CheckoutEngine ReportEngine
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use kasir_core::{
    CheckoutItem, NewCategory, NewProduct, Product, ProductCategory, SalesReport, Transaction,
    TransactionWithDetails,
};

use crate::error::DbResult;

/// CRUD over product categories.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list(&self) -> DbResult<Vec<ProductCategory>>;

    async fn get_by_id(&self, id: i64) -> DbResult<Option<ProductCategory>>;

    async fn create(&self, category: &NewCategory) -> DbResult<ProductCategory>;

    /// Replaces name and description. `NotFound` for a missing id.
    async fn update(&self, id: i64, category: &NewCategory) -> DbResult<ProductCategory>;

    /// `StillReferenced` while any product points at the category.
    async fn delete(&self, id: i64) -> DbResult<()>;
}

/// CRUD over products.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Lists products ordered by id, optionally filtered by a
    /// case-insensitive substring of the name.
    async fn list(&self, name_filter: Option<&str>) -> DbResult<Vec<Product>>;

    async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>>;

    async fn create(&self, product: &NewProduct) -> DbResult<Product>;

    async fn update(&self, id: i64, product: &NewProduct) -> DbResult<Product>;

    async fn delete(&self, id: i64) -> DbResult<()>;

    async fn count(&self) -> DbResult<i64>;
}

/// Read access to committed sales.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn get_by_id(&self, id: i64) -> DbResult<Option<TransactionWithDetails>>;

    /// Headers only, newest first.
    async fn list_recent(&self, limit: u32) -> DbResult<Vec<Transaction>>;
}

/// Converts a cart into a committed sale.
#[async_trait]
pub trait CheckoutService: Send + Sync {
    async fn checkout(&self, items: &[CheckoutItem]) -> DbResult<TransactionWithDetails>;
}

/// Read-only sales aggregation.
#[async_trait]
pub trait ReportService: Send + Sync {
    /// Report for the current UTC day.
    async fn daily_report(&self) -> DbResult<SalesReport>;

    /// Report over inclusive calendar days. `start > end` is invalid input.
    async fn range_report(&self, start: NaiveDate, end: NaiveDate) -> DbResult<SalesReport>;
}
