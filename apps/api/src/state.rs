//! # Application State
//!
//! Shared state for the axum application: one handle per store, each
//! behind its trait so handlers never depend on SQLite types.

use std::sync::Arc;

use kasir_db::{
    CategoryStore, CheckoutService, Database, ProductStore, ReportService, TransactionStore,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<dyn CategoryStore>,
    pub products: Arc<dyn ProductStore>,
    pub transactions: Arc<dyn TransactionStore>,
    pub checkout: Arc<dyn CheckoutService>,
    pub reports: Arc<dyn ReportService>,
    /// Kept for health checks and shutdown.
    pub db: Database,
}

impl AppState {
    /// Wires every store to the given database.
    pub fn new(db: Database) -> Self {
        AppState {
            categories: Arc::new(db.categories()),
            products: Arc::new(db.products()),
            transactions: Arc::new(db.transactions()),
            checkout: Arc::new(db.checkout()),
            reports: Arc::new(db.reports()),
            db,
        }
    }
}
