//! # kasir-api: HTTP Adapter for Kasir POS
//!
//! Axum server exposing the catalog, checkout and report engines.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check with database ping |
//! | GET, POST | `/api/categories` | List / create categories |
//! | GET, PUT, DELETE | `/api/categories/{id}` | Read / replace / delete a category |
//! | GET, POST | `/api/products` | List (`?name=` filter) / create products |
//! | GET, PUT, DELETE | `/api/products/{id}` | Read / replace / delete a product |
//! | POST | `/api/checkout` | Commit a sale |
//! | GET | `/api/transactions` | Recent sales, newest first |
//! | GET | `/api/transactions/{id}` | One sale with its line items |
//! | GET | `/api/report` | Sales report over `start_date..=end_date` |
//! | GET | `/api/report/today` | Sales report for the current UTC day |
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. ServerConfig::from_env()   (.env + environment)                     │
//! │  2. init_tracing()             (RUST_LOG or default filter)             │
//! │  3. Database::new(db_config)   (pool + migrations)                      │
//! │  4. AppState::new(db)          (Arc<dyn Store> per engine)              │
//! │  5. axum::serve(...)           (until Ctrl+C / SIGTERM)                 │
//! │  6. db.close()                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ErrorCode};
pub use routes::create_router;
pub use state::AppState;

use tracing_subscriber::EnvFilter;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,kasir=debug,sqlx=warn";

/// Initializes the tracing subscriber.
///
/// Respects `RUST_LOG`; falls back to [`DEFAULT_LOG_FILTER`].
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
