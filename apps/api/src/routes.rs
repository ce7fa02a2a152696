//! # Routes
//!
//! Axum router configuration for the Kasir API.

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the main application router
///
/// Routes:
/// - GET  /health
/// - GET|POST /api/categories, GET|PUT|DELETE /api/categories/{id}
/// - GET|POST /api/products,   GET|PUT|DELETE /api/products/{id}
/// - POST /api/checkout
/// - GET  /api/transactions, GET /api/transactions/{id}
/// - GET  /api/report, GET /api/report/today
pub fn create_router(state: AppState) -> Router {
    let category_routes = Router::new()
        .route(
            "/",
            get(handlers::category::list_categories).post(handlers::category::create_category),
        )
        .route(
            "/{id}",
            get(handlers::category::get_category)
                .put(handlers::category::update_category)
                .delete(handlers::category::delete_category),
        );

    let product_routes = Router::new()
        .route(
            "/",
            get(handlers::product::list_products).post(handlers::product::create_product),
        )
        .route(
            "/{id}",
            get(handlers::product::get_product)
                .put(handlers::product::update_product)
                .delete(handlers::product::delete_product),
        );

    let api_routes = Router::new()
        .nest("/categories", category_routes)
        .nest("/products", product_routes)
        .route("/checkout", post(handlers::checkout::checkout))
        .route("/transactions", get(handlers::transaction::list_transactions))
        .route("/transactions/{id}", get(handlers::transaction::get_transaction))
        .route("/report", get(handlers::report::range_report))
        .route("/report/today", get(handlers::report::daily_report));

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
