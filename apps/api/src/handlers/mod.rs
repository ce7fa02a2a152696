//! # HTTP Handlers
//!
//! Thin adapters between axum extractors and the store traits.
//!
//! ## Handler Organization
//! ```text
//! handlers/
//! ├── mod.rs          ◄─── You are here (exports, shared extractors)
//! ├── health.rs       ◄─── Liveness + database ping
//! ├── category.rs     ◄─── Category CRUD
//! ├── product.rs      ◄─── Product CRUD + name filter
//! ├── checkout.rs     ◄─── Cart → committed sale
//! ├── transaction.rs  ◄─── Sale history
//! └── report.rs       ◄─── Daily / range sales reports
//! ```
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/checkout {"items":[{"product_id":1,"quantity":3}]}           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Json<CheckoutRequest> ── rejection ──► ApiError (400)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  state.checkout.checkout(&items)   (Arc<dyn CheckoutService>)          │
//! │       │                                                                 │
//! │       ├── Ok  ──► 201 TransactionWithDetails                           │
//! │       └── Err ──► DbError → ApiError → {code, message}                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Extractor rejections are taken as `Result<_, Rejection>` so every failure
//! leaves through [`ApiError`](crate::error::ApiError) with the same body shape.

pub mod category;
pub mod checkout;
pub mod health;
pub mod product;
pub mod report;
pub mod transaction;

use axum::extract::rejection::PathRejection;
use axum::extract::Path;

use crate::error::ApiError;

/// Unwraps a numeric path id, turning rejections into `InvalidInput`.
pub(crate) fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => Err(ApiError::invalid_input(rejection.body_text())),
    }
}

/// Router-level tests shared by the handler modules.
#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use kasir_db::{Database, DbConfig};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::routes::create_router;
    use crate::state::AppState;

    pub async fn app() -> (Router, Database) {
        let db = Database::new(DbConfig::in_memory())
            .await
            .expect("in-memory database");
        (create_router(AppState::new(db.clone())), db)
    }

    pub async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn send_raw(app: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}
