//! Health check endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::state::AppState;

/// `GET /health`
///
/// 200 while the database answers a ping, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let database_ok = state.db.health_check().await;

    let (status, label, database) = if database_ok {
        (StatusCode::OK, "healthy", "connected")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
    };

    (
        status,
        Json(serde_json::json!({
            "status": label,
            "version": env!("CARGO_PKG_VERSION"),
            "database": database,
        })),
    )
}
