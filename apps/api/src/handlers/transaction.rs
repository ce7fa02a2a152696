//! Sale history endpoints.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use kasir_core::{Transaction, TransactionWithDetails, ValidationError};
use serde::Deserialize;

use super::path_id;
use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
}

impl HistoryQuery {
    fn limit(&self) -> Result<u32, ValidationError> {
        match self.limit {
            None => Ok(DEFAULT_LIMIT),
            Some(limit) if (1..=MAX_LIMIT).contains(&limit) => Ok(limit),
            Some(_) => Err(ValidationError::OutOfRange {
                field: "limit".to_string(),
                min: 1,
                max: MAX_LIMIT as i64,
            }),
        }
    }
}

/// `GET /api/transactions?limit=`
///
/// Transaction headers, newest first.
pub async fn list_transactions(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::invalid_input(e.body_text()))?;
    let transactions = state.transactions.list_recent(query.limit()?).await?;
    Ok(Json(transactions))
}

/// `GET /api/transactions/{id}`
pub async fn get_transaction(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<TransactionWithDetails>, ApiError> {
    let id = path_id(path)?;
    state
        .transactions
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Transaction", id))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::{HistoryQuery, DEFAULT_LIMIT};
    use crate::handlers::test_support::{app, send};

    #[test]
    fn test_limit_bounds() {
        assert_eq!(HistoryQuery { limit: None }.limit().unwrap(), DEFAULT_LIMIT);
        assert_eq!(HistoryQuery { limit: Some(100) }.limit().unwrap(), 100);
        assert!(HistoryQuery { limit: Some(0) }.limit().is_err());
        assert!(HistoryQuery { limit: Some(101) }.limit().is_err());
    }

    #[tokio::test]
    async fn test_history_newest_first() {
        let (app, _db) = app().await;

        let (_, product) = send(
            &app,
            "POST",
            "/api/products",
            Some(json!({ "name": "Aqua", "price": 3000, "stock": 50 })),
        )
        .await;
        let product_id = product["id"].as_i64().unwrap();

        let mut ids = Vec::new();
        for quantity in 1..=3 {
            let (_, sale) = send(
                &app,
                "POST",
                "/api/checkout",
                Some(json!([{ "product_id": product_id, "quantity": quantity }])),
            )
            .await;
            ids.push(sale["id"].as_i64().unwrap());
        }

        let (status, recent) = send(&app, "GET", "/api/transactions?limit=2", None).await;
        assert_eq!(status, StatusCode::OK);
        let recent: Vec<i64> = recent
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_i64().unwrap())
            .collect();
        assert_eq!(recent, vec![ids[2], ids[1]]);

        let (status, _) = send(&app, "GET", "/api/transactions?limit=0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, "GET", "/api/transactions/424242", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Transaction not found: 424242");
    }
}
