//! # Checkout Handler
//!
//! `POST /api/checkout` turns a cart into a committed sale.
//!
//! ## Request Body
//! Both shapes are accepted:
//! ```json
//! { "items": [ { "product_id": 1, "quantity": 3 } ] }
//! ```
//! ```json
//! [ { "productId": 1, "quantity": 3 } ]
//! ```
//!
//! ## Cancellation
//! The checkout runs on its own task, so a client that disconnects
//! mid-request cannot abort it halfway. The sale either commits fully or not
//! at all; the client simply never sees the receipt.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use kasir_core::{CheckoutItem, TransactionWithDetails};
use serde::Deserialize;
use tracing::{error, info, instrument};

use crate::error::ApiError;
use crate::state::AppState;

/// Checkout request, wrapped or bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CheckoutRequest {
    Wrapped { items: Vec<CheckoutItem> },
    Bare(Vec<CheckoutItem>),
}

impl CheckoutRequest {
    pub fn into_items(self) -> Vec<CheckoutItem> {
        match self {
            CheckoutRequest::Wrapped { items } | CheckoutRequest::Bare(items) => items,
        }
    }
}

/// `POST /api/checkout`
#[instrument(skip(state, payload))]
pub async fn checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionWithDetails>), ApiError> {
    let Json(request) = payload?;
    let items = request.into_items();
    let service = state.checkout.clone();

    let sale = tokio::spawn(async move { service.checkout(&items).await })
        .await
        .map_err(|e| {
            error!(error = %e, "Checkout task did not complete");
            ApiError::internal("Checkout did not complete")
        })??;

    info!(
        transaction_id = sale.transaction.id,
        total = %sale.transaction.total(),
        lines = sale.details.len(),
        "Checkout served"
    );

    Ok((StatusCode::CREATED, Json(sale)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use kasir_core::CheckoutItem;
    use serde_json::{json, Value};

    use super::CheckoutRequest;
    use crate::handlers::test_support::{app, send};

    async fn create_product(app: &axum::Router, name: &str, price: i64, stock: i64) -> i64 {
        let (status, body) = send(
            app,
            "POST",
            "/api/products",
            Some(json!({ "name": name, "price": price, "stock": stock })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_i64().unwrap()
    }

    async fn stock_of(app: &axum::Router, id: i64) -> i64 {
        let (_, body) = send(app, "GET", &format!("/api/products/{}", id), None).await;
        body["stock"].as_i64().unwrap()
    }

    #[test]
    fn test_request_shapes() {
        let wrapped: CheckoutRequest =
            serde_json::from_str(r#"{"items":[{"product_id":1,"quantity":2}]}"#).unwrap();
        assert_eq!(wrapped.into_items(), vec![CheckoutItem::new(1, 2)]);

        let bare: CheckoutRequest =
            serde_json::from_str(r#"[{"productId":4,"quantity":1}]"#).unwrap();
        assert_eq!(bare.into_items(), vec![CheckoutItem::new(4, 1)]);
    }

    #[tokio::test]
    async fn test_checkout_commits_sale() {
        let (app, _db) = app().await;
        let id = create_product(&app, "Indomie Goreng", 5000, 10).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/checkout",
            Some(json!({ "items": [{ "product_id": id, "quantity": 3 }] })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["total_amount"], 15000);
        assert_eq!(body["details"][0]["product_name"], "Indomie Goreng");
        assert_eq!(body["details"][0]["product_price"], 5000);
        assert_eq!(body["details"][0]["subtotal"], 15000);
        assert_eq!(stock_of(&app, id).await, 7);

        let transaction_id = body["id"].as_i64().unwrap();
        let (status, fetched) =
            send(&app, "GET", &format!("/api/transactions/{}", transaction_id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, body);
    }

    #[tokio::test]
    async fn test_checkout_errors() {
        let (app, _db) = app().await;
        let id = create_product(&app, "Kopi Susu", 6000, 2).await;

        let cases: Vec<(Value, StatusCode, &str)> = vec![
            (json!({ "items": [] }), StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            (
                json!([{ "product_id": id, "quantity": 0 }]),
                StatusCode::BAD_REQUEST,
                "INVALID_INPUT",
            ),
            (
                json!([{ "product_id": 999, "quantity": 1 }]),
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                json!([{ "product_id": id, "quantity": 3 }]),
                StatusCode::CONFLICT,
                "INSUFFICIENT_STOCK",
            ),
            (json!({ "cart": "nope" }), StatusCode::BAD_REQUEST, "INVALID_INPUT"),
        ];

        for (body, expected_status, expected_code) in cases {
            let (status, error) = send(&app, "POST", "/api/checkout", Some(body.clone())).await;
            assert_eq!(status, expected_status, "body: {}", body);
            assert_eq!(error["code"], expected_code, "body: {}", body);
        }

        assert_eq!(stock_of(&app, id).await, 2);

        let (_, recent) = send(&app, "GET", "/api/transactions", None).await;
        assert!(recent.as_array().unwrap().is_empty());
    }
}
