//! # Product Handlers
//!
//! CRUD endpoints for products, with an optional name filter on the list.
//!
//! ## Filter
//! ```text
//! GET /api/products?name=teh
//!      │
//!      ▼
//! case-insensitive substring match:  "Teh Botol", "Es TEH Manis"
//! blank or absent name → every product, ordered by id
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use kasir_core::{NewProduct, Product};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::path_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the product list.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub name: Option<String>,
}

impl ProductQuery {
    fn filter(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// `GET /api/products`
pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::invalid_input(e.body_text()))?;
    let products = state.products.list(query.filter()).await?;
    debug!(filter = ?query.filter(), count = products.len(), "Listed products");
    Ok(Json(products))
}

/// `GET /api/products/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = path_id(path)?;
    state
        .products
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product", id))
}

/// `POST /api/products`
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(input) = payload?;
    let product = state.products.create(&input).await?;
    info!(id = product.id, name = %product.name, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /api/products/{id}`
///
/// Full replacement: name, price, stock and category are all taken from the
/// body. An absent `category_id` clears the category.
pub async fn update_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = path_id(path)?;
    let Json(input) = payload?;
    let product = state.products.update(id, &input).await?;
    Ok(Json(product))
}

/// `DELETE /api/products/{id}`
///
/// Past transaction details keep their snapshot of the product.
pub async fn delete_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = path_id(path)?;
    state.products.delete(id).await?;
    info!(id, "Product deleted");
    Ok(Json(json!({ "message": "Product deleted" })))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::ProductQuery;
    use crate::handlers::test_support::{app, send};

    #[test]
    fn test_blank_filter_is_ignored() {
        let query = ProductQuery {
            name: Some("   ".to_string()),
        };
        assert_eq!(query.filter(), None);

        let query = ProductQuery {
            name: Some(" teh ".to_string()),
        };
        assert_eq!(query.filter(), Some("teh"));
    }

    #[tokio::test]
    async fn test_product_crud_and_filter() {
        let (app, _db) = app().await;

        for (name, price) in [("Teh Botol", 4000), ("Es TEH Manis", 5000), ("Aqua", 3000)] {
            let (status, _) = send(
                &app,
                "POST",
                "/api/products",
                Some(json!({ "name": name, "price": price, "stock": 10 })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, all) = send(&app, "GET", "/api/products", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all.as_array().unwrap().len(), 3);

        let (_, teh) = send(&app, "GET", "/api/products?name=teh", None).await;
        let names: Vec<&str> = teh
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Teh Botol", "Es TEH Manis"]);

        let id = all[2]["id"].as_i64().unwrap();
        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/api/products/{}", id),
            Some(json!({ "name": "Aqua 600ml", "price": 3500, "stock": 24 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["price"], 3500);
        assert_eq!(updated["stock"], 24);

        let (status, _) = send(&app, "DELETE", &format!("/api/products/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "GET", &format!("/api/products/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", &format!("/api/products/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_product_validation() {
        let (app, _db) = app().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/products",
            Some(json!({ "name": "Gula", "price": -1, "stock": 10 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");

        let (status, body) = send(
            &app,
            "POST",
            "/api/products",
            Some(json!({ "name": "Gula", "price": 15000, "stock": 1, "category_id": 99 })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }
}
