//! # Category Handlers
//!
//! CRUD endpoints for product categories.
//!
//! Deleting a category that products still point at is refused with 409;
//! reassign or delete those products first.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use kasir_core::{NewCategory, ProductCategory};
use serde_json::{json, Value};
use tracing::{debug, info};

use super::path_id;
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/categories`
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductCategory>>, ApiError> {
    let categories = state.categories.list().await?;
    debug!(count = categories.len(), "Listed categories");
    Ok(Json(categories))
}

/// `GET /api/categories/{id}`
pub async fn get_category(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ProductCategory>, ApiError> {
    let id = path_id(path)?;
    state
        .categories
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Category", id))
}

/// `POST /api/categories`
pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<NewCategory>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductCategory>), ApiError> {
    let Json(input) = payload?;
    let category = state.categories.create(&input).await?;
    info!(id = category.id, name = %category.name, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// `PUT /api/categories/{id}`
pub async fn update_category(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<NewCategory>, JsonRejection>,
) -> Result<Json<ProductCategory>, ApiError> {
    let id = path_id(path)?;
    let Json(input) = payload?;
    let category = state.categories.update(id, &input).await?;
    Ok(Json(category))
}

/// `DELETE /api/categories/{id}`
pub async fn delete_category(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let id = path_id(path)?;
    state.categories.delete(id).await?;
    info!(id, "Category deleted");
    Ok(Json(json!({ "message": "Category deleted" })))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::handlers::test_support::{app, send, send_raw};

    #[tokio::test]
    async fn test_category_crud() {
        let (app, _db) = app().await;

        let (status, created) = send(
            &app,
            "POST",
            "/api/categories",
            Some(json!({ "name": "Minuman", "description": "Minuman dingin" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();

        let (status, list) = send(&app, "GET", "/api/categories", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/api/categories/{}", id),
            Some(json!({ "name": "Minuman Botol" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], "Minuman Botol");
        assert!(updated["description"].is_null());

        let (status, body) = send(&app, "DELETE", &format!("/api/categories/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Category deleted");

        let (status, body) = send(&app, "GET", &format!("/api/categories/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_referenced_category_delete_conflicts() {
        let (app, _db) = app().await;

        let (_, category) = send(
            &app,
            "POST",
            "/api/categories",
            Some(json!({ "name": "Camilan" })),
        )
        .await;
        let id = category["id"].as_i64().unwrap();

        let (status, _) = send(
            &app,
            "POST",
            "/api/products",
            Some(json!({ "name": "Chitato", "price": 11000, "stock": 5, "category_id": id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, "DELETE", &format!("/api/categories/{}", id), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_bad_input_is_400() {
        let (app, _db) = app().await;

        let (status, body) = send(&app, "POST", "/api/categories", Some(json!({ "name": "  " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");

        let (status, body) = send_raw(&app, "POST", "/api/categories", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");

        let (status, _) = send(&app, "GET", "/api/categories/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
