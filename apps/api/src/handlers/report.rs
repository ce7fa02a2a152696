//! # Report Handlers
//!
//! Sales reports over UTC calendar days.
//!
//! ## Query Rules
//! ```text
//! /api/report                                   → today
//! /api/report?start_date=2026-10-01&end_date=2026-10-07  → inclusive range
//! /api/report?start_date=2026-10-01             → today (needs both bounds)
//! /api/report?start_date=2026-10-07&end_date=2026-10-01  → 400 (inverted)
//! /api/report/today                             → today
//! ```
//! Empty values count as absent. A malformed or inverted pair is a 400.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use kasir_core::{DateRange, SalesReport};
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ReportQuery {
    fn range(&self) -> Result<Option<DateRange>, ApiError> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };
        let start = present(&self.start_date);
        let end = present(&self.end_date);
        Ok(DateRange::parse(start.as_deref(), end.as_deref())?)
    }
}

/// `GET /api/report`
pub async fn range_report(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Json<SalesReport>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::invalid_input(e.body_text()))?;

    let report = match query.range()? {
        Some(range) => {
            debug!(start = %range.start(), end = %range.end(), "Range report requested");
            state.reports.range_report(range.start(), range.end()).await?
        }
        None => state.reports.daily_report().await?,
    };

    Ok(Json(report))
}

/// `GET /api/report/today`
pub async fn daily_report(State(state): State<AppState>) -> Result<Json<SalesReport>, ApiError> {
    Ok(Json(state.reports.daily_report().await?))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use chrono::Utc;
    use serde_json::json;

    use super::ReportQuery;
    use crate::handlers::test_support::{app, send};

    #[test]
    fn test_empty_values_are_absent() {
        let query = ReportQuery {
            start_date: Some(String::new()),
            end_date: Some(" ".to_string()),
        };
        assert!(query.range().unwrap().is_none());

        let query = ReportQuery {
            start_date: Some("2026-10-01".to_string()),
            end_date: None,
        };
        assert!(query.range().unwrap().is_none());

        let query = ReportQuery {
            start_date: Some("2026-10-01".to_string()),
            end_date: Some(String::new()),
        };
        assert!(query.range().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reports() {
        let (app, _db) = app().await;

        let (status, empty) = send(&app, "GET", "/api/report/today", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(empty["total_revenue"], 0);
        assert_eq!(empty["transaction_count"], 0);
        assert!(empty["best_seller"].is_null());

        let (_, product) = send(
            &app,
            "POST",
            "/api/products",
            Some(json!({ "name": "Indomie Goreng", "price": 5000, "stock": 10 })),
        )
        .await;
        let id = product["id"].as_i64().unwrap();
        let (status, _) = send(
            &app,
            "POST",
            "/api/checkout",
            Some(json!([{ "product_id": id, "quantity": 3 }])),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, daily) = send(&app, "GET", "/api/report/today", None).await;
        assert_eq!(daily["total_revenue"], 15000);
        assert_eq!(daily["transaction_count"], 1);
        assert_eq!(daily["best_seller"]["name"], "Indomie Goreng");
        assert_eq!(daily["best_seller"]["quantity_sold"], 3);

        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        let (status, ranged) = send(
            &app,
            "GET",
            &format!("/api/report?start_date={}&end_date={}", today, today),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ranged, daily);

        let (_, default) = send(&app, "GET", "/api/report", None).await;
        assert_eq!(default, daily);

        for uri in [
            "/api/report?start_date=2020-01-01",
            "/api/report?end_date=2020-01-01",
            "/api/report?start_date=2020-01-01&end_date=",
        ] {
            let (status, half) = send(&app, "GET", uri, None).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert_eq!(half, daily, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_report_rejects_bad_windows() {
        let (app, _db) = app().await;

        for uri in [
            "/api/report?start_date=2026-10-07&end_date=2026-10-01",
            "/api/report?start_date=01/10/2026&end_date=2026-10-07",
        ] {
            let (status, body) = send(&app, "GET", uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(body["code"], "INVALID_INPUT", "{}", uri);
        }
    }
}
