use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;

use visio_accounting::{TransactionKind, summarize, totals_by_category};
use visio_infra::KeyStore;
use visio_inventory::inventory_report;
use visio_reporting::sales_report;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/sales", get(sales))
        .route("/inventory", get(inventory))
        .route("/financial", get(financial))
}

#[derive(Debug, Deserialize)]
pub struct SalesReportParams {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

pub async fn sales(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<SalesReportParams>,
) -> axum::response::Response {
    if let (Some(start), Some(end)) = (params.start, params.end) {
        if start > end {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                "start must not be after end",
            );
        }
    }

    let report = sales_report(&services.orders.list(), params.start, params.end);
    (StatusCode::OK, Json(report)).into_response()
}

pub async fn inventory(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let report = inventory_report(&services.products.list());
    (StatusCode::OK, Json(report)).into_response()
}

pub async fn financial(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let transactions = services.transactions.list();
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "summary": summarize(&transactions),
            "income_by_category": totals_by_category(&transactions, TransactionKind::Income),
            "expense_by_category": totals_by_category(&transactions, TransactionKind::Expense),
        })),
    )
        .into_response()
}
