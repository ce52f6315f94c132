use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;

use visio_accounting::{Transaction, TransactionDetails, TransactionId, TransactionKind};
use visio_core::Money;
use visio_infra::KeyStore;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(record_transaction).get(list_transactions))
        .route("/:id", get(get_transaction).delete(delete_transaction))
}

pub async fn record_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::TransactionRequest>,
) -> axum::response::Response {
    let kind = match body.kind.parse::<TransactionKind>() {
        Ok(k) => k,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let amount = match Money::new(body.amount) {
        Ok(m) => m,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let now = Utc::now();
    let id = TransactionId::new();
    let txn = match Transaction::record(
        id,
        TransactionDetails {
            kind,
            category: body.category,
            amount,
            description: body.description,
            reference: body.reference,
            date: body.date.unwrap_or_else(|| now.date_naive()),
        },
        now,
    ) {
        Ok(t) => t,
        Err(e) => return errors::domain_error_to_response(e),
    };
    services.transactions.upsert(id, txn.clone());

    (StatusCode::CREATED, Json(dto::transaction_to_json(&txn))).into_response()
}

#[derive(Debug, Deserialize)]
pub struct TransactionParams {
    pub kind: Option<String>,
}

pub async fn list_transactions(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<TransactionParams>,
) -> axum::response::Response {
    let kind = match params.kind.as_deref() {
        None => None,
        Some(raw) => match raw.parse::<TransactionKind>() {
            Ok(k) => Some(k),
            Err(e) => return errors::domain_error_to_response(e),
        },
    };

    let mut transactions: Vec<Transaction> = services
        .transactions
        .list()
        .into_iter()
        .filter(|t| kind.is_none_or(|k| t.kind() == k))
        .collect();
    transactions.sort_by(|a, b| b.date().cmp(&a.date()));

    let items = transactions
        .iter()
        .map(dto::transaction_to_json)
        .collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<TransactionId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid transaction id");
    };
    match services.transactions.get(&id) {
        Some(t) => (StatusCode::OK, Json(dto::transaction_to_json(&t))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "transaction not found"),
    }
}

pub async fn delete_transaction(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<TransactionId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid transaction id");
    };
    match services.transactions.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "transaction not found"),
    }
}
