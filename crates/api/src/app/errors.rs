use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use visio_core::DomainError;
use visio_infra::PlaceOrderError;
use visio_sales::PricingRejection;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DomainError::InvariantViolation(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invariant_violation", msg)
        }
    }
}

/// A rejected order submission carries the full per-line report, so the
/// client can surface every problem at once.
pub fn pricing_rejection_to_response(rejection: PricingRejection) -> axum::response::Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        axum::Json(json!({
            "error": "order_rejected",
            "message": rejection.to_string(),
            "lines": rejection.lines,
        })),
    )
        .into_response()
}

pub fn place_order_error_to_response(err: PlaceOrderError) -> axum::response::Response {
    match err {
        PlaceOrderError::UnknownCustomer => {
            json_error(StatusCode::NOT_FOUND, "not_found", "customer not found")
        }
        PlaceOrderError::Rejected(rejection) => pricing_rejection_to_response(rejection),
        PlaceOrderError::Domain(e) => domain_error_to_response(e),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
