use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::Utc;

use visio_infra::{KeyStore, PlaceOrder};
use visio_parties::CustomerId;
use visio_products::ProductId;
use visio_sales::{LineItemRequest, OrderId, OrderStatus};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(place_order).get(list_orders))
        .route("/:id", get(get_order).delete(delete_order))
        .route("/:id/status", put(update_order_status))
}

pub async fn place_order(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::PlaceOrderRequest>,
) -> axum::response::Response {
    let Ok(customer_id) = body.customer_id.parse::<CustomerId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid customer id");
    };

    let mut items = Vec::with_capacity(body.items.len());
    for item in &body.items {
        let Ok(product_id) = item.product_id.parse::<ProductId>() else {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_id",
                format!("invalid product id {:?}", item.product_id),
            );
        };
        items.push(LineItemRequest {
            product_id,
            quantity: item.quantity,
        });
    }

    let order = match services.placement.place(PlaceOrder {
        customer_id,
        items,
        placed_at: Utc::now(),
    }) {
        Ok(o) => o,
        Err(e) => return errors::place_order_error_to_response(e),
    };

    (StatusCode::CREATED, Json(dto::order_to_json(&order))).into_response()
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let mut orders = services.orders.list();
    orders.sort_by(|a, b| b.placed_at().cmp(&a.placed_at()));
    let items = orders.iter().map(dto::order_to_json).collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<OrderId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id");
    };
    match services.orders.get(&id) {
        Some(o) => (StatusCode::OK, Json(dto::order_to_json(&o))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found"),
    }
}

pub async fn update_order_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateStatusRequest>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<OrderId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id");
    };
    let next = match body.status.parse::<OrderStatus>() {
        Ok(s) => s,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let Some(mut order) = services.orders.get(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found");
    };

    if let Err(e) = order.transition(next) {
        return errors::domain_error_to_response(e);
    }
    services.orders.upsert(id, order.clone());

    tracing::info!(order_number = %order.order_number(), status = %order.status(), "order status updated");

    (StatusCode::OK, Json(dto::order_to_json(&order))).into_response()
}

/// Orders that have shipped are history, not clutter: only pending or
/// cancelled orders can be deleted. Deleting never restocks inventory.
pub async fn delete_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<OrderId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid order id");
    };
    let Some(order) = services.orders.get(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "order not found");
    };

    if !order.can_delete() {
        return errors::json_error(
            StatusCode::CONFLICT,
            "conflict",
            "only pending or cancelled orders can be deleted",
        );
    }

    services.orders.remove(&id);
    StatusCode::NO_CONTENT.into_response()
}
