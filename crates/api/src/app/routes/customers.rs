use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;

use visio_infra::KeyStore;
use visio_parties::{ContactInfo, Customer, CustomerId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_customer).get(list_customers))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

pub async fn create_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CustomerRequest>,
) -> axum::response::Response {
    let email = body.email.trim().to_lowercase();
    if services.customers.list().iter().any(|c| c.email() == email) {
        return errors::json_error(
            StatusCode::CONFLICT,
            "conflict",
            "email already registered",
        );
    }

    let id = CustomerId::new();
    let customer = match Customer::new(
        id,
        body.name,
        body.email,
        ContactInfo {
            phone: body.phone,
            address: body.address,
        },
        Utc::now(),
    ) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };
    services.customers.upsert(id, customer.clone());

    (StatusCode::CREATED, Json(dto::customer_to_json(&customer))).into_response()
}

pub async fn list_customers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let mut customers = services.customers.list();
    customers.sort_by(|a, b| a.name().cmp(b.name()));
    let items = customers.iter().map(dto::customer_to_json).collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<CustomerId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid customer id");
    };
    match services.customers.get(&id) {
        Some(c) => (StatusCode::OK, Json(dto::customer_to_json(&c))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "customer not found"),
    }
}

pub async fn update_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::CustomerRequest>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<CustomerId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid customer id");
    };
    let Some(mut customer) = services.customers.get(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "customer not found");
    };

    let email = body.email.trim().to_lowercase();
    if services
        .customers
        .list()
        .iter()
        .any(|c| c.email() == email && c.id_typed() != id)
    {
        return errors::json_error(
            StatusCode::CONFLICT,
            "conflict",
            "email already registered",
        );
    }

    if let Err(e) = customer.update(
        body.name,
        body.email,
        ContactInfo {
            phone: body.phone,
            address: body.address,
        },
    ) {
        return errors::domain_error_to_response(e);
    }
    services.customers.upsert(id, customer.clone());

    (StatusCode::OK, Json(dto::customer_to_json(&customer))).into_response()
}

pub async fn delete_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<CustomerId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid customer id");
    };
    match services.customers.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "customer not found"),
    }
}
