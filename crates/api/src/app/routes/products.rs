use std::sync::{Arc, PoisonError};

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;

use visio_core::Money;
use visio_infra::KeyStore;
use visio_inventory::{adjust_stock, parse_delta};
use visio_products::{Product, ProductDetails, ProductId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/search", get(search_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/:id/adjust-stock", post(adjust_product_stock))
}

fn details_from(body: dto::ProductRequest) -> Result<ProductDetails, axum::response::Response> {
    let price = Money::new(body.price).map_err(errors::domain_error_to_response)?;
    let cost = Money::new(body.cost).map_err(errors::domain_error_to_response)?;
    Ok(ProductDetails {
        sku: body.sku,
        name: body.name,
        category: body.category,
        price,
        cost,
        stock_quantity: body.stock_quantity,
        min_stock_level: body.min_stock_level,
    })
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ProductRequest>,
) -> axum::response::Response {
    // Uniqueness check and insert must not interleave with other writers.
    let _guard = services
        .placement
        .commit_lock()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    let sku = body.sku.trim().to_string();
    if services.products.list().iter().any(|p| p.sku() == sku) {
        return errors::json_error(StatusCode::CONFLICT, "conflict", "sku already exists");
    }

    let details = match details_from(body) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    let id = ProductId::new();
    let product = match Product::new(id, details, Utc::now()) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };
    services.products.upsert(id, product.clone());

    (StatusCode::CREATED, Json(dto::product_to_json(&product))).into_response()
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let mut products = services.products.list();
    products.sort_by(|a, b| a.name().cmp(b.name()));
    let items = products.iter().map(dto::product_to_json).collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Case-insensitive substring match over name, sku, and category. At most
/// ten hits, alphabetical.
pub async fn search_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<SearchParams>,
) -> axum::response::Response {
    let needle = params.q.trim().to_lowercase();

    let mut matches: Vec<Product> = services
        .products
        .list()
        .into_iter()
        .filter(|p| {
            needle.is_empty()
                || p.name().to_lowercase().contains(&needle)
                || p.sku().to_lowercase().contains(&needle)
                || p.category().is_some_and(|c| c.to_lowercase().contains(&needle))
        })
        .collect();
    matches.sort_by(|a, b| a.name().cmp(b.name()));
    matches.truncate(10);

    let items = matches.iter().map(dto::product_to_json).collect::<Vec<_>>();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<ProductId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
    };
    match services.products.get(&id) {
        Some(p) => (StatusCode::OK, Json(dto::product_to_json(&p))).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::ProductRequest>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<ProductId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
    };

    let _guard = services
        .placement
        .commit_lock()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    let Some(mut product) = services.products.get(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found");
    };

    let sku = body.sku.trim().to_string();
    if services
        .products
        .list()
        .iter()
        .any(|p| p.sku() == sku && p.id_typed() != id)
    {
        return errors::json_error(StatusCode::CONFLICT, "conflict", "sku already exists");
    }

    let details = match details_from(body) {
        Ok(d) => d,
        Err(resp) => return resp,
    };
    if let Err(e) = product.update(details) {
        return errors::domain_error_to_response(e);
    }
    services.products.upsert(id, product.clone());

    (StatusCode::OK, Json(dto::product_to_json(&product))).into_response()
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<ProductId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
    };

    // Removing a product mid-placement would strand the commit loop.
    let _guard = services
        .placement
        .commit_lock()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    match services.products.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}

/// Apply a signed stock delta via the adjustment calculator. The response
/// reports the before/after levels, the direction, and whether the result
/// was clamped at zero.
pub async fn adjust_product_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::AdjustStockRequest>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<ProductId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
    };

    let delta = match body.delta {
        dto::Delta::Int(n) => n,
        dto::Delta::Float(raw) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_delta",
                format!("invalid delta {raw:?}: expected a whole number"),
            );
        }
        dto::Delta::Text(raw) => match parse_delta(&raw) {
            Ok(n) => n,
            Err(e) => {
                return errors::json_error(StatusCode::BAD_REQUEST, "invalid_delta", e.to_string());
            }
        },
    };

    // Read-adjust-write must be serialized with order placement.
    let _guard = services
        .placement
        .commit_lock()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    let Some(mut product) = services.products.get(&id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found");
    };

    let adjustment = adjust_stock(product.stock_quantity(), delta);
    if let Err(e) = product.set_stock_level(adjustment.new_stock) {
        return errors::domain_error_to_response(e);
    }
    services.products.upsert(id, product.clone());

    tracing::info!(
        product_id = %id,
        delta,
        previous = adjustment.previous_stock,
        new = adjustment.new_stock,
        clamped = adjustment.clamped,
        "stock adjusted"
    );

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "adjustment": adjustment,
            "product": dto::product_to_json(&product),
        })),
    )
        .into_response()
}
