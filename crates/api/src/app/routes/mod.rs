use axum::{Router, routing::get};

pub mod attendance;
pub mod customers;
pub mod dashboard;
pub mod employees;
pub mod orders;
pub mod products;
pub mod reports;
pub mod system;
pub mod transactions;

/// Router for all endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/customers", customers::router())
        .nest("/products", products::router())
        .nest("/orders", orders::router())
        .nest("/employees", employees::router())
        .nest("/attendance", attendance::router())
        .nest("/transactions", transactions::router())
        .nest("/dashboard", dashboard::router())
        .nest("/reports", reports::router())
}
