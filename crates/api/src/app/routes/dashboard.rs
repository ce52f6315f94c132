use std::sync::Arc;

use axum::{
    Json, Router, extract::Extension, http::StatusCode, response::IntoResponse, routing::get,
};
use chrono::Utc;

use visio_accounting::{TransactionKind, totals_by_category};
use visio_infra::KeyStore;
use visio_reporting::{
    dashboard_stats, headcount_by_department, income_vs_expense, monthly_revenue,
    order_status_breakdown, revenue_by_category, sales_by_day, top_products,
};

use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/stats", get(stats))
        .route("/charts", get(charts))
}

pub async fn stats(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let stats = dashboard_stats(
        &services.orders.list(),
        &services.customers.list(),
        &services.products.list(),
        &services.employees.list(),
        &services.transactions.list(),
    );
    (StatusCode::OK, Json(stats)).into_response()
}

pub async fn charts(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let orders = services.orders.list();
    let products = services.products.list();
    let employees = services.employees.list();
    let transactions = services.transactions.list();
    let today = Utc::now().date_naive();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "sales_by_day": sales_by_day(&orders, today, 7),
            "order_status": order_status_breakdown(&orders),
            "top_products": top_products(&orders, &products, 5),
            "revenue_by_category": revenue_by_category(&orders, &products),
            "monthly_revenue": monthly_revenue(&orders, today, 6),
            "expense_by_category": totals_by_category(&transactions, TransactionKind::Expense),
            "headcount_by_department": headcount_by_department(&employees),
            "income_vs_expense": income_vs_expense(&transactions, today, 7),
        })),
    )
        .into_response()
}
