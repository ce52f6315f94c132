//! Reporting module: dashboard KPIs, chart series, and reports.
//!
//! Every function here is a pure aggregation over slices of domain values;
//! the caller (the HTTP layer) reads the stores and passes the data in.

pub mod charts;
pub mod dashboard;
pub mod sales_report;

pub use charts::{
    CashflowPoint, CategoryRevenue, DepartmentCount, MonthlyRevenue, SalesPoint, StatusCount,
    TopProduct, headcount_by_department, income_vs_expense, monthly_revenue,
    order_status_breakdown, revenue_by_category, sales_by_day, top_products,
};
pub use dashboard::{DashboardStats, dashboard_stats};
pub use sales_report::{SalesReport, SalesReportRow, sales_report};
