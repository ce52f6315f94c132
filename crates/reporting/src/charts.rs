//! Chart series for the dashboard.
//!
//! Each series is shaped for direct consumption by a chart widget: ordered
//! points with labels, nothing to post-process client-side.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

use visio_accounting::{Transaction, TransactionKind};
use visio_core::Money;
use visio_hr::Employee;
use visio_products::{Product, ProductId};
use visio_sales::{Order, OrderStatus};

/// Label used when a product has no category.
const UNCATEGORIZED: &str = "Uncategorized";
/// Label used when an employee has no department.
const UNASSIGNED: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesPoint {
    pub date: NaiveDate,
    pub sales: Money,
}

/// Daily sales for the `days` days ending at `today` (oldest first),
/// excluding cancelled orders. Days without sales appear with zero.
pub fn sales_by_day(orders: &[Order], today: NaiveDate, days: u64) -> Vec<SalesPoint> {
    let mut by_date: HashMap<NaiveDate, Money> = HashMap::new();
    for order in orders.iter().filter(|o| !o.is_cancelled()) {
        *by_date
            .entry(order.placed_at().date_naive())
            .or_insert(Money::ZERO) += order.total();
    }

    last_days(today, days)
        .map(|date| SalesPoint {
            date,
            sales: by_date.get(&date).copied().unwrap_or(Money::ZERO),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: usize,
}

/// Orders per status, always one entry per status in lifecycle order.
pub fn order_status_breakdown(orders: &[Order]) -> Vec<StatusCount> {
    OrderStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: orders.iter().filter(|o| o.status() == status).count(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopProduct {
    pub product_id: ProductId,
    pub name: String,
    pub units_sold: i64,
}

/// Best-selling products by units across all orders (cancelled included,
/// matching how the sales team reads "sold").
pub fn top_products(orders: &[Order], products: &[Product], limit: usize) -> Vec<TopProduct> {
    let names: HashMap<ProductId, &str> =
        products.iter().map(|p| (p.id_typed(), p.name())).collect();

    let mut units: HashMap<ProductId, i64> = HashMap::new();
    for order in orders {
        for line in order.lines() {
            *units.entry(line.product_id).or_insert(0) += line.quantity;
        }
    }

    let mut ranked: Vec<TopProduct> = units
        .into_iter()
        .filter_map(|(product_id, units_sold)| {
            names.get(&product_id).map(|name| TopProduct {
                product_id,
                name: name.to_string(),
                units_sold,
            })
        })
        .collect();

    // Deterministic order: most units first, ties by name.
    ranked.sort_by(|a, b| b.units_sold.cmp(&a.units_sold).then(a.name.cmp(&b.name)));
    ranked.truncate(limit);
    ranked
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: Money,
}

/// Revenue per product category, excluding cancelled orders.
pub fn revenue_by_category(orders: &[Order], products: &[Product]) -> Vec<CategoryRevenue> {
    let categories: HashMap<ProductId, Option<&str>> =
        products.iter().map(|p| (p.id_typed(), p.category())).collect();

    let mut by_category: BTreeMap<String, Money> = BTreeMap::new();
    for order in orders.iter().filter(|o| !o.is_cancelled()) {
        for line in order.lines() {
            let Some(category) = categories.get(&line.product_id) else {
                continue; // product no longer in catalog
            };
            let key = category.unwrap_or(UNCATEGORIZED).to_string();
            *by_category.entry(key).or_insert(Money::ZERO) += line.subtotal();
        }
    }

    by_category
        .into_iter()
        .map(|(category, revenue)| CategoryRevenue { category, revenue })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRevenue {
    /// First day of the month.
    pub month: NaiveDate,
    pub revenue: Money,
}

/// Revenue per calendar month for the `months` months ending at `today`
/// (oldest first), excluding cancelled orders.
pub fn monthly_revenue(orders: &[Order], today: NaiveDate, months: u32) -> Vec<MonthlyRevenue> {
    let Some(current_month) = today.with_day(1) else {
        return Vec::new();
    };

    (0..months)
        .rev()
        .filter_map(|back| {
            let start = current_month.checked_sub_months(Months::new(back))?;
            let end = start.checked_add_months(Months::new(1))?;
            let revenue = orders
                .iter()
                .filter(|o| !o.is_cancelled())
                .filter(|o| {
                    let d = o.placed_at().date_naive();
                    start <= d && d < end
                })
                .map(Order::total)
                .sum();
            Some(MonthlyRevenue { month: start, revenue })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentCount {
    pub department: String,
    pub count: usize,
}

/// Active employees per department, sorted by department name.
pub fn headcount_by_department(employees: &[Employee]) -> Vec<DepartmentCount> {
    let mut by_department: BTreeMap<String, usize> = BTreeMap::new();
    for e in employees.iter().filter(|e| e.is_active()) {
        let key = e.department().unwrap_or(UNASSIGNED).to_string();
        *by_department.entry(key).or_insert(0) += 1;
    }

    by_department
        .into_iter()
        .map(|(department, count)| DepartmentCount { department, count })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashflowPoint {
    pub date: NaiveDate,
    pub income: Money,
    pub expense: Money,
}

/// Daily income vs expense for the `days` days ending at `today` (oldest
/// first).
pub fn income_vs_expense(
    transactions: &[Transaction],
    today: NaiveDate,
    days: u64,
) -> Vec<CashflowPoint> {
    last_days(today, days)
        .map(|date| {
            let daily_total = |kind: TransactionKind| -> Money {
                transactions
                    .iter()
                    .filter(|t| t.kind() == kind && t.date() == date)
                    .map(Transaction::amount)
                    .sum()
            };
            CashflowPoint {
                date,
                income: daily_total(TransactionKind::Income),
                expense: daily_total(TransactionKind::Expense),
            }
        })
        .collect()
}

/// The `days` dates ending at `today`, oldest first.
fn last_days(today: NaiveDate, days: u64) -> impl Iterator<Item = NaiveDate> {
    (0..days)
        .rev()
        .filter_map(move |back| today.checked_sub_days(Days::new(back)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use visio_parties::CustomerId;
    use visio_products::ProductDetails;
    use visio_sales::{OrderId, PricedLine, PricedOrder};

    fn money(s: &str) -> Money {
        Money::new(s.parse().unwrap()).unwrap()
    }

    fn order_on(date: NaiveDate, product_id: ProductId, qty: i64, price: &str) -> Order {
        let unit_price = money(price);
        let priced = PricedOrder {
            lines: vec![PricedLine {
                line_no: 1,
                product_id,
                quantity: qty,
                unit_price,
                subtotal: unit_price.times(qty),
            }],
            total: unit_price.times(qty),
        };
        let placed_at = Utc
            .from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap());
        Order::place(OrderId::new(), CustomerId::new(), &priced, placed_at)
    }

    fn product(name: &str, category: Option<&str>) -> Product {
        Product::new(
            ProductId::new(),
            ProductDetails {
                sku: name.to_string(),
                name: name.to_string(),
                category: category.map(str::to_string),
                price: money("1.00"),
                cost: Money::ZERO,
                stock_quantity: 10,
                min_stock_level: 0,
            },
            Utc::now(),
        )
        .unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sales_by_day_fills_gaps_with_zero() {
        let today = day(2026, 8, 25);
        let p = ProductId::new();
        let orders = vec![
            order_on(day(2026, 8, 25), p, 2, "5.00"),
            order_on(day(2026, 8, 23), p, 1, "2.50"),
            order_on(day(2026, 8, 1), p, 1, "99.00"), // outside window
        ];

        let series = sales_by_day(&orders, today, 7);
        assert_eq!(series.len(), 7);
        assert_eq!(series[0].date, day(2026, 8, 19));
        assert_eq!(series[6].sales.amount(), dec!(10.00));
        assert_eq!(series[4].sales.amount(), dec!(2.50));
        assert_eq!(series[5].sales, Money::ZERO);
    }

    #[test]
    fn status_breakdown_lists_every_status() {
        let p = ProductId::new();
        let mut cancelled = order_on(day(2026, 8, 25), p, 1, "1.00");
        cancelled.transition(OrderStatus::Cancelled).unwrap();
        let orders = vec![order_on(day(2026, 8, 25), p, 1, "1.00"), cancelled];

        let breakdown = order_status_breakdown(&orders);
        assert_eq!(breakdown.len(), 5);
        assert_eq!(breakdown[0].status, OrderStatus::Pending);
        assert_eq!(breakdown[0].count, 1);
        assert_eq!(breakdown[4].status, OrderStatus::Cancelled);
        assert_eq!(breakdown[4].count, 1);
    }

    #[test]
    fn top_products_ranks_by_units() {
        let laptop = product("Laptop", Some("Electronics"));
        let mouse = product("Mouse", Some("Accessories"));
        let orders = vec![
            order_on(day(2026, 8, 20), laptop.id_typed(), 2, "999.00"),
            order_on(day(2026, 8, 21), mouse.id_typed(), 7, "29.99"),
        ];

        let top = top_products(&orders, &[laptop, mouse], 5);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Mouse");
        assert_eq!(top[0].units_sold, 7);
    }

    #[test]
    fn revenue_by_category_skips_cancelled() {
        let laptop = product("Laptop", Some("Electronics"));
        let misc = product("Misc", None);
        let mut cancelled = order_on(day(2026, 8, 20), laptop.id_typed(), 1, "999.00");
        cancelled.transition(OrderStatus::Cancelled).unwrap();
        let orders = vec![
            cancelled,
            order_on(day(2026, 8, 21), laptop.id_typed(), 1, "999.00"),
            order_on(day(2026, 8, 21), misc.id_typed(), 2, "1.00"),
        ];

        let revenue = revenue_by_category(&orders, &[laptop, misc]);
        let as_pairs: Vec<_> = revenue
            .iter()
            .map(|c| (c.category.as_str(), c.revenue.amount()))
            .collect();
        assert_eq!(
            as_pairs,
            vec![("Electronics", dec!(999.00)), ("Uncategorized", dec!(2.00))]
        );
    }

    #[test]
    fn monthly_revenue_covers_six_calendar_months() {
        let p = ProductId::new();
        let orders = vec![
            order_on(day(2026, 8, 25), p, 1, "10.00"),
            order_on(day(2026, 3, 2), p, 1, "7.00"),
            order_on(day(2026, 4, 30), p, 1, "3.00"),
        ];

        let series = monthly_revenue(&orders, day(2026, 8, 25), 6);
        assert_eq!(series.len(), 6);
        assert_eq!(series[0].month, day(2026, 3, 1));
        assert_eq!(series[0].revenue.amount(), dec!(7.00));
        assert_eq!(series[1].revenue.amount(), dec!(3.00));
        assert_eq!(series[5].revenue.amount(), dec!(10.00));
    }
}
