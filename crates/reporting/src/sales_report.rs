//! Sales report over an optional date range.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use visio_core::Money;
use visio_parties::CustomerId;
use visio_sales::{Order, OrderId, OrderNumber, OrderStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesReportRow {
    pub order_id: OrderId,
    pub order_number: OrderNumber,
    pub customer_id: CustomerId,
    pub status: OrderStatus,
    pub total: Money,
    pub placed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesReport {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub rows: Vec<SalesReportRow>,
    pub total_sales: Money,
}

/// Orders within `[start, end]` (inclusive, by placement date), excluding
/// cancelled orders, newest first.
pub fn sales_report(
    orders: &[Order],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> SalesReport {
    let mut rows: Vec<SalesReportRow> = orders
        .iter()
        .filter(|o| !o.is_cancelled())
        .filter(|o| {
            let d = o.placed_at().date_naive();
            start.is_none_or(|s| d >= s) && end.is_none_or(|e| d <= e)
        })
        .map(|o| SalesReportRow {
            order_id: o.id_typed(),
            order_number: o.order_number().clone(),
            customer_id: o.customer_id(),
            status: o.status(),
            total: o.total(),
            placed_at: o.placed_at(),
        })
        .collect();

    rows.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
    let total_sales = rows.iter().map(|r| r.total).sum();

    SalesReport {
        start,
        end,
        rows,
        total_sales,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use visio_products::ProductId;
    use visio_sales::{PricedLine, PricedOrder};

    fn order_on(date: NaiveDate, price: &str) -> Order {
        let unit_price = Money::new(price.parse().unwrap()).unwrap();
        let priced = PricedOrder {
            lines: vec![PricedLine {
                line_no: 1,
                product_id: ProductId::new(),
                quantity: 1,
                unit_price,
                subtotal: unit_price,
            }],
            total: unit_price,
        };
        let placed_at = Utc.from_utc_datetime(&date.and_hms_opt(9, 0, 0).unwrap());
        Order::place(OrderId::new(), CustomerId::new(), &priced, placed_at)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    #[test]
    fn range_is_inclusive_and_sorted_newest_first() {
        let orders = vec![order_on(day(1), "1.00"), order_on(day(10), "2.00"), order_on(day(20), "4.00")];
        let report = sales_report(&orders, Some(day(1)), Some(day(10)));
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].total.amount(), dec!(2.00));
        assert_eq!(report.total_sales.amount(), dec!(3.00));
    }

    #[test]
    fn cancelled_orders_are_excluded() {
        let mut cancelled = order_on(day(5), "100.00");
        cancelled.transition(OrderStatus::Cancelled).unwrap();
        let orders = vec![cancelled, order_on(day(5), "1.00")];
        let report = sales_report(&orders, None, None);
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.total_sales.amount(), dec!(1.00));
    }
}
