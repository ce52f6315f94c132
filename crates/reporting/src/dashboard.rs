//! Dashboard KPI stats.

use rust_decimal::Decimal;
use serde::Serialize;

use visio_accounting::{Transaction, summarize};
use visio_core::Money;
use visio_hr::Employee;
use visio_parties::Customer;
use visio_products::Product;
use visio_sales::{Order, OrderStatus};

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_orders: usize,
    /// Σ order totals, excluding cancelled orders.
    pub total_revenue: Money,
    pub pending_orders: usize,
    pub total_customers: usize,
    pub total_products: usize,
    pub low_stock_count: usize,
    pub active_employees: usize,
    pub total_income: Money,
    pub total_expense: Money,
    /// income − expense; may be negative.
    pub net_profit: Decimal,
}

pub fn dashboard_stats(
    orders: &[Order],
    customers: &[Customer],
    products: &[Product],
    employees: &[Employee],
    transactions: &[Transaction],
) -> DashboardStats {
    let financial = summarize(transactions);

    DashboardStats {
        total_orders: orders.len(),
        total_revenue: orders
            .iter()
            .filter(|o| !o.is_cancelled())
            .map(Order::total)
            .sum(),
        pending_orders: orders
            .iter()
            .filter(|o| o.status() == OrderStatus::Pending)
            .count(),
        total_customers: customers.len(),
        total_products: products.len(),
        low_stock_count: products.iter().filter(|p| p.is_low_stock()).count(),
        active_employees: employees.iter().filter(|e| e.is_active()).count(),
        total_income: financial.total_income,
        total_expense: financial.total_expense,
        net_profit: financial.net_profit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use visio_core::Money;
    use visio_parties::{ContactInfo, CustomerId};
    use visio_products::{ProductDetails, ProductId};
    use visio_sales::{OrderId, PricedLine, PricedOrder};

    fn money(s: &str) -> Money {
        Money::new(s.parse().unwrap()).unwrap()
    }

    fn order(total_cents: i64, status: OrderStatus) -> Order {
        let unit_price = Money::new(Decimal::new(total_cents, 2)).unwrap();
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
        let mut o = Order::place(OrderId::new(), CustomerId::new(), &priced, Utc::now());
        if status != OrderStatus::Pending {
            // Drive the lifecycle to the desired status.
            match status {
                OrderStatus::Cancelled => o.transition(OrderStatus::Cancelled).unwrap(),
                OrderStatus::Confirmed => o.transition(OrderStatus::Confirmed).unwrap(),
                OrderStatus::Shipped | OrderStatus::Delivered => {
                    o.transition(OrderStatus::Confirmed).unwrap();
                    o.transition(OrderStatus::Shipped).unwrap();
                    if status == OrderStatus::Delivered {
                        o.transition(OrderStatus::Delivered).unwrap();
                    }
                }
                OrderStatus::Pending => {}
            }
        }
        o
    }

    fn customer() -> Customer {
        Customer::new(
            CustomerId::new(),
            "Acme".to_string(),
            "a@b.com".to_string(),
            ContactInfo::default(),
            Utc::now(),
        )
        .unwrap()
    }

    fn product(stock: i64, min: i64) -> Product {
        Product::new(
            ProductId::new(),
            ProductDetails {
                sku: "SKU".to_string(),
                name: "p".to_string(),
                category: None,
                price: money("1.00"),
                cost: Money::ZERO,
                stock_quantity: stock,
                min_stock_level: min,
            },
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn revenue_excludes_cancelled_orders() {
        let orders = vec![
            order(1000, OrderStatus::Pending),
            order(2000, OrderStatus::Delivered),
            order(5000, OrderStatus::Cancelled),
        ];
        let stats = dashboard_stats(&orders, &[], &[], &[], &[]);
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.total_revenue.amount(), dec!(30.00));
        assert_eq!(stats.pending_orders, 1);
    }

    #[test]
    fn counts_cover_all_collections() {
        let stats = dashboard_stats(
            &[],
            &[customer(), customer()],
            &[product(0, 5), product(100, 5)],
            &[],
            &[],
        );
        assert_eq!(stats.total_customers, 2);
        assert_eq!(stats.total_products, 2);
        assert_eq!(stats.low_stock_count, 1);
        assert_eq!(stats.net_profit, Decimal::ZERO);
    }
}
