use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use visio_core::{DomainError, DomainResult, Entity, EntityId, Money};
use visio_parties::CustomerId;
use visio_products::ProductId;

use crate::pricing::PricedOrder;

/// Sales order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub EntityId);

visio_core::impl_entity_id!(OrderId, "OrderId");

/// Human-facing order number, e.g. `ORD-20260825-3F2A`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Derive the number from the placement date and the order id. The
    /// suffix comes from the id's random bits, so the number is stable for a
    /// given order and unique without a shared counter.
    pub fn generate(date: NaiveDate, id: OrderId) -> Self {
        let hex = id.as_uuid().simple().to_string();
        let suffix = hex[hex.len() - 4..].to_uppercase();
        Self(format!("ORD-{}-{}", date.format("%Y%m%d"), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Order status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Allowed lifecycle moves. Delivered and Cancelled are terminal.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Shipped)
                | (Confirmed, Cancelled) | (Shipped, Delivered)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::validation(format!(
                "unknown order status {other:?}"
            ))),
        }
    }
}

/// Order line: product, quantity, and the unit price snapshotted at
/// placement time. Immutable once the order is placed, so later catalog
/// price changes never alter historical orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub line_no: u32,
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Money,
}

impl OrderLine {
    pub fn subtotal(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Sales order entity.
///
/// The total is never stored: it is always recomputed from the lines, so it
/// cannot drift from its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    id: OrderId,
    order_number: OrderNumber,
    customer_id: CustomerId,
    status: OrderStatus,
    lines: Vec<OrderLine>,
    placed_at: DateTime<Utc>,
}

impl Order {
    /// Build a pending order from a validated pricing result.
    pub fn place(
        id: OrderId,
        customer_id: CustomerId,
        priced: &PricedOrder,
        placed_at: DateTime<Utc>,
    ) -> Self {
        let lines = priced
            .lines
            .iter()
            .map(|l| OrderLine {
                line_no: l.line_no,
                product_id: l.product_id,
                quantity: l.quantity,
                unit_price: l.unit_price,
            })
            .collect();

        Self {
            id,
            order_number: OrderNumber::generate(placed_at.date_naive(), id),
            customer_id,
            status: OrderStatus::Pending,
            lines,
            placed_at,
        }
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn order_number(&self) -> &OrderNumber {
        &self.order_number
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    /// Recomputed total: Σ unit_price × quantity over all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(OrderLine::subtotal).sum()
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == OrderStatus::Cancelled
    }

    /// Only orders that never shipped may be deleted.
    pub fn can_delete(&self) -> bool {
        matches!(self.status, OrderStatus::Pending | OrderStatus::Cancelled)
    }

    /// Move the order along its lifecycle. Setting the current status again
    /// is a no-op; anything else must be an allowed transition.
    pub fn transition(&mut self, next: OrderStatus) -> DomainResult<()> {
        if self.status == next {
            return Ok(());
        }

        if next == OrderStatus::Confirmed && self.lines.is_empty() {
            return Err(DomainError::validation("cannot confirm order without lines"));
        }

        if !self.status.can_transition_to(next) {
            return Err(DomainError::invariant(format!(
                "cannot transition order from {} to {}",
                self.status, next
            )));
        }

        self.status = next;
        Ok(())
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PricedLine;
    use rust_decimal_macros::dec;

    fn money(s: &str) -> Money {
        Money::new(s.parse().unwrap()).unwrap()
    }

    fn priced(lines: &[(i64, &str)]) -> PricedOrder {
        let lines: Vec<PricedLine> = lines
            .iter()
            .enumerate()
            .map(|(i, (qty, price))| {
                let unit_price = money(price);
                PricedLine {
                    line_no: (i as u32) + 1,
                    product_id: ProductId::new(),
                    quantity: *qty,
                    unit_price,
                    subtotal: unit_price.times(*qty),
                }
            })
            .collect();
        let total = lines.iter().map(|l| l.subtotal).sum();
        PricedOrder { lines, total }
    }

    fn place(lines: &[(i64, &str)]) -> Order {
        Order::place(OrderId::new(), CustomerId::new(), &priced(lines), Utc::now())
    }

    #[test]
    fn placed_order_starts_pending_with_snapshotted_lines() {
        let order = place(&[(2, "5.00"), (3, "2.50")]);
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.lines().len(), 2);
        assert_eq!(order.total().amount(), dec!(17.50));
    }

    #[test]
    fn total_matches_sum_of_line_subtotals() {
        let order = place(&[(2, "9.99"), (1, "0.02")]);
        let sum: Money = order.lines().iter().map(OrderLine::subtotal).sum();
        assert_eq!(order.total(), sum);
        assert_eq!(order.total().amount(), dec!(20.00));
    }

    #[test]
    fn empty_order_totals_zero() {
        let order = place(&[]);
        assert_eq!(order.total(), Money::ZERO);
    }

    #[test]
    fn order_number_embeds_placement_date() {
        let order = place(&[(1, "1.00")]);
        let expected_prefix = format!("ORD-{}-", order.placed_at().date_naive().format("%Y%m%d"));
        assert!(order.order_number().as_str().starts_with(&expected_prefix));
        assert_eq!(order.order_number().as_str().len(), expected_prefix.len() + 4);
    }

    #[test]
    fn full_lifecycle_to_delivered() {
        let mut order = place(&[(1, "1.00")]);
        order.transition(OrderStatus::Confirmed).unwrap();
        order.transition(OrderStatus::Shipped).unwrap();
        order.transition(OrderStatus::Delivered).unwrap();
        assert_eq!(order.status(), OrderStatus::Delivered);
        assert!(order.status().is_terminal());
    }

    #[test]
    fn cannot_ship_a_pending_order() {
        let mut order = place(&[(1, "1.00")]);
        let err = order.transition(OrderStatus::Shipped).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn cannot_cancel_after_shipping() {
        let mut order = place(&[(1, "1.00")]);
        order.transition(OrderStatus::Confirmed).unwrap();
        order.transition(OrderStatus::Shipped).unwrap();
        let err = order.transition(OrderStatus::Cancelled).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn cannot_confirm_empty_order() {
        let mut order = place(&[]);
        let err = order.transition(OrderStatus::Confirmed).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn setting_same_status_is_a_no_op() {
        let mut order = place(&[(1, "1.00")]);
        order.transition(OrderStatus::Pending).unwrap();
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn delete_allowed_only_before_shipping() {
        let mut order = place(&[(1, "1.00")]);
        assert!(order.can_delete());
        order.transition(OrderStatus::Confirmed).unwrap();
        order.transition(OrderStatus::Shipped).unwrap();
        assert!(!order.can_delete());
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in OrderStatus::ALL {
            let parsed: OrderStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("unknown".parse::<OrderStatus>().is_err());
    }
}
