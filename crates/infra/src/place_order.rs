//! Order placement service.
//!
//! Composes the two pure cores: the pricing engine validates and totals the
//! submission, then the stock adjustment calculator decrements inventory one
//! line at a time, and an income transaction is recorded for the total.
//!
//! The whole read-price-decrement-write sequence runs under one commit lock:
//! the calculators are safe to call concurrently, but lost updates between
//! reading a stock level and writing the adjusted one must be prevented by
//! whoever owns storage. With the in-memory stores, that is this service.

use std::collections::{HashMap, hash_map::Entry};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use thiserror::Error;

use visio_accounting::{Transaction, TransactionDetails, TransactionId, TransactionKind};
use visio_core::DomainError;
use visio_inventory::adjust_stock;
use visio_parties::{Customer, CustomerId};
use visio_products::{Product, ProductId};
use visio_sales::{
    LineItemRequest, Order, OrderId, PricingRejection, ProductQuote, price_order,
};

use crate::store::KeyStore;

/// An order submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOrder {
    pub customer_id: CustomerId,
    pub items: Vec<LineItemRequest>,
    pub placed_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum PlaceOrderError {
    #[error("customer not found")]
    UnknownCustomer,

    /// The submission failed validation; contains the complete per-line
    /// report. Nothing was persisted.
    #[error(transparent)]
    Rejected(#[from] PricingRejection),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Order placement over injected stores.
pub struct OrderPlacement<P, C, O, T> {
    products: P,
    customers: C,
    orders: O,
    transactions: T,
    // Serializes read-then-adjust-then-write across concurrent submissions.
    commit_lock: Mutex<()>,
}

impl<P, C, O, T> OrderPlacement<P, C, O, T> {
    /// Lock serializing product read-modify-write sequences. Any code path
    /// that mutates the product store outside [`OrderPlacement::place`] must
    /// hold this lock across its read-then-write, or it races the commit
    /// loop.
    pub fn commit_lock(&self) -> &Mutex<()> {
        &self.commit_lock
    }
}

impl<P, C, O, T> OrderPlacement<P, C, O, T>
where
    P: KeyStore<ProductId, Product>,
    C: KeyStore<CustomerId, Customer>,
    O: KeyStore<OrderId, Order>,
    T: KeyStore<TransactionId, Transaction>,
{
    pub fn new(products: P, customers: C, orders: O, transactions: T) -> Self {
        Self {
            products,
            customers,
            orders,
            transactions,
            commit_lock: Mutex::new(()),
        }
    }

    /// Validate, price, and commit an order. Any line error rejects the
    /// whole submission (no partial fulfillment).
    pub fn place(&self, request: PlaceOrder) -> Result<Order, PlaceOrderError> {
        let _guard = self
            .commit_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if self.customers.get(&request.customer_id).is_none() {
            return Err(PlaceOrderError::UnknownCustomer);
        }

        let lookup = |id: ProductId| {
            self.products.get(&id).map(|p| ProductQuote {
                unit_price: p.price(),
                stock_on_hand: p.stock_quantity(),
            })
        };
        let priced = price_order(&request.items, &lookup)?;

        let order = Order::place(OrderId::new(), request.customer_id, &priced, request.placed_at);

        // Commit: decrement stock per line with the calculator's output.
        // Every decrement is staged before anything is written, so a failure
        // on a later line leaves the store untouched. Duplicate lines adjust
        // the staged copy, not a fresh read.
        let mut staged: HashMap<ProductId, Product> = HashMap::new();
        for line in order.lines() {
            let product = match staged.entry(line.product_id) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let Some(product) = self.products.get(&line.product_id) else {
                        return Err(DomainError::not_found().into());
                    };
                    entry.insert(product)
                }
            };
            let adjustment = adjust_stock(product.stock_quantity(), -line.quantity);
            product.set_stock_level(adjustment.new_stock)?;

            tracing::debug!(
                product_id = %line.product_id,
                previous = adjustment.previous_stock,
                new = adjustment.new_stock,
                "stock decremented for order line"
            );
        }
        for (product_id, product) in staged {
            self.products.upsert(product_id, product);
        }

        self.orders.upsert(order.id_typed(), order.clone());

        // An empty order has nothing to post to the books.
        if !order.total().is_zero() {
            let txn = Transaction::record(
                TransactionId::new(),
                TransactionDetails {
                    kind: TransactionKind::Income,
                    category: Some("Sales".to_string()),
                    amount: order.total(),
                    description: Some(format!("Order {}", order.order_number())),
                    reference: Some(order.order_number().as_str().to_string()),
                    date: request.placed_at.date_naive(),
                },
                request.placed_at,
            )?;
            self.transactions.upsert(txn.id_typed(), txn);
        }

        tracing::info!(
            order_number = %order.order_number(),
            total = %order.total(),
            lines = order.lines().len(),
            "order placed"
        );

        Ok(order)
    }
}
