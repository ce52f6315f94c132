//! Store wiring shared by all handlers.

use std::sync::Arc;

use chrono::NaiveDate;

use visio_accounting::{Transaction, TransactionId};
use visio_hr::{Attendance, Employee, EmployeeId};
use visio_infra::{InMemoryStore, OrderPlacement};
use visio_parties::{Customer, CustomerId};
use visio_products::{Product, ProductId};
use visio_sales::{Order, OrderId};

/// Shared handle to one entity store.
pub type SharedStore<K, V> = Arc<InMemoryStore<K, V>>;

pub type Placement = OrderPlacement<
    SharedStore<ProductId, Product>,
    SharedStore<CustomerId, Customer>,
    SharedStore<OrderId, Order>,
    SharedStore<TransactionId, Transaction>,
>;

/// Everything the handlers need: one store per entity, plus the order
/// placement service that coordinates across them.
pub struct AppServices {
    pub products: SharedStore<ProductId, Product>,
    pub customers: SharedStore<CustomerId, Customer>,
    pub orders: SharedStore<OrderId, Order>,
    pub employees: SharedStore<EmployeeId, Employee>,
    pub attendance: SharedStore<(EmployeeId, NaiveDate), Attendance>,
    pub transactions: SharedStore<TransactionId, Transaction>,
    pub placement: Placement,
}

pub fn build_services() -> AppServices {
    let products = Arc::new(InMemoryStore::new());
    let customers = Arc::new(InMemoryStore::new());
    let orders = Arc::new(InMemoryStore::new());
    let transactions = Arc::new(InMemoryStore::new());

    let placement = OrderPlacement::new(
        products.clone(),
        customers.clone(),
        orders.clone(),
        transactions.clone(),
    );

    AppServices {
        products,
        customers,
        orders,
        employees: Arc::new(InMemoryStore::new()),
        attendance: Arc::new(InMemoryStore::new()),
        transactions,
        placement,
    }
}
