//! Inventory valuation report.
//!
//! Derived entirely from the product list passed in; no storage coupling.

use serde::Serialize;

use visio_core::Money;
use visio_products::{Product, ProductId};

/// One product flagged by the report (low or out of stock).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockAlert {
    pub product_id: ProductId,
    pub sku: String,
    pub name: String,
    pub stock_quantity: i64,
    pub min_stock_level: i64,
}

/// Inventory report: total stock value plus low/out-of-stock lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryReport {
    /// Σ sell price × stock on hand over all products.
    pub total_stock_value: Money,
    pub product_count: usize,
    pub low_stock: Vec<StockAlert>,
    pub out_of_stock: Vec<StockAlert>,
}

pub fn inventory_report(products: &[Product]) -> InventoryReport {
    let total_stock_value = products.iter().map(Product::stock_value).sum();

    let alert = |p: &Product| StockAlert {
        product_id: p.id_typed(),
        sku: p.sku().to_string(),
        name: p.name().to_string(),
        stock_quantity: p.stock_quantity(),
        min_stock_level: p.min_stock_level(),
    };

    InventoryReport {
        total_stock_value,
        product_count: products.len(),
        low_stock: products.iter().filter(|p| p.is_low_stock()).map(alert).collect(),
        out_of_stock: products.iter().filter(|p| p.is_out_of_stock()).map(alert).collect(),
    }
}
