//! Inventory domain module.
//!
//! This crate contains business rules for stock levels, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod adjust;
pub mod valuation;

pub use adjust::{StockAdjustment, StockDirection, StockError, adjust_stock, parse_delta};
pub use valuation::{InventoryReport, StockAlert, inventory_report};
