//! Order pricing engine.
//!
//! Given the requested line items and a price lookup, computes per-line
//! subtotals and the order total. Prices always come from the lookup, never
//! from client input, so a tampered request cannot change what is charged.
//!
//! Validation errors are accumulated across **all** lines before returning,
//! so one submission yields one complete error report instead of a
//! fail-fast ping-pong with the user.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use visio_core::Money;
use visio_products::ProductId;

/// Current price and availability of one product, as seen by the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProductQuote {
    pub unit_price: Money,
    pub stock_on_hand: i64,
}

/// Injected source of product quotes (backed by the product store in
/// production, by a plain map in tests).
pub trait PriceLookup {
    fn quote(&self, product_id: ProductId) -> Option<ProductQuote>;
}

impl PriceLookup for HashMap<ProductId, ProductQuote> {
    fn quote(&self, product_id: ProductId) -> Option<ProductQuote> {
        self.get(&product_id).copied()
    }
}

impl<F> PriceLookup for F
where
    F: Fn(ProductId) -> Option<ProductQuote>,
{
    fn quote(&self, product_id: ProductId) -> Option<ProductQuote> {
        self(product_id)
    }
}

/// One requested line: product + quantity, as submitted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LineItemRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Why a single line was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineError {
    /// The referenced product does not exist; the whole order is rejected.
    #[error("unknown product")]
    UnknownProduct,

    /// Quantity was not a positive integer (boundary/contract violation).
    #[error("quantity must be positive (got {quantity})")]
    InvalidQuantity { quantity: i64 },

    /// Requested more than is on hand at pricing time.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i64, available: i64 },
}

/// A rejected line with its position in the submission (1-based).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedLine {
    pub line_no: u32,
    pub product_id: ProductId,
    pub error: LineError,
}

/// Complete validation report for a rejected submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("order rejected: {} line(s) failed validation", lines.len())]
pub struct PricingRejection {
    pub lines: Vec<RejectedLine>,
}

/// A successfully priced line. `unit_price` is the snapshot taken at pricing
/// time; later catalog changes never alter it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct PricedLine {
    pub line_no: u32,
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Money,
    pub subtotal: Money,
}

/// A fully validated, priced order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricedOrder {
    pub lines: Vec<PricedLine>,
    /// Σ subtotals. Zero for an empty submission (the caller decides whether
    /// an empty order is acceptable).
    pub total: Money,
}

/// Price and validate an order submission.
///
/// Pure and deterministic: no IO, no hidden state. Duplicate product ids are
/// allowed and priced independently (no merging), but their combined quantity
/// is checked against the product's stock on hand so a split submission
/// cannot oversell. Returns either every line priced, or every line error
/// found.
pub fn price_order(
    items: &[LineItemRequest],
    lookup: &impl PriceLookup,
) -> Result<PricedOrder, PricingRejection> {
    let mut priced = Vec::with_capacity(items.len());
    let mut rejected = Vec::new();
    // Quantity already accepted per product. Duplicate lines are checked
    // against what earlier lines claimed, not a fresh stock snapshot.
    let mut claimed: HashMap<ProductId, i64> = HashMap::new();

    for (idx, item) in items.iter().enumerate() {
        let line_no = (idx as u32) + 1;

        let reject = |error: LineError| RejectedLine {
            line_no,
            product_id: item.product_id,
            error,
        };

        if item.quantity <= 0 {
            rejected.push(reject(LineError::InvalidQuantity {
                quantity: item.quantity,
            }));
            continue;
        }

        let Some(quote) = lookup.quote(item.product_id) else {
            rejected.push(reject(LineError::UnknownProduct));
            continue;
        };

        let requested = claimed.get(&item.product_id).copied().unwrap_or(0) + item.quantity;
        if requested > quote.stock_on_hand {
            rejected.push(reject(LineError::InsufficientStock {
                requested,
                available: quote.stock_on_hand,
            }));
            continue;
        }
        claimed.insert(item.product_id, requested);

        priced.push(PricedLine {
            line_no,
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: quote.unit_price,
            subtotal: quote.unit_price.times(item.quantity),
        });
    }

    if !rejected.is_empty() {
        return Err(PricingRejection { lines: rejected });
    }

    let total = priced.iter().map(|l| l.subtotal).sum();
    Ok(PricedOrder { lines: priced, total })
}
