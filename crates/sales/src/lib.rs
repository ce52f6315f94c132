//! Sales domain module: order pricing and the order lifecycle.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod order;
pub mod pricing;

pub use order::{Order, OrderId, OrderLine, OrderNumber, OrderStatus};
pub use pricing::{
    LineError, LineItemRequest, PriceLookup, PricedLine, PricedOrder, PricingRejection,
    ProductQuote, RejectedLine, price_order,
};
