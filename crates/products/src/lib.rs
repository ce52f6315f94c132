//! Product catalog domain module.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod product;

pub use product::{Product, ProductDetails, ProductId};
