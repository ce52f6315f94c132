//! Infrastructure: storage seams and cross-module orchestration.
//!
//! Domain crates stay pure; this crate owns the injected repository
//! interface ([`store::KeyStore`]) and the services that read, compute, and
//! write across modules (order placement).

pub mod place_order;
pub mod seed;
pub mod store;

pub use place_order::{OrderPlacement, PlaceOrder, PlaceOrderError};
pub use seed::seed_demo_data;
pub use store::{InMemoryStore, KeyStore};
