//! Parties domain module: the people and companies we trade with.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod customer;

pub use customer::{ContactInfo, Customer, CustomerId};
