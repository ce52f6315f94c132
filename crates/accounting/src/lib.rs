//! Accounting module: income/expense transactions and financial summaries.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod summary;
pub mod transaction;

pub use summary::{CategoryTotal, FinancialSummary, summarize, totals_by_category};
pub use transaction::{Transaction, TransactionDetails, TransactionId, TransactionKind};
