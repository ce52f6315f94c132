//! Financial summaries: totals and per-category rollups.
//!
//! Derived entirely from the transactions passed in.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use visio_core::Money;

use crate::transaction::{Transaction, TransactionKind};

/// Label used when a transaction has no category.
const UNCATEGORIZED: &str = "Other";

/// Overall income/expense totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialSummary {
    pub total_income: Money,
    pub total_expense: Money,
    /// income − expense; may be negative.
    pub net_profit: Decimal,
}

/// Total for one category of one transaction kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
}

pub fn summarize(transactions: &[Transaction]) -> FinancialSummary {
    let total_of = |kind: TransactionKind| -> Money {
        transactions
            .iter()
            .filter(|t| t.kind() == kind)
            .map(Transaction::amount)
            .sum()
    };

    let total_income = total_of(TransactionKind::Income);
    let total_expense = total_of(TransactionKind::Expense);

    FinancialSummary {
        total_income,
        total_expense,
        net_profit: total_income.minus(total_expense),
    }
}

/// Per-category totals for the given kind, sorted by category name.
pub fn totals_by_category(
    transactions: &[Transaction],
    kind: TransactionKind,
) -> Vec<CategoryTotal> {
    let mut by_category: BTreeMap<String, Money> = BTreeMap::new();

    for t in transactions.iter().filter(|t| t.kind() == kind) {
        let category = t.category().unwrap_or(UNCATEGORIZED).to_string();
        let entry = by_category.entry(category).or_insert(Money::ZERO);
        *entry += t.amount();
    }

    by_category
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect()
}
