use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use visio_core::{DomainError, DomainResult, Entity, EntityId, Money};

/// Transaction identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub EntityId);

visio_core::impl_entity_id!(TransactionId, "TransactionId");

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl core::str::FromStr for TransactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(DomainError::validation(format!(
                "unknown transaction kind {other:?}"
            ))),
        }
    }
}

/// Fields supplied when recording a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDetails {
    pub kind: TransactionKind,
    pub category: Option<String>,
    pub amount: Money,
    pub description: Option<String>,
    pub reference: Option<String>,
    pub date: NaiveDate,
}

/// A single income or expense entry. Immutable once recorded; corrections
/// are new entries, not edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    id: TransactionId,
    kind: TransactionKind,
    category: Option<String>,
    amount: Money,
    description: Option<String>,
    reference: Option<String>,
    date: NaiveDate,
    created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn record(
        id: TransactionId,
        details: TransactionDetails,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if details.amount.is_zero() {
            return Err(DomainError::validation("amount must be positive"));
        }
        Ok(Self {
            id,
            kind: details.kind,
            category: details.category,
            amount: details.amount,
            description: details.description,
            reference: details.reference,
            date: details.date,
            created_at,
        })
    }

    pub fn id_typed(&self) -> TransactionId {
        self.id
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Transaction {
    type Id = TransactionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn details(kind: TransactionKind, amount: &str) -> TransactionDetails {
        TransactionDetails {
            kind,
            category: Some("Sales".to_string()),
            amount: Money::new(amount.parse().unwrap()).unwrap(),
            description: None,
            reference: None,
            date: NaiveDate::from_ymd_opt(2026, 8, 25).unwrap(),
        }
    }

    #[test]
    fn records_positive_amounts() {
        let t = Transaction::record(
            TransactionId::new(),
            details(TransactionKind::Income, "1299.99"),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(t.amount().amount(), dec!(1299.99));
        assert_eq!(t.kind(), TransactionKind::Income);
    }

    #[test]
    fn zero_amount_is_rejected() {
        let err = Transaction::record(
            TransactionId::new(),
            details(TransactionKind::Expense, "0"),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn kind_parsing() {
        assert_eq!("income".parse::<TransactionKind>().unwrap(), TransactionKind::Income);
        assert!("transfer".parse::<TransactionKind>().is_err());
    }
}
