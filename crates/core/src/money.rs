//! Money value object.
//!
//! Monetary amounts are decimal-exact (never floating point) and normalized to
//! two decimal places using round-half-up, so `2 * 9.99` is exactly `19.98`
//! and totals never drift from their line items.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// A non-negative monetary amount, normalized to 2 decimal places.
///
/// Deserialization routes through [`Money::new`], so a negative amount in a
/// payload is rejected and the value is normalized like any other
/// construction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Money(Decimal);

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Money::new(amount)
    }
}

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Construct from a decimal amount, rejecting negative values.
    pub fn new(amount: Decimal) -> DomainResult<Self> {
        if amount < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "amount must not be negative (got {amount})"
            )));
        }
        Ok(Self(round2(amount)))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiply by a (positive) quantity, rounding the result to 2 places.
    pub fn times(&self, quantity: i64) -> Money {
        Money(round2(self.0 * Decimal::from(quantity)))
    }

    /// Signed difference. Returns a plain decimal since the result may be
    /// negative (e.g. net profit = income - expense).
    pub fn minus(&self, other: Money) -> Decimal {
        self.0 - other.0
    }
}

impl ValueObject for Money {}

/// Round-half-up to 2 decimal places.
fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

impl core::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl core::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl core::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn negative_amount_is_rejected() {
        let err = Money::new(dec!(-0.01)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn amounts_are_normalized_to_two_places() {
        let m = Money::new(dec!(1.005)).unwrap();
        assert_eq!(m.amount(), dec!(1.01)); // half-up
    }

    #[test]
    fn times_is_decimal_exact() {
        let price = Money::new(dec!(9.99)).unwrap();
        assert_eq!(price.times(2).amount(), dec!(19.98));
    }

    #[test]
    fn deserialization_validates_and_normalizes() {
        let m: Money = serde_json::from_str("\"12.345\"").unwrap();
        assert_eq!(m.amount(), dec!(12.35));

        serde_json::from_str::<Money>("\"-1\"").unwrap_err();
    }

    #[test]
    fn sum_of_empty_iterator_is_zero() {
        let total: Money = core::iter::empty().sum();
        assert_eq!(total, Money::ZERO);
    }

    #[test]
    fn minus_may_go_negative() {
        let income = Money::new(dec!(10)).unwrap();
        let expense = Money::new(dec!(12.50)).unwrap();
        assert_eq!(income.minus(expense), dec!(-2.50));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: constructed amounts are never negative and carry at
            /// most 2 decimal places.
            #[test]
            fn construction_normalizes(cents in 0i64..1_000_000_000) {
                let raw = Decimal::new(cents, 3); // three decimal places in
                let m = Money::new(raw).unwrap();
                prop_assert!(m.amount() >= Decimal::ZERO);
                prop_assert!(m.amount().scale() <= 2);
            }

            /// Property: addition agrees with plain decimal addition.
            #[test]
            fn addition_is_exact(a in 0i64..1_000_000, b in 0i64..1_000_000) {
                let x = Money::new(Decimal::new(a, 2)).unwrap();
                let y = Money::new(Decimal::new(b, 2)).unwrap();
                prop_assert_eq!((x + y).amount(), Decimal::new(a + b, 2));
            }
        }
    }
}
