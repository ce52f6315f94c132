//! Stock adjustment calculator.
//!
//! A stock adjustment is a transient computation, not a persisted entity:
//! given a current level and a signed delta it yields the resulting level,
//! clamped at zero, plus a direction classification for display. The caller
//! owns persisting the result, and must serialize its
//! read-then-adjust-then-write sequence per product (the calculator itself
//! imposes no locking).

use serde::Serialize;
use thiserror::Error;

/// Whether an adjustment raises, lowers, or leaves the stock level.
///
/// Display styling only; carries no business meaning.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StockDirection {
    Increase,
    Decrease,
    NoChange,
}

/// Result of applying a signed delta to a stock level.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct StockAdjustment {
    pub previous_stock: i64,
    pub delta: i64,
    /// `max(0, previous_stock + delta)`.
    pub new_stock: i64,
    pub direction: StockDirection,
    /// True when the raw result would have been negative.
    pub clamped: bool,
}

/// Boundary error for malformed adjustment input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockError {
    #[error("invalid delta {raw:?}: expected a whole number")]
    InvalidDelta { raw: String },
}

/// Compute the stock level after applying `delta`, clamped at zero.
///
/// Total function: the computation itself never fails. Input validation
/// (non-integer deltas) happens at the boundary via [`parse_delta`].
pub fn adjust_stock(current_stock: i64, delta: i64) -> StockAdjustment {
    let raw = current_stock.saturating_add(delta);
    let new_stock = raw.max(0);

    let direction = match delta.cmp(&0) {
        core::cmp::Ordering::Greater => StockDirection::Increase,
        core::cmp::Ordering::Less => StockDirection::Decrease,
        core::cmp::Ordering::Equal => StockDirection::NoChange,
    };

    StockAdjustment {
        previous_stock: current_stock,
        delta,
        new_stock,
        direction,
        clamped: raw < 0,
    }
}

/// Parse a raw adjustment value from user input.
///
/// Never coerces: anything that is not a whole number is an
/// [`StockError::InvalidDelta`] and the caller should re-prompt.
pub fn parse_delta(raw: &str) -> Result<i64, StockError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| StockError::InvalidDelta { raw: raw.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increase_is_reported() {
        let adj = adjust_stock(10, 5);
        assert_eq!(adj.new_stock, 15);
        assert_eq!(adj.direction, StockDirection::Increase);
        assert!(!adj.clamped);
    }

    #[test]
    fn decrease_clamps_at_zero() {
        let adj = adjust_stock(10, -15);
        assert_eq!(adj.new_stock, 0);
        assert_eq!(adj.direction, StockDirection::Decrease);
        assert!(adj.clamped);
    }

    #[test]
    fn zero_delta_is_no_change() {
        let adj = adjust_stock(7, 0);
        assert_eq!(adj.new_stock, 7);
        assert_eq!(adj.direction, StockDirection::NoChange);
        assert!(!adj.clamped);
    }

    #[test]
    fn exact_drain_is_not_clamped() {
        let adj = adjust_stock(4, -4);
        assert_eq!(adj.new_stock, 0);
        assert!(!adj.clamped);
    }

    #[test]
    fn parse_delta_accepts_signed_integers() {
        assert_eq!(parse_delta("-3").unwrap(), -3);
        assert_eq!(parse_delta(" 12 ").unwrap(), 12);
    }

    #[test]
    fn parse_delta_rejects_non_integers() {
        for raw in ["", "abc", "1.5", "1e3"] {
            let err = parse_delta(raw).unwrap_err();
            assert!(matches!(err, StockError::InvalidDelta { .. }), "{raw:?}");
        }
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the resulting stock is never negative, for any
            /// non-negative current level and any delta.
            #[test]
            fn new_stock_is_never_negative(current in 0i64..1_000_000, delta in any::<i64>()) {
                let adj = adjust_stock(current, delta);
                prop_assert!(adj.new_stock >= 0);
            }

            /// Property: when no clamping happens, plain integer addition holds.
            #[test]
            fn unclamped_matches_addition(current in 0i64..1_000_000, delta in -1_000_000i64..1_000_000) {
                let adj = adjust_stock(current, delta);
                if !adj.clamped {
                    prop_assert_eq!(adj.new_stock, current + delta);
                }
            }

            /// Property: the computation is pure (same inputs, same result).
            #[test]
            fn adjustment_is_deterministic(current in 0i64..1_000_000, delta in any::<i64>()) {
                prop_assert_eq!(adjust_stock(current, delta), adjust_stock(current, delta));
            }
        }
    }
}
