//! # Money Module
//!
//! Provides the `Money` type and the single cost normalization path.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing parsed floats per line:                                        │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Rounding each displayed line and the grand total separately can       │
//! │  make the lines disagree with the total by a cent.                     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "$12.50" ──► 1250 cents ──► × qty ──► Σ lines == grand total        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cost Normalization
//! Every cost read goes through [`normalize_cost`]. Per-item display and the
//! aggregate total share it, and nothing caches its result.
//!
//! ```rust
//! use verdant_core::money::{parse_cost, Money};
//!
//! assert_eq!(parse_cost("$12.50").unwrap(), Money::from_cents(1250));
//! assert!(parse_cost("N/A").is_err());
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::trace;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::Cost;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: matches the accumulation type; costs themselves are
///   never negative (enforced by [`normalize_cost`])
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serializes as cents**: `1250`, never `12.5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use verdant_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies money by a quantity, `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use verdant_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3).unwrap();
    /// assert_eq!(line_total.cents(), 897); // $8.97
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Option<Self> {
        self.0.checked_mul(i64::from(qty)).map(Money)
    }

    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Formats the amount with a caller-chosen currency symbol.
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Cost Normalization
// =============================================================================

/// Normalizes a raw cost into cents.
///
/// Numeric costs are rendered to their decimal text first and then take the
/// same path as formatted strings, so there is exactly one parse rule.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cost::Text("$12.50") ─────────────┐                                   │
/// │                                    ├──► parse_cost() ──► Money(1250)    │
/// │  Cost::Number(12.5) ──► "12.5" ────┘                                   │
/// │                                                                         │
/// │  Callers: LineItem::unit_cost, LineItem::line_total, cart_totals       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn normalize_cost(cost: &Cost) -> CoreResult<Money> {
    match cost {
        Cost::Text(raw) => parse_cost(raw),
        Cost::Number(value) => {
            if !value.is_finite() {
                return Err(CoreError::malformed_cost(
                    value.to_string(),
                    "cost must be a finite number",
                ));
            }
            parse_cost(&value.to_string())
        }
    }
}

/// Parses a currency-formatted cost string into cents.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - A leading currency prefix (`$`, `US$`, `€`, ...) is stripped
/// - `,` grouping separators are dropped
/// - The rest must be a plain decimal number, otherwise `MalformedCost`
/// - Negative amounts are `MalformedCost`
/// - Sub-cent digits round to the nearest cent, midpoint away from zero
///
/// ## Example
/// ```rust
/// use verdant_core::money::{parse_cost, Money};
///
/// assert_eq!(parse_cost("US$1,299.99").unwrap(), Money::from_cents(129_999));
/// assert_eq!(parse_cost(" 7 ").unwrap(), Money::from_cents(700));
/// assert_eq!(parse_cost("$1.005").unwrap(), Money::from_cents(101));
/// assert!(parse_cost("$-5.00").is_err());
/// ```
pub fn parse_cost(raw: &str) -> CoreResult<Money> {
    trace!(raw, "parsing cost");

    let unprefixed = raw
        .trim()
        .trim_start_matches(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'));
    let numeric: String = unprefixed.chars().filter(|c| *c != ',').collect();

    if numeric.is_empty() {
        return Err(CoreError::malformed_cost(raw, "no numeric content"));
    }

    let amount = Decimal::from_str(&numeric)
        .map_err(|e| CoreError::malformed_cost(raw, e.to_string()))?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(CoreError::malformed_cost(raw, "cost must not be negative"));
    }

    let cents = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| CoreError::malformed_cost(raw, "cost is out of range"))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| CoreError::malformed_cost(raw, "cost is out of range"))?;

    Ok(Money::from_cents(cents))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(Money::from_cents(1250).format_with_symbol("€"), "€12.50");
    }

    #[test]
    fn test_sum_and_multiply() {
        let total: Money = [Money::from_cents(2000), Money::from_cents(3000)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 5000);
        assert_eq!(Money::from_cents(1000).multiply_quantity(3), Some(Money::from_cents(3000)));
        assert_eq!(Money::from_cents(i64::MAX).multiply_quantity(2), None);
        assert_eq!(
            Money::from_cents(2000).checked_add(Money::from_cents(3000)),
            Some(Money::from_cents(5000))
        );
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }

    #[test]
    fn test_parse_cost_plain_and_prefixed() {
        assert_eq!(parse_cost("$20.00").unwrap().cents(), 2000);
        assert_eq!(parse_cost("20").unwrap().cents(), 2000);
        assert_eq!(parse_cost("  $ 12.5 ").unwrap().cents(), 1250);
        assert_eq!(parse_cost("€9.99").unwrap().cents(), 999);
        assert_eq!(parse_cost("US$1,299.99").unwrap().cents(), 129_999);
        assert_eq!(parse_cost("$0").unwrap().cents(), 0);
    }

    #[test]
    fn test_parse_cost_rounds_to_cents() {
        assert_eq!(parse_cost("$1.005").unwrap().cents(), 101);
        assert_eq!(parse_cost("$1.004").unwrap().cents(), 100);
    }

    #[test]
    fn test_parse_cost_malformed() {
        for raw in ["N/A", "", "   ", "$", "12.5abc", "1.2.3", "free"] {
            let err = parse_cost(raw).unwrap_err();
            assert!(
                matches!(err, CoreError::MalformedCost { .. }),
                "expected MalformedCost for {raw:?}"
            );
        }
    }

    #[test]
    fn test_parse_cost_out_of_range() {
        assert_eq!(parse_cost("$92233720368547758.07").unwrap().cents(), i64::MAX);

        for raw in [
            "$92233720368547758.08",
            "$79228162514264337593543950335",
            "$1,000,000,000,000,000,000,000,000,000,000,000,000",
        ] {
            match parse_cost(raw).unwrap_err() {
                CoreError::MalformedCost { raw: reported, .. } => assert_eq!(reported, raw),
                other => panic!("unexpected error for {raw:?}: {other:?}"),
            }
        }

        let err = parse_cost("$79228162514264337593543950335").unwrap_err();
        assert!(matches!(err, CoreError::MalformedCost { ref reason, .. } if reason == "cost is out of range"));
    }

    #[test]
    fn test_parse_cost_rejects_negative() {
        let err = parse_cost("$-5.00").unwrap_err();
        match err {
            CoreError::MalformedCost { raw, reason } => {
                assert_eq!(raw, "$-5.00");
                assert_eq!(reason, "cost must not be negative");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_normalize_numeric_cost_uses_same_path() {
        assert_eq!(normalize_cost(&Cost::Number(12.5)).unwrap().cents(), 1250);
        assert_eq!(normalize_cost(&Cost::Number(20.0)).unwrap().cents(), 2000);
        assert_eq!(
            normalize_cost(&Cost::Number(12.5)).unwrap(),
            normalize_cost(&Cost::Text("$12.50".to_string())).unwrap()
        );
        assert!(normalize_cost(&Cost::Number(-1.0)).is_err());
        assert!(normalize_cost(&Cost::Number(f64::NAN)).is_err());
        assert!(normalize_cost(&Cost::Number(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_normalize_huge_numeric_cost_is_malformed() {
        for value in [1e300, f64::MAX, 1e20] {
            let err = normalize_cost(&Cost::Number(value)).unwrap_err();
            assert!(
                matches!(err, CoreError::MalformedCost { .. }),
                "expected MalformedCost for {value}"
            );
        }
    }
}
