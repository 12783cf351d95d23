//! Lossless money type backed by rust_decimal.
//!
//! Costs are stored as canonical decimal strings and shown with two decimals.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

/// A non-float monetary amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub fn new(value: Decimal) -> Self {
        Money(value)
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Parse user input, rounding to cents.
    ///
    /// # Errors
    /// Returns an error if the string is not a decimal number.
    pub fn parse_cents(s: &str) -> Result<Self, rust_decimal::Error> {
        let value = Decimal::from_str(s.trim())?;
        Ok(Money(
            value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        ))
    }

    /// Canonical storage form (trailing zeros removed, no exponent).
    pub fn to_canonical_string(&self) -> String {
        format!("{}", self.0.normalize())
    }

    /// Two-decimal display form, e.g. `39.90`.
    pub fn to_display_string(&self) -> String {
        format!("{:.2}", self.0)
    }

    pub fn is_negative(&self) -> bool {
        !self.0.is_zero() && self.0.is_sign_negative()
    }

    pub fn inner(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s).map(Money)
    }
}

impl Money {
    /// Add two amounts, returning `None` on overflow.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Total of all amounts, or `None` if the running sum overflows.
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cents_keeps_exact_value() {
        let m = Money::parse_cents("39.99").unwrap();
        assert_eq!(m.to_canonical_string(), "39.99");
        assert_eq!(m.to_display_string(), "39.99");
    }

    #[test]
    fn test_parse_cents_rounds_midpoint_away_from_zero() {
        assert_eq!(Money::parse_cents("10.005").unwrap().to_display_string(), "10.01");
        assert_eq!(Money::parse_cents("10.004").unwrap().to_display_string(), "10.00");
    }

    #[test]
    fn test_parse_cents_trims_whitespace() {
        assert_eq!(Money::parse_cents("  12.5 ").unwrap().to_display_string(), "12.50");
    }

    #[test]
    fn test_parse_cents_rejects_garbage() {
        assert!(Money::parse_cents("twelve").is_err());
        assert!(Money::parse_cents("").is_err());
    }

    #[test]
    fn test_canonical_drops_trailing_zeros() {
        let m = Money::parse_cents("120.00").unwrap();
        assert_eq!(m.to_canonical_string(), "120");
        assert_eq!(m.to_display_string(), "120.00");
    }

    #[test]
    fn test_sum_has_no_float_drift() {
        let amounts = ["0.1", "0.2"].iter().map(|s| Money::parse_cents(s).unwrap());
        let total = Money::checked_sum(amounts).unwrap();
        assert_eq!(total.to_canonical_string(), "0.3");
    }

    #[test]
    fn test_checked_sum_reports_overflow() {
        let max = Money::new(Decimal::MAX);
        assert_eq!(Money::checked_sum([max]), Some(max));
        assert_eq!(Money::checked_sum([max, max]), None);
        assert_eq!(Money::checked_sum(Vec::new()), Some(Money::zero()));
    }

    #[test]
    fn test_from_cents() {
        assert_eq!(Money::from_cents(3999), Money::parse_cents("39.99").unwrap());
    }

    #[test]
    fn test_is_negative() {
        assert!(Money::parse_cents("-1").unwrap().is_negative());
        assert!(!Money::parse_cents("0").unwrap().is_negative());
        assert!(!Money::parse_cents("-0").unwrap().is_negative());
    }
}
