//! Exact currency amounts.
//!
//! # Invariants
//! - Amounts are held as whole cents and are never negative.
//! - Sums are exact; no floating-point accumulation is involved.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

static AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)(?:\.(\d{1,2}))?$").expect("valid amount regex"));

/// Message reported for negative or unparsable amounts.
pub const INVALID_AMOUNT_MESSAGE: &str = "Amount must be a non-negative number";

/// Non-negative currency amount in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Amount(i64);

impl Amount {
    /// Zero amount.
    pub const ZERO: Amount = Amount(0);

    /// Builds an amount from cents, rejecting negative values.
    pub fn from_cents(cents: i64) -> Option<Self> {
        (cents >= 0).then_some(Self(cents))
    }

    /// Builds an amount from whole currency units.
    pub fn from_units(units: u32) -> Self {
        Self(i64::from(units) * 100)
    }

    /// Returns the amount in cents.
    pub fn cents(self) -> i64 {
        self.0
    }
}

impl Add for Amount {
    type Output = Amount;

    // Saturates at i64::MAX cents.
    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl TryFrom<i64> for Amount {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_cents(value).ok_or_else(|| format!("amount cents must be >= 0, got {value}"))
    }
}

impl From<Amount> for i64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

impl FromStr for Amount {
    type Err = String;

    /// Parses `"12"`, `"12.5"` or `"12.50"`. Signs and more than two
    /// fractional digits are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let caps = AMOUNT_RE
            .captures(trimmed)
            .ok_or_else(|| INVALID_AMOUNT_MESSAGE.to_string())?;

        let units: i64 = caps[1]
            .parse()
            .map_err(|_| INVALID_AMOUNT_MESSAGE.to_string())?;
        let cents = match caps.get(2).map(|m| m.as_str()) {
            Some(frac) if frac.len() == 1 => frac.parse::<i64>().unwrap_or(0) * 10,
            Some(frac) => frac.parse::<i64>().unwrap_or(0),
            None => 0,
        };

        units
            .checked_mul(100)
            .and_then(|value| value.checked_add(cents))
            .map(Amount)
            .ok_or_else(|| INVALID_AMOUNT_MESSAGE.to_string())
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::Amount;

    #[test]
    fn parses_whole_and_fractional_units() {
        assert_eq!("12".parse::<Amount>().unwrap().cents(), 1200);
        assert_eq!("12.5".parse::<Amount>().unwrap().cents(), 1250);
        assert_eq!(" 0.07 ".parse::<Amount>().unwrap().cents(), 7);
    }

    #[test]
    fn rejects_negative_and_over_precise_input() {
        assert!("-1".parse::<Amount>().is_err());
        assert!("1.234".parse::<Amount>().is_err());
        assert!("abc".parse::<Amount>().is_err());
        assert!(Amount::from_cents(-5).is_none());
    }

    #[test]
    fn display_pads_cents() {
        assert_eq!(Amount::from_cents(100_005).unwrap().to_string(), "1000.05");
        assert_eq!(Amount::ZERO.to_string(), "0.00");
    }

    #[test]
    fn deserialize_rejects_negative_cents() {
        assert!(serde_json::from_str::<Amount>("-10").is_err());
        assert_eq!(serde_json::from_str::<Amount>("250").unwrap().cents(), 250);
    }

    #[test]
    fn sum_is_exact() {
        let values = [
            Amount::from_cents(10).unwrap(),
            Amount::from_cents(20).unwrap(),
        ];
        assert_eq!(values.iter().sum::<Amount>().cents(), 30);
    }
}
