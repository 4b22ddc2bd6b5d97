//! Money type for representing currency amounts
//!
//! Wraps a `rust_decimal::Decimal` so amounts keep exactly the precision they
//! were entered with. Rounding to cents only happens when formatting.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// A currency-agnostic monetary amount at full decimal precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Largest magnitude accepted for a single amount (10^15)
    ///
    /// Keeps every total the reports can build far inside `Decimal`'s range.
    pub const LIMIT: Money = Money(Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0));

    /// Create a Money amount from a decimal value
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create a Money amount from whole currency units
    ///
    /// # Examples
    /// ```
    /// use tally::models::Money;
    /// let rent = Money::from_units(1500);
    /// assert_eq!(rent.to_string(), "$1,500.00");
    /// ```
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying decimal value
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Check if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Whether the magnitude is above [`Money::LIMIT`]
    pub fn exceeds_limit(&self) -> bool {
        self.0.abs() > Self::LIMIT.0
    }

    /// Round to two decimal places (half away from zero)
    ///
    /// Only used at presentation boundaries; stored amounts are never rounded.
    pub fn round_cents(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Rounded value as f64, for chart series
    pub fn to_f64(&self) -> f64 {
        self.round_cents().0.to_f64().unwrap_or(0.0)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "1,250.75", "10"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };

        let rest = rest.strip_prefix('$').unwrap_or(rest);
        if rest.starts_with(['-', '+']) {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }
        let digits: String = rest.chars().filter(|c| *c != ',').collect();

        if digits.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let value = Decimal::from_str(&digits)
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

        Ok(Self(if negative { -value } else { value }))
    }

    /// Format with a currency symbol, two decimals and thousands separators
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let rounded = self.round_cents().0;
        let plain = format!("{:.2}", rounded.abs());
        let (whole, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        format!("{}{}{}.{}", sign, symbol, group_thousands(whole), cents)
    }
}

/// Insert a comma every three digits from the right
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
