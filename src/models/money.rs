//! Money type for representing currency amounts
//!
//! Amounts keep every decimal place they were written with, so grouped sums
//! are exact. Rounding to the minor unit happens only when formatting, and
//! floating point only appears at the forecasting boundary.

use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};

/// Currency symbols accepted (and stripped) when parsing amounts
const KNOWN_SYMBOLS: [char; 3] = ['£', '$', '€'];

/// Largest accepted magnitude of a single amount, in whole units
///
/// Keeps any realistic number of rows far below `Decimal::MAX` when summed.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000_000;

/// A signed decimal monetary amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use budget_insight::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Create a Money amount from a floating point value
    ///
    /// Non-finite values become zero.
    pub fn from_f64(value: f64) -> Self {
        Self(Decimal::from_f64(value).unwrap_or_default())
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// The amount as a floating point number of whole units
    pub fn as_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "£10.50", "-£1,200.5", "0.333".
    /// Every decimal place is kept.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let raw = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(raw.to_string());

        // Sign may sit either side of the currency symbol
        let (mut negative, s) = match raw.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, raw.strip_prefix('+').unwrap_or(raw)),
        };
        let s = s.trim_start_matches(KNOWN_SYMBOLS).trim();
        let s = match s.strip_prefix('-') {
            Some(stripped) if !negative => {
                negative = true;
                stripped
            }
            _ => s,
        };

        let s: String = s.chars().filter(|c| *c != ',').collect();
        let (whole, frac) = s.split_once('.').unwrap_or((s.as_str(), ""));

        if !whole.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
            || (whole.is_empty() && frac.is_empty())
        {
            return Err(invalid());
        }

        let whole = if whole.is_empty() { "0" } else { whole };
        let text = if frac.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, frac)
        };
        let value = Decimal::from_str(&text).map_err(|_| invalid())?;

        if value > Decimal::from(MAX_AMOUNT_UNITS) {
            return Err(MoneyParseError::OutOfRange(raw.to_string()));
        }

        Ok(Self(if negative { -value } else { value }))
    }

    /// Round to the minor unit, halves away from zero
    fn rounded(&self) -> Decimal {
        let value = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        // No "-0.00"
        if value.is_zero() {
            Decimal::ZERO
        } else {
            value
        }
    }

    /// Format with a currency symbol, rounded to the minor unit
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let value = self.rounded();
        if value < Decimal::ZERO {
            format!("-{}{:.2}", symbol, value.abs())
        } else {
            format!("{}{:.2}", symbol, value)
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}

/// Serialized as a JSON number for the dashboard script
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
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

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid amount: '{}'", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: '{}'", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
