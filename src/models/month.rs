//! Calendar month reporting bucket
//!
//! A `MonthKey` is the (year, month) pair every transaction is grouped under.
//! Ordering is calendar order; the canonical text form is `YYYY-MM`.

use chrono::{Datelike, NaiveDate};
use std::fmt;

/// A calendar year and month, e.g. "2024-03"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    // Field order matters: the derived Ord compares year first
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a month key, validating the month number
    pub fn new(year: i32, month: u32) -> Result<Self, MonthParseError> {
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The month a date falls in
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The following month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Parse a month string of the form "YYYY-MM"
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();
        let (year_str, month_str) = s
            .split_once('-')
            .ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year_str
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month_str
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for MonthKey {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthParseError::InvalidFormat(s) => {
                write!(f, "Invalid month '{}', expected YYYY-MM", s)
            }
            MonthParseError::InvalidMonth(m) => write!(f, "Month out of range: {}", m),
        }
    }
}

impl std::error::Error for MonthParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_date_and_display() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        let key = MonthKey::from_date(date);
        assert_eq!(key.to_string(), "2024-03");
        assert_eq!(key, MonthKey::new(2024, 3).unwrap());
    }

    #[test]
    fn test_ordering_is_calendar_order() {
        let dec = MonthKey::new(2023, 12).unwrap();
        let jan = MonthKey::new(2024, 1).unwrap();
        let feb = MonthKey::new(2024, 2).unwrap();
        assert!(dec < jan);
        assert!(jan < feb);
    }

    #[test]
    fn test_next_wraps_year() {
        let dec = MonthKey::new(2024, 12).unwrap();
        assert_eq!(dec.next(), MonthKey::new(2025, 1).unwrap());
        assert_eq!(
            MonthKey::new(2024, 5).unwrap().next(),
            MonthKey::new(2024, 6).unwrap()
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            MonthKey::parse("2025-01").unwrap(),
            MonthKey::new(2025, 1).unwrap()
        );
        assert_eq!(
            "2025-11".parse::<MonthKey>().unwrap().to_string(),
            "2025-11"
        );
        assert!(MonthKey::parse("2025-13").is_err());
        assert!(MonthKey::parse("2025").is_err());
        assert!(MonthKey::parse("Jan 2025").is_err());
    }
}
