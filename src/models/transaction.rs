//! Transaction model
//!
//! A single dated, categorized expense row as loaded from the input file.

use chrono::NaiveDate;

use super::{Money, MonthKey};

/// A dated, categorized amount. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction date
    pub date: NaiveDate,

    /// User-assigned spend label
    pub category: String,

    /// Amount (may be negative, e.g. refunds)
    pub amount: Money,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(date: NaiveDate, category: impl Into<String>, amount: Money) -> Self {
        Self {
            date,
            category: category.into(),
            amount,
        }
    }

    /// The reporting month this transaction belongs to
    pub fn month(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_is_derived_from_date() {
        let txn = Transaction::new(
            NaiveDate::from_ymd_opt(2024, 11, 30).unwrap(),
            "Groceries",
            Money::from_cents(4520),
        );
        assert_eq!(txn.month().to_string(), "2024-11");
        assert_eq!(txn.category, "Groceries");
    }
}
