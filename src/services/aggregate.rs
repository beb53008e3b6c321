//! Grouped totals
//!
//! Category and monthly aggregates plus the current-month slice. Both
//! aggregates partition the same set of transactions, so their sums always
//! equal the sum of all amounts.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::models::{Money, MonthKey, Transaction};

/// Total spend for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    /// Category name
    pub category: String,
    /// Sum of amounts in this category
    pub total: Money,
    /// Number of transactions
    pub transaction_count: usize,
}

/// Category totals ordered by total, largest first
///
/// Equal totals keep the order in which their categories first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryTotals {
    entries: Vec<CategoryTotal>,
}

impl CategoryTotals {
    pub fn iter(&self) -> std::slice::Iter<'_, CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the total for a category
    pub fn get(&self, category: &str) -> Option<Money> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.total)
    }

    /// Sum over all categories
    pub fn total(&self) -> Money {
        self.entries.iter().map(|e| e.total).sum()
    }

    /// Share of the overall total, in percent
    ///
    /// Returns 0.0 when the overall total is zero.
    pub fn percentage(&self, entry: &CategoryTotal) -> f64 {
        let total = self.total();
        if total.is_zero() {
            0.0
        } else {
            entry.total.as_f64() / total.as_f64() * 100.0
        }
    }

    /// Every category paired with its percentage of the total
    pub fn with_percentages(&self) -> Vec<(&CategoryTotal, f64)> {
        self.entries
            .iter()
            .map(|e| (e, self.percentage(e)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a CategoryTotals {
    type Item = &'a CategoryTotal;
    type IntoIter = std::slice::Iter<'a, CategoryTotal>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Monthly totals in calendar order
///
/// Only months that have transactions are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyTotals {
    entries: BTreeMap<MonthKey, Money>,
}

impl MonthlyTotals {
    /// Months and totals, earliest first
    pub fn iter(&self) -> impl Iterator<Item = (MonthKey, Money)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, month: MonthKey) -> Option<Money> {
        self.entries.get(&month).copied()
    }

    /// Totals as floating point values, earliest first
    pub fn amounts(&self) -> Vec<f64> {
        self.entries.values().map(Money::as_f64).collect()
    }

    /// Sum over all months
    pub fn total(&self) -> Money {
        self.entries.values().sum()
    }

    /// Mean of the monthly totals, or `None` with no months
    pub fn average(&self) -> Option<f64> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.total().as_f64() / self.entries.len() as f64)
        }
    }

    /// The most recent month with data
    pub fn last_month(&self) -> Option<MonthKey> {
        self.entries.keys().next_back().copied()
    }
}

impl Serialize for MonthlyTotals {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (month, total) in &self.entries {
            map.serialize_entry(&month.to_string(), total)?;
        }
        map.end()
    }
}

/// Transactions falling in the reference month
#[derive(Debug, Clone)]
pub struct MonthSlice<'a> {
    /// The reference month used for filtering
    pub month: MonthKey,
    /// Matching transactions, in input order
    pub transactions: Vec<&'a Transaction>,
    /// Size of the set the slice was taken from
    pub source_count: usize,
}

/// What a month slice found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceStatus {
    /// The source set itself was empty
    NoData,
    /// There is data, but none of it is in the reference month
    NoneInMonth,
    /// This many transactions are in the reference month
    Found(usize),
}

impl MonthSlice<'_> {
    pub fn status(&self) -> SliceStatus {
        if self.source_count == 0 {
            SliceStatus::NoData
        } else if self.transactions.is_empty() {
            SliceStatus::NoneInMonth
        } else {
            SliceStatus::Found(self.transactions.len())
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Sum of the slice
    pub fn total(&self) -> Money {
        self.transactions.iter().map(|t| t.amount).sum()
    }
}

/// Sum amounts grouped by category, largest total first
pub fn totals_by_category(transactions: &[Transaction]) -> CategoryTotals {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<CategoryTotal> = Vec::new();

    for txn in transactions {
        let slot = *index.entry(txn.category.as_str()).or_insert_with(|| {
            entries.push(CategoryTotal {
                category: txn.category.clone(),
                total: Money::zero(),
                transaction_count: 0,
            });
            entries.len() - 1
        });
        entries[slot].total += txn.amount;
        entries[slot].transaction_count += 1;
    }

    // Stable sort keeps first-encounter order among equal totals
    entries.sort_by(|a, b| b.total.cmp(&a.total));

    debug!(categories = entries.len(), "aggregated by category");
    CategoryTotals { entries }
}

/// Sum amounts grouped by calendar month, earliest first
pub fn totals_by_month(transactions: &[Transaction]) -> MonthlyTotals {
    let mut entries: BTreeMap<MonthKey, Money> = BTreeMap::new();
    for txn in transactions {
        *entries.entry(txn.month()).or_default() += txn.amount;
    }

    debug!(months = entries.len(), "aggregated by month");
    MonthlyTotals { entries }
}

/// Transactions in `reference_month`
pub fn current_month_slice(
    transactions: &[Transaction],
    reference_month: MonthKey,
) -> MonthSlice<'_> {
    MonthSlice {
        month: reference_month,
        transactions: transactions
            .iter()
            .filter(|t| t.month() == reference_month)
            .collect(),
        source_count: transactions.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(date: &str, category: &str, cents: i64) -> Transaction {
        Transaction::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            category,
            Money::from_cents(cents),
        )
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("2024-01-03", "Groceries", 4500),
            txn("2024-01-15", "Transport", 1200),
            txn("2024-02-01", "Rent", 90000),
            txn("2024-02-11", "Groceries", 5200),
            txn("2023-12-24", "Gifts", 3000),
            txn("2024-03-02", "Transport", -200),
        ]
    }

    #[test]
    fn test_partition_invariant() {
        let txns = sample();
        let raw: Money = txns.iter().map(|t| t.amount).sum();

        assert_eq!(totals_by_category(&txns).total(), raw);
        assert_eq!(totals_by_month(&txns).total(), raw);
    }

    #[test]
    fn test_category_totals_descending() {
        let totals = totals_by_category(&sample());
        let values: Vec<Money> = totals.iter().map(|e| e.total).collect();

        assert!(values.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(totals.iter().next().unwrap().category, "Rent");
        assert_eq!(totals.get("Groceries"), Some(Money::from_cents(9700)));
        assert_eq!(totals.get("Transport"), Some(Money::from_cents(1000)));
    }

    #[test]
    fn test_sub_cent_amounts_sum_exactly() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let third = Money::parse("0.333").unwrap();
        let txns = vec![
            Transaction::new(date, "A", third),
            Transaction::new(date, "A", third),
            Transaction::new(date, "A", third),
        ];

        let total = totals_by_category(&txns).total();
        assert_eq!(total, Money::parse("0.999").unwrap());
        assert_eq!(total.format_with_symbol("£"), "£1.00");
        assert_eq!(totals_by_month(&txns).total(), total);
    }

    #[test]
    fn test_category_ties_keep_encounter_order() {
        let txns = vec![
            txn("2024-01-01", "Zeta", 500),
            txn("2024-01-02", "Alpha", 500),
            txn("2024-01-03", "Mid", 500),
        ];
        let names: Vec<String> = totals_by_category(&txns)
            .iter()
            .map(|e| e.category.clone())
            .collect();
        assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_monthly_totals_ascending_and_sparse() {
        let totals = totals_by_month(&sample());
        let months: Vec<MonthKey> = totals.iter().map(|(month, _)| month).collect();

        assert!(months.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(months.first().unwrap().to_string(), "2023-12");
        assert_eq!(totals.len(), 4);
        assert_eq!(
            totals.get(MonthKey::new(2024, 2).unwrap()),
            Some(Money::from_cents(95200))
        );

        let gap = totals_by_month(&[txn("2024-01-01", "A", 1), txn("2024-04-01", "A", 1)]);
        assert_eq!(gap.len(), 2);
        assert_eq!(gap.get(MonthKey::new(2024, 2).unwrap()), None);
    }

    #[test]
    fn test_monthly_average() {
        let totals = totals_by_month(&[
            txn("2024-01-01", "A", 1000),
            txn("2024-02-01", "A", 3000),
        ]);
        assert_eq!(totals.average(), Some(20.0));
        assert_eq!(MonthlyTotals::default().average(), None);
    }

    #[test]
    fn test_percentages() {
        let totals = totals_by_category(&[
            txn("2024-01-01", "A", 6000),
            txn("2024-01-02", "B", 4000),
        ]);
        let pcts = totals.with_percentages();

        assert_eq!(pcts[0].0.category, "A");
        assert!((pcts[0].1 - 60.0).abs() < 1e-9);
        assert!((pcts[1].1 - 40.0).abs() < 1e-9);
        assert!((pcts.iter().map(|(_, p)| p).sum::<f64>() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_category_is_whole() {
        let totals = totals_by_category(&[txn("2024-01-01", "Only", 1234)]);
        let only = totals.iter().next().unwrap();
        assert!((totals.percentage(only) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_current_month_slice() {
        let txns = sample();
        let slice = current_month_slice(&txns, MonthKey::new(2024, 1).unwrap());

        assert_eq!(slice.month.to_string(), "2024-01");
        assert_eq!(slice.status(), SliceStatus::Found(2));
        assert_eq!(slice.total(), Money::from_cents(5700));
    }

    #[test]
    fn test_slice_distinguishes_no_data_from_filtered_out() {
        let month = MonthKey::new(2030, 6).unwrap();

        let empty = current_month_slice(&[], month);
        assert!(empty.is_empty());
        assert_eq!(empty.status(), SliceStatus::NoData);
        assert_eq!(empty.month, month);

        let txns = sample();
        let filtered = current_month_slice(&txns, month);
        assert!(filtered.is_empty());
        assert_eq!(filtered.status(), SliceStatus::NoneInMonth);
        assert_eq!(filtered.total(), Money::zero());
    }

    #[test]
    fn test_serialize_monthly_totals() {
        let totals = totals_by_month(&[txn("2024-01-01", "A", 1050)]);
        assert_eq!(
            serde_json::to_string(&totals).unwrap(),
            r#"{"2024-01":10.5}"#
        );
    }
}
