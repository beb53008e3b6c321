//! Expense summary report
//!
//! Overall statistics, the current month, the category breakdown and the
//! monthly series, formatted for the terminal. No computation happens at
//! format time; everything is captured by [`SummaryReport::generate`].

use crate::display::report::{double_separator, format_bar, format_percentage, section};
use crate::models::{Money, MonthKey, Transaction};
use crate::services::{CategoryTotals, MonthSlice, MonthlyTotals, SliceStatus};

/// Width of the monthly trend bars
const BAR_WIDTH: usize = 20;

/// One category line of the breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLine {
    pub category: String,
    pub total: Money,
    pub percentage: f64,
}

/// Expense Summary Report
#[derive(Debug, Clone)]
pub struct SummaryReport {
    /// Sum of all amounts
    pub total_spent: Money,
    /// Mean of the monthly totals; `None` without data
    pub average_monthly: Option<f64>,
    /// Number of transactions loaded
    pub transaction_count: usize,
    /// Reference month of the current-month section
    pub current_month: MonthKey,
    /// What the current-month slice found
    pub current_status: SliceStatus,
    /// Total of the current month
    pub current_month_total: Money,
    /// Categories, largest total first
    pub categories: Vec<CategoryLine>,
    /// Monthly totals, earliest first
    pub months: Vec<(MonthKey, Money)>,
}

impl SummaryReport {
    /// Capture everything the summary prints
    pub fn generate(
        transactions: &[Transaction],
        categories: &CategoryTotals,
        monthly: &MonthlyTotals,
        current: &MonthSlice<'_>,
    ) -> Self {
        Self {
            total_spent: transactions.iter().map(|t| t.amount).sum(),
            average_monthly: monthly.average(),
            transaction_count: transactions.len(),
            current_month: current.month,
            current_status: current.status(),
            current_month_total: current.total(),
            categories: categories
                .with_percentages()
                .into_iter()
                .map(|(entry, percentage)| CategoryLine {
                    category: entry.category.clone(),
                    total: entry.total,
                    percentage,
                })
                .collect(),
            months: monthly.iter().collect(),
        }
    }

    /// The category with the largest total
    pub fn biggest_category(&self) -> Option<&CategoryLine> {
        self.categories.first()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency);
        let mut output = String::new();

        output.push_str(&double_separator(50));
        output.push('\n');
        output.push_str("BUDGET & EXPENSE ANALYSIS SUMMARY\n");
        output.push_str(&double_separator(50));
        output.push('\n');

        if self.transaction_count == 0 {
            output.push_str("\nNo transactions to analyze.\n");
            return output;
        }

        // Overall statistics
        output.push_str(&section("Overall statistics"));
        output.push_str(&format!("Total spent: {}\n", money(self.total_spent)));
        if let Some(avg) = self.average_monthly {
            output.push_str(&format!(
                "Average monthly spend: {}\n",
                money(Money::from_f64(avg))
            ));
        }
        output.push_str(&format!(
            "Number of transactions: {}\n",
            self.transaction_count
        ));

        // Current month
        output.push_str(&section(&format!("Current month ({})", self.current_month)));
        match self.current_status {
            SliceStatus::Found(count) => {
                output.push_str(&format!(
                    "Total spent this month: {}\n",
                    money(self.current_month_total)
                ));
                output.push_str(&format!("Transactions this month: {}\n", count));
            }
            SliceStatus::NoneInMonth | SliceStatus::NoData => {
                output.push_str("No data for current month\n");
            }
        }

        // Category breakdown
        output.push_str(&section("Spending by category"));
        for line in &self.categories {
            output.push_str(&format!(
                "  {}: {} ({})\n",
                line.category,
                money(line.total),
                format_percentage(line.percentage)
            ));
        }

        if let Some(biggest) = self.biggest_category() {
            output.push_str(&section("Biggest spending category"));
            output.push_str(&format!(
                "  {}: {}\n",
                biggest.category,
                money(biggest.total)
            ));
        }

        // Monthly trend
        output.push_str(&section("Monthly spending trend"));
        let max = self
            .months
            .iter()
            .map(|(_, total)| total.as_f64())
            .fold(0.0_f64, f64::max);
        for (month, total) in &self.months {
            output.push_str(&format!(
                "  {}: {:>12}  {}\n",
                month,
                money(*total),
                format_bar(total.as_f64(), max, BAR_WIDTH)
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{current_month_slice, totals_by_category, totals_by_month};
    use chrono::NaiveDate;

    fn txn(date: &str, category: &str, cents: i64) -> Transaction {
        Transaction::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            category,
            Money::from_cents(cents),
        )
    }

    fn report(txns: &[Transaction], month: MonthKey) -> SummaryReport {
        SummaryReport::generate(
            txns,
            &totals_by_category(txns),
            &totals_by_month(txns),
            &current_month_slice(txns, month),
        )
    }

    #[test]
    fn test_generate_summary() {
        let txns = vec![
            txn("2024-01-05", "Groceries", 6000),
            txn("2024-02-05", "Transport", 4000),
        ];
        let summary = report(&txns, MonthKey::new(2024, 2).unwrap());

        assert_eq!(summary.total_spent, Money::from_cents(10000));
        assert_eq!(summary.average_monthly, Some(50.0));
        assert_eq!(summary.transaction_count, 2);
        assert_eq!(summary.current_status, SliceStatus::Found(1));
        assert_eq!(summary.current_month_total, Money::from_cents(4000));
        assert_eq!(summary.biggest_category().unwrap().category, "Groceries");
        assert!((summary.categories[0].percentage - 60.0).abs() < 1e-9);
        assert!((summary.categories[1].percentage - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_format_terminal() {
        let txns = vec![
            txn("2024-01-05", "Groceries", 6000),
            txn("2024-02-05", "Transport", 4000),
        ];
        let text = report(&txns, MonthKey::new(2024, 2).unwrap()).format_terminal("£");

        assert!(text.contains("BUDGET & EXPENSE ANALYSIS SUMMARY"));
        assert!(text.contains("Total spent: £100.00"));
        assert!(text.contains("Average monthly spend: £50.00"));
        assert!(text.contains("Number of transactions: 2"));
        assert!(text.contains("CURRENT MONTH (2024-02):"));
        assert!(text.contains("Total spent this month: £40.00"));
        assert!(text.contains("  Groceries: £60.00 (60.0%)"));
        assert!(text.contains("  Transport: £40.00 (40.0%)"));
        assert!(text.contains("BIGGEST SPENDING CATEGORY:\n  Groceries: £60.00"));
        assert!(text.contains("  2024-01:"));
    }

    #[test]
    fn test_empty_current_month() {
        let txns = vec![txn("2024-01-05", "Groceries", 6000)];
        let text = report(&txns, MonthKey::new(2025, 7).unwrap()).format_terminal("£");

        assert!(text.contains("CURRENT MONTH (2025-07):\nNo data for current month"));
    }

    #[test]
    fn test_single_category_is_full_share() {
        let txns = vec![
            txn("2024-01-05", "Rent", 50000),
            txn("2024-02-05", "Rent", 50000),
        ];
        let text = report(&txns, MonthKey::new(2024, 2).unwrap()).format_terminal("£");
        assert!(text.contains("  Rent: £1000.00 (100.0%)"));
    }

    #[test]
    fn test_no_transactions() {
        let text = report(&[], MonthKey::new(2024, 2).unwrap()).format_terminal("£");
        assert!(text.contains("No transactions to analyze."));
        assert!(!text.contains("BIGGEST SPENDING CATEGORY"));
    }
}
