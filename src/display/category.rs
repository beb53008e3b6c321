//! Category breakdown display formatting
//!
//! Renders category totals as a bordered table for the `summary --table` view.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::services::CategoryTotals;

use super::report::format_percentage;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
}

/// Format category totals as a table, largest first
pub fn format_category_table(totals: &CategoryTotals, currency: &str) -> String {
    if totals.is_empty() {
        return "No categories found.".to_string();
    }

    let rows: Vec<CategoryRow> = totals
        .with_percentages()
        .into_iter()
        .map(|(entry, pct)| CategoryRow {
            category: entry.category.clone(),
            amount: entry.total.format_with_symbol(currency),
            count: entry.transaction_count,
            share: format_percentage(pct),
        })
        .collect();

    Table::new(rows)
        .with(Style::modern())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Transaction};
    use crate::services::totals_by_category;
    use chrono::NaiveDate;

    #[test]
    fn test_table_contains_rows() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let totals = totals_by_category(&[
            Transaction::new(date, "Rent", Money::from_cents(6000)),
            Transaction::new(date, "Food", Money::from_cents(4000)),
        ]);

        let table = format_category_table(&totals, "£");
        assert!(table.contains("Category"));
        assert!(table.contains("Rent"));
        assert!(table.contains("£60.00"));
        assert!(table.contains("40.0%"));
        assert!(table.find("Rent").unwrap() < table.find("Food").unwrap());
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(
            format_category_table(&CategoryTotals::default(), "£"),
            "No categories found."
        );
    }
}
