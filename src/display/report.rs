//! Report formatting utilities for terminal output

use crate::models::Money;

/// Format a floating point amount as currency, rounded to the minor unit
pub fn format_amount(value: f64, symbol: &str) -> String {
    Money::from_f64(value).format_with_symbol(symbol)
}

/// Format a percentage with one decimal place
pub fn format_percentage(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a section heading
pub fn section(title: &str) -> String {
    format!("\n{}:\n", title.to_uppercase())
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "=".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1234.5, "£"), "£1234.50");
        assert_eq!(format_amount(-0.126, "$"), "-$0.13");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(60.0), "60.0%");
        assert_eq!(format_percentage(33.333), "33.3%");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(5.0, 10.0, 4), "██░░");
        assert_eq!(format_bar(10.0, 10.0, 4), "████");
        assert_eq!(format_bar(-1.0, 10.0, 3), "   ");
        assert_eq!(format_bar(1.0, 0.0, 2), "  ");
    }

    #[test]
    fn test_section() {
        assert_eq!(section("Overall statistics"), "\nOVERALL STATISTICS:\n");
    }
}
