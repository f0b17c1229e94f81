//! Report formatting utilities for terminal output

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::Money;
use crate::reports::{CategoryBreakdown, LedgerSummary};

#[derive(Tabled)]
struct ShareRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Entries")]
    entries: usize,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
}

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
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

/// Format a category breakdown as a table with a total line
pub fn format_breakdown(breakdown: &CategoryBreakdown, currency_symbol: &str) -> String {
    let mut output = format!("{} by category\n", breakdown.kind);

    if breakdown.is_empty() {
        output.push_str("  (none)\n");
        return output;
    }

    let rows = breakdown.categories.iter().map(|c| ShareRow {
        category: c.category.clone(),
        entries: c.entry_count,
        total: c.total.format_with_symbol(currency_symbol),
        share: format_percentage(c.share),
        bar: format_bar(c.share, 100.0, 20),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..4)).with(Alignment::right()));

    output.push_str(&table.to_string());
    output.push('\n');
    output.push_str(&format!(
        "Total: {}\n",
        breakdown.total.format_with_symbol(currency_symbol)
    ));
    output
}

/// Format the balance line
pub fn format_balance(balance: Money, currency_symbol: &str) -> String {
    format!("Balance: {}", balance.format_with_symbol(currency_symbol))
}

/// Format the full summary: both breakdowns followed by the totals
pub fn format_summary(summary: &LedgerSummary, currency_symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format_breakdown(&summary.income, currency_symbol));
    output.push('\n');
    output.push_str(&format_breakdown(&summary.expense, currency_symbol));
    output.push('\n');
    output.push_str(&format!(
        "Income:  {}\n",
        summary.total_income.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format!(
        "Expense: {}\n",
        summary.total_expense.format_with_symbol(currency_symbol)
    ));
    output.push_str(&format_balance(summary.balance, currency_symbol));
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, EntryKind};
    use chrono::Utc;

    fn entries() -> Vec<Entry> {
        let now = Utc::now();
        vec![
            Entry::new(EntryKind::Expense, "食費", Money::from_major(50_000), now).unwrap(),
            Entry::new(EntryKind::Expense, "食費", Money::from_major(20_000), now).unwrap(),
            Entry::new(EntryKind::Income, "給料", Money::from_major(300_000), now).unwrap(),
        ]
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.05), "0.05%");
        assert_eq!(format_percentage(5.4), "5.4%");
        assert_eq!(format_percentage(75.0), "75%");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(50.0, 100.0, 10), "█████░░░░░");
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }

    #[test]
    fn test_format_breakdown() {
        let breakdown = CategoryBreakdown::from_entries(&entries(), EntryKind::Expense);
        let output = format_breakdown(&breakdown, "");
        assert!(output.starts_with("Expense by category"));
        assert!(output.contains("食費"));
        assert!(output.contains("100%"));
        assert!(output.contains("Total: 70,000"));
    }

    #[test]
    fn test_format_empty_breakdown() {
        let none: Vec<Entry> = Vec::new();
        let breakdown = CategoryBreakdown::from_entries(&none, EntryKind::Income);
        assert_eq!(format_breakdown(&breakdown, ""), "Income by category\n  (none)\n");
    }

    #[test]
    fn test_format_summary() {
        let summary = LedgerSummary::from_entries(&entries());
        let output = format_summary(&summary, "¥");
        assert!(output.contains("Income:  ¥300,000"));
        assert!(output.contains("Expense: ¥70,000"));
        assert!(output.ends_with("Balance: ¥230,000\n"));
    }

    #[test]
    fn test_negative_balance() {
        assert_eq!(format_balance(Money::from_major(-1_500), "$"), "Balance: -$1,500");
    }
}
