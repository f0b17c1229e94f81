//! Entry display formatting
//!
//! Tables for the active list and the trash, built with `tabled`.

use chrono::{DateTime, Utc};
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Entry, TrashedEntry};

/// One row of the active entry list
#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// One row of the trash list
#[derive(Tabled)]
struct TrashRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Deleted")]
    deleted: String,
    #[tabled(rename = "Days left")]
    days_left: i64,
}

/// Format the active entries as a table, most recent first
pub fn format_entry_list(entries: &[Entry], currency_symbol: &str, date_format: &str) -> String {
    if entries.is_empty() {
        return "No entries.\n".to_string();
    }

    let rows = entries.iter().map(|e| EntryRow {
        id: e.id.to_string(),
        date: e.created_at.format(date_format).to_string(),
        kind: e.kind.to_string(),
        category: e.category.clone(),
        amount: e.amount.format_with_symbol(currency_symbol),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(4)).with(Alignment::right()));
    format!("{}\n", table)
}

/// Format the trash as a table with the days left before each entry expires
pub fn format_trash_list(
    trashed: &[TrashedEntry],
    now: DateTime<Utc>,
    currency_symbol: &str,
    date_format: &str,
) -> String {
    if trashed.is_empty() {
        return "Trash is empty.\n".to_string();
    }

    let rows = trashed.iter().map(|t| TrashRow {
        id: t.id().to_string(),
        kind: t.entry.kind.to_string(),
        category: t.entry.category.clone(),
        amount: t.entry.amount.format_with_symbol(currency_symbol),
        deleted: t.deleted_at.format(date_format).to_string(),
        days_left: t.days_left(now),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(3..)).with(Alignment::right()));
    format!("{}\n", table)
}

/// One-line confirmation for a single entry
pub fn format_entry_line(entry: &Entry, currency_symbol: &str) -> String {
    format!(
        "{} {} {} {}",
        entry.id,
        entry.kind,
        entry.category,
        entry.amount.format_with_symbol(currency_symbol)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryKind, Money};
    use chrono::{Duration, TimeZone};

    fn entry(kind: EntryKind, category: &str, amount: i64) -> Entry {
        Entry::new(
            kind,
            category,
            Money::from_major(amount),
            Utc.with_ymd_and_hms(2023, 10, 25, 10, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_lists() {
        assert_eq!(format_entry_list(&[], "", "%Y-%m-%d"), "No entries.\n");
        assert_eq!(
            format_trash_list(&[], Utc::now(), "", "%Y-%m-%d"),
            "Trash is empty.\n"
        );
    }

    #[test]
    fn test_entry_list_contents() {
        let entries = vec![entry(EntryKind::Expense, "食費", 50_000)];
        let output = format_entry_list(&entries, "¥", "%Y-%m-%d");

        assert!(output.contains("Category"));
        assert!(output.contains("食費"));
        assert!(output.contains("¥50,000"));
        assert!(output.contains("2023-10-25"));
        assert!(output.contains(&entries[0].id.to_string()));
    }

    #[test]
    fn test_trash_list_shows_days_left() {
        let deleted_at = Utc.with_ymd_and_hms(2023, 11, 1, 0, 0, 0).unwrap();
        let trashed = vec![TrashedEntry::new(
            entry(EntryKind::Income, "給料", 300_000),
            deleted_at,
        )];
        let output = format_trash_list(&trashed, deleted_at + Duration::days(5), "", "%Y-%m-%d");

        assert!(output.contains("Days left"));
        assert!(output.contains("25"));
        assert!(output.contains("2023-11-01"));
    }

    #[test]
    fn test_entry_line() {
        let e = entry(EntryKind::Expense, "Rent", 800);
        let line = format_entry_line(&e, "$");
        assert!(line.starts_with("ent-"));
        assert!(line.ends_with("Expense Rent $800"));
    }
}
