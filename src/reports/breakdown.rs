//! Category breakdown
//!
//! Pure aggregation over a set of active entries. Nothing here is cached;
//! callers recompute after every mutation.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Entry, EntryKind, Money};

/// Total for one category of one kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateRow {
    pub category: String,
    pub total: Money,
}

/// Sum amounts per category for entries of `kind`
///
/// Categories are matched by exact string (no case folding or trimming).
/// Rows come out in the order each category is first seen in `entries`.
pub fn aggregate<'a, I>(entries: I, kind: EntryKind) -> Vec<AggregateRow>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut rows: Vec<AggregateRow> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for entry in entries.into_iter().filter(|e| e.kind == kind) {
        match index.get(entry.category.as_str()) {
            Some(&i) => rows[i].total += entry.amount,
            None => {
                index.insert(entry.category.as_str(), rows.len());
                rows.push(AggregateRow {
                    category: entry.category.clone(),
                    total: entry.amount,
                });
            }
        }
    }

    rows
}

/// Sum of all row totals
pub fn total_of(rows: &[AggregateRow]) -> Money {
    rows.iter().map(|r| r.total).sum()
}

/// Income minus expense; negative when spending exceeds income
pub fn balance(total_income: Money, total_expense: Money) -> Money {
    total_income - total_expense
}

/// One slice of a category breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: Money,
    /// Number of entries that contributed to the total
    pub entry_count: usize,
    /// Percentage of the kind total (0.0 when the total is zero)
    pub share: f64,
}

/// Per-category totals for one kind, with each category's share
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub kind: EntryKind,
    pub categories: Vec<CategoryShare>,
    pub total: Money,
}

impl CategoryBreakdown {
    /// Build the breakdown of `kind` from active entries
    pub fn from_entries<'a, I>(entries: I, kind: EntryKind) -> Self
    where
        I: IntoIterator<Item = &'a Entry>,
        I::IntoIter: Clone,
    {
        let entries = entries.into_iter();
        let rows = aggregate(entries.clone(), kind);
        let total = total_of(&rows);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in entries.filter(|e| e.kind == kind) {
            *counts.entry(entry.category.as_str()).or_default() += 1;
        }

        let categories = rows
            .into_iter()
            .map(|row| {
                let share = if total.is_zero() {
                    0.0
                } else {
                    row.total.minor() as f64 / total.minor() as f64 * 100.0
                };
                CategoryShare {
                    entry_count: counts.get(row.category.as_str()).copied().unwrap_or(0),
                    category: row.category,
                    total: row.total,
                    share,
                }
            })
            .collect();

        Self {
            kind,
            categories,
            total,
        }
    }

    /// The plain `(category, total)` rows
    pub fn rows(&self) -> Vec<AggregateRow> {
        self.categories
            .iter()
            .map(|c| AggregateRow {
                category: c.category.clone(),
                total: c.total,
            })
            .collect()
    }

    /// Check if there is nothing to show
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
