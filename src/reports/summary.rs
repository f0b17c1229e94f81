//! Ledger summary
//!
//! Income and expense breakdowns plus the resulting balance, derived from
//! the active entries in one pass of the caller.

use serde::Serialize;

use super::breakdown::{balance, CategoryBreakdown};
use crate::models::{Entry, EntryKind, Money};

/// Totals shown next to the category breakdowns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub income: CategoryBreakdown,
    pub expense: CategoryBreakdown,
    pub total_income: Money,
    pub total_expense: Money,
    pub balance: Money,
    pub entry_count: usize,
}

impl LedgerSummary {
    /// Summarize a set of active entries
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a Entry>,
        I::IntoIter: Clone,
    {
        let entries = entries.into_iter();
        let income = CategoryBreakdown::from_entries(entries.clone(), EntryKind::Income);
        let expense = CategoryBreakdown::from_entries(entries.clone(), EntryKind::Expense);
        let total_income = income.total;
        let total_expense = expense.total;

        Self {
            income,
            expense,
            total_income,
            total_expense,
            balance: balance(total_income, total_expense),
            entry_count: entries.count(),
        }
    }

    /// The breakdown for one kind
    pub fn breakdown(&self, kind: EntryKind) -> &CategoryBreakdown {
        match kind {
            EntryKind::Income => &self.income,
            EntryKind::Expense => &self.expense,
        }
    }
}
