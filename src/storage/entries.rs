//! Active entry store
//!
//! Holds the authoritative sequence of active entries, most recent first.

use std::collections::vec_deque::{self, VecDeque};

use chrono::{DateTime, Utc};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Entry, EntryId, EntryKind, Money};

/// In-memory store of active entries
#[derive(Debug, Default)]
pub struct EntryStore {
    entries: VecDeque<Entry>,
}

impl EntryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and add a new entry at the head of the list
    pub fn add(
        &mut self,
        kind: EntryKind,
        category: &str,
        amount: Money,
        now: DateTime<Utc>,
    ) -> LedgerResult<Entry> {
        let mut entry = Entry::new(kind, category, amount, now)
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        while self.contains(entry.id) {
            entry.id = EntryId::new();
        }

        self.entries.push_front(entry.clone());
        Ok(entry)
    }

    /// Put an existing entry back at the head of the list, fields untouched
    pub(crate) fn restore(&mut self, entry: Entry) {
        debug_assert!(!self.contains(entry.id), "entry {} already active", entry.id);
        self.entries.push_front(entry);
    }

    /// Remove and return an entry
    pub fn remove(&mut self, id: EntryId) -> LedgerResult<Entry> {
        let position = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| LedgerError::entry_not_found(id.to_string()))?;

        self.entries
            .remove(position)
            .ok_or_else(|| LedgerError::entry_not_found(id.to_string()))
    }

    /// Get an entry by ID
    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Check whether an entry is active
    pub fn contains(&self, id: EntryId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// All active entries, most recent first
    pub fn list(&self) -> Vec<Entry> {
        self.entries.iter().cloned().collect()
    }

    /// Iterate active entries, most recent first
    pub fn iter(&self) -> vec_deque::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Active entries of one kind, most recent first
    pub fn filter_kind(&self, kind: EntryKind) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }

    /// IDs of all active entries
    pub fn ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Count entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_add_prepends() {
        let mut store = EntryStore::new();
        let first = store
            .add(EntryKind::Income, "給料", Money::from_major(300_000), test_time())
            .unwrap();
        let second = store
            .add(
                EntryKind::Expense,
                "家賃",
                Money::from_major(80_000),
                test_time() + Duration::minutes(1),
            )
            .unwrap();

        let ids: Vec<_> = store.ids().collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert_eq!(store.len(), 2);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_add_rejects_invalid_fields() {
        let mut store = EntryStore::new();

        let err = store
            .add(EntryKind::Expense, " \t", Money::from_major(10), test_time())
            .unwrap_err();
        assert!(err.is_validation());

        let err = store
            .add(EntryKind::Expense, "Food", Money::zero(), test_time())
            .unwrap_err();
        assert!(err.is_validation());

        assert!(store.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut store = EntryStore::new();
        let entry = store
            .add(EntryKind::Expense, "Food", Money::from_major(10), test_time())
            .unwrap();

        let removed = store.remove(entry.id).unwrap();
        assert_eq!(removed, entry);
        assert!(store.is_empty());

        let err = store.remove(entry.id).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_restore_keeps_fields_and_goes_first() {
        let mut store = EntryStore::new();
        let old = store
            .add(EntryKind::Expense, "Food", Money::from_major(10), test_time())
            .unwrap();
        let removed = store.remove(old.id).unwrap();
        let newer = store
            .add(
                EntryKind::Income,
                "Gift",
                Money::from_major(5),
                test_time() + Duration::days(1),
            )
            .unwrap();

        store.restore(removed);

        let list = store.list();
        assert_eq!(list[0], old);
        assert_eq!(list[1], newer);
    }

    #[test]
    fn test_filter_kind() {
        let mut store = EntryStore::new();
        store
            .add(EntryKind::Income, "給料", Money::from_major(300_000), test_time())
            .unwrap();
        store
            .add(EntryKind::Expense, "食費", Money::from_major(50_000), test_time())
            .unwrap();

        let expenses = store.filter_kind(EntryKind::Expense);
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].category, "食費");
        assert!(store.get(expenses[0].id).is_some());
    }
}
