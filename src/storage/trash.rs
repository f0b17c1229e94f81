//! Trash store
//!
//! Holds soft-deleted entries together with their deletion time. Entries stay
//! here until they are restored, purged explicitly, or expire.

use chrono::{DateTime, Duration, Utc};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Entry, EntryId, TrashedEntry};

/// In-memory store of trashed entries, kept in insertion order
#[derive(Debug, Default)]
pub struct TrashStore {
    entries: Vec<TrashedEntry>,
}

impl TrashStore {
    /// Create an empty trash
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry deleted at `deleted_at`
    pub fn insert(&mut self, entry: Entry, deleted_at: DateTime<Utc>) -> TrashedEntry {
        debug_assert!(!self.contains(entry.id), "entry {} already trashed", entry.id);
        let trashed = TrashedEntry::new(entry, deleted_at);
        self.entries.push(trashed.clone());
        trashed
    }

    /// Remove and return a trashed entry
    pub fn remove(&mut self, id: EntryId) -> LedgerResult<TrashedEntry> {
        let position = self
            .entries
            .iter()
            .position(|t| t.id() == id)
            .ok_or_else(|| LedgerError::trashed_entry_not_found(id.to_string()))?;

        Ok(self.entries.remove(position))
    }

    /// Get a trashed entry by ID
    pub fn get(&self, id: EntryId) -> Option<&TrashedEntry> {
        self.entries.iter().find(|t| t.id() == id)
    }

    /// Check whether an entry is in the trash
    pub fn contains(&self, id: EntryId) -> bool {
        self.entries.iter().any(|t| t.id() == id)
    }

    /// Trashed entries in insertion order
    pub fn list(&self) -> Vec<TrashedEntry> {
        self.entries.clone()
    }

    /// Trashed entries, most recently deleted first
    pub fn list_by_recency(&self) -> Vec<TrashedEntry> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        entries
    }

    /// Iterate trashed entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &TrashedEntry> {
        self.entries.iter()
    }

    /// IDs of all trashed entries
    pub fn ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.entries.iter().map(|t| t.id())
    }

    /// Discard every entry whose retention window has elapsed at `now`
    ///
    /// Returns how many entries were discarded; a second call with the same
    /// `now` discards nothing.
    pub fn purge_expired(&mut self, now: DateTime<Utc>, retention: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|t| now - t.deleted_at < retention);
        before - self.entries.len()
    }

    /// Count trashed entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the trash is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
