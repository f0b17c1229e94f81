//! Storage layer for the household ledger
//!
//! Process-lifetime, in-memory stores. The active entry store and the trash
//! store together own every live entry; an id is held by exactly one of them.

pub mod entries;
pub mod trash;

pub use entries::EntryStore;
pub use trash::TrashStore;

use crate::models::EntryId;

/// Coordinator that owns both stores
#[derive(Debug, Default)]
pub struct Storage {
    pub entries: EntryStore,
    pub trash: TrashStore,
}

impl Storage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is owned by either store
    pub fn owns(&self, id: EntryId) -> bool {
        self.entries.contains(id) || self.trash.contains(id)
    }

    /// Check that no id is held by both stores
    pub fn is_disjoint(&self) -> bool {
        !self.entries.ids().any(|id| self.trash.contains(id))
    }
}
