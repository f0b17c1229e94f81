//! Core data models for the household ledger
//!
//! This module contains the data structures of the ledger domain: entries,
//! trashed entries, amounts and identifiers.

pub mod entry;
pub mod ids;
pub mod money;

pub use entry::{
    retention_period, Entry, EntryKind, EntryValidationError, TrashedEntry, MAX_ENTRY_AMOUNT,
    RETENTION_DAYS,
};
pub use ids::{EntryId, ENTRY_ID_PREFIX};
pub use money::{Money, MoneyParseError};
