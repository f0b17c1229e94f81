//! Ledger lifecycle service
//!
//! The single place where entries change state. Every entry is either
//! Active (in the entry store) or Trashed (in the trash store); purging
//! removes it for good.
//!
//! ```text
//! create ──> Active ──delete──> Trashed ──purge / expiry──> gone
//!              ^                   │
//!              └──────restore──────┘
//! ```

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    retention_period, Entry, EntryId, EntryKind, Money, TrashedEntry, ENTRY_ID_PREFIX,
};
use crate::reports::{aggregate, AggregateRow, CategoryBreakdown, LedgerSummary};
use crate::storage::Storage;

/// Shortest bare hex prefix accepted when resolving an id
const MIN_PREFIX_LEN: usize = 4;

/// Owns both stores and performs every state transition
#[derive(Debug)]
pub struct Ledger<C: Clock = SystemClock> {
    storage: Storage,
    clock: C,
}

impl Ledger<SystemClock> {
    /// An empty ledger on wall-clock time
    pub fn with_system_clock() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> Ledger<C> {
    /// Create an empty ledger
    pub fn new(clock: C) -> Self {
        Self {
            storage: Storage::new(),
            clock,
        }
    }

    /// Take ownership of existing stores and run the startup expiry sweep
    pub fn open(storage: Storage, clock: C) -> Self {
        let mut ledger = Self { storage, clock };
        let now = ledger.clock.now();
        let purged = ledger.run_expiry_sweep(now);
        info!(purged, "ledger opened");
        ledger
    }

    /// Current instant according to the ledger's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// The clock this ledger reads
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Read-only access to both stores
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Record a new entry
    pub fn create_entry(
        &mut self,
        kind: EntryKind,
        category: &str,
        amount: Money,
    ) -> LedgerResult<Entry> {
        let now = self.clock.now();
        let entry = self.storage.entries.add(kind, category, amount, now)?;
        info!(
            entry_id = %entry.id,
            kind = %entry.kind,
            category = %entry.category,
            amount = %entry.amount,
            "entry created"
        );
        Ok(entry)
    }

    /// Move an active entry to the trash
    pub fn delete_entry(&mut self, id: EntryId) -> LedgerResult<TrashedEntry> {
        let deleted_at = self.clock.now();
        let entry = self.storage.entries.remove(id)?;
        let trashed = self.storage.trash.insert(entry, deleted_at);
        debug_assert!(self.storage.is_disjoint());

        info!(entry_id = %id, "entry moved to trash");
        Ok(trashed)
    }

    /// Bring a trashed entry back to the head of the active list
    ///
    /// All original fields, `created_at` included, are preserved. The entry is
    /// shown first regardless of its creation time.
    pub fn restore_entry(&mut self, id: EntryId) -> LedgerResult<Entry> {
        let entry = self.storage.trash.remove(id)?.into_entry();
        self.storage.entries.restore(entry.clone());
        debug_assert!(self.storage.is_disjoint());

        info!(entry_id = %id, "entry restored from trash");
        Ok(entry)
    }

    /// Permanently discard a trashed entry
    pub fn purge_entry(&mut self, id: EntryId) -> LedgerResult<TrashedEntry> {
        let purged = self.storage.trash.remove(id)?;
        info!(entry_id = %id, "trashed entry purged");
        Ok(purged)
    }

    /// Purge every trashed entry whose retention window has elapsed at `now`
    pub fn run_expiry_sweep(&mut self, now: DateTime<Utc>) -> usize {
        let purged = self.storage.trash.purge_expired(now, retention_period());
        if purged > 0 {
            info!(purged, "expired trashed entries purged");
        } else {
            debug!("expiry sweep found nothing to purge");
        }
        purged
    }

    /// Run the expiry sweep at the clock's current instant
    pub fn sweep_now(&mut self) -> usize {
        let now = self.clock.now();
        self.run_expiry_sweep(now)
    }

    /// Active entries, most recent first
    pub fn active_entries(&self) -> Vec<Entry> {
        self.storage.entries.list()
    }

    /// Active entries of one kind, most recent first
    pub fn active_entries_of(&self, kind: EntryKind) -> Vec<Entry> {
        self.storage.entries.filter_kind(kind)
    }

    /// Trashed entries, most recently deleted first
    pub fn trashed_entries(&self) -> Vec<TrashedEntry> {
        self.storage.trash.list_by_recency()
    }

    /// Category totals for one kind
    pub fn aggregates(&self, kind: EntryKind) -> Vec<AggregateRow> {
        aggregate(self.storage.entries.iter(), kind)
    }

    /// Category totals with shares and entry counts
    pub fn breakdown(&self, kind: EntryKind) -> CategoryBreakdown {
        CategoryBreakdown::from_entries(self.storage.entries.iter(), kind)
    }

    /// Total income minus total expense
    pub fn balance(&self) -> Money {
        self.summary().balance
    }

    /// Both breakdowns, totals and balance
    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary::from_entries(self.storage.entries.iter())
    }

    /// Resolve a user-supplied identifier to an active entry
    pub fn resolve_active(&self, identifier: &str) -> LedgerResult<EntryId> {
        resolve(identifier, self.storage.entries.ids())
            .map_err(|e| e.unwrap_or_else(|| LedgerError::entry_not_found(identifier)))
    }

    /// Resolve a user-supplied identifier to a trashed entry
    pub fn resolve_trashed(&self, identifier: &str) -> LedgerResult<EntryId> {
        resolve(identifier, self.storage.trash.ids())
            .map_err(|e| e.unwrap_or_else(|| LedgerError::trashed_entry_not_found(identifier)))
    }

    /// Load the demonstration household: salary, side job, rent, food,
    /// utilities and socializing from late October 2023
    pub fn seed_sample_entries(&mut self) -> LedgerResult<usize> {
        let samples = [
            (EntryKind::Expense, "交際費", 20_000, (2023, 10, 18, 20, 0)),
            (EntryKind::Income, "副業", 50_000, (2023, 10, 20, 18, 0)),
            (EntryKind::Expense, "光熱費", 15_000, (2023, 10, 22, 8, 0)),
            (EntryKind::Expense, "食費", 50_000, (2023, 10, 24, 12, 30)),
            (EntryKind::Expense, "家賃", 80_000, (2023, 10, 25, 11, 0)),
            (EntryKind::Income, "給料", 300_000, (2023, 10, 25, 10, 0)),
        ];

        for (kind, category, amount, (y, mo, d, h, mi)) in samples {
            let created_at = Utc
                .with_ymd_and_hms(y, mo, d, h, mi, 0)
                .single()
                .ok_or_else(|| LedgerError::Validation("invalid sample timestamp".into()))?;
            self.storage
                .entries
                .add(kind, category, Money::from_major(amount), created_at)?;
        }

        info!(count = samples.len(), "sample entries loaded");
        Ok(samples.len())
    }
}

/// Match an identifier against candidate ids
///
/// Accepts a full UUID (optionally `ent-` prefixed) or a unique hex prefix.
/// `Err(None)` means nothing matched.
fn resolve(
    identifier: &str,
    candidates: impl Iterator<Item = EntryId>,
) -> Result<EntryId, Option<LedgerError>> {
    let identifier = identifier.trim();
    let candidates: Vec<EntryId> = candidates.collect();

    if let Ok(id) = identifier.parse::<EntryId>() {
        return candidates.into_iter().find(|c| *c == id).ok_or(None);
    }

    let prefix: String = identifier
        .strip_prefix(ENTRY_ID_PREFIX)
        .unwrap_or(identifier)
        .chars()
        .filter(|c| *c != '-')
        .collect::<String>()
        .to_lowercase();

    if prefix.len() < MIN_PREFIX_LEN || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(None);
    }

    let mut matches = candidates
        .into_iter()
        .filter(|c| c.simple_hex().starts_with(&prefix));

    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id),
        (None, _) => Err(None),
        (Some(_), Some(_)) => Err(Some(LedgerError::Validation(format!(
            "Identifier '{}' matches more than one entry; use more characters",
            identifier
        )))),
    }
}
