//! Shared ledger handle and background expiry sweeper
//!
//! One `RwLock` guards both stores. Every mutation, the expiry sweep
//! included, takes the write lock, so readers never see an entry in both
//! stores or in neither.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::ledger::Ledger;
use crate::clock::{Clock, SystemClock};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Entry, EntryId, EntryKind, Money, TrashedEntry};
use crate::reports::{AggregateRow, CategoryBreakdown, LedgerSummary};

/// Cloneable, thread-safe handle to one ledger
#[derive(Debug)]
pub struct SharedLedger<C: Clock = SystemClock> {
    inner: Arc<RwLock<Ledger<C>>>,
}

impl<C: Clock> Clone for SharedLedger<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> SharedLedger<C> {
    /// Wrap a ledger for shared use
    pub fn new(ledger: Ledger<C>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Acquire the read lock
    pub fn read(&self) -> LedgerResult<RwLockReadGuard<'_, Ledger<C>>> {
        self.inner
            .read()
            .map_err(|e| LedgerError::Lock(format!("Failed to acquire read lock: {}", e)))
    }

    /// Acquire the write lock
    pub fn write(&self) -> LedgerResult<RwLockWriteGuard<'_, Ledger<C>>> {
        self.inner
            .write()
            .map_err(|e| LedgerError::Lock(format!("Failed to acquire write lock: {}", e)))
    }

    /// Record a new entry under the write lock
    pub fn create_entry(
        &self,
        kind: EntryKind,
        category: &str,
        amount: Money,
    ) -> LedgerResult<Entry> {
        self.write()?.create_entry(kind, category, amount)
    }

    /// Move an active entry to the trash
    pub fn delete_entry(&self, id: EntryId) -> LedgerResult<TrashedEntry> {
        self.write()?.delete_entry(id)
    }

    /// Bring a trashed entry back to the head of the active list
    pub fn restore_entry(&self, id: EntryId) -> LedgerResult<Entry> {
        self.write()?.restore_entry(id)
    }

    /// Permanently discard a trashed entry
    pub fn purge_entry(&self, id: EntryId) -> LedgerResult<TrashedEntry> {
        self.write()?.purge_entry(id)
    }

    /// Purge trashed entries expired at `now`
    pub fn run_expiry_sweep(&self, now: DateTime<Utc>) -> LedgerResult<usize> {
        Ok(self.write()?.run_expiry_sweep(now))
    }

    /// Sweep at the ledger clock's current instant
    pub fn sweep_now(&self) -> LedgerResult<usize> {
        Ok(self.write()?.sweep_now())
    }

    /// Snapshot of active entries, most recent first
    pub fn active_entries(&self) -> LedgerResult<Vec<Entry>> {
        Ok(self.read()?.active_entries())
    }

    /// Snapshot of the trash, most recently deleted first
    pub fn trashed_entries(&self) -> LedgerResult<Vec<TrashedEntry>> {
        Ok(self.read()?.trashed_entries())
    }

    /// Per-category totals for one kind
    pub fn aggregates(&self, kind: EntryKind) -> LedgerResult<Vec<AggregateRow>> {
        Ok(self.read()?.aggregates(kind))
    }

    /// Category breakdown with counts and shares
    pub fn breakdown(&self, kind: EntryKind) -> LedgerResult<CategoryBreakdown> {
        Ok(self.read()?.breakdown(kind))
    }

    /// Total income minus total expense
    pub fn balance(&self) -> LedgerResult<Money> {
        Ok(self.read()?.balance())
    }

    /// Both breakdowns plus totals and balance
    pub fn summary(&self) -> LedgerResult<LedgerSummary> {
        Ok(self.read()?.summary())
    }
}

impl<C: Clock + 'static> SharedLedger<C> {
    /// Start sweeping expired trash every `interval` on a background thread
    pub fn spawn_sweeper(&self, interval: StdDuration) -> LedgerResult<ExpirySweeper> {
        ExpirySweeper::spawn(self.clone(), interval)
    }
}

/// Handle to a running expiry sweeper thread
///
/// The thread stops when [`ExpirySweeper::stop`] is called or the handle is
/// dropped.
#[derive(Debug)]
pub struct ExpirySweeper {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ExpirySweeper {
    /// Spawn a sweeper over `ledger`
    pub fn spawn<C: Clock + 'static>(
        ledger: SharedLedger<C>,
        interval: StdDuration,
    ) -> LedgerResult<Self> {
        if interval.is_zero() {
            return Err(LedgerError::Config(
                "sweep interval must be greater than zero".into(),
            ));
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("expiry-sweeper".into())
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => match ledger.sweep_now() {
                        Ok(purged) => debug!(purged, "periodic expiry sweep"),
                        Err(e) => {
                            warn!(error = %e, "periodic expiry sweep failed; stopping");
                            break;
                        }
                    },
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Signal the thread and wait for it to finish
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("expiry sweeper thread panicked");
            }
        }
    }
}

impl Drop for ExpirySweeper {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{Duration, TimeZone};
    use std::collections::HashSet;

    fn test_shared() -> (ManualClock, SharedLedger<ManualClock>) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap());
        (clock.clone(), SharedLedger::new(Ledger::new(clock)))
    }

    #[test]
    fn test_shared_operations() {
        let (_clock, shared) = test_shared();
        let entry = shared
            .create_entry(EntryKind::Expense, "Food", Money::from_major(10))
            .unwrap();
        shared.delete_entry(entry.id).unwrap();
        assert!(shared.active_entries().unwrap().is_empty());
        assert_eq!(shared.trashed_entries().unwrap().len(), 1);

        shared.restore_entry(entry.id).unwrap();
        assert_eq!(shared.balance().unwrap(), Money::from_major(-10));
        assert_eq!(shared.aggregates(EntryKind::Expense).unwrap().len(), 1);
    }

    #[test]
    fn test_readers_never_see_entry_in_both_or_neither() {
        let (_clock, shared) = test_shared();
        let entry = shared
            .create_entry(EntryKind::Income, "Salary", Money::from_major(100))
            .unwrap();

        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    shared.delete_entry(entry.id).unwrap();
                    shared.restore_entry(entry.id).unwrap();
                }
            })
        };

        for _ in 0..500 {
            let ledger = shared.read().unwrap();
            let active: HashSet<_> = ledger.storage().entries.ids().collect();
            let trashed: HashSet<_> = ledger.storage().trash.ids().collect();
            assert!(active.contains(&entry.id) ^ trashed.contains(&entry.id));
        }

        writer.join().unwrap();
        assert_eq!(shared.active_entries().unwrap().len(), 1);
    }

    #[test]
    fn test_sweeper_purges_expired_entries() {
        let (clock, shared) = test_shared();
        let entry = shared
            .create_entry(EntryKind::Expense, "Old", Money::from_major(5))
            .unwrap();
        shared.delete_entry(entry.id).unwrap();
        clock.advance(Duration::days(31));

        let sweeper = shared.spawn_sweeper(StdDuration::from_millis(10)).unwrap();
        let mut purged = false;
        for _ in 0..200 {
            if shared.trashed_entries().unwrap().is_empty() {
                purged = true;
                break;
            }
            thread::sleep(StdDuration::from_millis(10));
        }
        sweeper.stop();

        assert!(purged);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let (_clock, shared) = test_shared();
        let err = shared.spawn_sweeper(StdDuration::ZERO).unwrap_err();
        assert!(matches!(err, LedgerError::Config(_)));
    }
}
