//! JSON export
//!
//! Writes a snapshot of the ledger (entries, trash and summary) as a
//! versioned JSON document.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::clock::Clock;
use crate::error::LedgerResult;
use crate::models::{Entry, TrashedEntry};
use crate::reports::LedgerSummary;
use crate::services::Ledger;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Snapshot document
#[derive(Debug, Clone, Serialize)]
pub struct LedgerExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Active entries, most recent first
    pub entries: Vec<Entry>,

    /// Trashed entries, most recently deleted first (empty unless requested)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trash: Vec<TrashedEntry>,

    /// Derived totals at export time
    pub summary: LedgerSummary,
}

impl LedgerExport {
    /// Capture the current state of a ledger
    pub fn capture<C: Clock>(ledger: &Ledger<C>, include_trash: bool) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: ledger.now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            entries: ledger.active_entries(),
            trash: if include_trash {
                ledger.trashed_entries()
            } else {
                Vec::new()
            },
            summary: ledger.summary(),
        }
    }
}

/// Export a ledger snapshot as pretty-printed JSON
pub fn export_json<C: Clock, W: Write>(
    ledger: &Ledger<C>,
    include_trash: bool,
    writer: W,
) -> LedgerResult<()> {
    let export = LedgerExport::capture(ledger, include_trash);
    serde_json::to_writer_pretty(writer, &export)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::models::{EntryKind, Money};
    use chrono::TimeZone;

    fn test_ledger() -> Ledger<ManualClock> {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap());
        let mut ledger = Ledger::new(clock);
        ledger
            .create_entry(EntryKind::Income, "給料", Money::from_major(300_000))
            .unwrap();
        let food = ledger
            .create_entry(EntryKind::Expense, "食費", Money::from_major(50_000))
            .unwrap();
        ledger.delete_entry(food.id).unwrap();
        ledger
    }

    #[test]
    fn test_export_without_trash() {
        let ledger = test_ledger();
        let mut output = Vec::new();
        export_json(&ledger, false, &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["entries"].as_array().unwrap().len(), 1);
        assert!(value.get("trash").is_none());
        assert_eq!(value["summary"]["balance"], 30_000_000);
    }

    #[test]
    fn test_export_with_trash() {
        let ledger = test_ledger();
        let export = LedgerExport::capture(&ledger, true);
        assert_eq!(export.trash.len(), 1);
        assert_eq!(export.trash[0].entry.category, "食費");
        assert_eq!(export.exported_at, ledger.now());
    }
}
