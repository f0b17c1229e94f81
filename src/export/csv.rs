//! CSV export
//!
//! Writes active or trashed entries as spreadsheet-friendly rows. This is a
//! one-way report; nothing reads these files back.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Entry, TrashedEntry};

const ENTRY_HEADER: [&str; 5] = ["id", "kind", "category", "amount", "created_at"];

fn entry_record(entry: &Entry) -> [String; 5] {
    [
        entry.id.as_uuid().to_string(),
        entry.kind.as_str().to_string(),
        entry.category.clone(),
        entry.amount.to_plain_string(),
        entry.created_at.to_rfc3339(),
    ]
}

/// Export active entries in list order
pub fn export_entries_csv<W: Write>(entries: &[Entry], writer: W) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(ENTRY_HEADER)?;

    for entry in entries {
        csv_writer.write_record(entry_record(entry))?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))
}

/// Export trashed entries with their deletion time and days left
pub fn export_trash_csv<W: Write>(
    trashed: &[TrashedEntry],
    now: chrono::DateTime<chrono::Utc>,
    writer: W,
) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut header: Vec<&str> = ENTRY_HEADER.to_vec();
    header.extend(["deleted_at", "days_left"]);
    csv_writer.write_record(&header)?;

    for item in trashed {
        let mut record = entry_record(&item.entry).to_vec();
        record.push(item.deleted_at.to_rfc3339());
        record.push(item.days_left(now).to_string());
        csv_writer.write_record(&record)?;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))
}
