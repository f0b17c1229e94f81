//! Export module for the household ledger
//!
//! One-way reports of the in-memory ledger:
//! - CSV: active or trashed entries (spreadsheet-compatible)
//! - JSON: full snapshot with the derived summary

pub mod csv;
pub mod json;

pub use self::csv::{export_entries_csv, export_trash_csv};
pub use self::json::{export_json, LedgerExport, EXPORT_SCHEMA_VERSION};
