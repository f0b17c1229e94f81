//! Household ledger - in-memory income and expense tracking with a trash
//!
//! This library provides the core of a household ledger: an active list of
//! income and expense entries, a trash that keeps deleted entries
//! restorable for 30 days, and per-category aggregates derived from the
//! active entries. Nothing is persisted; a ledger lives as long as the
//! process that owns it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Entries, money amounts and identifiers
//! - `storage`: The active entry store and the trash store
//! - `services`: The ledger lifecycle controller and its shared handle
//! - `reports`: Category breakdowns, totals and balance
//! - `clock`: Injectable time source used for retention
//! - `export`: CSV and JSON reports
//! - `config`: Configuration and path management
//! - `logging`: Tracing subscriber setup
//! - `display`: Table formatting for the shell
//! - `cli`: The interactive shell
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use household_ledger::models::{EntryKind, Money};
//! use household_ledger::services::Ledger;
//!
//! let mut ledger = Ledger::with_system_clock();
//! let entry = ledger
//!     .create_entry(EntryKind::Expense, "食費", Money::from_major(500))
//!     .unwrap();
//! ledger.delete_entry(entry.id).unwrap();
//! assert!(ledger.active_entries().is_empty());
//! ledger.restore_entry(entry.id).unwrap();
//! assert_eq!(ledger.balance(), Money::from_major(-500));
//! ```

pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
