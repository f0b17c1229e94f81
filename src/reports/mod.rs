//! Reports for the household ledger
//!
//! Derived, never stored: category breakdowns per entry kind and the overall
//! income/expense summary.

pub mod breakdown;
pub mod summary;

pub use breakdown::{aggregate, balance, total_of, AggregateRow, CategoryBreakdown, CategoryShare};
pub use summary::LedgerSummary;
