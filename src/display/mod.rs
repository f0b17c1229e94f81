//! Display formatting for terminal output
//!
//! Provides utilities for formatting entries, the trash and reports as
//! tables for the interactive shell.

pub mod entry;
pub mod report;

pub use entry::{format_entry_line, format_entry_list, format_trash_list};
pub use report::{format_balance, format_breakdown, format_summary};
