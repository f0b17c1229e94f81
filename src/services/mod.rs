//! Service layer for the household ledger
//!
//! The lifecycle service owns the stores and performs every transition; the
//! shared handle adds locking and a periodic expiry sweeper on top.

pub mod ledger;
pub mod shared;

pub use ledger::Ledger;
pub use shared::{ExpirySweeper, SharedLedger};
