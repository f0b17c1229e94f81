//! Configuration module for the household ledger
//!
//! This module provides configuration management including:
//! - Platform-aware config directory resolution
//! - User settings loading and saving

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{LogFormat, Settings};
