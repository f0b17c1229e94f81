//! Path management for the household ledger
//!
//! Only configuration lives on disk; ledger data is process-lifetime.
//!
//! ## Path Resolution Order
//!
//! 1. An explicit directory (the `--config-dir` flag)
//! 2. `HOUSEHOLD_LEDGER_CONFIG_DIR` environment variable
//! 3. The platform config directory from `directories`
//!    (e.g. `~/.config/household-ledger` on Linux)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::LedgerError;

/// Environment variable that overrides the config directory
pub const CONFIG_DIR_ENV: &str = "HOUSEHOLD_LEDGER_CONFIG_DIR";

/// Manages all paths used by the ledger
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    /// Directory holding config.json
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Resolve paths from the environment or platform defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, LedgerError> {
        let base_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Resolve paths, preferring an explicit directory when given
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, LedgerError> {
        match explicit {
            Some(dir) => Ok(Self::with_base_dir(dir.to_path_buf())),
            None => Self::new(),
        }
    }

    /// Create LedgerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), LedgerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create config directory: {}", e)))
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default config directory for this platform
fn resolve_default_path() -> Result<PathBuf, LedgerError> {
    ProjectDirs::from("", "", "household-ledger")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| LedgerError::Config("Could not determine a home directory".into()))
}
