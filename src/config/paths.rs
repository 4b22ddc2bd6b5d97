//! Path management for tally
//!
//! ## Path Resolution Order
//!
//! 1. `TALLY_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/tally` on Linux,
//!    `~/Library/Application Support/tally` on macOS, `%APPDATA%\tally` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::TallyError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "TALLY_DATA_DIR";

/// Manages all paths used by tally
#[derive(Debug, Clone)]
pub struct TallyPaths {
    /// Base directory for all tally data
    base_dir: PathBuf,
}

impl TallyPaths {
    /// Resolve the base directory from the environment or platform defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, TallyError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create TallyPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to ledger.json
    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir().join("ledger.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), TallyError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TallyError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| TallyError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, TallyError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| TallyError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("tally"))
}
