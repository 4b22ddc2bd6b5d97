//! User settings for tally
//!
//! Settings live in `config.json` under the base directory. Every field has a
//! default so older or hand-edited files keep loading.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::paths::TallyPaths;
use crate::error::TallyError;

/// User settings for tally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version of the settings file
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Symbol printed in front of amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Default destination for `export`
    #[serde(default = "default_export_file")]
    pub export_file: PathBuf,

    /// Directory monthly chart images are written to
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    /// Load demonstration transactions into an empty ledger when the menu starts
    #[serde(default = "default_seed_sample_data")]
    pub seed_sample_data: bool,

    /// Number of transactions listed in "recent" views
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_export_file() -> PathBuf {
    PathBuf::from("transactions_export.csv")
}

fn default_report_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_seed_sample_data() -> bool {
    true
}

fn default_recent_limit() -> usize {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            export_file: default_export_file(),
            report_dir: default_report_dir(),
            seed_sample_data: default_seed_sample_data(),
            recent_limit: default_recent_limit(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &TallyPaths) -> Result<Self, TallyError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TallyError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| TallyError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TallyPaths) -> Result<(), TallyError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TallyError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TallyError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
