//! Runtime configuration resolved from the environment.
//!
//! # Invariants
//! - Blank or unparsable variables fall back to defaults.
//! - `log_dir` is absolute whenever the temp directory is.

use pocketnotes_core::default_log_level;
use std::path::PathBuf;

const DB_FILE_NAME: &str = "pocketnotes.sqlite3";
const LOG_DIR_NAME: &str = "pocketnotes-logs";
const DEFAULT_UNITS_PER_CELL: u32 = 8;

pub const ENV_DB_PATH: &str = "POCKETNOTES_DB_PATH";
pub const ENV_LOG_DIR: &str = "POCKETNOTES_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "POCKETNOTES_LOG_LEVEL";
pub const ENV_UNITS_PER_COLUMN: &str = "POCKETNOTES_UNITS_PER_COLUMN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
    /// Layout units per terminal cell; 96 columns at the default of 8 is
    /// the narrow breakpoint.
    pub units_per_cell: u32,
}

impl CliConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|trimmed| !trimmed.is_empty())
        };

        Self {
            db_path: value(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DB_FILE_NAME)),
            log_dir: value(ENV_LOG_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(LOG_DIR_NAME)),
            log_level: value(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            units_per_cell: value(ENV_UNITS_PER_COLUMN)
                .and_then(|raw| raw.parse::<u32>().ok())
                .filter(|units| *units > 0)
                .unwrap_or(DEFAULT_UNITS_PER_CELL),
        }
    }
}
