//! Path management for StepUp
//!
//! ## Path Resolution Order
//!
//! 1. `STEPUP_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`$XDG_CONFIG_HOME/stepup` or
//!    `~/.config/stepup` on Linux, `%APPDATA%\stepup` on Windows)

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::{SalesError, SalesResult};

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "STEPUP_DATA_DIR";

/// Manages all paths used by StepUp
#[derive(Debug, Clone)]
pub struct StepupPaths {
    base_dir: PathBuf,
}

impl StepupPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> SalesResult<Self> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => BaseDirs::new()
                .map(|dirs| dirs.config_dir().join("stepup"))
                .ok_or_else(|| SalesError::Config("Could not determine home directory".into()))?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding the JSON data files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Aggregate targets with their daily distributions
    pub fn targets_file(&self) -> PathBuf {
        self.data_dir().join("targets.json")
    }

    /// Daily sales records
    pub fn records_file(&self) -> PathBuf {
        self.data_dir().join("records.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> SalesResult<()> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SalesError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SalesError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if StepUp has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
