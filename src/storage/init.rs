//! Storage initialization
//!
//! Handles first-run setup: directories, empty data files and a default
//! settings file.

use tracing::info;

use crate::config::paths::StepupPaths;
use crate::config::settings::Settings;
use crate::error::SalesResult;

use super::file_io::JsonFile;
use super::records::RecordData;
use super::targets::TargetData;

/// Initialize storage for a fresh installation
///
/// Existing files are left alone, so running this twice is harmless.
/// Returns `true` when anything was created.
pub fn initialize_storage(paths: &StepupPaths) -> SalesResult<bool> {
    paths.ensure_directories()?;
    let mut created = false;

    let targets = JsonFile::new(paths.targets_file());
    if !targets.exists() {
        targets.store(&TargetData::default())?;
        created = true;
    }

    let records = JsonFile::new(paths.records_file());
    if !records.exists() {
        records.store(&RecordData::default())?;
        created = true;
    }

    if !paths.is_initialized() {
        Settings::default().save(paths)?;
        created = true;
    }

    if created {
        info!(base_dir = %paths.base_dir().display(), "initialized storage");
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_files() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StepupPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(initialize_storage(&paths).unwrap());

        assert!(paths.targets_file().exists());
        assert!(paths.records_file().exists());
        assert!(paths.is_initialized());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let paths = StepupPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();
        assert!(!initialize_storage(&paths).unwrap());
    }
}
