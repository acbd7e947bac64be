//! JSON data files with atomic replacement
//!
//! A `JsonFile` is read whole and written whole. Writes go to a sibling
//! temp file which is synced and renamed over the original, so a crash
//! leaves either the old contents or the new ones.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{SalesError, SalesResult};

/// A JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    /// Read the document, or `T::default()` when the file is missing
    pub fn load<T>(&self) -> SalesResult<T>
    where
        T: DeserializeOwned + Default,
    {
        if !self.path.exists() {
            return Ok(T::default());
        }

        let file = File::open(&self.path).map_err(|e| {
            SalesError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            SalesError::Storage(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    /// Replace the document atomically
    pub fn store<T: Serialize>(&self, data: &T) -> SalesResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SalesError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp_path = self.temp_path();
        let result = write_synced(&temp_path, data)
            .and_then(|()| {
                fs::rename(&temp_path, &self.path).map_err(|e| {
                    SalesError::Storage(format!(
                        "Failed to replace {}: {}",
                        self.path.display(),
                        e
                    ))
                })
            });

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }
}

fn write_synced<T: Serialize>(path: &Path, data: &T) -> SalesResult<()> {
    let file = File::create(path)
        .map_err(|e| SalesError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| SalesError::Storage(format!("Failed to serialize data: {}", e)))?;
    writer
        .flush()
        .map_err(|e| SalesError::Storage(format!("Failed to flush data: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| SalesError::Storage(format!("Failed to sync data: {}", e)))
}
