//! Sales record repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{SalesError, SalesResult};
use crate::models::{CalendarDate, DailyAmount, DateRange, RecordId, SalesRecord};

use super::file_io::JsonFile;

type RecordMap = HashMap<RecordId, SalesRecord>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct RecordData {
    #[serde(default)]
    pub(crate) records: Vec<SalesRecord>,
}

/// Repository for daily sales records
pub struct RecordRepository {
    file: JsonFile,
    records: RwLock<RecordMap>,
}

impl RecordRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: JsonFile::new(path),
            records: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> SalesResult<()> {
        let file_data: RecordData = self.file.load()?;

        let mut records = self
            .records
            .write()
            .map_err(|e| SalesError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        records.clear();
        for record in file_data.records {
            records.insert(record.id, record);
        }

        Ok(())
    }

    fn read_map<R>(&self, f: impl FnOnce(&RecordMap) -> R) -> SalesResult<R> {
        let records = self
            .records
            .read()
            .map_err(|e| SalesError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(f(&records))
    }

    /// Apply a change to a copy of the records, persist, then commit
    pub fn transact<R>(
        &self,
        change: impl FnOnce(&mut RecordMap) -> SalesResult<R>,
    ) -> SalesResult<R> {
        let mut records = self
            .records
            .write()
            .map_err(|e| SalesError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut staged = records.clone();
        let result = change(&mut staged)?;

        let mut record_list: Vec<_> = staged.values().cloned().collect();
        record_list.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        self.file.store(&RecordData {
            records: record_list,
        })?;

        *records = staged;
        Ok(result)
    }

    pub fn get(&self, id: RecordId) -> SalesResult<Option<SalesRecord>> {
        self.read_map(|records| records.get(&id).cloned())
    }

    /// Records inside `range`, ordered by date
    pub fn list(&self, range: &DateRange, include_superseded: bool) -> SalesResult<Vec<SalesRecord>> {
        let mut list = self.read_map(|records| {
            records
                .values()
                .filter(|r| include_superseded || r.is_active())
                .filter(|r| range.contains(r.date))
                .cloned()
                .collect::<Vec<_>>()
        })?;

        list.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        Ok(list)
    }

    /// Active amounts inside `range`, ordered by date
    pub fn daily_series(&self, range: &DateRange) -> SalesResult<Vec<DailyAmount>> {
        Ok(self
            .list(range, false)?
            .iter()
            .map(SalesRecord::as_daily)
            .collect())
    }

    pub fn count(&self) -> SalesResult<usize> {
        self.read_map(|records| records.len())
    }
}

pub(crate) fn active_on(records: &RecordMap, date: CalendarDate) -> Option<&SalesRecord> {
    records.values().find(|r| r.is_active() && r.date == date)
}
