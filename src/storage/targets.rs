//! Aggregate target repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::{SalesError, SalesResult};
use crate::models::{AggregateTarget, CalendarDate, DailyAmount, DateRange, Granularity, TargetId};

use super::file_io::JsonFile;

type TargetMap = HashMap<TargetId, AggregateTarget>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct TargetData {
    #[serde(default)]
    pub(crate) targets: Vec<AggregateTarget>,
}

/// Repository for aggregate targets and their daily distributions
pub struct TargetRepository {
    file: JsonFile,
    targets: RwLock<TargetMap>,
}

impl TargetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: JsonFile::new(path),
            targets: RwLock::new(HashMap::new()),
        }
    }

    /// Load targets from disk, replacing what is in memory
    pub fn load(&self) -> SalesResult<()> {
        let file_data: TargetData = self.file.load()?;

        let mut targets = self
            .targets
            .write()
            .map_err(|e| SalesError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        targets.clear();
        for target in file_data.targets {
            targets.insert(target.id, target);
        }

        Ok(())
    }

    fn read_map<R>(&self, f: impl FnOnce(&TargetMap) -> R) -> SalesResult<R> {
        let targets = self
            .targets
            .read()
            .map_err(|e| SalesError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(f(&targets))
    }

    /// Apply a change and persist it as one unit
    ///
    /// The change runs against a copy of the map while the write lock is
    /// held. The file is replaced before the copy is committed to memory, so
    /// a failed write leaves both untouched.
    pub fn transact<R>(
        &self,
        change: impl FnOnce(&mut TargetMap) -> SalesResult<R>,
    ) -> SalesResult<R> {
        let mut targets = self
            .targets
            .write()
            .map_err(|e| SalesError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut staged = targets.clone();
        let result = change(&mut staged)?;

        let mut target_list: Vec<_> = staged.values().cloned().collect();
        target_list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        self.file.store(&TargetData {
            targets: target_list,
        })?;

        *targets = staged;
        Ok(result)
    }

    pub fn get(&self, id: TargetId) -> SalesResult<Option<AggregateTarget>> {
        self.read_map(|targets| targets.get(&id).cloned())
    }

    /// Resolve a full or short ID reference to a single target
    pub fn find(&self, reference: &str) -> SalesResult<AggregateTarget> {
        let mut matches = self.read_map(|targets| {
            targets
                .values()
                .filter(|t| t.id.matches(reference))
                .cloned()
                .collect::<Vec<_>>()
        })?;

        match matches.len() {
            0 => Err(SalesError::target_not_found(reference)),
            1 => Ok(matches.remove(0)),
            n => Err(SalesError::Validation(format!(
                "Reference '{}' matches {} targets; use more characters",
                reference, n
            ))),
        }
    }

    /// Targets ordered by period start, optionally limited to one granularity
    pub fn list(
        &self,
        granularity: Option<Granularity>,
        include_superseded: bool,
    ) -> SalesResult<Vec<AggregateTarget>> {
        let mut list = self.read_map(|targets| {
            targets
                .values()
                .filter(|t| include_superseded || t.is_active())
                .filter(|t| granularity.map_or(true, |g| t.granularity() == g))
                .cloned()
                .collect::<Vec<_>>()
        })?;

        list.sort_by(|a, b| {
            a.period
                .start_date()
                .ok()
                .cmp(&b.period.start_date().ok())
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(list)
    }

    /// Daily slices of active targets of one granularity inside `range`
    pub fn daily_series(
        &self,
        granularity: Granularity,
        range: &DateRange,
    ) -> SalesResult<Vec<DailyAmount>> {
        let mut series = self.read_map(|targets| {
            targets
                .values()
                .filter(|t| t.is_active() && t.granularity() == granularity)
                .flat_map(|t| t.slices_within(range))
                .collect::<Vec<_>>()
        })?;

        series.sort_by_key(|slice| slice.date);
        Ok(series)
    }

    pub fn count(&self) -> SalesResult<usize> {
        self.read_map(|targets| targets.len())
    }
}

pub(crate) fn active_starting_on(targets: &TargetMap, start: CalendarDate) -> Vec<AggregateTarget> {
    targets
        .values()
        .filter(|t| t.is_active() && t.start_date().ok() == Some(start))
        .cloned()
        .collect()
}
