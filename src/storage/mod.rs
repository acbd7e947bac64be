//! Storage layer for StepUp
//!
//! The engine and services see storage only through the [`SalesStore`]
//! trait. [`Storage`] implements it over JSON files with atomic writes and
//! an append-only audit trail.

pub mod file_io;
pub mod init;
pub mod records;
pub mod targets;

pub use file_io::JsonFile;
pub use init::initialize_storage;
pub use records::RecordRepository;
pub use targets::TargetRepository;

use tracing::debug;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::StepupPaths;
use crate::error::{SalesError, SalesResult};
use crate::models::{
    AggregateTarget, CalendarDate, DailyAmount, DateRange, Granularity, Period, SalesRecord,
};

/// Which stored series an operation applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Target,
    Record,
}

/// The dates a soft delete covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupersedeScope {
    Range(DateRange),
    Dates(Vec<CalendarDate>),
}

impl SupersedeScope {
    pub fn covers(&self, date: CalendarDate) -> bool {
        match self {
            SupersedeScope::Range(range) => range.contains(date),
            SupersedeScope::Dates(dates) => dates.contains(&date),
        }
    }

    /// Whether any covered date falls inside `range`
    pub fn overlaps(&self, range: &DateRange) -> bool {
        match self {
            SupersedeScope::Range(scope) => scope.intersects(range),
            SupersedeScope::Dates(dates) => dates.iter().any(|d| range.contains(*d)),
        }
    }
}

/// Persistence collaborator for targets and records
///
/// Implementations must be shareable across threads: the reconciler issues
/// its two reads concurrently.
pub trait SalesStore: Send + Sync {
    /// Active record amounts inside `range`
    fn fetch_record_series(&self, range: &DateRange) -> SalesResult<Vec<DailyAmount>>;

    /// Daily slices of active targets of one granularity inside `range`
    fn fetch_target_series(
        &self,
        granularity: Granularity,
        range: &DateRange,
    ) -> SalesResult<Vec<DailyAmount>>;

    /// Save a new target with its daily distribution
    ///
    /// Fails with `DuplicateTarget` when an active target starts on the same
    /// date.
    fn save_aggregate_target(&self, period: Period, total: u64) -> SalesResult<AggregateTarget>;

    /// Supersede active targets sharing the period's start date and save the
    /// new one in a single write
    fn replace_aggregate_target(
        &self,
        period: Period,
        total: u64,
        reason: &str,
    ) -> SalesResult<AggregateTarget>;

    /// Insert or update the active record for a day
    fn save_record(&self, date: CalendarDate, amount: u64) -> SalesResult<SalesRecord>;

    /// Soft delete every active entry of `kind` touched by `scope`
    fn supersede(&self, kind: SeriesKind, scope: &SupersedeScope, reason: &str)
        -> SalesResult<usize>;

    /// Active targets ordered by start date
    fn list_targets(&self, granularity: Option<Granularity>) -> SalesResult<Vec<AggregateTarget>>;

    /// Look a target up by full or short ID
    fn get_target(&self, reference: &str) -> SalesResult<AggregateTarget>;

    /// Soft delete one target
    fn supersede_target(&self, reference: &str, reason: &str) -> SalesResult<AggregateTarget>;

    /// Active records inside `range` ordered by date
    fn list_records(&self, range: &DateRange) -> SalesResult<Vec<SalesRecord>>;
}

/// JSON-file store providing access to all repositories
pub struct Storage {
    paths: StepupPaths,
    pub targets: TargetRepository,
    pub records: RecordRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Open storage under `paths`, creating directories and loading data
    pub fn open(paths: StepupPaths) -> SalesResult<Self> {
        paths.ensure_directories()?;

        let storage = Self {
            targets: TargetRepository::new(paths.targets_file()),
            records: RecordRepository::new(paths.records_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        };
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &StepupPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Reload all data from disk
    pub fn load_all(&self) -> SalesResult<()> {
        self.targets.load()?;
        self.records.load()
    }

    fn log_target_create(&self, target: &AggregateTarget) -> SalesResult<()> {
        self.audit.log(&AuditEntry::create(
            EntityType::Target,
            target.id.to_string(),
            Some(target.period.label()),
            target,
        ))
    }

    fn log_supersede_batch<'a, T, I>(
        &self,
        entity_type: EntityType,
        entries: I,
        reason: &str,
    ) -> SalesResult<()>
    where
        T: serde::Serialize + 'a,
        I: IntoIterator<Item = (String, String, &'a T)>,
    {
        let batch: Vec<_> = entries
            .into_iter()
            .map(|(id, subject, before)| {
                AuditEntry::supersede(entity_type, id, Some(subject), before, reason)
            })
            .collect();
        self.audit.log_batch(&batch)
    }
}

impl SalesStore for Storage {
    fn fetch_record_series(&self, range: &DateRange) -> SalesResult<Vec<DailyAmount>> {
        self.records.daily_series(range)
    }

    fn fetch_target_series(
        &self,
        granularity: Granularity,
        range: &DateRange,
    ) -> SalesResult<Vec<DailyAmount>> {
        self.targets.daily_series(granularity, range)
    }

    fn save_aggregate_target(&self, period: Period, total: u64) -> SalesResult<AggregateTarget> {
        let target = AggregateTarget::new(period, total)?;
        let start = target.start_date()?;

        self.targets.transact(|targets| {
            if !targets::active_starting_on(targets, start).is_empty() {
                return Err(SalesError::DuplicateTarget {
                    start: start.to_string(),
                });
            }
            self.log_target_create(&target)?;
            targets.insert(target.id, target.clone());
            Ok(target)
        })
    }

    fn replace_aggregate_target(
        &self,
        period: Period,
        total: u64,
        reason: &str,
    ) -> SalesResult<AggregateTarget> {
        let target = AggregateTarget::new(period, total)?;
        let start = target.start_date()?;

        let replaced = self.targets.transact(|targets| {
            let previous = targets::active_starting_on(targets, start);
            self.log_supersede_batch(
                EntityType::Target,
                previous
                    .iter()
                    .map(|t| (t.id.to_string(), t.period.label(), t)),
                reason,
            )?;
            self.log_target_create(&target)?;

            for old in &previous {
                if let Some(stored) = targets.get_mut(&old.id) {
                    stored.supersede(reason);
                }
            }
            targets.insert(target.id, target.clone());
            Ok(previous.len())
        })?;

        debug!(start = %start, superseded = replaced, "replaced aggregate target");
        Ok(target)
    }

    fn save_record(&self, date: CalendarDate, amount: u64) -> SalesResult<SalesRecord> {
        self.records.transact(|records| {
            let subject = Some(date.to_string());
            let (saved, entry) = match records::active_on(records, date).cloned() {
                Some(before) => {
                    let mut updated = before.clone();
                    updated.set_amount(amount);
                    let entry = AuditEntry::update(
                        EntityType::Record,
                        updated.id.to_string(),
                        subject,
                        &before,
                        &updated,
                    );
                    (updated, entry)
                }
                None => {
                    let record = SalesRecord::new(date, amount);
                    let entry = AuditEntry::create(
                        EntityType::Record,
                        record.id.to_string(),
                        subject,
                        &record,
                    );
                    (record, entry)
                }
            };

            self.audit.log(&entry)?;
            records.insert(saved.id, saved.clone());
            Ok(saved)
        })
    }

    fn supersede(
        &self,
        kind: SeriesKind,
        scope: &SupersedeScope,
        reason: &str,
    ) -> SalesResult<usize> {
        let count = match kind {
            SeriesKind::Target => self.targets.transact(|targets| {
                let mut touched = Vec::new();
                for target in targets.values().filter(|t| t.is_active()) {
                    if scope.overlaps(&target.range()?) {
                        touched.push(target.clone());
                    }
                }
                self.log_supersede_batch(
                    EntityType::Target,
                    touched
                        .iter()
                        .map(|t| (t.id.to_string(), t.period.label(), t)),
                    reason,
                )?;

                for old in &touched {
                    if let Some(stored) = targets.get_mut(&old.id) {
                        stored.supersede(reason);
                    }
                }
                Ok(touched.len())
            })?,
            SeriesKind::Record => self.records.transact(|records| {
                let touched: Vec<SalesRecord> = records
                    .values()
                    .filter(|r| r.is_active() && scope.covers(r.date))
                    .cloned()
                    .collect();
                self.log_supersede_batch(
                    EntityType::Record,
                    touched
                        .iter()
                        .map(|r| (r.id.to_string(), r.date.to_string(), r)),
                    reason,
                )?;

                for old in &touched {
                    if let Some(stored) = records.get_mut(&old.id) {
                        stored.supersede(reason);
                    }
                }
                Ok(touched.len())
            })?,
        };

        debug!(?kind, count, "superseded entries");
        Ok(count)
    }

    fn list_targets(&self, granularity: Option<Granularity>) -> SalesResult<Vec<AggregateTarget>> {
        self.targets.list(granularity, false)
    }

    fn get_target(&self, reference: &str) -> SalesResult<AggregateTarget> {
        self.targets.find(reference)
    }

    fn supersede_target(&self, reference: &str, reason: &str) -> SalesResult<AggregateTarget> {
        let target = self.targets.find(reference)?;

        self.targets.transact(|targets| {
            let stored = targets
                .get_mut(&target.id)
                .ok_or_else(|| SalesError::target_not_found(target.id.to_string()))?;
            if !stored.is_active() {
                return Err(SalesError::Validation(format!(
                    "Target {} is already superseded",
                    target.id
                )));
            }

            self.log_supersede_batch(
                EntityType::Target,
                [(stored.id.to_string(), stored.period.label(), &*stored)],
                reason,
            )?;
            stored.supersede(reason);
            Ok(stored.clone())
        })
    }

    fn list_records(&self, range: &DateRange) -> SalesResult<Vec<SalesRecord>> {
        self.records.list(range, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::engine::aggregate_total;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = StepupPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn d(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(d(start), d(end)).unwrap()
    }

    #[test]
    fn test_storage_creation() {
        let (temp_dir, storage) = create_test_storage();
        assert!(temp_dir.path().join("data").exists());
        assert_eq!(storage.targets.count().unwrap(), 0);
    }

    #[test]
    fn test_saved_target_distribution_sums_to_total() {
        let (_temp_dir, storage) = create_test_storage();
        let target = storage
            .save_aggregate_target(Period::month(2025, 5).unwrap(), 1_000_001)
            .unwrap();

        let series = storage
            .fetch_target_series(Granularity::Month, &target.range().unwrap())
            .unwrap();
        assert_eq!(series.len(), 31);
        assert_eq!(aggregate_total(&series).unwrap(), 1_000_001);
    }

    #[test]
    fn test_duplicate_start_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .save_aggregate_target(Period::month(2025, 5).unwrap(), 100)
            .unwrap();

        let err = storage
            .save_aggregate_target(Period::month(2025, 5).unwrap(), 200)
            .unwrap_err();
        assert!(err.is_duplicate_target());
        assert_eq!(storage.list_targets(None).unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_check_ignores_granularity() {
        let (_temp_dir, storage) = create_test_storage();
        // 2025-09-01 is a Monday: the month and its first week share a start
        storage
            .save_aggregate_target(Period::month(2025, 9).unwrap(), 100)
            .unwrap();

        let err = storage
            .save_aggregate_target(Period::week_containing(d("2025-09-01")), 50)
            .unwrap_err();
        assert!(err.is_duplicate_target());
    }

    #[test]
    fn test_overlap_with_different_start_is_allowed() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .save_aggregate_target(Period::month(2025, 5).unwrap(), 100)
            .unwrap();
        storage
            .save_aggregate_target(Period::week_containing(d("2025-05-12")), 50)
            .unwrap();

        assert_eq!(storage.list_targets(None).unwrap().len(), 2);
    }

    #[test]
    fn test_replace_supersedes_and_inserts() {
        let (_temp_dir, storage) = create_test_storage();
        let old = storage
            .save_aggregate_target(Period::month(2025, 5).unwrap(), 100)
            .unwrap();

        let new = storage
            .replace_aggregate_target(Period::month(2025, 5).unwrap(), 310, "raised")
            .unwrap();

        let active = storage.list_targets(Some(Granularity::Month)).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, new.id);

        let stored_old = storage.targets.get(old.id).unwrap().unwrap();
        assert!(!stored_old.is_active());
        assert_eq!(stored_old.supersede_reason.as_deref(), Some("raised"));

        let series = storage
            .fetch_target_series(Granularity::Month, &new.range().unwrap())
            .unwrap();
        assert_eq!(aggregate_total(&series).unwrap(), 310);
    }

    #[test]
    fn test_save_record_upserts() {
        let (_temp_dir, storage) = create_test_storage();
        let first = storage.save_record(d("2025-05-12"), 100).unwrap();
        let second = storage.save_record(d("2025-05-12"), 250).unwrap();

        assert_eq!(first.id, second.id);
        let series = storage
            .fetch_record_series(&range("2025-05-12", "2025-05-12"))
            .unwrap();
        assert_eq!(series, vec![DailyAmount::new(d("2025-05-12"), 250)]);

        let ops: Vec<_> = storage
            .audit()
            .read_all()
            .unwrap()
            .into_iter()
            .map(|e| e.operation)
            .collect();
        assert_eq!(ops, vec![Operation::Create, Operation::Update]);
    }

    #[test]
    fn test_supersede_records_by_dates() {
        let (_temp_dir, storage) = create_test_storage();
        storage.save_record(d("2025-05-12"), 1).unwrap();
        storage.save_record(d("2025-05-13"), 2).unwrap();
        storage.save_record(d("2025-05-14"), 3).unwrap();

        let scope = SupersedeScope::Dates(vec![d("2025-05-12"), d("2025-05-14")]);
        let count = storage
            .supersede(SeriesKind::Record, &scope, "cleanup")
            .unwrap();
        assert_eq!(count, 2);

        let remaining = storage
            .fetch_record_series(&range("2025-05-01", "2025-05-31"))
            .unwrap();
        assert_eq!(remaining, vec![DailyAmount::new(d("2025-05-13"), 2)]);

        // A superseded day can be recorded again
        let fresh = storage.save_record(d("2025-05-12"), 9).unwrap();
        assert!(fresh.is_active());
    }

    #[test]
    fn test_supersede_targets_by_range() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .save_aggregate_target(Period::month(2025, 5).unwrap(), 100)
            .unwrap();
        storage
            .save_aggregate_target(Period::month(2025, 6).unwrap(), 100)
            .unwrap();

        let scope = SupersedeScope::Range(range("2025-05-30", "2025-05-31"));
        let count = storage
            .supersede(SeriesKind::Target, &scope, "closed")
            .unwrap();

        assert_eq!(count, 1);
        let active = storage.list_targets(None).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].period, Period::month(2025, 6).unwrap());
    }

    #[test]
    fn test_supersede_target_by_reference() {
        let (_temp_dir, storage) = create_test_storage();
        let target = storage
            .save_aggregate_target(Period::day(d("2025-05-12")), 100)
            .unwrap();

        let removed = storage
            .supersede_target(&target.id.to_string(), "mistake")
            .unwrap();
        assert!(!removed.is_active());
        assert!(storage.list_targets(None).unwrap().is_empty());

        let again = storage.supersede_target(&target.id.to_string(), "mistake");
        assert!(matches!(again, Err(SalesError::Validation(_))));
    }

    #[test]
    fn test_reopen_sees_saved_data() {
        let (temp_dir, storage) = create_test_storage();
        storage
            .save_aggregate_target(Period::month(2025, 5).unwrap(), 100)
            .unwrap();
        storage.save_record(d("2025-05-02"), 7).unwrap();
        drop(storage);

        let paths = StepupPaths::with_base_dir(temp_dir.path().to_path_buf());
        let reopened = Storage::open(paths).unwrap();
        assert_eq!(reopened.list_targets(None).unwrap().len(), 1);
        assert_eq!(
            reopened
                .list_records(&range("2025-05-01", "2025-05-31"))
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_failed_audit_leaves_no_write() {
        let (temp_dir, storage) = create_test_storage();
        let audit_log = storage.paths().audit_log();
        std::fs::create_dir_all(&audit_log).unwrap();

        let may = Period::month(2025, 5).unwrap();
        assert!(storage.save_aggregate_target(may, 100).is_err());
        assert!(storage.save_record(d("2025-05-12"), 10).is_err());
        assert!(storage.list_targets(None).unwrap().is_empty());
        assert!(storage
            .list_records(&range("2025-05-01", "2025-05-31"))
            .unwrap()
            .is_empty());

        let reopened =
            Storage::open(StepupPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        assert!(reopened.list_targets(None).unwrap().is_empty());

        // Once the log is writable again the same save goes through
        std::fs::remove_dir(&audit_log).unwrap();
        let saved = storage.save_aggregate_target(may, 100).unwrap();
        assert_eq!(saved.total_amount, 100);
        assert_eq!(storage.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_audit_keeps_target_active() {
        let (_temp_dir, storage) = create_test_storage();
        let target = storage
            .save_aggregate_target(Period::month(2025, 5).unwrap(), 100)
            .unwrap();

        let audit_log = storage.paths().audit_log();
        std::fs::remove_file(&audit_log).unwrap();
        std::fs::create_dir_all(&audit_log).unwrap();

        assert!(storage
            .supersede_target(&target.id.to_string(), "mistake")
            .is_err());
        assert!(storage
            .supersede(
                SeriesKind::Target,
                &SupersedeScope::Range(range("2025-05-01", "2025-05-31")),
                "reset",
            )
            .is_err());
        assert_eq!(storage.list_targets(None).unwrap().len(), 1);
    }
}
