//! Target service
//!
//! Saving, overwriting, editing and removing aggregate targets. Edits never
//! touch a stored target: the old one is superseded and a new one with a
//! fresh distribution takes its place.

use tracing::info;

use crate::error::{SalesError, SalesResult};
use crate::models::{AggregateTarget, BucketOrder, Granularity, Period};
use crate::reports::TargetHistory;
use crate::storage::SalesStore;

use super::reconciler::Reconciler;

/// Service for target management
pub struct TargetService<'a, S: SalesStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: SalesStore + ?Sized> TargetService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Save a target for a period
    ///
    /// Fails with `DuplicateTarget` when an active target already starts on
    /// the same date; the caller decides whether to [`overwrite`](Self::overwrite).
    pub fn set(&self, period: Period, total: u64) -> SalesResult<AggregateTarget> {
        let target = self.store.save_aggregate_target(period, total)?;
        info!(period = %period, total, id = %target.id, "saved target");
        Ok(target)
    }

    /// Replace whatever target starts on the same date as `period`
    pub fn overwrite(&self, period: Period, total: u64) -> SalesResult<AggregateTarget> {
        let target = self
            .store
            .replace_aggregate_target(period, total, "overwritten")?;
        info!(period = %period, total, id = %target.id, "overwrote target");
        Ok(target)
    }

    /// Change the total of an existing target
    pub fn edit_amount(&self, reference: &str, total: u64) -> SalesResult<AggregateTarget> {
        let existing = self.store.get_target(reference)?;
        if !existing.is_active() {
            return Err(SalesError::Validation(format!(
                "Target {} is superseded and cannot be edited",
                existing.id
            )));
        }

        let target = self.store.replace_aggregate_target(
            existing.period,
            total,
            &format!("amount changed from {}", existing.total_amount),
        )?;
        info!(old = %existing.id, new = %target.id, total, "edited target");
        Ok(target)
    }

    /// Soft delete a target
    pub fn remove(&self, reference: &str, reason: &str) -> SalesResult<AggregateTarget> {
        let target = self.store.supersede_target(reference, reason)?;
        info!(id = %target.id, reason, "removed target");
        Ok(target)
    }

    pub fn get(&self, reference: &str) -> SalesResult<AggregateTarget> {
        self.store.get_target(reference)
    }

    /// Active targets, optionally of one granularity
    pub fn list(&self, granularity: Option<Granularity>) -> SalesResult<Vec<AggregateTarget>> {
        self.store.list_targets(granularity)
    }

    /// Saved targets with the actual sales achieved over each
    pub fn history(
        &self,
        granularity: Granularity,
        order: BucketOrder,
    ) -> SalesResult<TargetHistory> {
        Reconciler::new(self.store).target_history(granularity, order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::StepupPaths;
    use crate::engine::aggregate_total;
    use crate::models::CalendarDate;
    use crate::storage::Storage;
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

    #[test]
    fn test_set_then_duplicate_then_overwrite() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TargetService::new(&storage);
        let may = Period::month(2025, 5).unwrap();

        service.set(may, 1_000).unwrap();
        let err = service.set(may, 2_000).unwrap_err();
        assert!(err.is_duplicate_target());

        let replaced = service.overwrite(may, 2_000).unwrap();
        let active = service.list(None).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, replaced.id);
        assert_eq!(aggregate_total(&active[0].distribution).unwrap(), 2_000);
    }

    #[test]
    fn test_edit_amount_supersedes_and_redistributes() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TargetService::new(&storage);
        let week = Period::week_containing(d("2025-05-12"));
        let original = service.set(week, 70).unwrap();

        let edited = service.edit_amount(&original.id.to_string(), 71).unwrap();

        assert_ne!(edited.id, original.id);
        assert_eq!(edited.distribution[0].amount, 11);
        assert_eq!(edited.distribution[1].amount, 10);

        let old = storage.targets.get(original.id).unwrap().unwrap();
        assert!(!old.is_active());
        assert_eq!(old.supersede_reason.as_deref(), Some("amount changed from 70"));
    }

    #[test]
    fn test_edit_superseded_target_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TargetService::new(&storage);
        let target = service.set(Period::day(d("2025-05-12")), 5).unwrap();
        service.remove(&target.id.to_string(), "mistake").unwrap();

        let err = service.edit_amount(&target.id.to_string(), 6).unwrap_err();
        assert!(matches!(err, SalesError::Validation(_)));
    }

    #[test]
    fn test_unknown_reference() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TargetService::new(&storage);
        assert!(service.get("tgt-00000000").unwrap_err().is_not_found());
    }

    #[test]
    fn test_history() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TargetService::new(&storage);
        service.set(Period::month(2025, 5).unwrap(), 100).unwrap();

        let history = service
            .history(Granularity::Month, BucketOrder::MostRecentFirst)
            .unwrap();
        assert_eq!(history.rows.len(), 1);
        assert_eq!(history.rows[0].rate, 0.0);
    }
}
