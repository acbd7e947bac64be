//! Sales record service
//!
//! Entering actual sales per day, or as a total for a week or month that
//! is spread across its days.

use tracing::info;

use crate::engine::distribute;
use crate::error::{SalesError, SalesResult};
use crate::models::{CalendarDate, DateRange, Period, SalesRecord};
use crate::storage::{SalesStore, SeriesKind, SupersedeScope};

/// Service for sales record management
pub struct RecordService<'a, S: SalesStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: SalesStore + ?Sized> RecordService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Record the sales for one day, replacing any amount already entered
    pub fn record_day(&self, date: CalendarDate, amount: u64) -> SalesResult<SalesRecord> {
        let record = self.store.save_record(date, amount)?;
        info!(date = %date, amount, "recorded sales");
        Ok(record)
    }

    /// Record a total for a whole period
    ///
    /// The amount is split across the period's days the same way targets
    /// are, remainder on the first day. Each day is upserted.
    pub fn record_period(&self, period: &Period, amount: u64) -> SalesResult<Vec<SalesRecord>> {
        let slices = distribute(amount, &period.dates()?)?;

        let records = slices
            .iter()
            .map(|slice| self.store.save_record(slice.date, slice.amount))
            .collect::<SalesResult<Vec<_>>>()?;

        info!(period = %period, amount, days = records.len(), "recorded period sales");
        Ok(records)
    }

    /// Change the amount of an existing day's record
    pub fn edit_amount(&self, date: CalendarDate, amount: u64) -> SalesResult<SalesRecord> {
        let existing = self.store.list_records(&DateRange::single(date))?;
        if existing.is_empty() {
            return Err(SalesError::record_not_found(date.to_string()));
        }

        let record = self.store.save_record(date, amount)?;
        info!(date = %date, amount, "edited sales record");
        Ok(record)
    }

    /// Soft delete the records of the given days
    pub fn remove_dates(&self, dates: &[CalendarDate], reason: &str) -> SalesResult<usize> {
        if dates.is_empty() {
            return Ok(0);
        }

        let count = self.store.supersede(
            SeriesKind::Record,
            &SupersedeScope::Dates(dates.to_vec()),
            reason,
        )?;
        info!(count, reason, "removed sales records");
        Ok(count)
    }

    /// Soft delete every record inside a period
    pub fn remove_period(&self, period: &Period, reason: &str) -> SalesResult<usize> {
        let count = self.store.supersede(
            SeriesKind::Record,
            &SupersedeScope::Range(period.range()?),
            reason,
        )?;
        info!(period = %period, count, reason, "removed sales records");
        Ok(count)
    }

    /// Active records inside `range`, oldest first
    pub fn list(&self, range: &DateRange) -> SalesResult<Vec<SalesRecord>> {
        self.store.list_records(range)
    }
}
