//! Target/record reconciliation
//!
//! Fetches the target and record series for a period or range, aligns them
//! and hands them to the report builders. Both reads are issued together
//! and joined; nothing is computed from one side alone.
//!
//! Callers that let the user switch selections while a fetch is running
//! tag each request through a [`SelectionTracker`] and drop results whose
//! tag is no longer current.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::thread;

use tracing::debug;

use crate::error::{SalesError, SalesResult};
use crate::models::{BucketOrder, CalendarDate, DailyAmount, DateRange, Granularity, Period};
use crate::reports::{
    compute_overview, compute_trend, compute_week_of_month_trend, Overview, TargetHistory, Trend,
    YearSummary,
};
use crate::storage::SalesStore;

/// Identifies the selection a request was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTag {
    generation: u64,
    pub granularity: Granularity,
    pub range: DateRange,
}

/// A result paired with the request that produced it
#[derive(Debug, Clone)]
pub struct Tagged<T> {
    pub tag: RequestTag,
    pub value: T,
}

/// Tracks the latest selection so late results can be discarded
#[derive(Debug, Default)]
pub struct SelectionTracker {
    next_generation: AtomicU64,
    current: Mutex<Option<RequestTag>>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new selection; earlier tags become stale
    pub fn select(&self, granularity: Granularity, range: DateRange) -> SalesResult<RequestTag> {
        let tag = RequestTag {
            generation: self.next_generation.fetch_add(1, Ordering::SeqCst) + 1,
            granularity,
            range,
        };

        let mut current = self
            .current
            .lock()
            .map_err(|e| SalesError::Storage(format!("Failed to acquire selection lock: {}", e)))?;
        *current = Some(tag);
        Ok(tag)
    }

    /// Select the range of a period
    pub fn select_period(&self, period: &Period) -> SalesResult<RequestTag> {
        self.select(period.granularity(), period.range()?)
    }

    pub fn current(&self) -> Option<RequestTag> {
        self.current.lock().ok().and_then(|current| *current)
    }

    pub fn is_current(&self, tag: &RequestTag) -> bool {
        self.current().map_or(false, |current| current == *tag)
    }

    /// Unwrap a result if it belongs to the current selection
    pub fn accept<T>(&self, tagged: Tagged<T>) -> Option<T> {
        if self.is_current(&tagged.tag) {
            Some(tagged.value)
        } else {
            debug!(
                generation = tagged.tag.generation,
                range = %tagged.tag.range,
                "discarding stale result"
            );
            None
        }
    }
}

/// Orchestrates store reads and report computation
pub struct Reconciler<'a, S: SalesStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: SalesStore + ?Sized> Reconciler<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Read both series for `range` concurrently and wait for both
    fn fetch_both(
        &self,
        granularity: Granularity,
        range: &DateRange,
    ) -> SalesResult<(Vec<DailyAmount>, Vec<DailyAmount>)> {
        let store = self.store;

        let (targets, records) = thread::scope(|scope| {
            let targets = scope.spawn(move || store.fetch_target_series(granularity, range));
            let records = scope.spawn(move || store.fetch_record_series(range));
            (targets.join(), records.join())
        });

        let targets = targets
            .map_err(|_| SalesError::Storage("Target fetch panicked".into()))??;
        let records = records
            .map_err(|_| SalesError::Storage("Record fetch panicked".into()))??;

        debug!(
            %granularity,
            %range,
            targets = targets.len(),
            records = records.len(),
            "joined series fetch"
        );
        Ok((targets, records))
    }

    /// Totals and rate for one period
    pub fn overview(&self, period: &Period) -> SalesResult<Overview> {
        self.overview_for_range(period.granularity(), &period.range()?)
    }

    /// Totals and rate over an explicit range, against targets of `granularity`
    pub fn overview_for_range(
        &self,
        granularity: Granularity,
        range: &DateRange,
    ) -> SalesResult<Overview> {
        let (targets, records) = self.fetch_both(granularity, range)?;
        compute_overview(range, &targets, &records)
    }

    /// Per-day aligned series over exactly `range`
    pub fn trend(&self, granularity: Granularity, range: &DateRange) -> SalesResult<Trend> {
        let (targets, records) = self.fetch_both(granularity, range)?;
        compute_trend(range, &targets, &records)
    }

    /// Chart series for a period
    ///
    /// Month periods are grouped into day-of-month blocks; weeks and days
    /// are plotted per day.
    pub fn chart(&self, period: &Period) -> SalesResult<Trend> {
        let range = period.range()?;
        let (targets, records) = self.fetch_both(period.granularity(), &range)?;

        match period {
            Period::Month { .. } => compute_week_of_month_trend(&range, &targets, &records),
            Period::Week { .. } | Period::Day { .. } => compute_trend(&range, &targets, &records),
        }
    }

    /// Overview for a tagged selection
    pub fn overview_tagged(&self, tag: RequestTag) -> SalesResult<Tagged<Overview>> {
        Ok(Tagged {
            tag,
            value: self.overview_for_range(tag.granularity, &tag.range)?,
        })
    }

    /// Trend for a tagged selection
    pub fn trend_tagged(&self, tag: RequestTag) -> SalesResult<Tagged<Trend>> {
        Ok(Tagged {
            tag,
            value: self.trend(tag.granularity, &tag.range)?,
        })
    }

    /// Saved targets of one granularity with the actual sales over each
    pub fn target_history(
        &self,
        granularity: Granularity,
        order: BucketOrder,
    ) -> SalesResult<TargetHistory> {
        let targets = self.store.list_targets(Some(granularity))?;

        let mut span: Option<(CalendarDate, CalendarDate)> = None;
        for target in &targets {
            let range = target.range()?;
            span = Some(match span {
                Some((start, end)) => (start.min(range.start()), end.max(range.end())),
                None => (range.start(), range.end()),
            });
        }

        let records = match span {
            Some((start, end)) => self.store.fetch_record_series(&DateRange::new(start, end)?)?,
            None => Vec::new(),
        };

        TargetHistory::build(granularity, order, &targets, &records)
    }

    /// Monthly breakdown of a calendar year against month targets
    pub fn year_summary(&self, year: i32) -> SalesResult<YearSummary> {
        let range = DateRange::new(
            CalendarDate::from_ymd(year, 1, 1)?,
            CalendarDate::from_ymd(year, 12, 31)?,
        )?;
        let (targets, records) = self.fetch_both(Granularity::Month, &range)?;
        YearSummary::compute(&range, &targets, &records)
    }
}
