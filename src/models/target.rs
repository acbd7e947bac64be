//! Aggregate sales target model
//!
//! A target is the goal amount for one period. At creation it is split into
//! per-day slices covering every day of the period; the slices always sum to
//! the total exactly. Targets are superseded, never edited in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::amount::DailyAmount;
use super::date::CalendarDate;
use super::ids::TargetId;
use super::period::{DateRange, Granularity, Period};
use super::status::EntryStatus;
use crate::engine::distribute;
use crate::error::SalesResult;

/// A user-entered goal for a period, with its daily distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateTarget {
    pub id: TargetId,
    pub period: Period,
    pub total_amount: u64,
    #[serde(default)]
    pub status: EntryStatus,
    /// Per-day slices, one per day of the period
    pub distribution: Vec<DailyAmount>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superseded_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supersede_reason: Option<String>,
}

impl AggregateTarget {
    /// Create a target and distribute its total across the period's days
    pub fn new(period: Period, total_amount: u64) -> SalesResult<Self> {
        let distribution = distribute(total_amount, &period.dates()?)?;
        let now = Utc::now();
        Ok(Self {
            id: TargetId::new(),
            period,
            total_amount,
            status: EntryStatus::Active,
            distribution,
            created_at: now,
            updated_at: now,
            superseded_at: None,
            supersede_reason: None,
        })
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn granularity(&self) -> Granularity {
        self.period.granularity()
    }

    pub fn range(&self) -> SalesResult<DateRange> {
        self.period.range()
    }

    pub fn start_date(&self) -> SalesResult<CalendarDate> {
        self.period.start_date()
    }

    /// Distributed slices that fall inside `range`
    pub fn slices_within<'a>(
        &'a self,
        range: &'a DateRange,
    ) -> impl Iterator<Item = DailyAmount> + 'a {
        self.distribution
            .iter()
            .filter(move |slice| range.contains(slice.date))
            .copied()
    }

    /// Mark this target inactive
    pub fn supersede(&mut self, reason: impl Into<String>) {
        let now = Utc::now();
        self.status = EntryStatus::Superseded;
        self.superseded_at = Some(now);
        self.supersede_reason = Some(reason.into());
        self.updated_at = now;
    }
}
