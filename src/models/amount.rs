//! Per-day amounts and aggregation buckets

use serde::{Deserialize, Serialize};
use std::fmt;

use super::date::CalendarDate;

/// An amount attached to a single day
///
/// Used for both sales records and distributed target slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DailyAmount {
    pub date: CalendarDate,
    pub amount: u64,
}

impl DailyAmount {
    pub fn new(date: CalendarDate, amount: u64) -> Self {
        Self { date, amount }
    }

    pub fn zero(date: CalendarDate) -> Self {
        Self { date, amount: 0 }
    }
}

impl fmt::Display for DailyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.date, self.amount)
    }
}

/// Direction in which buckets are emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BucketOrder {
    /// Oldest bucket first, for charts
    #[default]
    Chronological,
    /// Newest bucket first, for history lists
    MostRecentFirst,
}

/// A summed group of daily amounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    /// Identifies the bucket ("1~7일", "2025-20", "2025-05")
    pub key: String,
    /// Display text for the bucket
    pub label: String,
    /// First date the bucket spans
    pub start: CalendarDate,
    /// Last date the bucket spans
    pub end: CalendarDate,
    pub total_amount: u64,
}
