//! Period bucketing and reconciliation engine
//!
//! Pure functions over caller-owned series: zero-filling, even distribution
//! of an amount across days, bucketing of daily series and achievement
//! rates. Nothing here performs I/O or keeps state between calls.

pub mod bucket;
pub mod distribute;
pub mod fill;
pub mod rate;

pub use bucket::{group_by_iso_week, group_by_month, group_by_week_of_month};
pub use distribute::{aggregate_total, checked_sum, distribute};
pub use fill::fill;
pub use rate::{rate, AchievementBand};
