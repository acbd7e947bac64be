//! Core data models for StepUp
//!
//! This module contains the data structures of the sales tracking domain:
//! calendar dates and periods, per-day amounts, aggregate targets and
//! sales records.

pub mod amount;
pub mod date;
pub mod ids;
pub mod period;
pub mod record;
pub mod status;
pub mod target;

pub use amount::{Bucket, BucketOrder, DailyAmount};
pub use date::CalendarDate;
pub use ids::{RecordId, TargetId};
pub use period::{enumerate_dates, DateRange, Granularity, Period};
pub use record::SalesRecord;
pub use status::EntryStatus;
pub use target::AggregateTarget;
