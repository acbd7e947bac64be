//! Reports module for StepUp
//!
//! Pure report builders over already-fetched series: period overview,
//! chart trend, target history and yearly summary.

pub mod history;
pub mod overview;
pub mod trend;

pub use history::{MonthRow, TargetHistory, TargetHistoryRow, YearSummary};
pub use overview::{compute_overview, DataPresence, Overview};
pub use trend::{compute_trend, compute_week_of_month_trend, Trend};
