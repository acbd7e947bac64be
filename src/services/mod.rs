//! Service layer for StepUp
//!
//! The service layer provides the operations callers use on top of a
//! [`SalesStore`](crate::storage::SalesStore): period selection, target and
//! record management, and reconciliation of targets against actual sales.

pub mod period;
pub mod reconciler;
pub mod record;
pub mod target;

pub use period::PeriodService;
pub use reconciler::{Reconciler, RequestTag, SelectionTracker, Tagged};
pub use record::RecordService;
pub use target::TargetService;
