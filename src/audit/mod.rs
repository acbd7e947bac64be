//! Audit trail for StepUp
//!
//! Every write to targets and records is appended to a line-delimited JSON
//! log with the entity state before and after the change. Superseded rows
//! stay in the stores, and the audit trail records why they were superseded.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
