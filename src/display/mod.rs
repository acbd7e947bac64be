//! Display formatting for terminal output
//!
//! Formats targets, records and audit entries as tables for the CLI.

pub mod audit;
pub mod record;
pub mod target;

pub use audit::format_audit_entries;
pub use record::format_record_list;
pub use target::{format_target_details, format_target_list};
