//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod record;
pub mod report;
pub mod target;

pub use record::{handle_record_command, RecordCommands};
pub use report::{handle_report_command, ReportCommands};
pub use target::{handle_target_command, TargetCommands};
