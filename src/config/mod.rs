//! Configuration module for StepUp
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::StepupPaths;
pub use settings::Settings;
