//! StepUp - sales target and record tracking
//!
//! This library provides the core of the StepUp sales tracker: period
//! resolution, daily distribution of targets, zero-filling and bucketing of
//! daily series, achievement rates, and reconciliation of targets against
//! recorded sales through a pluggable store.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Core data models (dates, periods, targets, records)
//! - `engine`: Pure series computations (fill, distribute, bucket, rate)
//! - `reports`: Overview, trend, history and yearly reports
//! - `services`: Business logic and the target/record reconciler
//! - `storage`: The `SalesStore` trait and its JSON file implementation
//! - `audit`: Audit logging system
//! - `config`: Configuration and path management
//! - `logging`: Tracing subscriber setup
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use stepup_cli::config::paths::StepupPaths;
//! use stepup_cli::models::Period;
//! use stepup_cli::services::Reconciler;
//! use stepup_cli::storage::Storage;
//!
//! let storage = Storage::open(StepupPaths::new()?)?;
//! let overview = Reconciler::new(&storage).overview(&Period::month(2025, 5)?)?;
//! println!("{}%", overview.rate);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SalesError, SalesResult};
