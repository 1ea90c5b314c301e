#![forbid(unsafe_code)]

//! Core domain model and business logic for the Luna cycle tracker.
//!
//! This crate provides:
//! - Domain types (cycle records, profile, phases)
//! - Average cycle length estimation
//! - Phase classification and next-cycle forecasting
//! - History mutation rules
//! - Persistence (JSON store, CSV export)

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod statistics;
pub mod phase;
pub mod forecast;
pub mod record;
pub mod store;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::{Config, PhaseRules};
pub use statistics::{compute_average_length, cycle_summary, CycleSummary, DEFAULT_CYCLE_LENGTH};
pub use phase::classify;
pub use forecast::{forecast_next, next_start_from, NextCycle, NextCycleStatus};
pub use record::{RecordRejection, RecordWarning, RecordedCycle};
pub use export::export_csv;
