//! Configuration module for the reconciler
//!
//! This module provides:
//! - Environment-based settings loading and validation
//! - The `HH:MM` time-of-day used by the daily schedule

pub mod settings;
pub mod time;

pub use settings::{LedgerSettings, LogFormat, ReconcileOptions, Settings};
pub use time::ReconTime;
