//! FAFO Budget Reconciler
//!
//! Keeps a three-bucket spending plan (Fixed, Flex, Allowances) consistent
//! from one month to the next in an envelope-style budget ledger, and puts
//! whatever remains of the monthly target into a single "Other" category.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Environment-driven settings
//! - `error`: Custom error types
//! - `models`: Money, months, categories and budget months
//! - `ledger`: The ledger service trait, its HTTP client and an in-memory double
//! - `services`: Window selection, the reconciliation pass and the scheduled job
//! - `scheduler`: The daily run loop
//! - `health`: Liveness endpoint
//! - `cli` / `display`: Command handlers and terminal output
//!
//! # Example
//!
//! ```rust,ignore
//! use fafo_reconciler::config::Settings;
//! use fafo_reconciler::services::run_job;
//!
//! let settings = Settings::from_env()?;
//! let outcome = run_job(&settings, chrono::Local::now().date_naive()).await?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod health;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod services;

pub use error::FafoError;
