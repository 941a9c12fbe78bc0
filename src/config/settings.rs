//! Runtime settings for the reconciler
//!
//! Settings come from environment variables. They are read once per run and
//! never change while a run is in progress. Loading goes through a key lookup
//! function so tests can supply their own environment.

use std::fmt;
use std::str::FromStr;

use zeroize::Zeroizing;

use super::time::ReconTime;
use crate::error::{FafoError, FafoResult};
use crate::models::Money;

pub const DEFAULT_RECON_START_DAY: u32 = 28;
pub const DEFAULT_RECON_END_DAY: u32 = 5;
pub const DEFAULT_HEALTH_PORT: u16 = 8080;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = FafoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(FafoError::Config(format!(
                "FAFO_LOG_FORMAT must be pretty or json, got {}",
                s
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Connection details for the remote ledger
#[derive(Clone)]
pub struct LedgerSettings {
    /// Base URL of the ledger server
    pub server_url: String,

    /// Server password; zeroed when dropped
    pub password: Zeroizing<String>,

    /// Identifier of the budget file to open
    pub sync_id: String,
}

impl fmt::Debug for LedgerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedgerSettings")
            .field("server_url", &self.server_url)
            .field("password", &"<redacted>")
            .field("sync_id", &self.sync_id)
            .finish()
    }
}

/// Everything the reconciler needs for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Monthly spending target, whole cents and always positive
    pub monthly_target: Money,

    /// Day of month from which the current month is reconciled into the next
    pub recon_start_day: u32,

    /// Last day of month on which the previous month is reconciled into this one
    pub recon_end_day: u32,

    /// Preferred destination for the Other residual
    pub other_category: Option<String>,

    /// Compute and log everything but skip ledger writes
    pub dry_run: bool,
}

/// Settings for the reconciler
#[derive(Debug, Clone)]
pub struct Settings {
    pub ledger: LedgerSettings,
    pub monthly_target: Money,
    pub recon_start_day: u32,
    pub recon_end_day: u32,
    pub recon_time: ReconTime,
    pub other_category: Option<String>,
    pub dry_run: bool,
    /// Run the ledger's bank sync before reconciling
    pub bank_sync: bool,
    pub health_port: u16,
    pub log_format: LogFormat,
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> FafoResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings from an arbitrary key lookup
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> FafoResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let recon_start_day = optional_int(&get, "FAFO_RECON_START_DAY", DEFAULT_RECON_START_DAY as i64)?;
        let recon_end_day = optional_int(&get, "FAFO_RECON_END_DAY", DEFAULT_RECON_END_DAY as i64)?;
        let recon_time_str = get("FAFO_RECON_TIME").unwrap_or_else(|| ReconTime::default().to_string());

        if !(1..=31).contains(&recon_start_day) {
            return Err(FafoError::Config(format!(
                "FAFO_RECON_START_DAY must be 1-31, got {}",
                recon_start_day
            )));
        }
        if !(1..=28).contains(&recon_end_day) {
            return Err(FafoError::Config(format!(
                "FAFO_RECON_END_DAY must be 1-28, got {}",
                recon_end_day
            )));
        }
        let recon_time: ReconTime = recon_time_str.parse().map_err(|_| {
            FafoError::Config(format!(
                "FAFO_RECON_TIME must be HH:MM format, got {}",
                recon_time_str
            ))
        })?;

        let target_str = required(&get, "FAFO_MONTHLY_TARGET")?;
        let monthly_target = target_str
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Money::from_decimal)
            .filter(Money::is_positive)
            .ok_or_else(|| {
                FafoError::Config(format!(
                    "FAFO_MONTHLY_TARGET must be a positive number, got {}",
                    target_str
                ))
            })?;

        let ledger = LedgerSettings {
            server_url: required(&get, "ACTUAL_SERVER_URL")?,
            password: Zeroizing::new(required(&get, "ACTUAL_SERVER_PASSWORD")?),
            sync_id: required(&get, "ACTUAL_SYNC_ID")?,
        };

        let health_port = optional_int(&get, "FAFO_HEALTH_PORT", DEFAULT_HEALTH_PORT as i64)?;
        let health_port = u16::try_from(health_port)
            .ok()
            .filter(|p| *p > 0)
            .ok_or_else(|| {
                FafoError::Config(format!(
                    "FAFO_HEALTH_PORT must be 1-65535, got {}",
                    health_port
                ))
            })?;

        let log_format = match get("FAFO_LOG_FORMAT") {
            Some(v) => v.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            ledger,
            monthly_target,
            recon_start_day: recon_start_day as u32,
            recon_end_day: recon_end_day as u32,
            recon_time,
            other_category: get("FAFO_OTHER_CATEGORY"),
            dry_run: get("FAFO_DRY_RUN").as_deref() == Some("true"),
            bank_sync: get("FAFO_BANK_SYNC").as_deref() == Some("true"),
            health_port,
            log_format,
        })
    }

    /// The subset of settings a reconciliation run uses
    pub fn reconcile_options(&self) -> ReconcileOptions {
        ReconcileOptions {
            monthly_target: self.monthly_target,
            recon_start_day: self.recon_start_day,
            recon_end_day: self.recon_end_day,
            other_category: self.other_category.clone(),
            dry_run: self.dry_run,
        }
    }
}

fn required<F>(get: &F, name: &str) -> FafoResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    get(name).ok_or_else(|| {
        FafoError::Config(format!("Missing required environment variable: {}", name))
    })
}

fn optional_int<F>(get: &F, name: &str, fallback: i64) -> FafoResult<i64>
where
    F: Fn(&str) -> Option<String>,
{
    match get(name) {
        None => Ok(fallback),
        Some(value) => value
            .trim()
            .parse::<i64>()
            .map_err(|_| FafoError::Config(format!("Invalid integer for {}: {}", name, value))),
    }
}
