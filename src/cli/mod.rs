//! CLI command handlers
//!
//! Bridges clap argument parsing with the reconciliation services.

pub mod config;
pub mod run;
pub mod window;

pub use config::handle_config_command;
pub use run::{handle_run_command, RunArgs};
pub use window::{handle_window_command, WindowArgs};

use chrono::NaiveDate;

use crate::error::{FafoError, FafoResult};

/// Parse a `YYYY-MM-DD` date, defaulting to today's local date
pub fn parse_date_or_today(date_str: Option<&str>) -> FafoResult<NaiveDate> {
    if let Some(date_str) = date_str {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
            FafoError::Validation(format!(
                "Invalid date format: '{}'. Use YYYY-MM-DD",
                date_str
            ))
        })
    } else {
        Ok(chrono::Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date_or_today(Some("2025-01-03")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap()
        );
        let err = parse_date_or_today(Some("01/03/2025")).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_default_is_today() {
        assert_eq!(
            parse_date_or_today(None).unwrap(),
            chrono::Local::now().date_naive()
        );
    }
}
