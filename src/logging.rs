//! Tracing subscriber setup
//!
//! `RUST_LOG` controls verbosity (default `info`); the format comes from
//! settings.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LogFormat;
use crate::error::{FafoError, FafoResult};

/// Install the global subscriber
pub fn init(format: LogFormat) -> FafoResult<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    let result = match format {
        LogFormat::Json => subscriber
            .with(fmt::layer().json().with_target(false))
            .try_init(),
        LogFormat::Pretty => subscriber
            .with(fmt::layer().with_target(false))
            .try_init(),
    };

    result.map_err(|e| FafoError::Config(format!("Failed to initialize logging: {}", e)))
}
