//! Custom error types for the reconciler
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// Which month of a reconciliation window a problem was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthSide {
    Source,
    Target,
}

impl std::fmt::Display for MonthSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// The main error type for reconciler operations
#[derive(Error, Debug)]
pub enum FafoError {
    /// Missing or invalid setting, raised before any ledger interaction
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed data coming back from the ledger
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required category group is absent from one of the months
    #[error("Category group \"{group}\" not found in {side} month. Found: {found}")]
    MissingGroup {
        group: &'static str,
        side: MonthSide,
        found: String,
    },

    /// The Other group has nothing to assign the residual to
    #[error("No categories found in the Other group")]
    EmptyOtherGroup,

    /// The ledger answered with a non-success status
    #[error("Ledger error: {status} - {message}")]
    Ledger { status: u16, message: String },

    /// Transport failure while talking to the ledger
    #[error("Network error: {0}")]
    Network(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl FafoError {
    /// Create a "missing group" error listing the group names actually present
    pub fn missing_group<'a>(
        group: &'static str,
        side: MonthSide,
        found: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self::MissingGroup {
            group,
            side,
            found: found.into_iter().collect::<Vec<_>>().join(", "),
        }
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a structural validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::MissingGroup { .. } | Self::EmptyOtherGroup
        )
    }
}

impl From<std::io::Error> for FafoError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FafoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for FafoError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type alias for reconciler operations
pub type FafoResult<T> = Result<T, FafoError>;
