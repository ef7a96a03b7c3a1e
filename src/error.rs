//! Centralized error handling for tidyframe.
//!
//! The wrangling core reports its own typed failures
//! ([`WrangleError`](crate::analyser::logic::WrangleError)); everything that
//! touches files, polars or configuration funnels into [`AppError`] so callers
//! get one type to match on:
//!
//! ```
//! use tidyframe::error::AppError;
//!
//! fn user_message(err: &AppError) -> String {
//!     match err {
//!         AppError::Wrangle(e) => format!("Could not clean the file: {e}"),
//!         AppError::InvalidPath(_) => "Only CSV files can be uploaded".to_owned(),
//!         other => other.to_string(),
//!     }
//! }
//! ```
//!
//! [`ResultExt`] adds `.context()` to any result whose error converts into
//! [`AppError`].

use crate::analyser::logic::WrangleError;
use std::fmt;

/// Main error type for tidyframe operations.
#[derive(Debug)]
pub enum AppError {
    /// I/O errors (file operations)
    Io(std::io::Error),

    /// Data processing errors (Polars, CSV parsing)
    DataProcessing(String),

    /// The wrangling pass rejected the table
    Wrangle(WrangleError),

    /// Configuration errors
    Config(String),

    /// File not found, or not a CSV
    InvalidPath(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Wrangle(e) => write!(f, "Wrangling failed: {e}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::InvalidPath(msg) => write!(f, "Invalid path: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Wrangle(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<WrangleError> for AppError {
    fn from(err: WrangleError) -> Self {
        Self::Wrangle(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<Self>() {
            Ok(app) => app,
            Err(err) => Self::Other(format!("{err:#}")),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for AppError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

impl From<AppError> for String {
    fn from(err: AppError) -> Self {
        err.to_string()
    }
}

/// Result type alias for tidyframe operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: AppError = e.into();
            AppError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: AppError = e.into();
            AppError::Other(format!("{}: {}", f(), err))
        })
    }
}
