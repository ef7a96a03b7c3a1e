//! Logging setup for tidyframe
//!
//! Logs go to stderr and to a daily-rotating file in the app data directory.
//! The wrangling pass itself never logs; ingestion, export and the CLI do.
//!
//! ## Usage
//!
//! ```no_run
//! use tidyframe::logging;
//!
//! // Initialize once at startup
//! logging::init(false).expect("Failed to initialize logging");
//!
//! tracing::info!("App started");
//! ```

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Gets the log directory, creating it if needed
///
/// Returns `<data_dir>/tidyframe/logs`, e.g. `~/.local/share/tidyframe/logs`
/// on Linux.
pub fn get_log_dir() -> Result<PathBuf> {
    let log_dir = crate::utils::standard_paths().log_dir;

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

/// Default filter directive: `info`, or `debug` when `verbose`
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Initializes the logging system with stderr and file output
///
/// `RUST_LOG` overrides the default level. If the log directory cannot be
/// created the file layer is skipped and only stderr is used.
///
/// # Errors
///
/// Returns error if the filter is invalid or a subscriber is already set
#[expect(clippy::print_stderr)]
pub fn init(verbose: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose)))
        .context("Failed to create env filter")?;

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr);

    let file_layer = match get_log_dir().and_then(|dir| {
        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .max_log_files(10)
            .filename_prefix("tidyframe")
            .filename_suffix("log")
            .build(&dir)
            .context("Failed to create file appender")
    }) {
        Ok(appender) => Some(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_file(true)
                .with_ansi(false)
                .with_writer(appender),
        ),
        Err(e) => {
            eprintln!("File logging disabled: {e:#}");
            None
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!("Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_location() {
        let log_dir = crate::utils::standard_paths().log_dir;
        assert!(log_dir.ends_with("tidyframe/logs") || log_dir.ends_with("tidyframe\\logs"));
    }

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "info");
        assert_eq!(default_directive(true), "debug");
    }
}
