//! # tidyframe - CSV wrangling for dashboards
//!
//! tidyframe turns an arbitrary uploaded table into an analysis-ready one:
//! exact duplicate rows are dropped, a date column is detected and parsed into
//! the index, and missing values are imputed by column type.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tidyframe::analyser::logic;
//!
//! let wrangled = logic::wrangle_file("sales.csv".as_ref())?;
//! println!("Removed {} duplicate rows", wrangled.diagnostics.duplicate_rows);
//! for (name, nulls) in &wrangled.diagnostics.null_counts {
//!     println!("{name}: {nulls} missing");
//! }
//! # Ok::<(), tidyframe::error::AppError>(())
//! ```
//!
//! ## Core Modules
//!
//! - [`analyser`]: Ingestion, wrangling and descriptive views
//!   - [`analyser::logic::wrangle`]: The pure cleaning pass
//! - [`config`]: Persistent settings
//! - [`error`]: Error types and handling utilities
//! - [`logging`]: `tracing` setup
//! - [`utils`]: Common utility functions

#![warn(clippy::all, rust_2018_idioms)]

pub mod analyser;
pub mod config;
pub mod error;
pub mod logging;
pub mod utils;
