//! Table analysis: ingestion, the wrangling pass and descriptive views.

pub mod logic;
