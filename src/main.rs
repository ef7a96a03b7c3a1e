//! # tidyframe command-line entry point
//!
//! ```bash
//! tidyframe wrangle --file sales.csv --output cleaned.csv
//! tidyframe summary --file sales.csv --columns revenue,region
//! tidyframe head --file sales.csv --rows 10
//! ```
//!
//! Set `RUST_LOG=debug` (or pass `--verbose`) for detailed logs.

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout)] // Allow println! in main binary

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    tidyframe::logging::init(cli.verbose)?;
    cli::run_command(cli.command)
}
