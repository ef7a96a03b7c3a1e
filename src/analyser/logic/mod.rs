pub mod cleaning;
pub mod dates;
pub mod io;
pub mod profiling;
pub mod types;
pub mod wrangle;

pub use dates::{DATE_COLUMN_CANDIDATES, DATE_FORMAT_CASCADE, DateFormat, detect_date_column};
pub use io::{cleaned_to_df, ensure_csv, load_csv, save_cleaned, table_from_df};
pub use profiling::{
    ColumnStats, ColumnSummary, Preview, Report, SelectionError, describe, head, report,
    validate_selection,
};
pub use types::{
    CleanedTable, Column, ColumnData, ColumnKind, DateIndex, Diagnostics, RawTable, TableError,
    WrangleError, Wrangled,
};
pub use wrangle::wrangle;

use crate::error::Result;
use std::path::Path;

/// Reads a CSV upload and wrangles it.
///
/// # Errors
///
/// Fails when the file is not a readable CSV or when [`wrangle`] fails.
pub fn wrangle_file(path: &Path) -> Result<Wrangled> {
    let raw = load_csv(path)?;
    let wrangled = wrangle(&raw)?;
    tracing::info!(
        "Wrangled {}: {} duplicate rows removed, {} missing cells",
        path.display(),
        wrangled.diagnostics.duplicate_rows,
        wrangled.diagnostics.total_nulls()
    );
    Ok(wrangled)
}

#[cfg(test)]
mod tests;
