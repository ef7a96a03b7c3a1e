use super::types::{CleanedTable, Column as TableColumn, ColumnData, RawTable};
use crate::error::{AppError, Result as AppResult};
use anyhow::{Context as _, Result};
use polars::prelude::*;
use std::path::Path;

/// Rows sampled by the CSV reader to infer column types.
pub const INFER_SCHEMA_ROWS: usize = 10_000;

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Cell values read as missing, whatever the column type.
pub const NULL_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Uploads are accepted only as `.csv` files.
///
/// # Errors
///
/// [`AppError::InvalidPath`] for any other extension.
pub fn ensure_csv(path: &Path) -> AppResult<()> {
    if extension(path) == "csv" {
        Ok(())
    } else {
        Err(AppError::InvalidPath(format!(
            "{} is not a CSV file",
            path.display()
        )))
    }
}

/// Reads a CSV upload with a header row. Cells matching [`NULL_MARKERS`] are
/// missing.
///
/// # Errors
///
/// Fails when the path is not a `.csv` file, the file cannot be read or
/// parsed, or the columns do not form a valid [`RawTable`].
pub fn load_csv(path: &Path) -> Result<RawTable> {
    ensure_csv(path)?;
    let null_values = NullValues::AllColumns(NULL_MARKERS.iter().map(|m| (*m).into()).collect());
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_null_values(Some(null_values))
        .finish()
        .context("Failed to scan CSV")?
        .collect()
        .with_context(|| format!("Failed to read CSV {}", path.display()))?;

    tracing::info!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    table_from_df(&df)
}

/// Converts a polars frame into a [`RawTable`], tagging each column with its
/// kind. Float `NaN` cells become missing.
///
/// # Errors
///
/// Fails when a column cannot be cast to its kind's representation or the
/// frame has duplicate column names.
pub fn table_from_df(df: &DataFrame) -> Result<RawTable> {
    let mut columns = Vec::with_capacity(df.width());
    for col in df.get_columns() {
        let name = col.name().to_string();
        let series = col.as_materialized_series();
        let dtype = series.dtype();

        let data = if dtype.is_float() {
            let casted = series.cast(&DataType::Float64)?;
            let values = casted
                .f64()?
                .into_iter()
                .map(|v| v.filter(|x| !x.is_nan()))
                .collect();
            ColumnData::Float(values)
        } else if dtype.is_integer() {
            let casted = series.cast(&DataType::Int64)?;
            ColumnData::Integer(casted.i64()?.into_iter().collect())
        } else if matches!(dtype, DataType::String) {
            ColumnData::Text(string_cells(series)?)
        } else {
            let casted = series
                .cast(&DataType::String)
                .with_context(|| format!("Failed to render column '{name}' as text"))?;
            ColumnData::Unknown(string_cells(&casted)?)
        };

        tracing::debug!("Column '{name}' ({dtype}) ingested as {}", data.kind());
        columns.push(TableColumn::new(name, data));
    }

    RawTable::new(columns).context("Malformed table")
}

fn string_cells(series: &Series) -> Result<Vec<Option<String>>> {
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_owned))
        .collect())
}

/// Builds a polars frame from a cleaned table. The date index, when present,
/// becomes the leading millisecond `Datetime` column.
///
/// # Errors
///
/// Fails when polars rejects a column or the frame cannot be assembled.
pub fn cleaned_to_df(table: &CleanedTable) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(table.width() + 1);

    if let Some(index) = &table.index {
        let millis: Vec<Option<i64>> = index
            .values
            .iter()
            .map(|v| v.map(|dt| dt.and_utc().timestamp_millis()))
            .collect();
        let series = Series::new(index.name.as_str().into(), millis)
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
        columns.push(Column::from(series));
    }

    for col in &table.columns {
        let name: PlSmallStr = col.name.as_str().into();
        let series = match &col.data {
            ColumnData::Float(v) => Series::new(name, v),
            ColumnData::Integer(v) => Series::new(name, v),
            ColumnData::Text(v) | ColumnData::Unknown(v) => Series::new(name, v),
        };
        columns.push(Column::from(series));
    }

    DataFrame::new(columns).context("Failed to assemble cleaned dataframe")
}

/// Writes the cleaned table as CSV, or as JSON when `path` ends in `.json`.
///
/// # Errors
///
/// Fails when the parent directory or file cannot be created or the writer
/// fails.
pub fn save_cleaned(table: &CleanedTable, path: &Path) -> Result<()> {
    let mut df = cleaned_to_df(table)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    if extension(path) == "json" {
        JsonWriter::new(file)
            .with_json_format(JsonFormat::Json)
            .finish(&mut df)
            .context("Failed to write JSON file")?;
    } else {
        CsvWriter::new(file)
            .include_header(true)
            .finish(&mut df)
            .context("Failed to write CSV file")?;
    }

    tracing::info!("Saved {} rows to {}", df.height(), path.display());
    Ok(())
}
