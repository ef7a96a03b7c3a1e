//! Descriptive views over a cleaned table.
//!
//! These back the dashboard's overview table, the conversational `summary`
//! and `head` requests, and the column checks chart builders need before they
//! touch a column.

use super::cleaning::{mean, mode_first};
use super::types::{CleanedTable, ColumnData, ColumnKind, Diagnostics, Wrangled};
use chrono::{NaiveDateTime, Timelike as _};
use serde::{Deserialize, Serialize};

/// First rows of a table rendered as text, header first.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Debug)]
pub struct NumericStats {
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub q1: Option<f64>,
    pub median: Option<f64>,
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct TextStats {
    pub distinct: usize,
    pub top: Option<String>,
    pub top_freq: usize,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub enum ColumnStats {
    Numeric(NumericStats),
    Text(TextStats),
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: ColumnKind,
    /// Non-missing cells.
    pub count: usize,
    pub nulls: usize,
    pub stats: ColumnStats,
}

/// Overview of one wrangling call, as printed by the CLI.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Report {
    pub rows: usize,
    pub columns: Vec<String>,
    pub index: Option<String>,
    pub index_format: Option<String>,
    pub diagnostics: Diagnostics,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SelectionError {
    UnknownColumn(String),
}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownColumn(name) => write!(f, "Unknown column '{name}'"),
        }
    }
}

impl std::error::Error for SelectionError {}

pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    if dt.num_seconds_from_midnight() == 0 && dt.nanosecond() == 0 {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

pub fn head(table: &CleanedTable, n: usize) -> Preview {
    let mut columns = Vec::with_capacity(table.width() + 1);
    if let Some(index) = &table.index {
        columns.push(index.name.clone());
    }
    columns.extend(table.columns.iter().map(|c| c.name.clone()));

    let rows = (0..n.min(table.height()))
        .map(|row| {
            let mut cells = Vec::with_capacity(columns.len());
            if let Some(index) = &table.index {
                cells.push(
                    index
                        .values
                        .get(row)
                        .copied()
                        .flatten()
                        .map(|dt| format_timestamp(&dt))
                        .unwrap_or_default(),
                );
            }
            cells.extend(
                table
                    .columns
                    .iter()
                    .map(|c| c.data.render(row).unwrap_or_default()),
            );
            cells
        })
        .collect();

    Preview { columns, rows }
}

/// Linear-interpolated quantile of sorted values.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = q.clamp(0.0, 1.0) * last as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let (a, b) = (*sorted.get(lo)?, *sorted.get(hi)?);
    Some(a + (b - a) * (pos - lo as f64))
}

/// Sample standard deviation (n - 1), undefined below two values.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values.iter().copied())?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}

pub fn numeric_stats(values: &[f64]) -> NumericStats {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    NumericStats {
        mean: mean(values.iter().copied()),
        std_dev: std_dev(values),
        min: sorted.first().copied(),
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted.last().copied(),
    }
}

pub fn text_stats<'a>(values: impl IntoIterator<Item = &'a str>) -> TextStats {
    let values: Vec<&str> = values.into_iter().collect();
    let top = mode_first(values.iter().copied());
    let top_freq = top.map_or(0, |t| values.iter().filter(|v| **v == t).count());
    let mut distinct = values.clone();
    distinct.sort_unstable();
    distinct.dedup();
    TextStats {
        distinct: distinct.len(),
        top: top.map(str::to_owned),
        top_freq,
    }
}

/// Per-column summary of the data columns. The date index is not summarised.
pub fn describe(table: &CleanedTable) -> Vec<ColumnSummary> {
    table
        .columns
        .iter()
        .map(|col| {
            let nulls = col.data.null_count();
            let stats = match &col.data {
                ColumnData::Float(v) => {
                    let values: Vec<f64> = v.iter().flatten().copied().collect();
                    ColumnStats::Numeric(numeric_stats(&values))
                }
                ColumnData::Integer(v) => {
                    let values: Vec<f64> = v.iter().flatten().map(|&x| x as f64).collect();
                    ColumnStats::Numeric(numeric_stats(&values))
                }
                ColumnData::Text(v) | ColumnData::Unknown(v) => {
                    ColumnStats::Text(text_stats(v.iter().flatten().map(String::as_str)))
                }
            };
            ColumnSummary {
                name: col.name.clone(),
                kind: col.kind(),
                count: col.len() - nulls,
                nulls,
                stats,
            }
        })
        .collect()
}

/// Checks chart selectors against the table's data columns and index.
pub fn validate_selection(table: &CleanedTable, selected: &[&str]) -> Result<(), SelectionError> {
    for name in selected {
        if table.column(name).is_none() && table.index_name() != Some(*name) {
            return Err(SelectionError::UnknownColumn((*name).to_owned()));
        }
    }
    Ok(())
}

pub fn report(wrangled: &Wrangled) -> Report {
    let table = &wrangled.table;
    Report {
        rows: table.height(),
        columns: table.columns.iter().map(|c| c.name.clone()).collect(),
        index: table.index.as_ref().map(|i| i.name.clone()),
        index_format: table.index.as_ref().map(|i| i.format.to_owned()),
        diagnostics: wrangled.diagnostics.clone(),
    }
}
