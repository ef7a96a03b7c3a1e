use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// DATA STRUCTURES

/// Inferred type of a column, assigned once when the table is ingested.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
pub enum ColumnKind {
    Float,
    Integer,
    Text,
    Unknown,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Float => "Float",
            Self::Integer => "Integer",
            Self::Text => "Text",
            Self::Unknown => "Unknown",
        }
    }

    /// Kinds that have an imputation rule.
    pub fn is_imputable(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Cells of a single column. `None` is the missing-value marker.
///
/// Unknown columns keep the textual rendering of whatever the reader produced
/// (booleans, dates, nested values) so they can still be compared, shown and
/// used as a date column.
#[derive(Clone, PartialEq, Debug)]
pub enum ColumnData {
    Float(Vec<Option<f64>>),
    Integer(Vec<Option<i64>>),
    Text(Vec<Option<String>>),
    Unknown(Vec<Option<String>>),
}

/// Hashable view of one cell, used for full-row equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CellKey<'a> {
    Missing,
    Float(u64),
    Integer(i64),
    Text(&'a str),
}

impl ColumnData {
    pub fn kind(&self) -> ColumnKind {
        match self {
            Self::Float(_) => ColumnKind::Float,
            Self::Integer(_) => ColumnKind::Integer,
            Self::Text(_) => ColumnKind::Text,
            Self::Unknown(_) => ColumnKind::Unknown,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Float(v) => v.len(),
            Self::Integer(v) => v.len(),
            Self::Text(v) | Self::Unknown(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn null_count(&self) -> usize {
        match self {
            Self::Float(v) => v.iter().filter(|c| c.is_none_or(f64::is_nan)).count(),
            Self::Integer(v) => v.iter().filter(|c| c.is_none()).count(),
            Self::Text(v) | Self::Unknown(v) => v.iter().filter(|c| c.is_none()).count(),
        }
    }

    pub fn cell_key(&self, row: usize) -> CellKey<'_> {
        match self {
            Self::Float(v) => match v.get(row).copied().flatten().filter(|x| !x.is_nan()) {
                // -0.0 and 0.0 compare equal as values
                Some(x) if x == 0.0 => CellKey::Float(0.0_f64.to_bits()),
                Some(x) => CellKey::Float(x.to_bits()),
                None => CellKey::Missing,
            },
            Self::Integer(v) => match v.get(row).copied().flatten() {
                Some(x) => CellKey::Integer(x),
                None => CellKey::Missing,
            },
            Self::Text(v) | Self::Unknown(v) => match v.get(row).and_then(Option::as_deref) {
                Some(s) => CellKey::Text(s),
                None => CellKey::Missing,
            },
        }
    }

    /// Replaces float `NaN` cells with `None`.
    pub fn nan_to_missing(&mut self) {
        if let Self::Float(values) = self {
            for v in values.iter_mut().filter(|v| v.is_some_and(f64::is_nan)) {
                *v = None;
            }
        }
    }

    /// Textual rendering of a cell, `None` when missing.
    pub fn render(&self, row: usize) -> Option<String> {
        match self {
            Self::Float(v) => v.get(row).copied().flatten().map(|x| x.to_string()),
            Self::Integer(v) => v.get(row).copied().flatten().map(|x| x.to_string()),
            Self::Text(v) | Self::Unknown(v) => v.get(row).cloned().flatten(),
        }
    }

    /// Keeps the rows whose flag in `keep` is set.
    pub fn retain_rows(&mut self, keep: &[bool]) {
        fn retain<T>(values: &mut Vec<T>, keep: &[bool]) {
            let mut flags = keep.iter();
            values.retain(|_| flags.next().copied().unwrap_or(false));
        }
        match self {
            Self::Float(v) => retain(v, keep),
            Self::Integer(v) => retain(v, keep),
            Self::Text(v) | Self::Unknown(v) => retain(v, keep),
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn float(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self::new(name, ColumnData::Float(values))
    }

    pub fn integer(name: impl Into<String>, values: Vec<Option<i64>>) -> Self {
        Self::new(name, ColumnData::Integer(values))
    }

    pub fn text<S: Into<String>>(name: impl Into<String>, values: Vec<Option<S>>) -> Self {
        let values = values.into_iter().map(|v| v.map(Into::into)).collect();
        Self::new(name, ColumnData::Text(values))
    }

    pub fn unknown<S: Into<String>>(name: impl Into<String>, values: Vec<Option<S>>) -> Self {
        let values = values.into_iter().map(|v| v.map(Into::into)).collect();
        Self::new(name, ColumnData::Unknown(values))
    }

    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Table as handed over by ingestion. The wrangler only ever reads it.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct RawTable {
    columns: Vec<Column>,
}

impl RawTable {
    /// Builds a table, checking that every column has the same length and a
    /// distinct name.
    /// Float `NaN` cells are stored as missing.
    pub fn new(mut columns: Vec<Column>) -> Result<Self, TableError> {
        for column in &mut columns {
            column.data.nan_to_missing();
        }
        let mut seen = HashSet::new();
        let expected = columns.first().map_or(0, Column::len);
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(TableError::DuplicateName(column.name.clone()));
            }
            if column.len() != expected {
                return Err(TableError::LengthMismatch {
                    column: column.name.clone(),
                    expected,
                    found: column.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

/// The promoted date column.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DateIndex {
    pub name: String,
    /// The cascade step that parsed the column, e.g. `"%Y-%m"`.
    pub format: &'static str,
    pub values: Vec<Option<NaiveDateTime>>,
}

/// Wrangled output: duplicate-free, optionally date-indexed, imputed.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct CleanedTable {
    pub index: Option<DateIndex>,
    pub columns: Vec<Column>,
}

impl CleanedTable {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn height(&self) -> usize {
        self.index.as_ref().map_or_else(
            || self.columns.first().map_or(0, Column::len),
            |idx| idx.values.len(),
        )
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn index_name(&self) -> Option<&str> {
        self.index.as_ref().map(|idx| idx.name.as_str())
    }
}

/// Snapshot of the raw table's quality, taken before any row is dropped or
/// any cell is filled.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug, Default)]
pub struct Diagnostics {
    /// Missing cells per column, in column order.
    pub null_counts: Vec<(String, usize)>,
    pub duplicate_rows: usize,
    /// Columns of unknown type that still hold missing cells after wrangling.
    pub unimputed_columns: Vec<String>,
}

impl Diagnostics {
    pub fn null_count(&self, column: &str) -> Option<usize> {
        self.null_counts
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, n)| *n)
    }

    pub fn total_nulls(&self) -> usize {
        self.null_counts.iter().map(|(_, n)| n).sum()
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Wrangled {
    pub table: CleanedTable,
    pub diagnostics: Diagnostics,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TableError {
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
    DuplicateName(String),
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LengthMismatch {
                column,
                expected,
                found,
            } => write!(
                f,
                "Column '{column}' has {found} rows, expected {expected}"
            ),
            Self::DuplicateName(name) => write!(f, "Column '{name}' appears more than once"),
        }
    }
}

impl std::error::Error for TableError {}

/// Failures that abort a wrangling call. No partial table is produced.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum WrangleError {
    /// The date column matched none of the accepted formats.
    DateParse {
        column: String,
        attempted: Vec<&'static str>,
    },
    /// A column needs filling but has no observed value to derive one from.
    EmptyColumn { column: String, kind: ColumnKind },
}

impl std::fmt::Display for WrangleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateParse { column, attempted } => write!(
                f,
                "Could not parse date column '{column}' (tried: {})",
                attempted.join(", ")
            ),
            Self::EmptyColumn { column, kind } => write!(
                f,
                "{kind} column '{column}' has no values to impute from"
            ),
        }
    }
}

impl std::error::Error for WrangleError {}
