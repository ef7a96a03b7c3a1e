//! The wrangling pass applied once to every freshly uploaded table.
//!
//! ```text
//! RawTable ──► diagnostics ──► dedup ──► date index ──► imputation ──► CleanedTable
//!               (snapshot)      (keep      (first         (per kind)
//!                                first)     candidate)
//! ```
//!
//! The pass is a pure function over its input: it clones what it needs,
//! never touches the caller's table, keeps no state between calls and does
//! no I/O. Concurrent calls on different tables are independent.

use super::cleaning::impute_column;
use super::dates::{detect_date_column, parse_date_column};
use super::types::{
    CellKey, CleanedTable, Column, ColumnData, DateIndex, Diagnostics, RawTable,
    WrangleError, Wrangled,
};
use std::collections::HashSet;

/// Cleans `table` and reports what was wrong with it.
///
/// # Errors
///
/// - [`WrangleError::DateParse`] when the detected date column fits none of
///   the cascade formats.
/// - [`WrangleError::EmptyColumn`] when a float, integer or text column has
///   missing cells but no observed value to fill them from.
pub fn wrangle(table: &RawTable) -> Result<Wrangled, WrangleError> {
    let null_counts = table
        .columns()
        .iter()
        .map(|c| (c.name.clone(), c.data.null_count()))
        .collect();
    let keep = first_occurrences(table);
    let duplicate_rows = keep.iter().filter(|k| !**k).count();

    let mut columns: Vec<Column> = table.columns().to_vec();
    if duplicate_rows > 0 {
        for column in &mut columns {
            column.data.retain_rows(&keep);
        }
    }

    let index = take_date_index(&mut columns)?;

    for column in &mut columns {
        impute_column(&column.name, &mut column.data)?;
    }

    let unimputed_columns = columns
        .iter()
        .filter(|c| !c.kind().is_imputable() && c.data.null_count() > 0)
        .map(|c| c.name.clone())
        .collect();

    Ok(Wrangled {
        table: CleanedTable { index, columns },
        diagnostics: Diagnostics {
            null_counts,
            duplicate_rows,
            unimputed_columns,
        },
    })
}

/// `true` for every row that is not an exact copy of an earlier row.
pub fn first_occurrences(table: &RawTable) -> Vec<bool> {
    let columns = table.columns();
    let mut seen: HashSet<Vec<CellKey<'_>>> = HashSet::with_capacity(table.height());
    (0..table.height())
        .map(|row| {
            let key = columns.iter().map(|c| c.data.cell_key(row)).collect();
            seen.insert(key)
        })
        .collect()
}

/// Removes the highest-priority date column from `columns` and parses it.
/// Leaves `columns` untouched when no candidate name is present.
fn take_date_index(columns: &mut Vec<Column>) -> Result<Option<DateIndex>, WrangleError> {
    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    let Some(name) = detect_date_column(&names).map(str::to_owned) else {
        return Ok(None);
    };
    let Some(pos) = columns.iter().position(|c| c.name == name) else {
        return Ok(None);
    };

    let column = columns.remove(pos);
    let rendered = render_cells(&column.data);
    let parsed = parse_date_column(&rendered).map_err(|attempted| WrangleError::DateParse {
        column: name.clone(),
        attempted,
    })?;

    Ok(Some(DateIndex {
        name,
        format: parsed.format,
        values: parsed.values,
    }))
}

fn render_cells(data: &ColumnData) -> Vec<Option<String>> {
    match data {
        ColumnData::Text(values) | ColumnData::Unknown(values) => values.clone(),
        _ => (0..data.len()).map(|row| data.render(row)).collect(),
    }
}
