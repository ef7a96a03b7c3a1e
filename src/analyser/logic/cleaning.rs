//! Imputation rules and the numeric helpers behind them.
//!
//! Every rounding step here is round-half-to-even, so a mean of `2.5` fills an
//! integer column with `2` and a mean of `3.5` fills it with `4`.

use super::types::{ColumnData, ColumnKind, WrangleError};
use std::collections::HashMap;

/// Rounds `value` to `decimals` places, ties to the even neighbour.
pub fn round_half_even(value: f64, decimals: i32) -> f64 {
    if decimals == 0 {
        return value.round_ties_even();
    }
    let factor = 10_f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0_usize;
    for v in values {
        sum += v;
        n += 1;
    }
    (n > 0).then(|| sum / n as f64)
}

/// Most frequent value. Ties go to the value seen first.
pub fn mode_first<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (pos, v) in values.into_iter().enumerate() {
        counts.entry(v).or_insert((0, pos)).0 += 1;
    }
    counts
        .into_iter()
        .max_by(|(_, (ca, fa)), (_, (cb, fb))| ca.cmp(cb).then(fb.cmp(fa)))
        .map(|(v, _)| v)
}

/// Fill value for a float column: the mean rounded to 3 decimals. `NaN`
/// cells count as missing.
pub fn float_fill(values: &[Option<f64>]) -> Option<f64> {
    mean(values.iter().flatten().copied().filter(|x| !x.is_nan())).map(|m| round_half_even(m, 3))
}

/// Fill value for an integer column: the mean rounded to a whole number.
pub fn integer_fill(values: &[Option<i64>]) -> Option<i64> {
    mean(values.iter().flatten().map(|&v| v as f64)).map(|m| round_half_even(m, 0) as i64)
}

pub fn text_fill(values: &[Option<String>]) -> Option<String> {
    mode_first(values.iter().flatten().map(String::as_str)).map(str::to_owned)
}

/// Applies the kind's imputation rule in place. Unknown columns have no rule
/// and are left as they are.
///
/// # Errors
///
/// [`WrangleError::EmptyColumn`] when the column has missing cells but no
/// observed value to fill them from.
pub fn impute_column(name: &str, data: &mut ColumnData) -> Result<(), WrangleError> {
    if data.null_count() == 0 {
        return Ok(());
    }

    let empty = |kind| WrangleError::EmptyColumn {
        column: name.to_owned(),
        kind,
    };

    match data {
        ColumnData::Float(values) => {
            let fill = float_fill(values).ok_or_else(|| empty(ColumnKind::Float))?;
            values
                .iter_mut()
                .filter(|v| v.is_none_or(f64::is_nan))
                .for_each(|v| *v = Some(fill));
        }
        ColumnData::Integer(values) => {
            let fill = integer_fill(values).ok_or_else(|| empty(ColumnKind::Integer))?;
            values.iter_mut().filter(|v| v.is_none()).for_each(|v| *v = Some(fill));
        }
        ColumnData::Text(values) => {
            let fill = text_fill(values).ok_or_else(|| empty(ColumnKind::Text))?;
            for v in values.iter_mut().filter(|v| v.is_none()) {
                *v = Some(fill.clone());
            }
        }
        ColumnData::Unknown(_) => {}
    }
    Ok(())
}
