use crate::analyser::logic::cleaning::*;
use crate::analyser::logic::{ColumnData, ColumnKind, WrangleError};

#[test]
fn test_round_half_even_whole_numbers() {
    assert_eq!(round_half_even(0.5, 0), 0.0);
    assert_eq!(round_half_even(1.5, 0), 2.0);
    assert_eq!(round_half_even(2.5, 0), 2.0);
    assert_eq!(round_half_even(-2.5, 0), -2.0);
    assert_eq!(round_half_even(1.67, 0), 2.0);
}

#[test]
fn test_round_half_even_decimals() {
    assert_eq!(round_half_even(2.0 / 3.0, 3), 0.667);
    assert_eq!(round_half_even(1.25, 1), 1.2);
    assert_eq!(round_half_even(1.75, 1), 1.8);
    assert_eq!(round_half_even(4.0, 3), 4.0);
}

#[test]
fn test_mean() {
    assert_eq!(mean([1.0, 2.0, 3.0, 6.0]), Some(3.0));
    assert_eq!(mean(std::iter::empty()), None);
}

#[test]
fn test_mode_first() {
    assert_eq!(mode_first(["a", "b", "b", "c"]), Some("b"));
    assert_eq!(mode_first(["c", "a", "a", "c"]), Some("c"));
    assert_eq!(mode_first(["z", "y"]), Some("z"));
    assert_eq!(mode_first(std::iter::empty()), None);
}

#[test]
fn test_fill_values() {
    assert_eq!(float_fill(&[Some(1.0), None, Some(2.0), Some(2.0)]), Some(1.667));
    assert_eq!(integer_fill(&[Some(1), None, Some(2), Some(2)]), Some(2));
    assert_eq!(integer_fill(&[Some(-1), Some(-2)]), Some(-2));
    assert_eq!(
        text_fill(&[None, Some("x".to_owned()), Some("y".to_owned()), Some("y".to_owned())]),
        Some("y".to_owned())
    );
    assert_eq!(float_fill(&[None, None]), None);
}

#[test]
fn test_impute_column_fills_in_place() {
    let mut data = ColumnData::Integer(vec![Some(4), None, Some(6)]);
    impute_column("n", &mut data).unwrap();
    assert_eq!(data, ColumnData::Integer(vec![Some(4), Some(5), Some(6)]));
}

#[test]
fn test_impute_column_skips_unknown() {
    let original = ColumnData::Unknown(vec![None, Some("2023-01-01".to_owned())]);
    let mut data = original.clone();
    impute_column("when", &mut data).unwrap();
    assert_eq!(data, original);
}

#[test]
fn test_impute_column_without_gaps_is_noop() {
    let mut data = ColumnData::Float(vec![]);
    impute_column("empty", &mut data).unwrap();
    assert!(data.is_empty());
}

#[test]
fn test_impute_column_all_missing_integer() {
    let mut data = ColumnData::Integer(vec![None, None]);
    let err = impute_column("n", &mut data).unwrap_err();
    assert_eq!(
        err,
        WrangleError::EmptyColumn {
            column: "n".to_owned(),
            kind: ColumnKind::Integer,
        }
    );
}

#[test]
fn test_impute_column_treats_nan_as_missing() {
    let mut data = ColumnData::Float(vec![Some(2.0), Some(f64::NAN), None, Some(4.0)]);
    assert_eq!(data.null_count(), 2);
    assert_eq!(float_fill(&[Some(f64::NAN), Some(1.0)]), Some(1.0));

    impute_column("f", &mut data).unwrap();
    assert_eq!(
        data,
        ColumnData::Float(vec![Some(2.0), Some(3.0), Some(3.0), Some(4.0)])
    );
}
