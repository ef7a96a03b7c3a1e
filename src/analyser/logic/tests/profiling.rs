use crate::analyser::logic::profiling::{format_timestamp, numeric_stats, quantile, std_dev};
use crate::analyser::logic::*;
use anyhow::Result;
use chrono::NaiveDate;

fn dated() -> Result<Wrangled> {
    let raw = RawTable::new(vec![
        Column::text("Date", vec![Some("Jan 2023"), Some("Feb 2023"), Some("Mar 2023")]),
        Column::float("revenue", vec![Some(10.0), None, Some(30.0)]),
        Column::text("region", vec![Some("east"), Some("west"), Some("east")]),
    ])?;
    Ok(wrangle(&raw)?)
}

#[test]
fn test_head_includes_index_first() -> Result<()> {
    let out = dated()?;
    let preview = head(&out.table, 2);

    assert_eq!(preview.columns, vec!["Date", "revenue", "region"]);
    assert_eq!(preview.rows.len(), 2);
    assert_eq!(preview.rows[0], vec!["2023-01-01", "10", "east"]);
    assert_eq!(preview.rows[1], vec!["2023-02-01", "20", "west"]);
    Ok(())
}

#[test]
fn test_head_clamps_to_table_height() -> Result<()> {
    let out = dated()?;
    assert_eq!(head(&out.table, 50).rows.len(), 3);
    assert!(head(&out.table, 0).rows.is_empty());
    Ok(())
}

#[test]
fn test_describe_numeric_and_text() -> Result<()> {
    let out = dated()?;
    let summary = describe(&out.table);

    assert_eq!(summary.len(), 2, "index is not summarised");
    let revenue = &summary[0];
    assert_eq!(revenue.name, "revenue");
    assert_eq!(revenue.kind, ColumnKind::Float);
    assert_eq!(revenue.count, 3);
    assert_eq!(revenue.nulls, 0);
    match &revenue.stats {
        ColumnStats::Numeric(s) => {
            assert_eq!(s.mean, Some(20.0));
            assert_eq!(s.median, Some(20.0));
            assert_eq!(s.min, Some(10.0));
            assert_eq!(s.max, Some(30.0));
            assert_eq!(s.std_dev, Some(10.0));
        }
        ColumnStats::Text(_) => panic!("expected numeric stats"),
    }

    match &summary[1].stats {
        ColumnStats::Text(s) => {
            assert_eq!(s.distinct, 2);
            assert_eq!(s.top.as_deref(), Some("east"));
            assert_eq!(s.top_freq, 2);
        }
        ColumnStats::Numeric(_) => panic!("expected text stats"),
    }
    Ok(())
}

#[test]
fn test_quantiles_interpolate_linearly() {
    let sorted = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(quantile(&sorted, 0.25), Some(1.75));
    assert_eq!(quantile(&sorted, 0.5), Some(2.5));
    assert_eq!(quantile(&sorted, 1.0), Some(4.0));
    assert_eq!(quantile(&[], 0.5), None);
}

#[test]
fn test_numeric_stats_small_samples() {
    let stats = numeric_stats(&[5.0]);
    assert_eq!(stats.mean, Some(5.0));
    assert_eq!(stats.std_dev, None);
    let spread = std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    assert_eq!(spread.map(|s| (s * 1000.0).round()), Some(2138.0));
}

#[test]
fn test_validate_selection() -> Result<()> {
    let out = dated()?;
    assert!(validate_selection(&out.table, &["revenue", "region"]).is_ok());
    assert!(validate_selection(&out.table, &["Date"]).is_ok());
    assert_eq!(
        validate_selection(&out.table, &["revenue", "profit"]),
        Err(SelectionError::UnknownColumn("profit".to_owned()))
    );
    Ok(())
}

#[test]
fn test_report_summarises_call() -> Result<()> {
    let out = dated()?;
    let report = report(&out);
    assert_eq!(report.rows, 3);
    assert_eq!(report.index.as_deref(), Some("Date"));
    assert_eq!(report.index_format.as_deref(), Some("%b %Y"));
    assert_eq!(report.columns, vec!["revenue", "region"]);
    assert_eq!(report.diagnostics.null_count("revenue"), Some(1));

    let json = serde_json::to_value(&report)?;
    assert_eq!(json["diagnostics"]["duplicate_rows"], 0);
    Ok(())
}

#[test]
fn test_format_timestamp() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    assert_eq!(format_timestamp(&day.and_hms_opt(0, 0, 0).unwrap()), "2024-03-09");
    assert_eq!(
        format_timestamp(&day.and_hms_opt(8, 5, 0).unwrap()),
        "2024-03-09 08:05:00"
    );
}
