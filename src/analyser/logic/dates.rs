//! Date-column detection and the date-format cascade.

use chrono::format::{Parsed, StrftimeItems};
use chrono::{DateTime, Datelike as _, NaiveDate, NaiveDateTime, NaiveTime};

/// Column names treated as the table's date column, highest priority first.
pub const DATE_COLUMN_CANDIDATES: [&str; 9] = [
    "date",
    "Date",
    "DATE",
    "timestamp",
    "Timestamp",
    "TIMESTAMP",
    "period",
    "Period",
    "PERIOD",
];

/// Label reported for the free-form attempt.
pub const AUTO_FORMAT: &str = "auto";

const AUTO_DATETIME_PATTERNS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const AUTO_DATE_PATTERNS: [&str; 9] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%d.%m.%Y",
    "%Y%m%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d-%b-%Y",
];

/// One step of the cascade.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DateFormat {
    /// Any of the common full date / datetime layouts, per value.
    Auto,
    /// A strict strftime pattern. Fields it lacks default to 1900-01-01.
    Pattern(&'static str),
}

impl DateFormat {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Auto => AUTO_FORMAT,
            Self::Pattern(p) => *p,
        }
    }

    pub fn parse(&self, value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        match self {
            Self::Auto => parse_auto(value),
            Self::Pattern(p) => parse_partial(value, p).filter(has_full_year),
        }
    }
}

/// Tried in order; the first one that accepts every value wins.
pub const DATE_FORMAT_CASCADE: [DateFormat; 7] = [
    DateFormat::Auto,
    DateFormat::Pattern("%m/%d"),
    DateFormat::Pattern("%Y-%m"),
    DateFormat::Pattern("%Y"),
    DateFormat::Pattern("%b %Y"),
    DateFormat::Pattern("%b %d"),
    DateFormat::Pattern("%d %b %Y"),
];

/// First candidate name present in `columns`, if any.
pub fn detect_date_column<'a>(columns: &[&'a str]) -> Option<&'a str> {
    DATE_COLUMN_CANDIDATES
        .iter()
        .find_map(|candidate| columns.iter().copied().find(|c| c == candidate))
}

/// Parsed column together with the format that produced it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ParsedDates {
    pub format: &'static str,
    pub values: Vec<Option<NaiveDateTime>>,
}

/// Runs the cascade over a column. Missing cells stay missing and never make
/// a format fail. On failure returns every label that was tried.
pub fn parse_date_column(values: &[Option<String>]) -> Result<ParsedDates, Vec<&'static str>> {
    let mut attempted = Vec::with_capacity(DATE_FORMAT_CASCADE.len());
    for format in &DATE_FORMAT_CASCADE {
        attempted.push(format.label());
        if let Some(parsed) = parse_all(values, *format) {
            return Ok(ParsedDates {
                format: format.label(),
                values: parsed,
            });
        }
    }
    Err(attempted)
}

fn parse_all(values: &[Option<String>], format: DateFormat) -> Option<Vec<Option<NaiveDateTime>>> {
    values
        .iter()
        .map(|cell| match cell {
            Some(s) => format.parse(s).map(Some),
            None => Some(None),
        })
        .collect()
}

fn parse_auto(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    AUTO_DATETIME_PATTERNS
        .iter()
        .filter_map(|p| NaiveDateTime::parse_from_str(value, p).ok())
        .find(has_full_year)
        .or_else(|| {
            AUTO_DATE_PATTERNS
                .iter()
                .filter_map(|p| NaiveDate::parse_from_str(value, p).ok())
                .map(|d| d.and_time(NaiveTime::MIN))
                .find(has_full_year)
        })
}

/// `%Y` reads one to four digits; a year field is only taken at face value
/// when it was written with four, so `"Jan 05"` is a day and not year 5.
fn has_full_year(dt: &NaiveDateTime) -> bool {
    (1000..=9999).contains(&dt.year())
}

fn parse_partial(value: &str, pattern: &str) -> Option<NaiveDateTime> {
    let mut parsed = Parsed::new();
    chrono::format::parse(&mut parsed, value, StrftimeItems::new(pattern)).ok()?;
    if !pattern.contains("%Y") {
        parsed.set_year(1900).ok()?;
    }
    if !pattern.contains("%m") && !pattern.contains("%b") {
        parsed.set_month(1).ok()?;
    }
    if !pattern.contains("%d") {
        parsed.set_day(1).ok()?;
    }
    parsed
        .to_naive_date()
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}
