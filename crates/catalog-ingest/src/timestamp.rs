//! Parsing for nullable timestamp cells.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Cell spellings that mean "no value" in exported tables.
const NULL_TOKENS: &[&str] = &[
    "", "NULL", "null", "Null", "NaN", "nan", "NA", "N/A", "n/a", "None", "<NA>", "NaT",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// A non-null cell in none of the accepted timestamp formats.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized timestamp '{0}'")]
pub struct UnrecognizedTimestamp(pub String);

/// Returns true when the cell holds one of the recognised null spellings.
pub fn is_null_token(raw: &str) -> bool {
    NULL_TOKENS.contains(&raw.trim())
}

/// Parse a nullable timestamp cell.
///
/// `Ok(None)` is a null cell. Offsets are converted to UTC and dropped;
/// date-only values read as midnight.
pub fn parse_nullable_timestamp(raw: &str) -> Result<Option<NaiveDateTime>, UnrecognizedTimestamp> {
    if is_null_token(raw) {
        return Ok(None);
    }
    let trimmed = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Some(parsed.naive_utc()));
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Some(parsed));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date.and_hms_opt(0, 0, 0));
        }
    }
    Err(UnrecognizedTimestamp(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_spellings_are_open() {
        for raw in ["", "  ", "NULL", "NaN", "None", "NA"] {
            assert_eq!(parse_nullable_timestamp(raw), Ok(None), "{raw:?}");
        }
    }

    #[test]
    fn parses_sqlite_and_iso_forms() {
        let expected = NaiveDate::from_ymd_opt(2025, 2, 26)
            .and_then(|date| date.and_hms_opt(14, 5, 0))
            .unwrap();
        assert_eq!(
            parse_nullable_timestamp("2025-02-26 14:05:00"),
            Ok(Some(expected))
        );
        assert_eq!(
            parse_nullable_timestamp("2025-02-26T14:05:00"),
            Ok(Some(expected))
        );
        assert_eq!(
            parse_nullable_timestamp("2025-02-26T14:05:00Z"),
            Ok(Some(expected))
        );
        assert_eq!(
            parse_nullable_timestamp("2025-02-26T11:05:00-03:00"),
            Ok(Some(expected))
        );
    }

    #[test]
    fn date_only_reads_as_midnight() {
        let parsed = parse_nullable_timestamp("2025-02-26").unwrap().unwrap();
        assert_eq!(parsed.to_string(), "2025-02-26 00:00:00");
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(
            parse_nullable_timestamp("yesterday"),
            Err(UnrecognizedTimestamp("yesterday".to_string()))
        );
    }
}
