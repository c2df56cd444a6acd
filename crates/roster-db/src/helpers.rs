//! Row-to-entity parsing helpers.
//!
//! Timestamps are written with `to_rfc3339()`, but column defaults use
//! SQLite's `datetime('now')`, so both formats are accepted on read.

use chrono::{DateTime, Utc};

use crate::error::DatabaseError;

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string is neither RFC 3339 nor
/// `%Y-%m-%d %H:%M:%S`.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column into a `snake_case` serde enum.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` errors on NULL, so nullable columns go through
/// `Option<String>`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read an INTEGER column that must fit a narrower unsigned type.
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` when the stored value is out of range.
pub fn get_narrow<T: TryFrom<i64>>(row: &libsql::Row, idx: i32, column: &str) -> Result<T, DatabaseError> {
    let value = row.get::<i64>(idx)?;
    T::try_from(value)
        .map_err(|_| DatabaseError::InvalidState(format!("{column} out of range: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::enums::AssignmentStatus;

    #[test]
    fn parses_both_datetime_formats() {
        let rfc = parse_datetime("2026-02-09T14:30:00+00:00").unwrap();
        let sqlite = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(rfc, sqlite);
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn parses_status_enum() {
        let status: AssignmentStatus = parse_enum("inactive").unwrap();
        assert_eq!(status, AssignmentStatus::Inactive);
        assert!(parse_enum::<AssignmentStatus>("paused").is_err());
    }
}
