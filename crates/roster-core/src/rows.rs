//! Validated upload rows and per-row outcomes.
//!
//! Raw upload rows are checked by `roster-schema` before they enter the
//! pipeline. Each row becomes a [`RowOutcome`]: either a typed [`RosterRow`] or
//! a [`RowRejection`] explaining why the row was skipped.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One student line from a roster upload, after schema validation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RosterRow {
    /// Externally supplied unique index number.
    #[schemars(length(min = 1))]
    pub external_index: String,
    /// Full name as exported, e.g. `"BOATENG, Delasi Ama (Miss)"`.
    #[serde(default)]
    pub raw_name: String,
    /// Cumulative weighted average in `[0, 100]`.
    #[serde(default)]
    #[schemars(range(min = 0, max = 100))]
    pub score: Option<f64>,
    pub admission_year: u16,
    #[serde(default)]
    pub department: Option<String>,
    pub semester: u8,
}

/// Why a row was skipped before ingestion.
#[derive(Debug, Clone, Error, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[error("row {position} rejected: {reason}")]
pub struct RowRejection {
    /// Zero-based position of the row in the upload.
    pub position: usize,
    /// Index number, when the row carried a usable one.
    pub external_index: Option<String>,
    pub reason: String,
}

/// Tagged result of validating one upload row.
pub type RowOutcome = Result<RosterRow, RowRejection>;

/// Metadata shared by every row of a batch, evaluated by the trigger policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BatchMeta {
    pub admission_year: Option<u16>,
    pub semester: Option<u8>,
    pub department: Option<String>,
}

impl BatchMeta {
    /// Derive batch metadata from the first valid row.
    #[must_use]
    pub fn from_rows(rows: &[RowOutcome]) -> Self {
        rows.iter()
            .find_map(|row| row.as_ref().ok())
            .map_or_else(Self::default, |row| Self {
                admission_year: Some(row.admission_year),
                semester: Some(row.semester),
                department: row.department.clone(),
            })
    }

    /// Fill fields left empty here from `other`. A blank department counts as empty.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self {
            admission_year: self.admission_year.or(other.admission_year),
            semester: self.semester.or(other.semester),
            department: self
                .department
                .filter(|d| !d.trim().is_empty())
                .or(other.department),
        }
    }

    /// Department with surrounding whitespace removed; `None` when blank.
    #[must_use]
    pub fn department(&self) -> Option<&str> {
        self.department
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: &str, year: u16, semester: u8, department: Option<&str>) -> RosterRow {
        RosterRow {
            external_index: index.into(),
            raw_name: String::new(),
            score: None,
            admission_year: year,
            department: department.map(String::from),
            semester,
        }
    }

    #[test]
    fn meta_comes_from_first_valid_row() {
        let rows: Vec<RowOutcome> = vec![
            Err(RowRejection {
                position: 0,
                external_index: None,
                reason: "missing index".into(),
            }),
            Ok(row("A1", 1, 1, Some("Computer Engineering"))),
            Ok(row("A2", 2, 2, Some("Other"))),
        ];
        let meta = BatchMeta::from_rows(&rows);
        assert_eq!(meta.admission_year, Some(1));
        assert_eq!(meta.semester, Some(1));
        assert_eq!(meta.department(), Some("Computer Engineering"));
    }

    #[test]
    fn meta_defaults_when_no_valid_rows() {
        assert_eq!(BatchMeta::from_rows(&[]), BatchMeta::default());
    }

    #[test]
    fn explicit_meta_wins_over_derived() {
        let explicit = BatchMeta {
            admission_year: Some(3),
            semester: None,
            department: Some("  ".into()),
        };
        let derived = BatchMeta {
            admission_year: Some(1),
            semester: Some(2),
            department: Some("Physics".into()),
        };
        let meta = explicit.or(derived);
        assert_eq!(meta.admission_year, Some(3));
        assert_eq!(meta.semester, Some(2));
        assert_eq!(meta.department(), Some("Physics"));
    }

    #[test]
    fn rejection_display_names_position() {
        let rejection = RowRejection {
            position: 3,
            external_index: None,
            reason: "externalIndex is required".into(),
        };
        assert_eq!(
            rejection.to_string(),
            "row 3 rejected: externalIndex is required"
        );
    }

    #[test]
    fn roster_row_uses_camel_case_keys() {
        let json = serde_json::to_value(row("A1", 1, 1, None)).unwrap();
        assert!(json.get("externalIndex").is_some());
        assert!(json.get("admissionYear").is_some());
        assert!(json.get("external_index").is_none());
    }
}
