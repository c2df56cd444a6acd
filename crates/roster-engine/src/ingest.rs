//! Student ingestion from validated upload rows.

use roster_core::entities::{NewStudent, Student};
use roster_core::names::{normalize_name, title_case};
use roster_core::rows::{RosterRow, RowOutcome};
use roster_core::store::StudentStore;

use crate::{FailureKind, ItemFailure};

/// Result of ingesting one batch.
#[derive(Debug, Default)]
pub struct IngestOutcome {
    /// Stored students in input order. A repeated index keeps its first slot
    /// and carries the latest stored value.
    pub students: Vec<Student>,
    pub failures: Vec<ItemFailure>,
    /// Successful upsert calls, counting a repeated index every time.
    pub upserts: usize,
}

impl IngestOutcome {
    #[must_use]
    pub const fn upserted(&self) -> usize {
        self.upserts
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Build the stored form of a row: normalized name parts, title-cased family
/// name, trimmed department.
#[must_use]
pub fn build_student(row: &RosterRow) -> NewStudent {
    let parts = normalize_name(&row.raw_name);
    NewStudent {
        external_index: row.external_index.trim().to_string(),
        given_name: parts.given_with_middle(),
        family_name: title_case(&parts.family),
        score: row.score,
        admission_year: row.admission_year,
        department: row
            .department
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from),
    }
}

/// Upserts each valid row, isolating per-row failures.
pub struct RosterIngestor<'a, S: StudentStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: StudentStore + ?Sized> RosterIngestor<'a, S> {
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Ingest every row in order.
    ///
    /// Rejected rows and store failures are recorded and skipped; the rest of
    /// the batch continues.
    pub async fn ingest(&self, rows: &[RowOutcome]) -> IngestOutcome {
        let mut outcome = IngestOutcome::default();
        for row in rows {
            match row {
                Ok(row) => self.ingest_row(row, &mut outcome).await,
                Err(rejection) => {
                    tracing::warn!(
                        position = rejection.position,
                        index = rejection.external_index.as_deref().unwrap_or(""),
                        reason = %rejection.reason,
                        "ingest: row rejected"
                    );
                    outcome.failures.push(ItemFailure {
                        key: rejection.external_index.clone(),
                        kind: FailureKind::Validation,
                        reason: rejection.to_string(),
                    });
                }
            }
        }
        tracing::debug!(
            upserted = outcome.upserted(),
            failed = outcome.failed(),
            "ingest: batch done"
        );
        outcome
    }

    async fn ingest_row(&self, row: &RosterRow, outcome: &mut IngestOutcome) {
        let student = build_student(row);
        match self.store.upsert_student(&student).await {
            Ok(stored) => {
                outcome.upserts += 1;
                if let Some(existing) = outcome
                    .students
                    .iter_mut()
                    .find(|s| s.external_index == stored.external_index)
                {
                    *existing = stored;
                } else {
                    outcome.students.push(stored);
                }
            }
            Err(error) => {
                tracing::warn!(
                    index = %student.external_index,
                    error = %error,
                    "ingest: upsert failed"
                );
                outcome.failures.push(ItemFailure {
                    key: Some(student.external_index),
                    kind: FailureKind::from(&error),
                    reason: error.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use pretty_assertions::assert_eq;
    use roster_core::rows::RowRejection;

    fn row(index: &str, name: &str, score: Option<f64>) -> RosterRow {
        RosterRow {
            external_index: index.into(),
            raw_name: name.into(),
            score,
            admission_year: 1,
            department: Some(" Computer Engineering ".into()),
            semester: 1,
        }
    }

    #[test]
    fn builds_student_from_exported_name() {
        let student = build_student(&row("2041", "BOATENG, Delasi Ama (Miss)", Some(71.5)));
        assert_eq!(student.given_name, "Delasi Ama");
        assert_eq!(student.family_name, "Boateng");
        assert_eq!(student.department.as_deref(), Some("Computer Engineering"));
    }

    #[tokio::test]
    async fn rejected_rows_are_counted_not_fatal() {
        let store = MemoryStore::new();
        let rows: Vec<RowOutcome> = vec![
            Ok(row("1", "MENSAH, Kofi", Some(60.0))),
            Err(RowRejection {
                position: 1,
                external_index: None,
                reason: "externalIndex is required".into(),
            }),
            Ok(row("3", "OWUSU, Esi", None)),
        ];
        let outcome = RosterIngestor::new(&store).ingest(&rows).await;
        assert_eq!(outcome.upserted(), 2);
        assert_eq!(outcome.failed(), 1);
        assert_eq!(outcome.failures[0].kind, FailureKind::Validation);
    }

    #[tokio::test]
    async fn store_rejection_isolated_to_its_row() {
        let store = MemoryStore::new();
        store.reject_student("2").await;
        let rows: Vec<RowOutcome> = vec![
            Ok(row("1", "A, B", None)),
            Ok(row("2", "C, D", None)),
            Ok(row("3", "E, F", None)),
        ];
        let outcome = RosterIngestor::new(&store).ingest(&rows).await;
        assert_eq!(outcome.upserted(), 2);
        assert_eq!(outcome.failures[0].key.as_deref(), Some("2"));
        assert_eq!(outcome.failures[0].kind, FailureKind::Conflict);
    }

    #[tokio::test]
    async fn repeated_index_keeps_latest_value_once() {
        let store = MemoryStore::new();
        let rows: Vec<RowOutcome> = vec![
            Ok(row("1", "A, B", Some(50.0))),
            Ok(row("2", "C, D", Some(55.0))),
            Ok(row("1", "A, B", Some(80.0))),
        ];
        let outcome = RosterIngestor::new(&store).ingest(&rows).await;
        assert_eq!(outcome.upserted(), 3);
        assert_eq!(outcome.upserted() + outcome.failed(), rows.len());
        assert_eq!(outcome.students.len(), 2);
        assert_eq!(outcome.students[0].external_index, "1");
        assert_eq!(outcome.students[0].score, Some(80.0));
    }
}
