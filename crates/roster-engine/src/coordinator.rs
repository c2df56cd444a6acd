//! One upload, end to end: ingest, decide, allocate, persist, report.

use std::fmt::Write as _;

use roster_core::entities::{Staff, Student};
use roster_core::responses::BatchReport;
use roster_core::rows::{BatchMeta, RowOutcome};
use roster_core::store::{AllocatorDirectory, AssignmentStore, StudentStore};

use crate::allocation::{AllocationSummary, allocate};
use crate::error::EngineError;
use crate::ingest::{IngestOutcome, RosterIngestor};
use crate::persist::PairingPersister;
use crate::policy::TriggerPolicy;
use crate::ItemFailure;

/// Everything a run produced, for callers that want more than the report.
#[derive(Debug, Default)]
pub struct BatchRun {
    pub report: BatchReport,
    /// Skipped rows and pairs, in the order they were encountered.
    pub failures: Vec<ItemFailure>,
    /// Per-allocator totals when allocation ran.
    pub summary: Option<AllocationSummary>,
}

/// Runs batches against injected stores.
///
/// Stages run strictly in sequence. Only an empty batch is an error; every
/// other failure is counted in the report.
pub struct BatchCoordinator<'a, S: ?Sized, A: ?Sized, D: ?Sized, P> {
    students: &'a S,
    assignments: &'a A,
    directory: &'a D,
    policy: P,
}

impl<'a, S, A, D, P> BatchCoordinator<'a, S, A, D, P>
where
    S: StudentStore + ?Sized,
    A: AssignmentStore + ?Sized,
    D: AllocatorDirectory + ?Sized,
    P: TriggerPolicy,
{
    pub const fn new(students: &'a S, assignments: &'a A, directory: &'a D, policy: P) -> Self {
        Self {
            students,
            assignments,
            directory,
            policy,
        }
    }

    /// Run one batch and return its report.
    ///
    /// # Errors
    ///
    /// `EngineError::EmptyBatch` when `rows` is empty. Nothing is written.
    pub async fn run(&self, rows: &[RowOutcome], meta: &BatchMeta) -> Result<BatchReport, EngineError> {
        Ok(self.execute(rows, meta).await?.report)
    }

    /// Like [`run`](Self::run), keeping item failures and the allocation summary.
    ///
    /// # Errors
    ///
    /// `EngineError::EmptyBatch` when `rows` is empty.
    pub async fn execute(&self, rows: &[RowOutcome], meta: &BatchMeta) -> Result<BatchRun, EngineError> {
        if rows.is_empty() {
            return Err(EngineError::EmptyBatch);
        }

        let ingested = RosterIngestor::new(self.students).ingest(rows).await;
        let department = meta.department().map(String::from);
        let mut run = BatchRun {
            report: BatchReport {
                students_upserted: ingested.upserted(),
                students_failed: ingested.failed(),
                department: department.clone(),
                ..BatchReport::default()
            },
            ..BatchRun::default()
        };
        let IngestOutcome {
            students, failures, ..
        } = ingested;
        run.failures = failures;

        if self.policy.should_allocate(meta) {
            run.report.allocation_triggered = true;
            tracing::debug!(policy = %self.policy.describe(), "coordinator: allocation triggered");
            match department.as_deref() {
                None => {
                    run.report.skip_reason = Some(EngineError::MissingDepartment.to_string());
                }
                Some(department) => self.allocate_batch(department, &students, &mut run).await,
            }
        } else {
            tracing::debug!(policy = %self.policy.describe(), "coordinator: students-only batch");
        }

        run.report.message = summarize(&run.report);
        tracing::info!(
            upserted = run.report.students_upserted,
            students_failed = run.report.students_failed,
            pairings = run.report.pairings_created,
            pairings_failed = run.report.pairings_failed,
            triggered = run.report.allocation_triggered,
            skip_reason = run.report.skip_reason.as_deref().unwrap_or(""),
            "coordinator: batch complete"
        );
        Ok(run)
    }

    async fn allocate_batch(&self, department: &str, students: &[Student], run: &mut BatchRun) {
        let allocators: Vec<Staff> = match self.directory.active_allocators(department).await {
            Ok(allocators) => allocators,
            Err(error) => {
                tracing::warn!(department, error = %error, "coordinator: allocator lookup failed");
                run.report.skip_reason = Some(EngineError::Store(error).to_string());
                return;
            }
        };

        let pairings = match allocate(students, &allocators) {
            Ok(pairings) => pairings,
            Err(EngineError::NoEligibleAllocators { .. }) => {
                let error = EngineError::NoEligibleAllocators {
                    department: Some(department.to_string()),
                };
                tracing::warn!(department, "coordinator: {error}");
                run.report.skip_reason = Some(error.to_string());
                return;
            }
            Err(error) => {
                run.report.skip_reason = Some(error.to_string());
                return;
            }
        };
        tracing::debug!(
            department,
            students = students.len(),
            allocators = allocators.len(),
            pairs = pairings.len(),
            "coordinator: allocation computed"
        );

        let persisted = PairingPersister::new(self.assignments).persist(&pairings).await;
        run.report.pairings_created = persisted.created();
        run.report.pairings_failed = persisted.failed();
        run.summary = Some(AllocationSummary::from_pairings(&allocators, &pairings));
        run.failures.extend(persisted.failures);
    }
}

fn summarize(report: &BatchReport) -> String {
    let mut message = if let Some(reason) = &report.skip_reason {
        format!(
            "Saved {} students; allocation skipped: {reason}",
            report.students_upserted
        )
    } else if report.allocation_triggered {
        format!(
            "Saved {} students and created {} pairings",
            report.students_upserted, report.pairings_created
        )
    } else {
        format!(
            "Students-only update: saved {} students (allocation not triggered)",
            report.students_upserted
        )
    };
    let failed = report.students_failed + report.pairings_failed;
    if failed > 0 {
        let _ = write!(message, " ({failed} items failed)");
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::memory::fixtures::staff;
    use crate::policy::FirstYearFirstSemester;
    use pretty_assertions::assert_eq;
    use roster_core::rows::RosterRow;

    fn rows(n: usize, year: u16, semester: u8) -> Vec<RowOutcome> {
        (0..n)
            .map(|i| {
                Ok(RosterRow {
                    external_index: format!("{}", 1000 + i),
                    raw_name: format!("MENSAH, Kofi{i}"),
                    score: Some(50.0 + i as f64),
                    admission_year: year,
                    department: Some("CE".into()),
                    semester,
                })
            })
            .collect()
    }

    fn meta(year: u16, semester: u8, department: Option<&str>) -> BatchMeta {
        BatchMeta {
            admission_year: Some(year),
            semester: Some(semester),
            department: department.map(String::from),
        }
    }

    #[tokio::test]
    async fn empty_batch_aborts() {
        let store = MemoryStore::new();
        let coordinator =
            BatchCoordinator::new(&store, &store, &store, FirstYearFirstSemester::default());
        let err = coordinator.run(&[], &BatchMeta::default()).await.unwrap_err();
        assert!(matches!(err, EngineError::EmptyBatch));
        assert_eq!(store.student_count().await, 0);
    }

    #[tokio::test]
    async fn triggered_batch_creates_pairings() {
        let store = MemoryStore::with_staff([staff("stf-a", "CE"), staff("stf-b", "CE")]).await;
        let coordinator =
            BatchCoordinator::new(&store, &store, &store, FirstYearFirstSemester::default());
        let run = coordinator
            .execute(&rows(5, 1, 1), &meta(1, 1, Some("CE")))
            .await
            .unwrap();
        assert!(run.report.allocation_triggered);
        assert_eq!(run.report.pairings_created, 5);
        assert_eq!(run.report.skip_reason, None);
        assert_eq!(run.report.message, "Saved 5 students and created 5 pairings");
        let summary = run.summary.unwrap();
        assert_eq!(summary.spread(), 1);
    }

    #[tokio::test]
    async fn missing_department_skips_allocation() {
        let store = MemoryStore::with_staff([staff("stf-a", "CE")]).await;
        let coordinator =
            BatchCoordinator::new(&store, &store, &store, FirstYearFirstSemester::default());
        let report = coordinator
            .run(&rows(3, 1, 1), &meta(1, 1, Some("  ")))
            .await
            .unwrap();
        assert!(report.allocation_triggered);
        assert_eq!(report.students_upserted, 3);
        assert_eq!(report.pairings_created, 0);
        assert_eq!(
            report.skip_reason.as_deref(),
            Some(EngineError::MissingDepartment.to_string().as_str())
        );
    }

    #[tokio::test]
    async fn closure_policy_forces_allocation() {
        let store = MemoryStore::with_staff([staff("stf-a", "CE")]).await;
        let coordinator = BatchCoordinator::new(&store, &store, &store, |_: &BatchMeta| true);
        let report = coordinator
            .run(&rows(2, 3, 2), &meta(3, 2, Some("CE")))
            .await
            .unwrap();
        assert_eq!(report.pairings_created, 2);
    }
}
