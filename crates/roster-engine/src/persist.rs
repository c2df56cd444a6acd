//! Persistence of computed pairings as assignments.

use roster_core::entities::{Assignment, Staff, Student};
use roster_core::store::{AllocatorDirectory, AssignmentStore, StoreError, StudentStore};

use crate::allocation::Pairing;
use crate::{FailureKind, ItemFailure};

/// Result of persisting one allocation.
#[derive(Debug, Default)]
pub struct PersistOutcome {
    pub attempted: usize,
    pub persisted: Vec<Assignment>,
    pub failures: Vec<ItemFailure>,
}

impl PersistOutcome {
    #[must_use]
    pub fn created(&self) -> usize {
        self.persisted.len()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Upserts each pairing independently so one rejected pair never blocks the rest.
pub struct PairingPersister<'a, A: AssignmentStore + ?Sized> {
    store: &'a A,
}

impl<'a, A: AssignmentStore + ?Sized> PairingPersister<'a, A> {
    pub const fn new(store: &'a A) -> Self {
        Self { store }
    }

    pub async fn persist(&self, pairings: &[Pairing<'_, Student, Staff>]) -> PersistOutcome {
        let mut outcome = PersistOutcome {
            attempted: pairings.len(),
            ..PersistOutcome::default()
        };
        for pairing in pairings {
            let index = pairing.student.external_index.as_str();
            let staff_id = pairing.allocator.id.as_str();
            match self.store.upsert_assignment(index, staff_id).await {
                Ok(assignment) => outcome.persisted.push(assignment),
                Err(error) => {
                    tracing::warn!(
                        index,
                        staff_id,
                        error = %error,
                        "persist: assignment upsert failed"
                    );
                    outcome.failures.push(ItemFailure {
                        key: Some(index.to_string()),
                        kind: FailureKind::from(&error),
                        reason: error.to_string(),
                    });
                }
            }
        }
        outcome
    }
}

/// Result of assigning a hand-picked set of students to one staff member.
#[derive(Debug)]
pub struct ManualAssignment {
    pub staff: Staff,
    pub outcome: PersistOutcome,
    /// Indexes with no stored student; these are never attempted.
    pub skipped: Vec<String>,
}

/// Assign each of `indexes` to `staff_id`, replacing any current mentor.
///
/// Blank and repeated indexes are dropped. Unknown students are skipped rather
/// than failed, and each remaining pair is persisted independently.
///
/// # Errors
///
/// `StoreError::NotFound` when the staff id is unknown, or any error from the
/// student lookups.
pub async fn assign_to_staff<S, A, D>(
    students: &S,
    assignments: &A,
    directory: &D,
    staff_id: &str,
    indexes: &[String],
) -> Result<ManualAssignment, StoreError>
where
    S: StudentStore + ?Sized,
    A: AssignmentStore + ?Sized,
    D: AllocatorDirectory + ?Sized,
{
    let staff = directory
        .get_staff(staff_id)
        .await?
        .ok_or_else(|| StoreError::NotFound {
            entity: "staff".to_string(),
            id: staff_id.to_string(),
        })?;
    if !staff.active {
        tracing::warn!(staff_id, "assign: staff member is inactive");
    }

    let mut found = Vec::new();
    let mut skipped = Vec::new();
    for index in indexes {
        let index = index.trim();
        if index.is_empty()
            || skipped.iter().any(|s: &String| s == index)
            || found.iter().any(|s: &Student| s.external_index == index)
        {
            continue;
        }
        match students.get_student(index).await? {
            Some(student) => found.push(student),
            None => {
                tracing::debug!(index, "assign: no such student, skipping");
                skipped.push(index.to_string());
            }
        }
    }

    let pairings: Vec<Pairing<'_, Student, Staff>> = found
        .iter()
        .enumerate()
        .map(|(position, student)| Pairing {
            student,
            allocator: &staff,
            pass: 0,
            position,
        })
        .collect();
    let outcome = PairingPersister::new(assignments).persist(&pairings).await;

    Ok(ManualAssignment {
        staff,
        outcome,
        skipped,
    })
}
