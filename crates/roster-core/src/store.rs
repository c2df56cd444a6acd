//! Store contracts used by the allocation pipeline.
//!
//! The engine never owns storage. It requests keyed upserts and point reads
//! through these traits, which `roster-db` implements over libSQL and
//! `roster-engine::memory` implements in memory.

use async_trait::async_trait;
use thiserror::Error;

use crate::entities::{Assignment, NewStudent, Staff, Student};

/// Failure reported by a store for a single operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store rejected the write (constraint or referential violation).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The referenced entity does not exist.
    #[error("Not found: {entity} {id}")]
    NotFound { entity: String, id: String },

    /// The backend could not serve the request.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether the failure is scoped to one item and the batch can continue.
    #[must_use]
    pub const fn is_item_level(&self) -> bool {
        matches!(self, Self::Conflict(_) | Self::NotFound { .. })
    }
}

/// Persistent student records keyed by external index.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Insert the student, or overwrite every mutable field of the existing one.
    async fn upsert_student(&self, student: &NewStudent) -> Result<Student, StoreError>;

    async fn get_student(&self, external_index: &str) -> Result<Option<Student>, StoreError>;

    /// Students ordered by external index, optionally filtered by department.
    async fn list_students(
        &self,
        department: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Student>, StoreError>;
}

/// Persistent assignments keyed by student.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// Make `staff_id` the active assignment for the student, superseding any prior one.
    async fn upsert_assignment(
        &self,
        student_index: &str,
        staff_id: &str,
    ) -> Result<Assignment, StoreError>;

    /// The student's assignment if it is active.
    async fn active_assignment(
        &self,
        student_index: &str,
    ) -> Result<Option<Assignment>, StoreError>;

    /// Active assignments held by a staff member, oldest first.
    async fn assignments_for_staff(&self, staff_id: &str) -> Result<Vec<Assignment>, StoreError>;
}

/// Read-only view of the staff directory.
#[async_trait]
pub trait AllocatorDirectory: Send + Sync {
    /// Active staff of a department, in stable directory order.
    async fn active_allocators(&self, department: &str) -> Result<Vec<Staff>, StoreError>;

    async fn get_staff(&self, id: &str) -> Result<Option<Staff>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_level_errors() {
        assert!(StoreError::Conflict("fk".into()).is_item_level());
        assert!(StoreError::NotFound {
            entity: "student".into(),
            id: "x".into()
        }
        .is_item_level());
        assert!(!StoreError::Unavailable("down".into()).is_item_level());
    }
}
