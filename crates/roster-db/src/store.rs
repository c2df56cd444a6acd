//! `roster-core` store traits over [`RosterService`].
//!
//! Database errors are folded into `StoreError`: constraint violations become
//! `Conflict` (the pipeline skips that item), everything else `Unavailable`.

use async_trait::async_trait;

use roster_core::entities::{Assignment, NewStudent, Staff, Student};
use roster_core::store::{AllocatorDirectory, AssignmentStore, StoreError, StudentStore};

use crate::service::RosterService;

#[async_trait]
impl StudentStore for RosterService {
    async fn upsert_student(&self, student: &NewStudent) -> Result<Student, StoreError> {
        Ok(Self::upsert_student(self, student).await?)
    }

    async fn get_student(&self, external_index: &str) -> Result<Option<Student>, StoreError> {
        Ok(Self::get_student(self, external_index).await?)
    }

    async fn list_students(
        &self,
        department: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Student>, StoreError> {
        Ok(Self::list_students(self, department, limit).await?)
    }
}

#[async_trait]
impl AssignmentStore for RosterService {
    async fn upsert_assignment(
        &self,
        student_index: &str,
        staff_id: &str,
    ) -> Result<Assignment, StoreError> {
        Ok(Self::upsert_assignment(self, student_index, staff_id).await?)
    }

    async fn active_assignment(
        &self,
        student_index: &str,
    ) -> Result<Option<Assignment>, StoreError> {
        Ok(Self::active_assignment(self, student_index).await?)
    }

    async fn assignments_for_staff(&self, staff_id: &str) -> Result<Vec<Assignment>, StoreError> {
        Ok(Self::assignments_for_staff(self, staff_id).await?)
    }
}

#[async_trait]
impl AllocatorDirectory for RosterService {
    async fn active_allocators(&self, department: &str) -> Result<Vec<Staff>, StoreError> {
        Ok(Self::active_allocators(self, department).await?)
    }

    async fn get_staff(&self, id: &str) -> Result<Option<Staff>, StoreError> {
        Ok(Self::get_staff(self, id).await?)
    }
}
