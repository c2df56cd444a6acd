//! In-memory implementation of the store traits.
//!
//! Backs engine tests and `roster preview`, which runs a full batch without
//! touching the database.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use roster_core::entities::{Assignment, NewStudent, Staff, Student};
use roster_core::enums::AssignmentStatus;
use roster_core::store::{AllocatorDirectory, AssignmentStore, StoreError, StudentStore};

#[derive(Default)]
struct Inner {
    students: BTreeMap<String, Student>,
    staff: Vec<Staff>,
    assignments: BTreeMap<String, Assignment>,
    rejected_students: HashSet<String>,
    rejected_pairs: HashSet<String>,
}

/// Thread-safe store holding everything in ordered maps.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with a staff directory.
    pub async fn with_staff(staff: impl IntoIterator<Item = Staff>) -> Self {
        let store = Self::new();
        for member in staff {
            store.add_staff(member).await;
        }
        store
    }

    /// Add or replace a staff member by id, keeping directory order.
    pub async fn add_staff(&self, staff: Staff) {
        let mut inner = self.inner.write().await;
        if let Some(existing) = inner.staff.iter_mut().find(|s| s.id == staff.id) {
            *existing = staff;
        } else {
            inner.staff.push(staff);
        }
    }

    /// Make every future upsert of this index fail with a conflict.
    pub async fn reject_student(&self, external_index: &str) {
        self.inner
            .write()
            .await
            .rejected_students
            .insert(external_index.to_string());
    }

    /// Make every future assignment upsert for this student fail with a conflict.
    pub async fn reject_assignment(&self, student_index: &str) {
        self.inner
            .write()
            .await
            .rejected_pairs
            .insert(student_index.to_string());
    }

    /// Drop a student, leaving any assignment dangling.
    pub async fn remove_student(&self, external_index: &str) -> Option<Student> {
        self.inner.write().await.students.remove(external_index)
    }

    pub async fn student_count(&self) -> usize {
        self.inner.read().await.students.len()
    }

    /// Every stored assignment, ordered by student index.
    pub async fn assignments(&self) -> Vec<Assignment> {
        self.inner.read().await.assignments.values().cloned().collect()
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn upsert_student(&self, student: &NewStudent) -> Result<Student, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.rejected_students.contains(&student.external_index) {
            return Err(StoreError::Conflict(format!(
                "student {} rejected",
                student.external_index
            )));
        }
        let now = Utc::now();
        let created_at = inner
            .students
            .get(&student.external_index)
            .map_or(now, |s| s.created_at);
        let stored = student.clone().into_student(created_at, now);
        inner
            .students
            .insert(stored.external_index.clone(), stored.clone());
        Ok(stored)
    }

    async fn get_student(&self, external_index: &str) -> Result<Option<Student>, StoreError> {
        Ok(self.inner.read().await.students.get(external_index).cloned())
    }

    async fn list_students(
        &self,
        department: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Student>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .students
            .values()
            .filter(|s| department.is_none_or(|d| s.department.as_deref() == Some(d)))
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AssignmentStore for MemoryStore {
    async fn upsert_assignment(
        &self,
        student_index: &str,
        staff_id: &str,
    ) -> Result<Assignment, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.rejected_pairs.contains(student_index) {
            return Err(StoreError::Conflict(format!(
                "assignment for {student_index} rejected"
            )));
        }
        if !inner.students.contains_key(student_index) {
            return Err(StoreError::Conflict(format!(
                "student {student_index} does not exist"
            )));
        }
        if !inner.staff.iter().any(|s| s.id == staff_id) {
            return Err(StoreError::Conflict(format!(
                "staff {staff_id} does not exist"
            )));
        }
        let now = Utc::now();
        let assignment = Assignment {
            student_index: student_index.to_string(),
            staff_id: staff_id.to_string(),
            status: AssignmentStatus::Active,
            assigned_at: now,
            updated_at: now,
        };
        inner
            .assignments
            .insert(student_index.to_string(), assignment.clone());
        Ok(assignment)
    }

    async fn active_assignment(
        &self,
        student_index: &str,
    ) -> Result<Option<Assignment>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .assignments
            .get(student_index)
            .filter(|a| a.status.is_active())
            .cloned())
    }

    async fn assignments_for_staff(&self, staff_id: &str) -> Result<Vec<Assignment>, StoreError> {
        let inner = self.inner.read().await;
        let mut held: Vec<Assignment> = inner
            .assignments
            .values()
            .filter(|a| a.staff_id == staff_id && a.status.is_active())
            .cloned()
            .collect();
        held.sort_by_key(|a| a.assigned_at);
        Ok(held)
    }
}

#[async_trait]
impl AllocatorDirectory for MemoryStore {
    async fn active_allocators(&self, department: &str) -> Result<Vec<Staff>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .staff
            .iter()
            .filter(|s| s.active && s.department == department)
            .cloned()
            .collect())
    }

    async fn get_staff(&self, id: &str) -> Result<Option<Staff>, StoreError> {
        Ok(self
            .inner
            .read()
            .await
            .staff
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::Utc;
    use roster_core::entities::{Staff, Student};

    pub fn staff(id: &str, department: &str) -> Staff {
        let now = Utc::now();
        Staff {
            id: id.into(),
            given_name: id.to_uppercase(),
            family_name: "Mentor".into(),
            email: None,
            department: department.into(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn student(index: &str, score: Option<f64>) -> Student {
        let now = Utc::now();
        Student {
            external_index: index.into(),
            given_name: "Given".into(),
            family_name: "Family".into(),
            score,
            admission_year: 1,
            department: Some("Computer Engineering".into()),
            created_at: now,
            updated_at: now,
        }
    }
}
