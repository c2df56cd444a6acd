//! Assignment repository: one active staff member per student.

use chrono::Utc;

use roster_core::entities::Assignment;
use roster_core::enums::AssignmentStatus;

use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_enum};
use crate::service::RosterService;

const SELECT_COLS: &str = "student_index, staff_id, status, assigned_at, updated_at";

fn row_to_assignment(row: &libsql::Row) -> Result<Assignment, DatabaseError> {
    Ok(Assignment {
        student_index: row.get(0)?,
        staff_id: row.get(1)?,
        status: parse_enum(&row.get::<String>(2)?)?,
        assigned_at: parse_datetime(&row.get::<String>(3)?)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl RosterService {
    /// Assign a student to a staff member, replacing any previous assignment.
    ///
    /// Both sides must exist; a missing student or staff id fails the foreign key.
    pub async fn upsert_assignment(
        &self,
        student_index: &str,
        staff_id: &str,
    ) -> Result<Assignment, DatabaseError> {
        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "INSERT INTO assignments (student_index, staff_id, status, assigned_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)
                 ON CONFLICT(student_index) DO UPDATE SET
                   staff_id = ?2, status = ?3, assigned_at = ?4, updated_at = ?4",
                libsql::params![
                    student_index,
                    staff_id,
                    AssignmentStatus::Active.as_str(),
                    now.to_rfc3339()
                ],
            )
            .await?;
        Ok(Assignment {
            student_index: student_index.to_string(),
            staff_id: staff_id.to_string(),
            status: AssignmentStatus::Active,
            assigned_at: now,
            updated_at: now,
        })
    }

    /// The student's assignment, whatever its status.
    pub async fn get_assignment(&self, student_index: &str) -> Result<Option<Assignment>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM assignments WHERE student_index = ?1"),
                [student_index],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_assignment(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn active_assignment(
        &self,
        student_index: &str,
    ) -> Result<Option<Assignment>, DatabaseError> {
        Ok(self
            .get_assignment(student_index)
            .await?
            .filter(|a| a.status.is_active()))
    }

    /// Active assignments held by a staff member, oldest first.
    pub async fn assignments_for_staff(&self, staff_id: &str) -> Result<Vec<Assignment>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM assignments WHERE staff_id = ?1 AND status = ?2
                     ORDER BY assigned_at, student_index"
                ),
                libsql::params![staff_id, AssignmentStatus::Active.as_str()],
            )
            .await?;
        let mut assignments = Vec::new();
        while let Some(row) = rows.next().await? {
            assignments.push(row_to_assignment(&row)?);
        }
        Ok(assignments)
    }

    /// Mark a student's assignment inactive. The row is kept so the last
    /// mentor stays visible.
    pub async fn release_assignment(&self, student_index: &str) -> Result<Assignment, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE assignments SET status = ?2, updated_at = ?3 WHERE student_index = ?1",
                libsql::params![
                    student_index,
                    AssignmentStatus::Inactive.as_str(),
                    Utc::now().to_rfc3339()
                ],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_assignment(student_index)
            .await?
            .ok_or(DatabaseError::NoResult)
    }
}
