//! Staff directory repository: add, import, activation, listing.

use chrono::Utc;
use serde::Serialize;

use roster_core::entities::{NewStaff, Staff};
use roster_core::ids::PREFIX_STAFF;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::service::RosterService;

const SELECT_COLS: &str =
    "id, given_name, family_name, email, department, active, created_at, updated_at";

/// Directory order: oldest entry first, id as tie-break.
const ORDER: &str = "ORDER BY created_at, id";

fn row_to_staff(row: &libsql::Row) -> Result<Staff, DatabaseError> {
    Ok(Staff {
        id: row.get(0)?,
        given_name: row.get(1)?,
        family_name: row.get(2)?,
        email: get_opt_string(row, 3)?,
        department: row.get(4)?,
        active: row.get::<i64>(5)? != 0,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

/// Filter for [`RosterService::list_staff`].
#[derive(Debug, Clone, Default)]
pub struct StaffFilter<'a> {
    pub department: Option<&'a str>,
    pub active_only: bool,
}

/// Result of importing a staff list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffImport {
    pub added: usize,
    pub updated: usize,
    /// `"<position>: <reason>"` per skipped entry.
    pub failures: Vec<String>,
}

fn clean_email(email: Option<&str>) -> Option<String> {
    email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
}

impl RosterService {
    pub async fn add_staff(&self, staff: &NewStaff) -> Result<Staff, DatabaseError> {
        if staff.given_name.trim().is_empty() || staff.department.trim().is_empty() {
            return Err(DatabaseError::InvalidState(
                "staff needs a given name and a department".into(),
            ));
        }
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_STAFF).await?;
        let email = clean_email(staff.email.as_deref());

        self.db()
            .conn()
            .execute(
                "INSERT INTO staff (id, given_name, family_name, email, department, active, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
                libsql::params![
                    id.as_str(),
                    staff.given_name.trim(),
                    staff.family_name.trim(),
                    email.as_deref(),
                    staff.department.trim(),
                    staff.active,
                    now.to_rfc3339()
                ],
            )
            .await?;
        tracing::debug!(id = %id, department = %staff.department, "staff: added");

        Ok(Staff {
            id,
            given_name: staff.given_name.trim().to_string(),
            family_name: staff.family_name.trim().to_string(),
            email,
            department: staff.department.trim().to_string(),
            active: staff.active,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_staff(&self, id: &str) -> Result<Option<Staff>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM staff WHERE id = ?1"), [id])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_staff(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn get_staff_by_email(&self, email: &str) -> Result<Option<Staff>, DatabaseError> {
        let Some(email) = clean_email(Some(email)) else {
            return Ok(None);
        };
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM staff WHERE email = ?1"),
                [email.as_str()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_staff(&row)?)),
            None => Ok(None),
        }
    }

    /// Import a staff list. Entries whose email matches an existing member
    /// update that member in place; the rest are added.
    ///
    /// Invalid entries are skipped and reported; the import continues.
    pub async fn import_staff(&self, entries: &[NewStaff]) -> Result<StaffImport, DatabaseError> {
        let mut outcome = StaffImport::default();
        for (position, entry) in entries.iter().enumerate() {
            let existing = match entry.email.as_deref() {
                Some(email) => self.get_staff_by_email(email).await?,
                None => None,
            };
            let result = match existing {
                Some(existing) => self.update_staff(&existing.id, entry).await.map(|_| true),
                None => self.add_staff(entry).await.map(|_| false),
            };
            match result {
                Ok(true) => outcome.updated += 1,
                Ok(false) => outcome.added += 1,
                Err(e @ (DatabaseError::InvalidState(_) | DatabaseError::LibSql(_))) => {
                    tracing::warn!(position, error = %e, "staff: import entry skipped");
                    outcome.failures.push(format!("{position}: {e}"));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(outcome)
    }

    /// Overwrite a member's details, keeping id and `created_at`.
    pub async fn update_staff(&self, id: &str, staff: &NewStaff) -> Result<Staff, DatabaseError> {
        if staff.given_name.trim().is_empty() || staff.department.trim().is_empty() {
            return Err(DatabaseError::InvalidState(
                "staff needs a given name and a department".into(),
            ));
        }
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE staff SET given_name = ?2, family_name = ?3, email = ?4, department = ?5,
                   active = ?6, updated_at = ?7
                 WHERE id = ?1",
                libsql::params![
                    id,
                    staff.given_name.trim(),
                    staff.family_name.trim(),
                    clean_email(staff.email.as_deref()),
                    staff.department.trim(),
                    staff.active,
                    Utc::now().to_rfc3339()
                ],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_staff(id).await?.ok_or(DatabaseError::NoResult)
    }

    /// Activate or deactivate a member. Inactive staff receive no new mentees.
    pub async fn set_staff_active(&self, id: &str, active: bool) -> Result<Staff, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE staff SET active = ?2, updated_at = ?3 WHERE id = ?1",
                libsql::params![id, active, Utc::now().to_rfc3339()],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        tracing::debug!(id, active, "staff: activation changed");
        self.get_staff(id).await?.ok_or(DatabaseError::NoResult)
    }

    pub async fn list_staff(
        &self,
        filter: &StaffFilter<'_>,
        limit: u32,
    ) -> Result<Vec<Staff>, DatabaseError> {
        let active_clause = if filter.active_only { "AND active = 1" } else { "" };
        let mut rows = match filter.department {
            Some(department) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM staff WHERE department = ?1 {active_clause} {ORDER} LIMIT {limit}"
                        ),
                        [department],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM staff WHERE 1=1 {active_clause} {ORDER} LIMIT {limit}"
                        ),
                        (),
                    )
                    .await?
            }
        };
        let mut staff = Vec::new();
        while let Some(row) = rows.next().await? {
            staff.push(row_to_staff(&row)?);
        }
        Ok(staff)
    }

    /// Active staff of a department in directory order.
    pub async fn active_allocators(&self, department: &str) -> Result<Vec<Staff>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM staff WHERE department = ?1 AND active = 1 {ORDER}"
                ),
                [department],
            )
            .await?;
        let mut staff = Vec::new();
        while let Some(row) = rows.next().await? {
            staff.push(row_to_staff(&row)?);
        }
        Ok(staff)
    }
}
