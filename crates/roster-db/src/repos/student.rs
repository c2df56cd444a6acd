//! Student repository: keyed upsert, point read, listing.

use chrono::Utc;

use roster_core::entities::{NewStudent, Student};
use roster_core::responses::StudentWithMentor;

use crate::error::DatabaseError;
use crate::helpers::{get_narrow, get_opt_string, parse_datetime};
use crate::service::RosterService;

const SELECT_COLS: &str =
    "external_index, given_name, family_name, score, admission_year, department, created_at, updated_at";

const DIRECTORY_QUERY: &str = "SELECT s.external_index, s.given_name, s.family_name, s.score, s.admission_year,
        s.department, s.created_at, s.updated_at, st.id, st.given_name, st.family_name
 FROM students s
 LEFT JOIN assignments a ON a.student_index = s.external_index AND a.status = 'active'
 LEFT JOIN staff st ON st.id = a.staff_id
 WHERE (?1 IS NULL OR s.department = ?1)
   AND (?2 = 0 OR a.student_index IS NULL)
   AND (?3 IS NULL OR a.staff_id = ?3)
 ORDER BY s.external_index";

/// Which students a directory listing keeps, by mentor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MentorFilter {
    #[default]
    Any,
    /// Only students with no active assignment.
    Unassigned,
    /// Only active mentees of this staff id.
    Staff(String),
}

fn row_to_student(row: &libsql::Row) -> Result<Student, DatabaseError> {
    Ok(Student {
        external_index: row.get(0)?,
        given_name: row.get(1)?,
        family_name: row.get(2)?,
        score: row.get::<Option<f64>>(3)?,
        admission_year: get_narrow(row, 4, "admission_year")?,
        department: get_opt_string(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl RosterService {
    /// Insert the student, or overwrite every field except the index and
    /// `created_at`.
    pub async fn upsert_student(&self, student: &NewStudent) -> Result<Student, DatabaseError> {
        let now = Utc::now().to_rfc3339();
        self.db()
            .conn()
            .execute(
                "INSERT INTO students (external_index, given_name, family_name, score, admission_year, department, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
                 ON CONFLICT(external_index) DO UPDATE SET
                   given_name = ?2, family_name = ?3, score = ?4, admission_year = ?5,
                   department = ?6, updated_at = ?7",
                libsql::params![
                    student.external_index.as_str(),
                    student.given_name.as_str(),
                    student.family_name.as_str(),
                    student.score,
                    i64::from(student.admission_year),
                    student.department.as_deref(),
                    now
                ],
            )
            .await?;
        self.get_student(&student.external_index)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    pub async fn get_student(&self, external_index: &str) -> Result<Option<Student>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM students WHERE external_index = ?1"),
                [external_index],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_student(&row)?)),
            None => Ok(None),
        }
    }

    /// Students ordered by index, optionally limited to one department.
    pub async fn list_students(
        &self,
        department: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Student>, DatabaseError> {
        let mut rows = match department {
            Some(department) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM students WHERE department = ?1 ORDER BY external_index LIMIT {limit}"
                        ),
                        [department],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!("SELECT {SELECT_COLS} FROM students ORDER BY external_index LIMIT {limit}"),
                        (),
                    )
                    .await?
            }
        };
        let mut students = Vec::new();
        while let Some(row) = rows.next().await? {
            students.push(row_to_student(&row)?);
        }
        Ok(students)
    }

    /// Students ordered by index with their active mentor's name, filtered
    /// before the limit is applied.
    pub async fn list_students_with_mentors(
        &self,
        department: Option<&str>,
        filter: &MentorFilter,
        limit: u32,
    ) -> Result<Vec<StudentWithMentor>, DatabaseError> {
        let staff_id = match filter {
            MentorFilter::Staff(id) => Some(id.as_str()),
            MentorFilter::Any | MentorFilter::Unassigned => None,
        };
        let unassigned = i64::from(*filter == MentorFilter::Unassigned);
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("{DIRECTORY_QUERY} LIMIT {limit}"),
                libsql::params![department, unassigned, staff_id],
            )
            .await?;
        let mut listed = Vec::new();
        while let Some(row) = rows.next().await? {
            let student = row_to_student(&row)?;
            let mentor = match row.get::<Option<String>>(8)? {
                Some(id) => {
                    let given: String = row.get(9)?;
                    let family: String = row.get(10)?;
                    Some((id, format!("{given} {family}").trim().to_string()))
                }
                None => None,
            };
            listed.push(StudentWithMentor::new(student, mentor));
        }
        Ok(listed)
    }

    pub async fn count_students(&self) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT count(*) FROM students", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_narrow(&row, 0, "count")
    }
}

#[cfg(test)]
mod tests {
    use super::MentorFilter;
    use crate::test_support::helpers::{new_student, seed_staff, test_service};
    use roster_core::responses::UNASSIGNED;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn upsert_inserts_then_overwrites() {
        let svc = test_service().await;
        let first = svc
            .upsert_student(&new_student("2041", Some(55.0), "CE"))
            .await
            .unwrap();
        assert_eq!(first.score, Some(55.0));

        let mut changed = new_student("2041", Some(71.25), "EE");
        changed.given_name = "Kwabena Yaw".into();
        let second = svc.upsert_student(&changed).await.unwrap();

        assert_eq!(svc.count_students().await.unwrap(), 1);
        assert_eq!(second.score, Some(71.25));
        assert_eq!(second.given_name, "Kwabena Yaw");
        assert_eq!(second.department.as_deref(), Some("EE"));
        assert_eq!(second.created_at, first.created_at);
    }

    #[tokio::test]
    async fn absent_score_and_department_roundtrip_as_none() {
        let svc = test_service().await;
        let mut student = new_student("7", None, "CE");
        student.department = None;
        let stored = svc.upsert_student(&student).await.unwrap();
        assert_eq!(stored.score, None);
        assert_eq!(stored.department, None);
    }

    #[tokio::test]
    async fn out_of_range_score_is_rejected_by_constraint() {
        let svc = test_service().await;
        let err = svc
            .upsert_student(&new_student("8", Some(140.0), "CE"))
            .await
            .unwrap_err();
        assert!(err.is_constraint());
    }

    #[tokio::test]
    async fn list_orders_by_index_and_filters() {
        let svc = test_service().await;
        for (index, department) in [("300", "CE"), ("100", "CE"), ("200", "EE")] {
            svc.upsert_student(&new_student(index, Some(60.0), department))
                .await
                .unwrap();
        }
        let all = svc.list_students(None, 10).await.unwrap();
        let indexes: Vec<&str> = all.iter().map(|s| s.external_index.as_str()).collect();
        assert_eq!(indexes, vec!["100", "200", "300"]);

        let ce = svc.list_students(Some("CE"), 10).await.unwrap();
        assert_eq!(ce.len(), 2);
        assert_eq!(svc.list_students(None, 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_student_is_none() {
        let svc = test_service().await;
        assert!(svc.get_student("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn directory_lists_mentor_names_and_filters_before_limit() {
        let svc = test_service().await;
        for (index, department) in [("100", "CE"), ("200", "CE"), ("300", "CE"), ("400", "EE")] {
            svc.upsert_student(&new_student(index, Some(60.0), department))
                .await
                .unwrap();
        }
        let abena = seed_staff(&svc, "Abena", "CE").await;
        let kojo = seed_staff(&svc, "Kojo", "CE").await;
        svc.upsert_assignment("100", &abena.id).await.unwrap();
        svc.upsert_assignment("300", &kojo.id).await.unwrap();
        svc.upsert_assignment("400", &abena.id).await.unwrap();
        svc.release_assignment("400").await.unwrap();

        let all = svc
            .list_students_with_mentors(None, &MentorFilter::Any, 10)
            .await
            .unwrap();
        let mentors: Vec<&str> = all.iter().map(|row| row.mentor.as_str()).collect();
        assert_eq!(
            mentors,
            vec!["Abena Lecturer", UNASSIGNED, "Kojo Lecturer", UNASSIGNED]
        );

        let unassigned = svc
            .list_students_with_mentors(Some("CE"), &MentorFilter::Unassigned, 10)
            .await
            .unwrap();
        assert_eq!(unassigned.len(), 1);
        assert_eq!(unassigned[0].student.external_index, "200");

        let mentees = svc
            .list_students_with_mentors(None, &MentorFilter::Staff(abena.id.clone()), 1)
            .await
            .unwrap();
        assert_eq!(mentees.len(), 1);
        assert_eq!(mentees[0].student.external_index, "100");
        assert_eq!(mentees[0].mentor_id.as_deref(), Some(abena.id.as_str()));
    }
}
