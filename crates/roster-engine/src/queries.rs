//! Read paths over stored assignments.

use std::collections::BTreeMap;

use chrono::{Datelike, Utc};
use roster_core::responses::MenteeView;
use roster_core::store::{AllocatorDirectory, AssignmentStore, StoreError, StudentStore};

/// Students among `indexes` that already hold an active assignment, mapped to
/// the display name of their staff member.
///
/// Used before an upload to warn about students who would be reassigned.
/// Unknown indexes and students without an active assignment are omitted.
pub async fn lookup_pairings<A, D>(
    assignments: &A,
    directory: &D,
    indexes: &[String],
) -> Result<BTreeMap<String, String>, StoreError>
where
    A: AssignmentStore + ?Sized,
    D: AllocatorDirectory + ?Sized,
{
    let mut paired = BTreeMap::new();
    for index in indexes {
        let index = index.trim();
        if index.is_empty() || paired.contains_key(index) {
            continue;
        }
        let Some(assignment) = assignments.active_assignment(index).await? else {
            continue;
        };
        let name = directory
            .get_staff(&assignment.staff_id)
            .await?
            .map_or_else(|| assignment.staff_id.clone(), |staff| staff.display_name());
        paired.insert(index.to_string(), name);
    }
    Ok(paired)
}

/// Active mentees of a staff member, oldest assignment first.
///
/// # Errors
///
/// `StoreError::NotFound` when the staff id is unknown.
pub async fn mentees_for<S, A, D>(
    students: &S,
    assignments: &A,
    directory: &D,
    staff_id: &str,
) -> Result<Vec<MenteeView>, StoreError>
where
    S: StudentStore + ?Sized,
    A: AssignmentStore + ?Sized,
    D: AllocatorDirectory + ?Sized,
{
    if directory.get_staff(staff_id).await?.is_none() {
        return Err(StoreError::NotFound {
            entity: "staff".to_string(),
            id: staff_id.to_string(),
        });
    }
    let current_year = Utc::now().year();
    let mut mentees = Vec::new();
    for assignment in assignments.assignments_for_staff(staff_id).await? {
        match students.get_student(&assignment.student_index).await? {
            Some(student) => mentees.push(MenteeView::new(
                &student,
                assignment.assigned_at,
                current_year,
            )),
            None => tracing::warn!(
                index = %assignment.student_index,
                staff_id,
                "mentees: assignment references missing student"
            ),
        }
    }
    Ok(mentees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::memory::fixtures::staff;
    use pretty_assertions::assert_eq;
    use roster_core::entities::NewStudent;

    async fn seeded() -> MemoryStore {
        let store =
            MemoryStore::with_staff([staff("stf-a", "CE"), staff("stf-b", "CE")]).await;
        for (index, score) in [("100", 72.0), ("200", 65.0), ("300", 58.0)] {
            store
                .upsert_student(&NewStudent {
                    external_index: index.into(),
                    given_name: "Kwame".into(),
                    family_name: "Asante".into(),
                    score: Some(score),
                    admission_year: 1,
                    department: Some("CE".into()),
                })
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn lookup_reports_only_paired_students() {
        let store = seeded().await;
        store.upsert_assignment("100", "stf-a").await.unwrap();
        store.upsert_assignment("300", "stf-b").await.unwrap();

        let indexes: Vec<String> = ["100", "200", "300", "999", " "]
            .into_iter()
            .map(String::from)
            .collect();
        let paired = lookup_pairings(&store, &store, &indexes).await.unwrap();
        assert_eq!(paired.len(), 2);
        assert_eq!(paired["100"], "STF-A Mentor");
        assert_eq!(paired["300"], "STF-B Mentor");
    }

    #[tokio::test]
    async fn mentees_listed_oldest_first() {
        let store = seeded().await;
        store.upsert_assignment("200", "stf-a").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        store.upsert_assignment("100", "stf-a").await.unwrap();
        store.upsert_assignment("300", "stf-b").await.unwrap();

        let mentees = mentees_for(&store, &store, &store, "stf-a").await.unwrap();
        let indexes: Vec<&str> = mentees.iter().map(|m| m.external_index.as_str()).collect();
        assert_eq!(indexes, vec!["200", "100"]);
        assert_eq!(mentees[0].level, 1);
    }

    #[tokio::test]
    async fn mentees_for_unknown_staff() {
        let store = seeded().await;
        let err = mentees_for(&store, &store, &store, "stf-zz").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
