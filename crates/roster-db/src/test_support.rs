//! Shared test utilities for roster-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use roster_core::entities::{NewStaff, NewStudent, Staff};

    use crate::service::RosterService;

    pub async fn test_service() -> RosterService {
        RosterService::new_local(":memory:").await.unwrap()
    }

    pub fn new_student(index: &str, score: Option<f64>, department: &str) -> NewStudent {
        NewStudent {
            external_index: index.into(),
            given_name: "Kwabena".into(),
            family_name: "Darko".into(),
            score,
            admission_year: 1,
            department: Some(department.into()),
        }
    }

    pub fn new_staff(given: &str, department: &str) -> NewStaff {
        NewStaff {
            given_name: given.into(),
            family_name: "Lecturer".into(),
            email: Some(format!("{}@example.edu", given.to_lowercase())),
            department: department.into(),
            active: true,
        }
    }

    pub async fn seed_staff(svc: &RosterService, given: &str, department: &str) -> Staff {
        svc.add_staff(&new_staff(given, department)).await.unwrap()
    }
}
