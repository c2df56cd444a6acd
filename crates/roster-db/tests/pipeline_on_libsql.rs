//! Full upload runs against an in-memory libSQL database.

use pretty_assertions::assert_eq;

use roster_core::entities::NewStaff;
use roster_core::rows::{BatchMeta, RosterRow, RowOutcome};
use roster_db::service::RosterService;
use roster_engine::coordinator::BatchCoordinator;
use roster_engine::policy::FirstYearFirstSemester;
use roster_engine::queries::{lookup_pairings, mentees_for};

async fn test_service() -> RosterService {
    RosterService::new_local(":memory:").await.unwrap()
}

fn lecturer(given: &str) -> NewStaff {
    NewStaff {
        given_name: given.into(),
        family_name: "Mensah".into(),
        email: Some(format!("{}@knust.example", given.to_lowercase())),
        department: "Computer Engineering".into(),
        active: true,
    }
}

fn rows(scores: &[f64]) -> Vec<RowOutcome> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| {
            Ok(RosterRow {
                external_index: format!("9{i:03}"),
                raw_name: format!("ASANTE, Yaw {i} (Mr)"),
                score: Some(score),
                admission_year: 1,
                department: Some("Computer Engineering".into()),
                semester: 1,
            })
        })
        .collect()
}

fn first_year() -> BatchMeta {
    BatchMeta {
        admission_year: Some(1),
        semester: Some(1),
        department: Some("Computer Engineering".into()),
    }
}

#[tokio::test]
async fn snake_allocation_persists_to_libsql() {
    let svc = test_service().await;
    let a = svc.add_staff(&lecturer("Abena")).await.unwrap();
    let b = svc.add_staff(&lecturer("Baffour")).await.unwrap();
    let c = svc.add_staff(&lecturer("Comfort")).await.unwrap();

    let coordinator = BatchCoordinator::new(&svc, &svc, &svc, FirstYearFirstSemester::default());
    let report = coordinator
        .run(&rows(&[90.0, 85.0, 80.0, 75.0, 70.0, 65.0]), &first_year())
        .await
        .unwrap();

    assert_eq!(report.students_upserted, 6);
    assert_eq!(report.pairings_created, 6);
    assert_eq!(report.pairings_failed, 0);

    let expected = [&a.id, &b.id, &c.id, &c.id, &b.id, &a.id];
    for (i, staff_id) in expected.iter().enumerate() {
        let index = format!("9{i:03}");
        let assignment = svc.active_assignment(&index).await.unwrap().unwrap();
        assert_eq!(&&assignment.staff_id, staff_id, "student {index}");
    }

    let stored = svc.get_student("9000").await.unwrap().unwrap();
    assert_eq!(stored.given_name, "Yaw 0");
    assert_eq!(stored.family_name, "Asante");
}

#[tokio::test]
async fn mentor_queries_after_upload() {
    let svc = test_service().await;
    let a = svc.add_staff(&lecturer("Abena")).await.unwrap();
    svc.add_staff(&lecturer("Baffour")).await.unwrap();

    let coordinator = BatchCoordinator::new(&svc, &svc, &svc, FirstYearFirstSemester::default());
    coordinator
        .run(&rows(&[72.0, 64.0, 58.0, 49.0]), &first_year())
        .await
        .unwrap();

    let mentees = mentees_for(&svc, &svc, &svc, &a.id).await.unwrap();
    // Abena takes rank 1 and rank 4.
    assert_eq!(mentees.len(), 2);

    let indexes: Vec<String> = vec!["9000".into(), "9003".into(), "unknown".into()];
    let paired = lookup_pairings(&svc, &svc, &indexes).await.unwrap();
    assert_eq!(paired.len(), 2);
    assert_eq!(paired["9000"], "Abena Mensah");
}

#[tokio::test]
async fn second_semester_upload_updates_scores_only() {
    let svc = test_service().await;
    svc.add_staff(&lecturer("Abena")).await.unwrap();
    let coordinator = BatchCoordinator::new(&svc, &svc, &svc, FirstYearFirstSemester::default());

    coordinator
        .run(&rows(&[60.0, 50.0]), &first_year())
        .await
        .unwrap();
    let before = svc.active_assignment("9001").await.unwrap().unwrap();

    let second = BatchMeta {
        semester: Some(2),
        ..first_year()
    };
    let report = coordinator
        .run(&rows(&[61.5, 77.0]), &second)
        .await
        .unwrap();

    assert!(!report.allocation_triggered);
    assert_eq!(svc.count_students().await.unwrap(), 2);
    assert_eq!(svc.get_student("9001").await.unwrap().unwrap().score, Some(77.0));
    let after = svc.active_assignment("9001").await.unwrap().unwrap();
    assert_eq!(after.assigned_at, before.assigned_at);
}
