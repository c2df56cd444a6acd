//! End-to-end batch runs over the in-memory store.

use chrono::Utc;
use pretty_assertions::assert_eq;
use roster_core::entities::Staff;
use roster_core::rows::{BatchMeta, RosterRow, RowOutcome, RowRejection};
use roster_core::store::{AssignmentStore, StudentStore};
use roster_engine::coordinator::BatchCoordinator;
use roster_engine::memory::MemoryStore;
use roster_engine::policy::FirstYearFirstSemester;
use roster_engine::FailureKind;
use roster_schema::{RowValidator, SchemaRegistry};
use serde_json::{Value, json};

const DEPARTMENT: &str = "Computer Engineering";

fn staff(id: &str, name: &str) -> Staff {
    let now = Utc::now();
    Staff {
        id: id.into(),
        given_name: name.into(),
        family_name: "Lecturer".into(),
        email: Some(format!("{id}@example.edu")),
        department: DEPARTMENT.into(),
        active: true,
        created_at: now,
        updated_at: now,
    }
}

fn row(index: &str, name: &str, score: Option<f64>) -> RosterRow {
    RosterRow {
        external_index: index.into(),
        raw_name: name.into(),
        score,
        admission_year: 1,
        department: Some(DEPARTMENT.into()),
        semester: 1,
    }
}

fn first_year() -> BatchMeta {
    BatchMeta {
        admission_year: Some(1),
        semester: Some(1),
        department: Some(DEPARTMENT.into()),
    }
}

fn ten_rows_with_missing_index() -> Vec<RowOutcome> {
    (0..10)
        .map(|i| {
            if i == 3 {
                Err(RowRejection {
                    position: i,
                    external_index: None,
                    reason: "externalIndex is required".into(),
                })
            } else {
                Ok(row(&format!("40{i}"), "ADJEI, Yaw", Some(45.0 + 5.0 * i as f64)))
            }
        })
        .collect()
}

async fn three_lecturers() -> MemoryStore {
    MemoryStore::with_staff([
        staff("stf-a", "Abena"),
        staff("stf-b", "Baffour"),
        staff("stf-c", "Comfort"),
    ])
    .await
}

#[tokio::test]
async fn partial_failure_returns_normally() {
    let store = three_lecturers().await;
    let coordinator =
        BatchCoordinator::new(&store, &store, &store, FirstYearFirstSemester::default());

    let run = coordinator
        .execute(&ten_rows_with_missing_index(), &first_year())
        .await
        .unwrap();

    assert_eq!(run.report.students_upserted, 9);
    assert_eq!(run.report.students_failed, 1);
    assert_eq!(run.report.pairings_created, 9);
    assert!(run.report.is_partial_failure());
    assert_eq!(run.failures.len(), 1);
    assert_eq!(run.failures[0].kind, FailureKind::Validation);
    assert_eq!(store.student_count().await, 9);
}

#[tokio::test]
async fn reupload_overwrites_instead_of_duplicating() {
    let store = MemoryStore::new();
    let coordinator =
        BatchCoordinator::new(&store, &store, &store, FirstYearFirstSemester::default());
    let later = BatchMeta {
        semester: Some(2),
        ..first_year()
    };

    coordinator
        .run(&[Ok(row("501", "OWUSU, Esi", Some(61.0)))], &later)
        .await
        .unwrap();
    coordinator
        .run(&[Ok(row("501", "OWUSU, Esi Ama", Some(68.5)))], &later)
        .await
        .unwrap();

    assert_eq!(store.student_count().await, 1);
    let stored = store.get_student("501").await.unwrap().unwrap();
    assert_eq!(stored.score, Some(68.5));
    assert_eq!(stored.given_name, "Esi Ama");
    assert_eq!(stored.family_name, "Owusu");
}

#[tokio::test]
async fn later_semester_is_students_only() {
    let store = three_lecturers().await;
    let coordinator =
        BatchCoordinator::new(&store, &store, &store, FirstYearFirstSemester::default());
    let meta = BatchMeta {
        semester: Some(2),
        ..first_year()
    };

    let report = coordinator
        .run(&[Ok(row("601", "BOATENG, Delasi Ama (Miss)", Some(71.0)))], &meta)
        .await
        .unwrap();

    assert!(!report.allocation_triggered);
    assert!(!report.created_pairings());
    assert!(report.message.starts_with("Students-only update"));
    assert!(store.assignments().await.is_empty());

    let stored = store.get_student("601").await.unwrap().unwrap();
    assert_eq!(stored.given_name, "Delasi Ama");
    assert!(!stored.family_name.contains("Miss"));
}

#[tokio::test]
async fn no_allocators_keeps_ingested_students() {
    let store = MemoryStore::with_staff([{
        let mut retired = staff("stf-z", "Zita");
        retired.active = false;
        retired
    }])
    .await;
    let coordinator =
        BatchCoordinator::new(&store, &store, &store, FirstYearFirstSemester::default());

    let report = coordinator
        .run(&ten_rows_with_missing_index(), &first_year())
        .await
        .unwrap();

    assert!(report.allocation_triggered);
    assert_eq!(report.students_upserted, 9);
    assert_eq!(report.pairings_created, 0);
    assert_eq!(
        report.skip_reason.as_deref(),
        Some("No active allocators for department 'Computer Engineering'")
    );
    assert_eq!(store.student_count().await, 9);
}

#[tokio::test]
async fn rejected_pair_does_not_block_the_rest() {
    let store = three_lecturers().await;
    store.reject_assignment("402").await;
    let coordinator =
        BatchCoordinator::new(&store, &store, &store, FirstYearFirstSemester::default());

    let run = coordinator
        .execute(&ten_rows_with_missing_index(), &first_year())
        .await
        .unwrap();

    assert_eq!(run.report.pairings_created, 8);
    assert_eq!(run.report.pairings_failed, 1);
    assert!(run.report.message.ends_with("(2 items failed)"));
    assert!(store.active_assignment("402").await.unwrap().is_none());
    assert!(store.active_assignment("409").await.unwrap().is_some());
}

#[tokio::test]
async fn snake_order_reaches_the_store() {
    let store = three_lecturers().await;
    let coordinator =
        BatchCoordinator::new(&store, &store, &store, FirstYearFirstSemester::default());
    let rows: Vec<RowOutcome> = [90.0, 85.0, 80.0, 75.0, 70.0, 65.0]
        .into_iter()
        .enumerate()
        .map(|(i, score)| Ok(row(&format!("70{i}"), "MENSAH, Kofi", Some(score))))
        .collect();

    coordinator.run(&rows, &first_year()).await.unwrap();

    let mut holders = Vec::new();
    for index in ["700", "701", "702", "703", "704", "705"] {
        let assignment = store.active_assignment(index).await.unwrap().unwrap();
        holders.push(assignment.staff_id);
    }
    assert_eq!(
        holders,
        vec!["stf-a", "stf-b", "stf-c", "stf-c", "stf-b", "stf-a"]
    );
}

#[tokio::test]
async fn repeated_index_is_counted_per_upsert() {
    let store = three_lecturers().await;
    let coordinator =
        BatchCoordinator::new(&store, &store, &store, FirstYearFirstSemester::default());
    let rows: Vec<RowOutcome> = vec![
        Ok(row("1", "MENSAH, Kofi", Some(50.0))),
        Ok(row("2", "OWUSU, Esi", Some(60.0))),
        Ok(row("1", "MENSAH, Kofi", Some(75.0))),
    ];

    let report = coordinator.run(&rows, &first_year()).await.unwrap();

    assert_eq!(report.students_upserted + report.students_failed, rows.len());
    assert_eq!(report.students_upserted, 3);
    assert_eq!(report.pairings_created, 2);
    assert_eq!(store.student_count().await, 2);
    let kofi = store.get_student("1").await.unwrap().unwrap();
    assert_eq!(kofi.score, Some(75.0));
}

#[tokio::test]
async fn exported_rows_flow_through_validation_into_the_batch() {
    let raw: Vec<Value> = (0..10)
        .map(|i| {
            if i == 3 {
                json!({ "NAME": "ADJEI, Yaw", "CWA": "61.5" })
            } else {
                json!({
                    "INDEXNO": format!("80{i}"),
                    "NAME": format!("ADJEI, Yaw{i} (Mr)"),
                    "CWA": format!("{}", 40 + 5 * i),
                })
            }
        })
        .collect();
    let registry = SchemaRegistry::new();
    let rows = RowValidator::new(&registry)
        .unwrap()
        .with_defaults(first_year())
        .validate_all(&raw);
    let meta = first_year().or(BatchMeta::from_rows(&rows));

    let store = three_lecturers().await;
    let coordinator =
        BatchCoordinator::new(&store, &store, &store, FirstYearFirstSemester::default());
    let run = coordinator.execute(&rows, &meta).await.unwrap();

    assert_eq!(run.report.students_upserted, 9);
    assert_eq!(run.report.students_failed, 1);
    assert_eq!(run.report.pairings_created, 9);
    assert_eq!(run.failures[0].kind, FailureKind::Validation);
    assert!(run.failures[0].reason.contains("externalIndex"));

    let stored = store.get_student("809").await.unwrap().unwrap();
    assert_eq!(stored.score, Some(85.0));
    assert_eq!(stored.given_name, "Yaw9");
    assert_eq!(stored.family_name, "Adjei");
    assert!(store.get_student("803").await.unwrap().is_none());
}
