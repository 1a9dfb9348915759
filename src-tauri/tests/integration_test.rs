//! Integration tests for CareTrack
//!
//! These tests verify end-to-end functionality including:
//! - Database operations on an on-disk store
//! - Medication save/take/reset flows
//! - Task operations

use caretrack::database::{create_pool, Repository, SaveMedicationRequest, SaveTaskRequest};
use caretrack::services::medications::schedule_info;
use caretrack::services::{MedicationsService, TasksService};
use caretrack::sync::RemoteStore;
use chrono::{Duration, NaiveTime, Utc};
use tempfile::TempDir;

/// Helper to create services backed by a temp-dir database
async fn create_test_services() -> (MedicationsService, TasksService, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let pool = create_pool(&db_path).await.unwrap();
    let repo = Repository::new(pool);
    let remote = RemoteStore::disabled();

    let medications = MedicationsService::new(repo.clone(), remote.clone());
    let tasks = TasksService::new(repo, remote);

    (medications, tasks, temp_dir)
}

fn med_request(name: &str, frequency: i64, inventory: i64, times: &[&str]) -> SaveMedicationRequest {
    SaveMedicationRequest {
        id: None,
        name: name.to_string(),
        dosage: Some("10 mg".to_string()),
        frequency: Some(frequency),
        inventory: Some(inventory),
        limit_alert: None,
        instructions: None,
        reminder_times: Some(times.iter().map(|t| t.to_string()).collect()),
        medication_config: None,
    }
}

#[tokio::test]
async fn test_medication_lifecycle() {
    let (medications, _, _temp) = create_test_services().await;

    // Create
    let med = medications
        .save(med_request("Risperidone", 2, 10, &["08:00", "20:00"]), None)
        .await
        .unwrap();
    assert!(med.id.starts_with("med_"));

    // List
    let all = medications.list().await.unwrap();
    assert_eq!(all.len(), 1);

    // Take twice
    medications.take(&med.id, None).await.unwrap();
    let after = medications.take(&med.id, None).await.unwrap();
    assert_eq!(after.inventory, 8);
    assert_eq!(after.stats.taken_count, 2);
    assert_eq!(after.history.len(), 2);

    // Both slots consumed for the day
    let info = schedule_info(&after, NaiveTime::from_hms_opt(21, 0, 0).unwrap());
    assert!(info.done);
    assert!(!info.takeable);
    assert!(info.next_slot.is_none());

    // Delete
    medications.delete(&med.id).await.unwrap();
    assert!(medications.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_daily_reset_sweep_across_records() {
    let (medications, _, _temp) = create_test_services().await;

    let a = medications
        .save(med_request("Risperidone", 2, 10, &["08:00", "20:00"]), None)
        .await
        .unwrap();
    let b = medications
        .save(med_request("Melatonin", 1, 30, &["21:00"]), None)
        .await
        .unwrap();

    // Stamp both with today's date via the sweep
    let now = Utc::now();
    assert!(medications.run_daily_reset(now).await.unwrap());

    medications.take(&a.id, None).await.unwrap();

    // Same day: nothing to do
    assert!(!medications.run_daily_reset(now).await.unwrap());
    let taken = medications.get(&a.id).await.unwrap();
    assert_eq!(taken.stats.taken_count, 1);

    // Next day: counters roll over, inventory and history survive
    let tomorrow = now + Duration::days(1);
    assert!(medications.run_daily_reset(tomorrow).await.unwrap());

    let a_reset = medications.get(&a.id).await.unwrap();
    assert_eq!(a_reset.stats.taken_count, 0);
    assert_eq!(a_reset.inventory, 9);
    assert_eq!(a_reset.history.len(), 1);

    let b_reset = medications.get(&b.id).await.unwrap();
    assert_eq!(b_reset.stats.taken_count, 0);
    assert_eq!(b_reset.inventory, 30);
}

#[tokio::test]
async fn test_inventory_never_goes_negative() {
    let (medications, _, _temp) = create_test_services().await;

    let med = medications
        .save(med_request("Ritalin", 1, 2, &[]), None)
        .await
        .unwrap();

    for _ in 0..5 {
        let updated = medications.take(&med.id, None).await.unwrap();
        assert!(updated.inventory >= 0);
    }

    let final_state = medications.get(&med.id).await.unwrap();
    assert_eq!(final_state.inventory, 0);
    assert_eq!(final_state.history.len(), 5, "clamped takes still log");
}

#[tokio::test]
async fn test_task_lifecycle() {
    let (_, tasks, _temp) = create_test_services().await;

    let task = tasks
        .save(
            SaveTaskRequest {
                id: None,
                title: Some("Pack school bag".to_string()),
                note: Some("Include snack".to_string()),
                date: Some("2024-06-10".to_string()),
                start_time: Some("07:45".to_string()),
                end_time: None,
                status: None,
                checked: None,
                recur_days: Some(vec!["mon".to_string(), "fri".to_string()]),
                reminder: None,
                template_id: None,
                color: None,
            },
            None,
        )
        .await
        .unwrap();

    assert_eq!(task.status, "pending");

    let all = tasks.list().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].recur_days.0, vec!["mon", "fri"]);

    tasks.delete(&task.id).await.unwrap();
    assert!(tasks.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_state_survives_pool_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");

    let med_id = {
        let pool = create_pool(&db_path).await.unwrap();
        let medications =
            MedicationsService::new(Repository::new(pool), RemoteStore::disabled());

        let med = medications
            .save(med_request("Risperidone", 2, 10, &["08:00"]), None)
            .await
            .unwrap();
        medications.take(&med.id, None).await.unwrap();
        med.id
    };

    // Reopen: the durable local copy is the source of truth at startup
    let pool = create_pool(&db_path).await.unwrap();
    let medications = MedicationsService::new(Repository::new(pool), RemoteStore::disabled());

    let med = medications.get(&med_id).await.unwrap();
    assert_eq!(med.inventory, 9);
    assert_eq!(med.stats.taken_count, 1);
    assert_eq!(med.history.len(), 1);
}
