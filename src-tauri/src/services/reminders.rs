//! Reminders service
//!
//! Background loop driving the daily-reset sweep and reminder
//! notifications. Ticks once per minute; the first tick fires
//! immediately on startup so a stale day is rolled over on app load.

use crate::config::TICK_INTERVAL_SECS;
use crate::database::Medication;
use crate::dosing::schedule;
use crate::error::Result;
use crate::services::MedicationsService;
use chrono::{Local, Utc};
use std::sync::Arc;
use tauri::{AppHandle, Emitter};
use tokio::sync::Mutex;

/// Reminders service with background scheduler
#[derive(Clone)]
pub struct RemindersService {
    medications: MedicationsService,
    app_handle: Arc<Mutex<Option<AppHandle>>>,
}

impl RemindersService {
    pub fn new(medications: MedicationsService) -> Self {
        Self {
            medications,
            app_handle: Arc::new(Mutex::new(None)),
        }
    }

    /// Set the app handle for notifications
    pub async fn set_app_handle(&self, handle: AppHandle) {
        let mut app = self.app_handle.lock().await;
        *app = Some(handle);
    }

    /// Start the background loop. Runs on the Tauri async runtime so
    /// it can be started from the synchronous setup hook.
    pub fn start(self) {
        tauri::async_runtime::spawn(async move {
            tracing::info!("Starting medication tick loop");

            let mut interval =
                tokio::time::interval(tokio::time::Duration::from_secs(TICK_INTERVAL_SECS));

            loop {
                // First tick completes immediately: the eager
                // startup pass over a possibly stale day.
                interval.tick().await;

                if let Err(e) = self.run_tick().await {
                    tracing::error!("Tick failed: {}", e);
                }
            }
        });
    }

    /// One tick: daily-reset sweep, then the reminder check.
    async fn run_tick(&self) -> Result<()> {
        if self.medications.run_daily_reset(Utc::now()).await? {
            self.emit("medications-reset", ()).await;
        }

        self.check_reminders().await
    }

    /// Notify for every medication scheduled at the current minute.
    /// One notification per matching minute; duplicates from timer
    /// drift within the same minute are not guarded against.
    async fn check_reminders(&self) -> Result<()> {
        let minute = schedule::current_minute(Local::now());
        let meds = self.medications.list().await?;

        for med in due_reminders(&meds, &minute) {
            tracing::info!("Reminder due for {} at {}", med.name, minute);
            self.send_notification(med).await;
        }

        Ok(())
    }

    /// Send a system notification for a due medication
    async fn send_notification(&self, med: &Medication) {
        let app_handle = self.app_handle.lock().await;

        if let Some(handle) = app_handle.as_ref() {
            use tauri_plugin_notification::NotificationExt;
            if let Err(e) = handle
                .notification()
                .builder()
                .title(format!("Time to take {}", med.name))
                .body(format!("{}. Open the app to log.", med.dosage))
                .show()
            {
                tracing::error!("Failed to send notification: {}", e);
            }

            // Emit event to frontend for UI handling
            if let Err(e) = handle.emit(
                "medication-reminder",
                ReminderEvent {
                    medication_id: med.id.clone(),
                    name: med.name.clone(),
                    dosage: med.dosage.clone(),
                },
            ) {
                tracing::error!("Failed to emit reminder event: {}", e);
            }
        }
    }

    async fn emit<P: serde::Serialize + Clone>(&self, event: &str, payload: P) {
        let app_handle = self.app_handle.lock().await;

        if let Some(handle) = app_handle.as_ref() {
            if let Err(e) = handle.emit(event, payload) {
                tracing::error!("Failed to emit {} event: {}", event, e);
            }
        }
    }
}

/// Medications whose reminder list contains the given `HH:MM` minute.
fn due_reminders<'a>(meds: &'a [Medication], minute: &str) -> Vec<&'a Medication> {
    meds.iter()
        .filter(|med| med.reminder_times.iter().any(|t| t == minute))
        .collect()
}

#[derive(Debug, Clone, serde::Serialize)]
struct ReminderEvent {
    medication_id: String,
    name: String,
    dosage: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{initialize_database, DayStats, Repository, SaveMedicationRequest};
    use crate::sync::RemoteStore;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::types::Json;

    async fn create_test_service() -> (RemindersService, MedicationsService) {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        let repo = Repository::new(pool);
        let medications = MedicationsService::new(repo, RemoteStore::disabled());
        let service = RemindersService::new(medications.clone());

        (service, medications)
    }

    fn stored_med(id: &str, times: &[&str]) -> Medication {
        let now = Utc::now();
        Medication {
            id: id.to_string(),
            name: "Melatonin".to_string(),
            dosage: "3 mg".to_string(),
            frequency: 1,
            inventory: 10,
            limit_alert: 5,
            instructions: None,
            reminder_times: Json(times.iter().map(|t| t.to_string()).collect()),
            history: Json(vec![]),
            stats: Json(DayStats::for_day("2024-01-01")),
            medication_config: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_due_reminders_exact_minute_match() {
        let meds = vec![
            stored_med("med_1", &["08:00", "20:00"]),
            stored_med("med_2", &["20:30"]),
            stored_med("med_3", &[]),
        ];

        let due = due_reminders(&meds, "20:00");
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, "med_1");

        assert!(due_reminders(&meds, "20:01").is_empty());
    }

    #[tokio::test]
    async fn test_tick_resets_stale_day_without_app_handle() {
        let (service, medications) = create_test_service().await;

        // A record with yesterday's counters
        let med = medications
            .save(
                SaveMedicationRequest {
                    id: None,
                    name: "Melatonin".to_string(),
                    dosage: Some("3 mg".to_string()),
                    frequency: Some(1),
                    inventory: Some(10),
                    limit_alert: None,
                    instructions: None,
                    reminder_times: None,
                    medication_config: None,
                },
                None,
            )
            .await
            .unwrap();

        // No app handle set: the tick must still sweep and not error.
        service.run_tick().await.unwrap();

        let stored = medications.get(&med.id).await.unwrap();
        assert_eq!(stored.stats.date, schedule::today_string(Utc::now()));

        // Second tick the same day is a no-op
        service.run_tick().await.unwrap();
    }
}
