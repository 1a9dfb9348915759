//! Medications service
//!
//! High-level business logic for the medication tracker: saving,
//! taking doses, daily counter resets and remote reconciliation.
//! Every mutation is committed to the local repository first; the
//! remote write is best-effort.

use crate::config::{DEFAULT_FREQUENCY, DEFAULT_LIMIT_ALERT};
use crate::database::{DayStats, Medication, Repository, SaveMedicationRequest};
use crate::dosing::schedule::{self, DoseSlot};
use crate::dosing::{reset_day, take_dose};
use crate::error::{AppError, Result};
use crate::sync::{RemoteStore, SyncOutcome};
use chrono::{DateTime, Local, NaiveTime, Utc};
use sqlx::types::Json;

/// Schedule state of one medication for the UI.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ScheduleInfo {
    pub next_slot: Option<DoseSlot>,
    pub takeable: bool,
    /// All of today's doses are taken.
    pub done: bool,
    pub low_stock: bool,
}

/// Compute the schedule state at a given wall-clock time.
pub fn schedule_info(med: &Medication, now: NaiveTime) -> ScheduleInfo {
    let slots = schedule::effective_slots(med);
    ScheduleInfo {
        next_slot: schedule::next_slot(&slots, med.taken_today()),
        takeable: schedule::is_takeable(med, now),
        done: med.taken_today() >= med.frequency,
        low_stock: med.is_low_stock(),
    }
}

/// Service for managing medications
#[derive(Clone)]
pub struct MedicationsService {
    repo: Repository,
    remote: RemoteStore,
}

impl MedicationsService {
    pub fn new(repo: Repository, remote: RemoteStore) -> Self {
        Self { repo, remote }
    }

    /// Create or update a medication.
    ///
    /// New records get a client-side `med_<unix-millis>` id, empty
    /// history and zeroed stats; edits preserve history, stats and
    /// creation time.
    pub async fn save(
        &self,
        req: SaveMedicationRequest,
        user_id: Option<&str>,
    ) -> Result<Medication> {
        if req.name.trim().is_empty() {
            return Err(AppError::Validation(
                "Medication name is required".to_string(),
            ));
        }

        let now = Utc::now();

        let med = match &req.id {
            Some(id) => {
                let existing = self.repo.get_medication(id).await?;
                Medication {
                    name: req.name,
                    dosage: req.dosage.unwrap_or(existing.dosage),
                    frequency: req.frequency.unwrap_or(existing.frequency),
                    inventory: req.inventory.unwrap_or(existing.inventory),
                    limit_alert: req.limit_alert.unwrap_or(existing.limit_alert),
                    instructions: req.instructions.or(existing.instructions),
                    reminder_times: req
                        .reminder_times
                        .map(Json)
                        .unwrap_or(existing.reminder_times),
                    medication_config: req
                        .medication_config
                        .map(Json)
                        .or(existing.medication_config),
                    updated_at: now,
                    ..existing
                }
            }
            None => Medication {
                id: format!("med_{}", now.timestamp_millis()),
                name: req.name,
                dosage: req.dosage.unwrap_or_default(),
                frequency: req.frequency.unwrap_or(DEFAULT_FREQUENCY),
                inventory: req.inventory.unwrap_or(0),
                limit_alert: req.limit_alert.unwrap_or(DEFAULT_LIMIT_ALERT),
                instructions: req.instructions,
                reminder_times: Json(req.reminder_times.unwrap_or_default()),
                history: Json(vec![]),
                // Empty date reads as stale, so the next reset sweep
                // stamps today.
                stats: Json(DayStats::default()),
                medication_config: req.medication_config.map(Json),
                created_at: now,
                updated_at: now,
            },
        };

        tracing::info!("Saving medication: {} ({})", med.name, med.id);
        let saved = self.repo.upsert_medication(&med).await?;

        match self.remote.save_medication(&saved, user_id).await {
            SyncOutcome::Persisted => tracing::debug!("Medication {} persisted remotely", saved.id),
            SyncOutcome::LocalOnly => tracing::warn!("Medication {} saved locally only", saved.id),
        }

        Ok(saved)
    }

    /// Get a medication by ID
    pub async fn get(&self, id: &str) -> Result<Medication> {
        self.repo.get_medication(id).await
    }

    /// List all medications
    pub async fn list(&self) -> Result<Vec<Medication>> {
        self.repo.list_medications().await
    }

    /// Schedule state of one medication right now.
    pub async fn schedule(&self, id: &str) -> Result<ScheduleInfo> {
        let med = self.repo.get_medication(id).await?;
        Ok(schedule_info(&med, Local::now().time()))
    }

    /// Log a dose take: decrement inventory (floored at zero), append
    /// to history, bump today's counter. Deliberately permissive — no
    /// hard cap at `frequency` and no rejection on empty inventory;
    /// the UI gates on `schedule().takeable`.
    pub async fn take(&self, id: &str, user_id: Option<&str>) -> Result<Medication> {
        let med = self.repo.get_medication(id).await?;
        let updated = take_dose(&med, Utc::now());

        tracing::info!(
            "Dose taken for {}: inventory {} -> {}, taken today {}",
            updated.name,
            med.inventory,
            updated.inventory,
            updated.stats.taken_count
        );

        let saved = self.repo.upsert_medication(&updated).await?;

        match self.remote.save_medication(&saved, user_id).await {
            SyncOutcome::Persisted => tracing::debug!("Take for {} persisted remotely", saved.id),
            SyncOutcome::LocalOnly => tracing::warn!("Take for {} saved locally only", saved.id),
        }

        Ok(saved)
    }

    /// Delete a medication. The remote delete is best-effort; local
    /// removal proceeds regardless of its outcome.
    pub async fn delete(&self, id: &str) -> Result<()> {
        if self.remote.delete_medication(id).await == SyncOutcome::LocalOnly {
            tracing::warn!("Remote delete for {} skipped or failed", id);
        }

        self.repo.delete_medication(id).await?;
        tracing::info!("Medication deleted: {}", id);
        Ok(())
    }

    /// Roll per-day counters over for every medication whose stats
    /// date is not `now`'s day. Idempotent within a day. Returns
    /// whether anything changed, as the caller's re-render signal.
    pub async fn run_daily_reset(&self, now: DateTime<Utc>) -> Result<bool> {
        let today = schedule::today_string(now);
        let mut changed = false;

        for med in self.repo.list_medications().await? {
            if let Some(updated) = reset_day(&med, &today) {
                tracing::info!("Daily reset for {} ({})", updated.name, today);
                self.repo.upsert_medication(&updated).await?;
                changed = true;
            }
        }

        Ok(changed)
    }

    /// Pull the user's medications from the remote store into the
    /// local repository (login-time reconciliation). Returns how many
    /// rows were merged.
    pub async fn sync_from_remote(&self, user_id: &str) -> Result<usize> {
        let meds = self.remote.fetch_medications(user_id).await;
        let count = meds.len();

        for med in meds {
            self.repo.upsert_medication(&med).await?;
        }

        tracing::info!("Merged {} medications from remote", count);
        Ok(count)
    }
}
