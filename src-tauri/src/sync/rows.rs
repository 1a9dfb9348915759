//! Remote row shapes and reconciliation
//!
//! The hosted store keeps snake_case columns (`reminder_times`,
//! `limit_alert`, ...) with JSON blobs for stats and history. These
//! structs mirror that shape exactly; the translation functions fill
//! defaults for absent fields so rows written by older clients load
//! cleanly.

use crate::config::DEFAULT_LIMIT_ALERT;
use crate::database::{DayStats, DoseEvent, Medication, MedicationConfig, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// Row in the remote `medications` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicationRow {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub frequency: Option<i64>,
    #[serde(default)]
    pub inventory: Option<i64>,
    #[serde(default)]
    pub limit_alert: Option<i64>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub reminder_times: Option<Vec<String>>,
    #[serde(default)]
    pub history: Option<Vec<DoseEvent>>,
    #[serde(default)]
    pub stats: Option<DayStats>,
    #[serde(default)]
    pub medication_config: Option<MedicationConfig>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Row in the remote `tasks` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRow {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub checked: Option<bool>,
    #[serde(default)]
    pub recur_days: Option<Vec<String>>,
    #[serde(default)]
    pub reminder: Option<String>,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Local medication → remote row.
pub fn to_medication_row(med: &Medication, user_id: &str) -> MedicationRow {
    MedicationRow {
        id: med.id.clone(),
        user_id: Some(user_id.to_string()),
        name: med.name.clone(),
        dosage: Some(med.dosage.clone()),
        frequency: Some(med.frequency),
        inventory: Some(med.inventory),
        limit_alert: Some(med.limit_alert),
        instructions: med.instructions.clone(),
        reminder_times: Some(med.reminder_times.0.clone()),
        history: Some(med.history.0.clone()),
        stats: Some(med.stats.0.clone()),
        medication_config: med.medication_config.as_ref().map(|c| c.0.clone()),
        updated_at: Some(med.updated_at),
    }
}

/// Remote row → local medication, defaults filled.
pub fn from_medication_row(row: MedicationRow) -> Medication {
    let updated_at = row.updated_at.unwrap_or_else(Utc::now);

    Medication {
        id: row.id,
        name: row.name,
        dosage: row.dosage.unwrap_or_default(),
        frequency: row.frequency.unwrap_or(crate::config::DEFAULT_FREQUENCY),
        inventory: row.inventory.unwrap_or(0),
        limit_alert: row.limit_alert.unwrap_or(DEFAULT_LIMIT_ALERT),
        instructions: row.instructions,
        reminder_times: Json(row.reminder_times.unwrap_or_default()),
        history: Json(row.history.unwrap_or_default()),
        stats: Json(row.stats.unwrap_or_default()),
        medication_config: row.medication_config.map(Json),
        created_at: updated_at,
        updated_at,
    }
}

/// Local task → remote row.
pub fn to_task_row(task: &Task, user_id: &str) -> TaskRow {
    TaskRow {
        id: task.id.clone(),
        user_id: Some(user_id.to_string()),
        title: task.title.clone(),
        note: task.note.clone(),
        date: task.date.clone(),
        start_time: task.start_time.clone(),
        end_time: task.end_time.clone(),
        status: Some(task.status.clone()),
        checked: Some(task.checked),
        recur_days: Some(task.recur_days.0.clone()),
        reminder: task.reminder.clone(),
        template_id: task.template_id.clone(),
        color: task.color.clone(),
        updated_at: Some(task.updated_at),
    }
}

/// Remote row → local task, defaults filled.
pub fn from_task_row(row: TaskRow) -> Task {
    let updated_at = row.updated_at.unwrap_or_else(Utc::now);

    Task {
        id: row.id,
        title: row.title,
        note: row.note,
        date: row.date,
        start_time: row.start_time,
        end_time: row.end_time,
        status: row.status.unwrap_or_else(|| "pending".to_string()),
        checked: row.checked.unwrap_or(false),
        recur_days: Json(row.recur_days.unwrap_or_default()),
        reminder: row.reminder,
        template_id: row.template_id,
        color: row.color,
        created_at: updated_at,
        updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_row_fills_defaults() {
        // A row written before stats/limit columns existed
        let row: MedicationRow = serde_json::from_value(serde_json::json!({
            "id": "med_1700000000000",
            "name": "Melatonin"
        }))
        .unwrap();

        let med = from_medication_row(row);

        assert_eq!(med.id, "med_1700000000000");
        assert_eq!(med.frequency, 1);
        assert_eq!(med.limit_alert, 5);
        assert_eq!(med.inventory, 0);
        assert!(med.reminder_times.is_empty());
        assert!(med.history.is_empty());
        assert_eq!(med.stats.taken_count, 0);
        assert_eq!(med.stats.skipped_count, 0);
    }

    #[test]
    fn test_stats_blob_uses_camel_case_keys() {
        let row: MedicationRow = serde_json::from_value(serde_json::json!({
            "id": "med_1",
            "name": "Melatonin",
            "stats": { "takenCount": 2, "skippedCount": 1, "date": "2024-01-01" }
        }))
        .unwrap();

        let med = from_medication_row(row);
        assert_eq!(med.stats.taken_count, 2);
        assert_eq!(med.stats.skipped_count, 1);
        assert_eq!(med.stats.date, "2024-01-01");

        let back = to_medication_row(&med, "user-1");
        let value = serde_json::to_value(&back).unwrap();
        assert_eq!(value["stats"]["takenCount"], 2);
        assert_eq!(value["limit_alert"], 5);
        assert_eq!(value["user_id"], "user-1");
    }

    #[test]
    fn test_task_row_round_trip() {
        let row: TaskRow = serde_json::from_value(serde_json::json!({
            "id": "7f9f4c1e-0000-0000-0000-000000000000",
            "title": "Evening walk",
            "checked": true,
            "recur_days": ["tue", "thu"]
        }))
        .unwrap();

        let task = from_task_row(row);
        assert_eq!(task.status, "pending");
        assert!(task.checked);
        assert_eq!(task.recur_days.0, vec!["tue", "thu"]);

        let back = to_task_row(&task, "user-1");
        assert_eq!(back.user_id.as_deref(), Some("user-1"));
        assert_eq!(back.status.as_deref(), Some("pending"));
    }
}
