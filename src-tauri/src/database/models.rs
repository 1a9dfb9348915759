//! Database models
//!
//! Rust structs representing database entities.
//! All models use serde for serialization to frontend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A tracked medication with schedule, inventory and per-day stats.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Medication {
    /// `med_<unix-millis>` assigned client-side, or remote-assigned.
    pub id: String,
    pub name: String,
    /// Free-text amount and unit, e.g. "10 mg".
    pub dosage: String,
    /// Doses required per day.
    pub frequency: i64,
    /// Remaining dose units. Never below zero.
    pub inventory: i64,
    /// Inventory at or below this threshold means low stock.
    pub limit_alert: i64,
    pub instructions: Option<String>,
    /// Ordered `HH:MM` times of day. Insertion order is dose-slot order.
    pub reminder_times: Json<Vec<String>>,
    /// Append-only log of dose events. Never pruned.
    pub history: Json<Vec<DoseEvent>>,
    /// Counters scoped to a single calendar day.
    pub stats: Json<DayStats>,
    pub medication_config: Option<Json<MedicationConfig>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Medication {
    /// Doses already taken today according to the per-day counters.
    pub fn taken_today(&self) -> i64 {
        self.stats.taken_count
    }

    pub fn is_low_stock(&self) -> bool {
        self.inventory <= self.limit_alert
    }
}

/// One entry in a medication's dose history.
///
/// JSON field names match the rows written by earlier clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseEvent {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    /// `YYYY-MM-DD` of the take, UTC-derived.
    pub date: String,
}

/// Per-day adherence counters.
///
/// `date` identifies the calendar day the counters belong to; a
/// mismatch with today is the sole staleness signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStats {
    #[serde(default)]
    pub taken_count: i64,
    #[serde(default)]
    pub skipped_count: i64,
    #[serde(default)]
    pub date: String,
}

impl DayStats {
    /// Fresh counters for the given day.
    pub fn for_day(date: impl Into<String>) -> Self {
        Self {
            taken_count: 0,
            skipped_count: 0,
            date: date.into(),
        }
    }
}

/// Behavioral-tracking flags, opaque to the scheduler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicationConfig {
    #[serde(default)]
    pub track_neuro: bool,
    #[serde(default)]
    pub track_appetite: bool,
    #[serde(default)]
    pub track_drowsy: bool,
    #[serde(default)]
    pub track_irritability: bool,
}

/// Save medication request (create when `id` is absent, update otherwise)
#[derive(Debug, Clone, Deserialize)]
pub struct SaveMedicationRequest {
    pub id: Option<String>,
    pub name: String,
    pub dosage: Option<String>,
    pub frequency: Option<i64>,
    pub inventory: Option<i64>,
    pub limit_alert: Option<i64>,
    pub instructions: Option<String>,
    pub reminder_times: Option<Vec<String>>,
    pub medication_config: Option<MedicationConfig>,
}

/// A scheduled or ad-hoc caregiving task
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub note: Option<String>,
    /// `YYYY-MM-DD` the task belongs to.
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: String,
    pub checked: bool,
    pub recur_days: Json<Vec<String>>,
    pub reminder: Option<String>,
    pub template_id: Option<String>,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Save task request (create when `id` is absent, update otherwise)
#[derive(Debug, Clone, Deserialize)]
pub struct SaveTaskRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub note: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<String>,
    pub checked: Option<bool>,
    pub recur_days: Option<Vec<String>>,
    pub reminder: Option<String>,
    pub template_id: Option<String>,
    pub color: Option<String>,
}
