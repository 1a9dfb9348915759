//! Sync gateway to the hosted row store
//!
//! Best-effort persistence over a PostgREST-style HTTP API. Every
//! mutation is committed locally first; remote failures are logged and
//! reported as `SyncOutcome::LocalOnly`, never propagated, so the
//! local-success path is never blocked.

pub mod rows;

pub use rows::{from_medication_row, from_task_row, to_medication_row, to_task_row};

use crate::database::{Medication, Task};
use crate::error::Result;
use rows::{MedicationRow, TaskRow};

/// Where a mutation ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Confirmed by the remote store.
    Persisted,
    /// Committed locally; the remote write was skipped or failed.
    LocalOnly,
}

/// Remote endpoint configuration.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_key: String,
}

impl RemoteConfig {
    /// Read the endpoint from the environment. Absent variables mean
    /// the app runs local-only.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("CARETRACK_SYNC_URL").ok()?;
        let api_key = std::env::var("CARETRACK_SYNC_KEY").ok()?;
        Some(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

/// Client for the hosted row store.
#[derive(Clone)]
pub struct RemoteStore {
    client: reqwest::Client,
    config: Option<RemoteConfig>,
}

impl RemoteStore {
    pub fn new(config: Option<RemoteConfig>) -> Self {
        if config.is_none() {
            tracing::info!("Remote sync not configured; running local-only");
        }
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// A store that never touches the network.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_some()
    }

    fn table_url(&self, config: &RemoteConfig, table: &str) -> String {
        format!("{}/rest/v1/{}", config.base_url, table)
    }

    /// Upsert a medication row keyed by id. Requires a signed-in user;
    /// otherwise the write stays local.
    pub async fn save_medication(&self, med: &Medication, user_id: Option<&str>) -> SyncOutcome {
        let (config, user_id) = match (&self.config, user_id) {
            (Some(c), Some(u)) => (c, u),
            _ => return SyncOutcome::LocalOnly,
        };

        let row = to_medication_row(med, user_id);
        match self.upsert(config, "medications", &row).await {
            Ok(()) => SyncOutcome::Persisted,
            Err(e) => {
                tracing::error!("Medication sync failed for {}: {}", med.id, e);
                SyncOutcome::LocalOnly
            }
        }
    }

    /// Fetch all medication rows for a user, reconciled to the local
    /// shape. Any failure logs and yields an empty list.
    pub async fn fetch_medications(&self, user_id: &str) -> Vec<Medication> {
        let config = match &self.config {
            Some(c) => c,
            None => return Vec::new(),
        };

        let rows: Result<Vec<MedicationRow>> =
            self.select(config, "medications", user_id).await;

        match rows {
            Ok(rows) => rows.into_iter().map(from_medication_row).collect(),
            Err(e) => {
                tracing::error!("Medication fetch failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Best-effort remote delete. The caller removes the local row
    /// regardless of this outcome.
    pub async fn delete_medication(&self, id: &str) -> SyncOutcome {
        let config = match &self.config {
            Some(c) => c,
            None => return SyncOutcome::LocalOnly,
        };

        match self.delete(config, "medications", id).await {
            Ok(()) => SyncOutcome::Persisted,
            Err(e) => {
                tracing::error!("Medication delete sync failed for {}: {}", id, e);
                SyncOutcome::LocalOnly
            }
        }
    }

    /// Upsert a task row keyed by id.
    pub async fn save_task(&self, task: &Task, user_id: Option<&str>) -> SyncOutcome {
        let (config, user_id) = match (&self.config, user_id) {
            (Some(c), Some(u)) => (c, u),
            _ => return SyncOutcome::LocalOnly,
        };

        let row = to_task_row(task, user_id);
        match self.upsert(config, "tasks", &row).await {
            Ok(()) => SyncOutcome::Persisted,
            Err(e) => {
                tracing::error!("Task sync failed for {}: {}", task.id, e);
                SyncOutcome::LocalOnly
            }
        }
    }

    /// Fetch all task rows for a user, reconciled to the local shape.
    pub async fn fetch_tasks(&self, user_id: &str) -> Vec<Task> {
        let config = match &self.config {
            Some(c) => c,
            None => return Vec::new(),
        };

        let rows: Result<Vec<TaskRow>> = self.select(config, "tasks", user_id).await;

        match rows {
            Ok(rows) => rows.into_iter().map(from_task_row).collect(),
            Err(e) => {
                tracing::error!("Task fetch failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Best-effort remote task delete.
    pub async fn delete_task(&self, id: &str) -> SyncOutcome {
        let config = match &self.config {
            Some(c) => c,
            None => return SyncOutcome::LocalOnly,
        };

        match self.delete(config, "tasks", id).await {
            Ok(()) => SyncOutcome::Persisted,
            Err(e) => {
                tracing::error!("Task delete sync failed for {}: {}", id, e);
                SyncOutcome::LocalOnly
            }
        }
    }

    async fn upsert<T: serde::Serialize>(
        &self,
        config: &RemoteConfig,
        table: &str,
        row: &T,
    ) -> Result<()> {
        self.client
            .post(self.table_url(config, table))
            .header("apikey", &config.api_key)
            .bearer_auth(&config.api_key)
            .header("Prefer", "resolution=merge-duplicates")
            .json(row)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    async fn select<T: serde::de::DeserializeOwned>(
        &self,
        config: &RemoteConfig,
        table: &str,
        user_id: &str,
    ) -> Result<Vec<T>> {
        let rows = self
            .client
            .get(self.table_url(config, table))
            .header("apikey", &config.api_key)
            .bearer_auth(&config.api_key)
            .query(&[("user_id", format!("eq.{}", user_id)), ("select", "*".to_string())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(rows)
    }

    async fn delete(&self, config: &RemoteConfig, table: &str, id: &str) -> Result<()> {
        self.client
            .delete(self.table_url(config, table))
            .header("apikey", &config.api_key)
            .bearer_auth(&config.api_key)
            .query(&[("id", format!("eq.{}", id))])
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DayStats;
    use chrono::Utc;
    use sqlx::types::Json;

    fn sample_medication() -> Medication {
        let now = Utc::now();
        Medication {
            id: "med_1".to_string(),
            name: "Melatonin".to_string(),
            dosage: "3 mg".to_string(),
            frequency: 1,
            inventory: 12,
            limit_alert: 5,
            instructions: None,
            reminder_times: Json(vec!["20:00".to_string()]),
            history: Json(vec![]),
            stats: Json(DayStats::for_day("2024-01-01")),
            medication_config: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_disabled_store_is_local_only() {
        let store = RemoteStore::disabled();
        let med = sample_medication();

        assert!(!store.is_enabled());
        assert_eq!(
            store.save_medication(&med, Some("user-1")).await,
            SyncOutcome::LocalOnly
        );
        assert_eq!(store.delete_medication("med_1").await, SyncOutcome::LocalOnly);
        assert!(store.fetch_medications("user-1").await.is_empty());
        assert!(store.fetch_tasks("user-1").await.is_empty());
    }

    #[tokio::test]
    async fn test_signed_out_save_is_local_only() {
        let store = RemoteStore::new(Some(RemoteConfig {
            base_url: "http://localhost:1".to_string(),
            api_key: "key".to_string(),
        }));
        let med = sample_medication();

        // No user id: the network is never touched.
        assert_eq!(
            store.save_medication(&med, None).await,
            SyncOutcome::LocalOnly
        );
    }

    #[tokio::test]
    async fn test_unreachable_remote_is_swallowed() {
        // Nothing listens on this port; the failure must be contained.
        let store = RemoteStore::new(Some(RemoteConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            api_key: "key".to_string(),
        }));
        let med = sample_medication();

        assert_eq!(
            store.save_medication(&med, Some("user-1")).await,
            SyncOutcome::LocalOnly
        );
        assert!(store.fetch_medications("user-1").await.is_empty());
        assert_eq!(store.delete_medication("med_1").await, SyncOutcome::LocalOnly);
    }
}
