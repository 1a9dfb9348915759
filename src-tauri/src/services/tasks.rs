//! Tasks service
//!
//! Task list management with the same local-first contract as
//! medications: local commit first, best-effort remote sync.

use crate::database::{Repository, SaveTaskRequest, Task};
use crate::error::{AppError, Result};
use crate::sync::{RemoteStore, SyncOutcome};
use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

/// Service for managing tasks
#[derive(Clone)]
pub struct TasksService {
    repo: Repository,
    remote: RemoteStore,
}

impl TasksService {
    pub fn new(repo: Repository, remote: RemoteStore) -> Self {
        Self { repo, remote }
    }

    /// Create or update a task.
    pub async fn save(&self, req: SaveTaskRequest, user_id: Option<&str>) -> Result<Task> {
        let now = Utc::now();

        let task = match &req.id {
            Some(id) => {
                let existing = self.repo.get_task(id).await?;
                let title = req.title.unwrap_or(existing.title);
                if title.trim().is_empty() {
                    return Err(AppError::Validation("Task title is required".to_string()));
                }
                Task {
                    title,
                    note: req.note.or(existing.note),
                    date: req.date.or(existing.date),
                    start_time: req.start_time.or(existing.start_time),
                    end_time: req.end_time.or(existing.end_time),
                    status: req.status.unwrap_or(existing.status),
                    checked: req.checked.unwrap_or(existing.checked),
                    recur_days: req.recur_days.map(Json).unwrap_or(existing.recur_days),
                    reminder: req.reminder.or(existing.reminder),
                    template_id: req.template_id.or(existing.template_id),
                    color: req.color.or(existing.color),
                    updated_at: now,
                    ..existing
                }
            }
            None => {
                let title = req.title.unwrap_or_default();
                if title.trim().is_empty() {
                    return Err(AppError::Validation("Task title is required".to_string()));
                }
                Task {
                    id: Uuid::new_v4().to_string(),
                    title,
                    note: req.note,
                    date: req.date,
                    start_time: req.start_time,
                    end_time: req.end_time,
                    status: req.status.unwrap_or_else(|| "pending".to_string()),
                    checked: req.checked.unwrap_or(false),
                    recur_days: Json(req.recur_days.unwrap_or_default()),
                    reminder: req.reminder,
                    template_id: req.template_id,
                    color: req.color,
                    created_at: now,
                    updated_at: now,
                }
            }
        };

        tracing::info!("Saving task: {} ({})", task.title, task.id);
        let saved = self.repo.upsert_task(&task).await?;

        if self.remote.save_task(&saved, user_id).await == SyncOutcome::LocalOnly {
            tracing::warn!("Task {} saved locally only", saved.id);
        }

        Ok(saved)
    }

    /// List all tasks
    pub async fn list(&self) -> Result<Vec<Task>> {
        self.repo.list_tasks().await
    }

    /// Delete a task. Remote delete is best-effort.
    pub async fn delete(&self, id: &str) -> Result<()> {
        if self.remote.delete_task(id).await == SyncOutcome::LocalOnly {
            tracing::warn!("Remote delete for task {} skipped or failed", id);
        }

        self.repo.delete_task(id).await?;
        tracing::info!("Task deleted: {}", id);
        Ok(())
    }

    /// Pull the user's tasks from the remote store into the local
    /// repository.
    pub async fn sync_from_remote(&self, user_id: &str) -> Result<usize> {
        let tasks = self.remote.fetch_tasks(user_id).await;
        let count = tasks.len();

        for task in tasks {
            self.repo.upsert_task(&task).await?;
        }

        tracing::info!("Merged {} tasks from remote", count);
        Ok(count)
    }
}
