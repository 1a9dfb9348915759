//! Repository layer for database operations
//!
//! The local store is the authoritative copy for the current session;
//! every mutation is written here before (and regardless of) any
//! remote sync outcome.

use super::models::*;
use crate::error::{AppError, Result};
use sqlx::SqlitePool;

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or update a medication keyed by id
    pub async fn upsert_medication(&self, med: &Medication) -> Result<Medication> {
        let saved = sqlx::query_as::<_, Medication>(
            r#"
            INSERT INTO medications
                (id, name, dosage, frequency, inventory, limit_alert, instructions,
                 reminder_times, history, stats, medication_config, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                dosage = excluded.dosage,
                frequency = excluded.frequency,
                inventory = excluded.inventory,
                limit_alert = excluded.limit_alert,
                instructions = excluded.instructions,
                reminder_times = excluded.reminder_times,
                history = excluded.history,
                stats = excluded.stats,
                medication_config = excluded.medication_config,
                updated_at = excluded.updated_at
            RETURNING *
            "#,
        )
        .bind(&med.id)
        .bind(&med.name)
        .bind(&med.dosage)
        .bind(med.frequency)
        .bind(med.inventory)
        .bind(med.limit_alert)
        .bind(&med.instructions)
        .bind(&med.reminder_times)
        .bind(&med.history)
        .bind(&med.stats)
        .bind(&med.medication_config)
        .bind(med.created_at)
        .bind(med.updated_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Upserted medication: {}", saved.id);
        Ok(saved)
    }

    /// Get a medication by ID
    pub async fn get_medication(&self, id: &str) -> Result<Medication> {
        let med = sqlx::query_as::<_, Medication>(
            r#"
            SELECT * FROM medications WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::MedicationNotFound(id.to_string()))?;

        Ok(med)
    }

    /// List all medications in creation order
    pub async fn list_medications(&self) -> Result<Vec<Medication>> {
        let meds = sqlx::query_as::<_, Medication>(
            r#"
            SELECT * FROM medications ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(meds)
    }

    /// Delete a medication
    pub async fn delete_medication(&self, id: &str) -> Result<()> {
        let rows = sqlx::query("DELETE FROM medications WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::MedicationNotFound(id.to_string()));
        }

        tracing::debug!("Deleted medication: {}", id);
        Ok(())
    }

    /// Insert or update a task keyed by id
    pub async fn upsert_task(&self, task: &Task) -> Result<Task> {
        let saved = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks
                (id, title, note, date, start_time, end_time, status, checked,
                 recur_days, reminder, template_id, color, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                note = excluded.note,
                date = excluded.date,
                start_time = excluded.start_time,
                end_time = excluded.end_time,
                status = excluded.status,
                checked = excluded.checked,
                recur_days = excluded.recur_days,
                reminder = excluded.reminder,
                template_id = excluded.template_id,
                color = excluded.color,
                updated_at = excluded.updated_at
            RETURNING *
            "#,
        )
        .bind(&task.id)
        .bind(&task.title)
        .bind(&task.note)
        .bind(&task.date)
        .bind(&task.start_time)
        .bind(&task.end_time)
        .bind(&task.status)
        .bind(task.checked)
        .bind(&task.recur_days)
        .bind(&task.reminder)
        .bind(&task.template_id)
        .bind(&task.color)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Upserted task: {}", saved.id);
        Ok(saved)
    }

    /// Get a task by ID
    pub async fn get_task(&self, id: &str) -> Result<Task> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT * FROM tasks WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::TaskNotFound(id.to_string()))?;

        Ok(task)
    }

    /// List all tasks, most recently updated first
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT * FROM tasks ORDER BY updated_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Delete a task
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        let rows = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::TaskNotFound(id.to_string()));
        }

        tracing::debug!("Deleted task: {}", id);
        Ok(())
    }
}
