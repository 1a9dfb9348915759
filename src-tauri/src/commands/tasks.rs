//! Task-related commands

use crate::app::AppState;
use crate::database::{SaveTaskRequest, Task};
use crate::error::Result;
use tauri::State;

/// Create or update a task
#[tauri::command]
pub async fn save_task(state: State<'_, AppState>, req: SaveTaskRequest) -> Result<Task> {
    let user = state.user_id().await;
    state.tasks_service.save(req, user.as_deref()).await
}

/// List all tasks
#[tauri::command]
pub async fn list_tasks(state: State<'_, AppState>) -> Result<Vec<Task>> {
    state.tasks_service.list().await
}

/// Delete a task
#[tauri::command]
pub async fn delete_task(state: State<'_, AppState>, id: String) -> Result<()> {
    state.tasks_service.delete(&id).await
}

/// Pull the signed-in user's tasks from the remote store
#[tauri::command]
pub async fn sync_tasks(state: State<'_, AppState>) -> Result<usize> {
    match state.user_id().await {
        Some(user) => state.tasks_service.sync_from_remote(&user).await,
        None => Ok(0),
    }
}
