//! Medication-related commands
//!
//! CRUD, dose taking and schedule queries for medications.

use crate::app::AppState;
use crate::database::{Medication, SaveMedicationRequest};
use crate::error::Result;
use crate::services::medications::ScheduleInfo;
use tauri::State;

/// Create or update a medication
#[tauri::command]
pub async fn save_medication(
    state: State<'_, AppState>,
    req: SaveMedicationRequest,
) -> Result<Medication> {
    let user = state.user_id().await;
    state
        .medications_service
        .save(req, user.as_deref())
        .await
}

/// Get a medication by ID
#[tauri::command]
pub async fn get_medication(state: State<'_, AppState>, id: String) -> Result<Medication> {
    state.medications_service.get(&id).await
}

/// List all medications
#[tauri::command]
pub async fn list_medications(state: State<'_, AppState>) -> Result<Vec<Medication>> {
    state.medications_service.list().await
}

/// Next dose slot and takeability for one medication
#[tauri::command]
pub async fn medication_schedule(
    state: State<'_, AppState>,
    id: String,
) -> Result<ScheduleInfo> {
    state.medications_service.schedule(&id).await
}

/// Log a dose take
#[tauri::command]
pub async fn take_medication(state: State<'_, AppState>, id: String) -> Result<Medication> {
    let user = state.user_id().await;
    state
        .medications_service
        .take(&id, user.as_deref())
        .await
}

/// Delete a medication
#[tauri::command]
pub async fn delete_medication(state: State<'_, AppState>, id: String) -> Result<()> {
    state.medications_service.delete(&id).await
}

/// Pull the signed-in user's medications from the remote store
#[tauri::command]
pub async fn sync_medications(state: State<'_, AppState>) -> Result<usize> {
    match state.user_id().await {
        Some(user) => state.medications_service.sync_from_remote(&user).await,
        None => Ok(0),
    }
}
