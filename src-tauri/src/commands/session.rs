//! Session commands
//!
//! The frontend owns authentication; these commands only record which
//! user id subsequent remote syncs should use.

use crate::app::AppState;
use crate::error::Result;
use tauri::State;

/// Record the signed-in user id
#[tauri::command]
pub async fn set_session(state: State<'_, AppState>, user_id: String) -> Result<()> {
    tracing::info!("Session started");
    let mut session = state.session_user.write().await;
    *session = Some(user_id);
    Ok(())
}

/// Clear the session (sign-out)
#[tauri::command]
pub async fn clear_session(state: State<'_, AppState>) -> Result<()> {
    tracing::info!("Session cleared");
    let mut session = state.session_user.write().await;
    *session = None;
    Ok(())
}
