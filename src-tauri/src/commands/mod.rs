//! Tauri commands exposed to the frontend
//!
//! This module organizes commands into logical submodules:
//! - `medications`: Medication CRUD, dose taking, schedule queries
//! - `tasks`: Task CRUD
//! - `session`: Signed-in user tracking for remote sync

pub mod medications;
pub mod session;
pub mod tasks;

use crate::app::AppState;
use crate::error::Result;
use tauri::State;

// Re-export all commands for convenient registration in main.rs
pub use medications::*;
pub use session::*;
pub use tasks::*;

// ===== General Commands =====

/// Get application information
#[tauri::command]
pub async fn get_app_info(state: State<'_, AppState>) -> Result<AppInfo> {
    Ok(AppInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        app_data_dir: state.app_data_dir.to_string_lossy().to_string(),
    })
}

/// Application information structure
#[derive(serde::Serialize)]
pub struct AppInfo {
    pub version: String,
    pub app_data_dir: String,
}
