//! Application state and initialization
//!
//! This module manages the central application state and lifecycle.
//! All services are initialized here and made available through
//! AppState; every mutation flows through the services rather than
//! ad hoc writes.

use crate::database::{create_pool, Repository};
use crate::error::Result;
use crate::services::{MedicationsService, RemindersService, TasksService};
use crate::sync::{RemoteConfig, RemoteStore};
use std::sync::Arc;
use tauri::{App, Manager};
use tokio::sync::RwLock;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub app_data_dir: std::path::PathBuf,
    pub medications_service: MedicationsService,
    pub tasks_service: TasksService,
    /// Signed-in user id, if any. Auth itself is handled by the
    /// frontend; we only carry the id for remote sync.
    pub session_user: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub async fn user_id(&self) -> Option<String> {
        self.session_user.read().await.clone()
    }
}

/// Application setup - called once on startup
pub fn setup(app: &mut App) -> Result<()> {
    tracing::info!("Initializing application");

    let app_data_dir = app.path().app_data_dir().map_err(|e| {
        crate::error::AppError::Generic(format!("Failed to get app data dir: {}", e))
    })?;

    tracing::info!("App data directory: {:?}", app_data_dir);

    std::fs::create_dir_all(&app_data_dir)?;
    std::fs::create_dir_all(app_data_dir.join("logs"))?;

    let db_path = app_data_dir.join("caretrack.db");
    let pool = tauri::async_runtime::block_on(create_pool(&db_path))?;
    let repo = Repository::new(pool);

    let remote = RemoteStore::new(RemoteConfig::from_env());
    let medications_service = MedicationsService::new(repo.clone(), remote.clone());
    let tasks_service = TasksService::new(repo, remote);

    // Background loop: daily-reset sweep + reminder notifications.
    let reminders = RemindersService::new(medications_service.clone());
    tauri::async_runtime::block_on(reminders.set_app_handle(app.handle().clone()));
    reminders.start();

    let state = AppState {
        app_data_dir,
        medications_service,
        tasks_service,
        session_user: Arc::new(RwLock::new(None)),
    };
    app.manage(state);

    tracing::info!("Application initialized successfully");

    Ok(())
}
