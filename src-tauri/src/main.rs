// CareTrack - caregiving tracker for medication schedules and daily tasks
// Entry point and application setup

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod commands;
mod config;
mod database;
mod dosing;
mod error;
mod services;
mod sync;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "caretrack=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CareTrack application");

    tauri::Builder::default()
        .plugin(tauri_plugin_shell::init())
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_notification::init())
        .setup(|app| {
            tracing::info!("Running app setup");
            app::setup(app)?;
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_app_info,
            commands::save_medication,
            commands::get_medication,
            commands::list_medications,
            commands::medication_schedule,
            commands::take_medication,
            commands::delete_medication,
            commands::sync_medications,
            commands::save_task,
            commands::list_tasks,
            commands::delete_task,
            commands::sync_tasks,
            commands::set_session,
            commands::clear_session,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
