//! CareTrack library
//!
//! This library exposes the core functionality of CareTrack for testing
//! and potential future library use.

pub mod app;
pub mod commands;
pub mod config;
pub mod database;
pub mod dosing;
pub mod error;
pub mod services;
pub mod sync;
