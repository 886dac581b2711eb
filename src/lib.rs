//! Biblioteca Library Catalog API
//!
//! A Rust REST JSON API for a small library catalog: books, authors,
//! categories and user-owned book collections with token-based
//! authentication and per-owner modification permissions.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
