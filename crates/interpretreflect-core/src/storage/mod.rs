//! Persistence: SQLite stores and TOML configuration.

mod config;
pub mod database;

pub use config::{Config, NudgeConfig, ProfileConfig, RetentionConfig};
pub use database::Database;

use std::path::PathBuf;

use crate::error::StoreError;

/// Returns `~/.config/interpretreflect[-dev]/` based on REFLECT_ENV.
///
/// Set REFLECT_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("REFLECT_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("interpretreflect-dev")
    } else {
        base_dir.join("interpretreflect")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StoreError::DataDirError(e.to_string()))?;
    Ok(dir)
}
