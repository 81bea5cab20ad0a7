//! TOML-based application configuration.
//!
//! Stores operational preferences: the default profile, how far back
//! event history queries reach, and whether pattern-engine state is
//! checkpointed between sessions. Configuration never alters rule
//! ratios, windows, or scoring weights; those are compile-time constants.
//!
//! Stored at `~/.config/interpretreflect/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Default profile configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// User id operations default to when none is given
    #[serde(default = "default_user")]
    pub user: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
        }
    }
}

/// Event retention configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionConfig {
    /// How many days of events are materialized for pattern analysis
    #[serde(default = "default_event_window_days")]
    pub event_window_days: u32,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            event_window_days: default_event_window_days(),
        }
    }
}

/// Nudge persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NudgeConfig {
    /// Whether pattern-engine state is checkpointed to the kv store
    #[serde(default = "default_true")]
    pub persist_state: bool,
}

impl Default for NudgeConfig {
    fn default() -> Self {
        Self {
            persist_state: default_true(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/interpretreflect/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub retention: RetentionConfig,
    #[serde(default)]
    pub nudges: NudgeConfig,
}

fn default_user() -> String {
    "default".to_string()
}

fn default_event_window_days() -> u32 {
    90
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Path of the configuration file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file
    /// does not exist yet.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save the configuration.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })
    }
}
