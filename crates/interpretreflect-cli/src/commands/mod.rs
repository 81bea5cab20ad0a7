pub mod capacity;
pub mod complexity;
pub mod config;
pub mod log;
pub mod nudges;
pub mod outcome;
pub mod patterns;
pub mod routing;

use chrono::{DateTime, Utc};
use interpretreflect_core::storage::{Config, Database};
use interpretreflect_core::PatternState;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Resolve the acting user: explicit flag, else the configured profile.
fn resolve_user(flag: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    match flag {
        Some(user) => Ok(user),
        None => Ok(Config::load()?.profile.user),
    }
}

/// Parse an optional RFC 3339 timestamp flag, defaulting to now.
fn resolve_timestamp(flag: Option<String>) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    match flag {
        Some(s) => Ok(DateTime::parse_from_rfc3339(&s)?.with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn state_key(user: &str) -> String {
    format!("pattern_state:{user}")
}

/// Restore a user's pattern-engine state from the kv store. A missing or
/// unreadable checkpoint starts fresh.
fn load_state(db: &Database, user: &str) -> PatternState {
    db.kv_get(&state_key(user))
        .ok()
        .flatten()
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}

/// Checkpoint a user's pattern-engine state. Best-effort: a failed write
/// is reported on stderr and otherwise ignored.
fn save_state(db: &Database, user: &str, state: &PatternState) {
    let json = match serde_json::to_string(state) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("warning: could not serialize pattern state: {e}");
            return;
        }
    };
    if let Err(e) = db.kv_set(&state_key(user), &json) {
        eprintln!("warning: could not checkpoint pattern state: {e}");
    }
}
