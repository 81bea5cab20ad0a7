//! Cognitive capacity snapshots.
//!
//! A capacity snapshot describes how much spare cognitive room a user has
//! right now. Snapshots form an append-only time series: an update merges
//! a partial change over the latest snapshot (or the new-user defaults)
//! and stamps a fresh measurement time. Nothing is mutated in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest value `recovery_rate` may take after a merge.
const MIN_RECOVERY_RATE: f64 = 0.1;

/// Per-user cognitive capacity snapshot. All unit-range fields are clamped
/// to [0, 1] at merge time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CognitiveCapacity {
    pub user_id: String,
    pub measured_at: DateTime<Utc>,

    pub available_capacity: f64,
    pub working_memory_load: f64,
    pub attention_reserve: f64,
    pub decision_fatigue_level: f64,
    pub multitasking_efficiency: f64,
    pub error_rate_under_pressure: f64,
    pub high_load_performance: f64,

    pub medical_terminology_capacity: f64,
    pub legal_complexity_capacity: f64,
    pub technical_jargon_capacity: f64,
    pub emotional_resilience_capacity: f64,

    /// Recovery speed multiplier (1.0 = nominal)
    pub recovery_rate: f64,
    /// Recommended break length in minutes
    pub optimal_break_duration: u32,
}

impl CognitiveCapacity {
    /// Documented defaults for a user with no prior snapshot.
    pub fn defaults_for(user_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            measured_at: now,
            available_capacity: 0.8,
            working_memory_load: 0.2,
            attention_reserve: 0.8,
            decision_fatigue_level: 0.1,
            multitasking_efficiency: 0.6,
            error_rate_under_pressure: 0.1,
            high_load_performance: 0.7,
            medical_terminology_capacity: 0.5,
            legal_complexity_capacity: 0.5,
            technical_jargon_capacity: 0.5,
            emotional_resilience_capacity: 0.7,
            recovery_rate: 1.0,
            optimal_break_duration: 15,
        }
    }

    /// Merge a partial update over this snapshot, producing a new snapshot
    /// stamped at `now`. The original is untouched.
    pub fn apply_update(&self, update: &CapacityUpdate, now: DateTime<Utc>) -> Self {
        fn merged(current: f64, update: Option<f64>) -> f64 {
            update.unwrap_or(current).clamp(0.0, 1.0)
        }

        Self {
            user_id: self.user_id.clone(),
            measured_at: now,
            available_capacity: merged(self.available_capacity, update.available_capacity),
            working_memory_load: merged(self.working_memory_load, update.working_memory_load),
            attention_reserve: merged(self.attention_reserve, update.attention_reserve),
            decision_fatigue_level: merged(
                self.decision_fatigue_level,
                update.decision_fatigue_level,
            ),
            multitasking_efficiency: merged(
                self.multitasking_efficiency,
                update.multitasking_efficiency,
            ),
            error_rate_under_pressure: merged(
                self.error_rate_under_pressure,
                update.error_rate_under_pressure,
            ),
            high_load_performance: merged(self.high_load_performance, update.high_load_performance),
            medical_terminology_capacity: merged(
                self.medical_terminology_capacity,
                update.medical_terminology_capacity,
            ),
            legal_complexity_capacity: merged(
                self.legal_complexity_capacity,
                update.legal_complexity_capacity,
            ),
            technical_jargon_capacity: merged(
                self.technical_jargon_capacity,
                update.technical_jargon_capacity,
            ),
            emotional_resilience_capacity: merged(
                self.emotional_resilience_capacity,
                update.emotional_resilience_capacity,
            ),
            recovery_rate: update
                .recovery_rate
                .unwrap_or(self.recovery_rate)
                .max(MIN_RECOVERY_RATE),
            optimal_break_duration: update
                .optimal_break_duration
                .unwrap_or(self.optimal_break_duration),
        }
    }
}

/// Partial capacity update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapacityUpdate {
    #[serde(default)]
    pub available_capacity: Option<f64>,
    #[serde(default)]
    pub working_memory_load: Option<f64>,
    #[serde(default)]
    pub attention_reserve: Option<f64>,
    #[serde(default)]
    pub decision_fatigue_level: Option<f64>,
    #[serde(default)]
    pub multitasking_efficiency: Option<f64>,
    #[serde(default)]
    pub error_rate_under_pressure: Option<f64>,
    #[serde(default)]
    pub high_load_performance: Option<f64>,
    #[serde(default)]
    pub medical_terminology_capacity: Option<f64>,
    #[serde(default)]
    pub legal_complexity_capacity: Option<f64>,
    #[serde(default)]
    pub technical_jargon_capacity: Option<f64>,
    #[serde(default)]
    pub emotional_resilience_capacity: Option<f64>,
    #[serde(default)]
    pub recovery_rate: Option<f64>,
    #[serde(default)]
    pub optimal_break_duration: Option<u32>,
}

impl CapacityUpdate {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.available_capacity.is_none()
            && self.working_memory_load.is_none()
            && self.attention_reserve.is_none()
            && self.decision_fatigue_level.is_none()
            && self.multitasking_efficiency.is_none()
            && self.error_rate_under_pressure.is_none()
            && self.high_load_performance.is_none()
            && self.medical_terminology_capacity.is_none()
            && self.legal_complexity_capacity.is_none()
            && self.technical_jargon_capacity.is_none()
            && self.emotional_resilience_capacity.is_none()
            && self.recovery_rate.is_none()
            && self.optimal_break_duration.is_none()
    }
}
