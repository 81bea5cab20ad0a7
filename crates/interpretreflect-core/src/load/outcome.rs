//! Assignment outcomes and the capacity adjustments they drive.
//!
//! After an assignment completes, the actual results feed back into the
//! user's capacity profile through the same merge path as any other
//! capacity update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::load::capacity::CapacityUpdate;

/// Actual results of a completed assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    pub task_id: String,
    pub user_id: String,

    /// Self- or supervisor-rated performance, 0-100
    pub performance_score: u32,
    /// Reported stress during the assignment, 0-10
    pub stress_level: u32,
    /// Minutes the user actually needed to recover, if tracked
    #[serde(default)]
    pub actual_recovery_minutes: Option<u32>,

    pub completed_at: DateTime<Utc>,
}

/// Derive the capacity adjustment an outcome implies.
///
/// Thresholds and targets are the behavioral contract:
/// - performance > 90 lifts available capacity toward min(1, perf/100 x 1.1)
/// - performance < 70 drops it toward max(0.3, perf/100 x 0.9)
/// - stress > 7 raises decision fatigue toward min(1, stress/10)
/// - recovery > 30 min raises the optimal break toward min(60, actual)
pub fn outcome_adjustment(outcome: &AssignmentOutcome) -> CapacityUpdate {
    let mut update = CapacityUpdate::default();

    let perf = outcome.performance_score as f64;
    if outcome.performance_score > 90 {
        update.available_capacity = Some((perf / 100.0 * 1.1).min(1.0));
    } else if outcome.performance_score < 70 {
        update.available_capacity = Some((perf / 100.0 * 0.9).max(0.3));
    }

    if outcome.stress_level > 7 {
        update.decision_fatigue_level = Some((outcome.stress_level as f64 / 10.0).min(1.0));
    }

    if let Some(recovery) = outcome.actual_recovery_minutes {
        if recovery > 30 {
            update.optimal_break_duration = Some(recovery.min(60));
        }
    }

    update
}
