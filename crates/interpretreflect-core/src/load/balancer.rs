//! Store-backed cognitive load balancing.
//!
//! Wraps the pure scoring functions with persistence. Writes are
//! best-effort: a failed write is logged and swallowed, and the computed
//! result is still returned to the caller. Reads that the computation
//! depends on (complexity lookup, latest snapshot) propagate errors.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::error::{Result, RoutingError};
use crate::load::capacity::{CapacityUpdate, CognitiveCapacity};
use crate::load::complexity::{score_complexity, AssignmentComplexity, TaskAttributes};
use crate::load::outcome::{outcome_adjustment, AssignmentOutcome};
use crate::load::routing::{recommend_routing, RoutingRecommendation};
use crate::storage::Database;

/// Cognitive load balancer backed by the scores/outcomes store.
pub struct LoadBalancer {
    db: Database,
}

impl LoadBalancer {
    /// Wrap an open database.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Open against the default database location.
    pub fn open() -> Result<Self> {
        Ok(Self::new(Database::open()?))
    }

    /// Access the underlying database.
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Score an assignment and record the result, keyed by task id.
    ///
    /// The computed score is returned even when the write fails.
    pub fn score_assignment(
        &self,
        task_id: &str,
        attrs: &TaskAttributes,
        now: DateTime<Utc>,
    ) -> AssignmentComplexity {
        let complexity = score_complexity(task_id, attrs, now);

        if let Err(e) = self.db.upsert_complexity(&complexity) {
            warn!("failed to persist complexity score for task {task_id}: {e}");
        }

        complexity
    }

    /// Current capacity snapshot for a user.
    ///
    /// A user with no recorded snapshot gets the documented defaults;
    /// that is a new user, not an error.
    pub fn current_capacity(&self, user_id: &str, now: DateTime<Utc>) -> Result<CognitiveCapacity> {
        Ok(self
            .db
            .latest_capacity(user_id)?
            .unwrap_or_else(|| CognitiveCapacity::defaults_for(user_id, now)))
    }

    /// Merge a partial update over the latest snapshot (or defaults) and
    /// append the result as a new row in the time series.
    ///
    /// The merged snapshot is returned even when the append fails.
    pub fn update_capacity(
        &self,
        user_id: &str,
        update: &CapacityUpdate,
        now: DateTime<Utc>,
    ) -> Result<CognitiveCapacity> {
        let current = self.current_capacity(user_id, now)?;
        let merged = current.apply_update(update, now);

        if let Err(e) = self.db.append_capacity(&merged) {
            warn!("failed to persist capacity snapshot for user {user_id}: {e}");
        }

        Ok(merged)
    }

    /// Routing recommendation for pairing a task with a user.
    ///
    /// # Errors
    /// Returns [`RoutingError::MissingComplexity`] when the task has no
    /// recorded complexity score.
    pub fn recommend(
        &self,
        task_id: &str,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<RoutingRecommendation> {
        let complexity =
            self.db
                .get_complexity(task_id)?
                .ok_or_else(|| RoutingError::MissingComplexity {
                    task_id: task_id.to_string(),
                })?;
        let capacity = self.current_capacity(user_id, now)?;

        Ok(recommend_routing(&complexity, &capacity, now))
    }

    /// Record an assignment outcome and fold its capacity adjustment into
    /// the user's profile. Returns the adjusted snapshot.
    pub fn record_outcome(
        &self,
        outcome: &AssignmentOutcome,
        now: DateTime<Utc>,
    ) -> Result<CognitiveCapacity> {
        if let Err(e) = self.db.append_outcome(outcome) {
            warn!(
                "failed to persist outcome for task {}: {e}",
                outcome.task_id
            );
        }

        let adjustment = outcome_adjustment(outcome);
        self.update_capacity(&outcome.user_id, &adjustment, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::load::complexity::{EmotionalIntensity, Stakes, TimePressure};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
    }

    fn balancer() -> LoadBalancer {
        LoadBalancer::new(Database::open_memory().unwrap())
    }

    fn attrs() -> TaskAttributes {
        TaskAttributes {
            domain: "medical".to_string(),
            stakes: Stakes::High,
            time_pressure: TimePressure::Standard,
            emotional_intensity: EmotionalIntensity::Moderate,
            duration_minutes: 45,
            technical_content: true,
            cultural_context: false,
        }
    }

    #[test]
    fn test_score_and_recommend_roundtrip() {
        let lb = balancer();
        let complexity = lb.score_assignment("task-1", &attrs(), now());

        let rec = lb.recommend("task-1", "user-1", now()).unwrap();
        assert_eq!(rec.task_id, "task-1");
        assert_eq!(rec.user_id, "user-1");
        assert!(
            (rec.capacity_utilization as f64
                - (complexity.total_complexity_score / 0.8 * 100.0).round())
            .abs()
                < 1.0
        );
    }

    #[test]
    fn test_recommend_missing_complexity_is_hard_failure() {
        let lb = balancer();
        let err = lb.recommend("ghost-task", "user-1", now()).unwrap_err();
        match err {
            CoreError::Routing(RoutingError::MissingComplexity { task_id }) => {
                assert_eq!(task_id, "ghost-task");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_new_user_gets_defaults() {
        let lb = balancer();
        let capacity = lb.current_capacity("newcomer", now()).unwrap();
        assert_eq!(capacity.available_capacity, 0.8);
        assert_eq!(capacity.optimal_break_duration, 15);
    }

    #[test]
    fn test_update_capacity_appends_snapshot() {
        let lb = balancer();
        let update = CapacityUpdate {
            available_capacity: Some(0.5),
            ..Default::default()
        };

        let merged = lb.update_capacity("user-1", &update, now()).unwrap();
        assert_eq!(merged.available_capacity, 0.5);

        // A later update merges over the stored snapshot, not the defaults
        let update2 = CapacityUpdate {
            decision_fatigue_level: Some(0.9),
            ..Default::default()
        };
        let merged2 = lb
            .update_capacity("user-1", &update2, now() + Duration::hours(1))
            .unwrap();
        assert_eq!(merged2.available_capacity, 0.5);
        assert_eq!(merged2.decision_fatigue_level, 0.9);
    }

    #[test]
    fn test_record_outcome_adjusts_capacity() {
        let lb = balancer();
        let outcome = AssignmentOutcome {
            task_id: "task-1".to_string(),
            user_id: "user-1".to_string(),
            performance_score: 95,
            stress_level: 9,
            actual_recovery_minutes: Some(50),
            completed_at: now(),
        };

        let snapshot = lb.record_outcome(&outcome, now()).unwrap();
        assert_eq!(snapshot.available_capacity, 1.0);
        assert!((snapshot.decision_fatigue_level - 0.9).abs() < 1e-9);
        assert_eq!(snapshot.optimal_break_duration, 50);
    }

    #[test]
    fn test_store_write_failure_still_returns_score() {
        let lb = balancer();
        // Sabotage the scores table; the computation must still come back.
        lb.db()
            .conn()
            .execute_batch("DROP TABLE assignment_complexity")
            .unwrap();

        let complexity = lb.score_assignment("task-1", &attrs(), now());
        assert!(complexity.total_complexity_score > 0.0);
    }
}
