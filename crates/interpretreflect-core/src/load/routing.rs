//! Routing recommendations.
//!
//! Combines one assignment's complexity with one capacity snapshot to
//! produce a deterministic, explainable staffing recommendation. The
//! reasoning list records which rules fired, in order; it is part of the
//! observable contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::load::capacity::CognitiveCapacity;
use crate::load::complexity::AssignmentComplexity;

/// Risk tier for taking on an assignment.
///
/// Tier boundaries are inclusive on the lower side: a utilization ratio of
/// exactly 0.6, 0.8, or 1.0 falls in the lower tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Overload,
}

impl RiskLevel {
    /// Tier for a raw utilization ratio (complexity / available capacity).
    pub fn from_utilization_ratio(ratio: f64) -> Self {
        if ratio <= 0.6 {
            RiskLevel::Low
        } else if ratio <= 0.8 {
            RiskLevel::Moderate
        } else if ratio <= 1.0 {
            RiskLevel::High
        } else {
            RiskLevel::Overload
        }
    }

    /// Escalate exactly one tier. Overload stays Overload.
    pub fn escalate(self) -> Self {
        match self {
            RiskLevel::Low => RiskLevel::Moderate,
            RiskLevel::Moderate => RiskLevel::High,
            RiskLevel::High => RiskLevel::Overload,
            RiskLevel::Overload => RiskLevel::Overload,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Overload => "overload",
        }
    }
}

/// Routing recommendation for one (assignment, user) pairing. Recomputed
/// on demand, never stored as a table of record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingRecommendation {
    pub task_id: String,
    pub user_id: String,

    /// Combined domain/capacity match, 0-100
    pub match_score: u32,
    /// Percentage of available capacity the assignment consumes.
    /// Deliberately unclamped: values above 100 signal overload.
    pub capacity_utilization: u32,
    pub risk_level: RiskLevel,
    pub recommended: bool,

    /// Human-readable rules that fired, in firing order
    pub reasoning: Vec<String>,

    /// Predicted performance score, floored at 40
    pub predicted_performance: u32,
    /// Predicted error rate, capped at 0.5
    pub predicted_error_rate: f64,
    /// Minutes of recovery the assignment is expected to require
    pub recovery_time_needed: u32,

    pub computed_at: DateTime<Utc>,
}

/// Compute a routing recommendation from a complexity score and a
/// capacity snapshot. Pure; persistence is the caller's concern.
pub fn recommend_routing(
    complexity: &AssignmentComplexity,
    capacity: &CognitiveCapacity,
    now: DateTime<Utc>,
) -> RoutingRecommendation {
    let mut reasoning = Vec::new();
    let total = complexity.total_complexity_score;
    let available = capacity.available_capacity;

    // Domain match: keyword on the task's domain, then jargon density.
    let domain_lower = complexity.domain.to_ascii_lowercase();
    let (domain_match, domain_source) = if domain_lower.contains("medical") {
        (capacity.medical_terminology_capacity, "medical terminology")
    } else if domain_lower.contains("legal") {
        (capacity.legal_complexity_capacity, "legal complexity")
    } else if complexity.technical_jargon_score > 0.6 {
        (capacity.technical_jargon_capacity, "technical jargon")
    } else {
        (0.5, "general baseline")
    };
    reasoning.push(format!(
        "Domain match {domain_match:.2} from {domain_source} capacity"
    ));

    // Capacity match: tiered headroom comparison.
    let headroom = if total > 0.0 { available / total } else { f64::INFINITY };
    let capacity_match = if headroom >= 1.2 {
        1.0
    } else if headroom >= 1.0 {
        0.8
    } else if headroom >= 0.8 {
        0.6
    } else {
        0.3
    };
    reasoning.push(format!(
        "Available capacity {available:.2} against complexity {total:.2} (match {capacity_match:.2})"
    ));

    let match_score = ((domain_match + capacity_match) / 2.0 * 100.0).round() as u32;

    let utilization_ratio = if available > 0.0 {
        total / available
    } else {
        f64::INFINITY
    };
    let capacity_utilization = (utilization_ratio * 100.0).round() as u32;

    let mut risk_level = RiskLevel::from_utilization_ratio(utilization_ratio);
    reasoning.push(format!(
        "Utilization {capacity_utilization}% places risk at {}",
        risk_level.as_str()
    ));

    if capacity.decision_fatigue_level > 0.7 {
        risk_level = risk_level.escalate();
        reasoning.push(format!(
            "Decision fatigue {:.2} escalates risk to {}",
            capacity.decision_fatigue_level,
            risk_level.as_str()
        ));
    }

    let mut recommended = risk_level != RiskLevel::Overload;

    if complexity.emotional_intensity_score > 0.7 && capacity.emotional_resilience_capacity < 0.5 {
        recommended = false;
        reasoning.push(
            "High emotional intensity with low resilience reserve; assignment not recommended"
                .to_string(),
        );
    }

    let predicted_performance = {
        let raw = (85.0 * available - 20.0 * total - 15.0 * capacity.decision_fatigue_level).round()
            as i64;
        raw.max(40) as u32
    };

    let predicted_error_rate = (0.05
        * (1.0 + total)
        * (2.0 - available)
        * (1.0 + capacity.error_rate_under_pressure))
        .min(0.5);

    let recovery_time_needed = (capacity.optimal_break_duration as f64 / capacity.recovery_rate
        + 20.0 * total)
        .round() as u32;

    RoutingRecommendation {
        task_id: complexity.task_id.clone(),
        user_id: capacity.user_id.clone(),
        match_score,
        capacity_utilization,
        risk_level,
        recommended,
        reasoning,
        predicted_performance,
        predicted_error_rate,
        recovery_time_needed,
        computed_at: now,
    }
}
