//! Detection rule definitions.
//!
//! Rules are declarative table entries: a pure predicate over the event
//! history plus an occurrence threshold and a nudge template. Keeping the
//! catalog as data lets each rule be unit-tested independently of any
//! rendering concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::events::EventHistory;
use crate::patterns::nudge::NudgeDraft;

/// Identifier for each rule in the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    PostAssignmentFatigue,
    WeekdayAnxiety,
    SkippedResetStress,
    PreAssignmentAnxiety,
    AfternoonExhaustion,
    WellnessStreak,
    WeekdayExhaustion,
    EffectiveWellnessCategory,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::PostAssignmentFatigue => "post_assignment_fatigue",
            RuleId::WeekdayAnxiety => "weekday_anxiety",
            RuleId::SkippedResetStress => "skipped_reset_stress",
            RuleId::PreAssignmentAnxiety => "pre_assignment_anxiety",
            RuleId::AfternoonExhaustion => "afternoon_exhaustion",
            RuleId::WellnessStreak => "wellness_streak",
            RuleId::WeekdayExhaustion => "weekday_exhaustion",
            RuleId::EffectiveWellnessCategory => "effective_wellness_category",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timeframe a detected pattern describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Daily,
    Weekly,
    Monthly,
}

/// Structured tag linking a rule to a personalized recommendation.
///
/// Each rule carries exactly one tag and the recommendation lookup is
/// total, so adding a rule cannot silently produce no recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTag {
    RecoveryPlanning,
    WeekdayPreparation,
    ResetConsistency,
    PreAssignmentGrounding,
    EnergyPacing,
    StreakMaintenance,
    WorkloadBalancing,
    CategoryDoubleDown,
}

impl RecommendationTag {
    /// Canned recommendation text for this tag.
    pub fn recommendation(&self) -> &'static str {
        match self {
            RecommendationTag::RecoveryPlanning => {
                "Build a short recovery buffer after your most demanding assignment type."
            }
            RecommendationTag::WeekdayPreparation => {
                "Front-load preparation the evening before your hardest weekday."
            }
            RecommendationTag::ResetConsistency => {
                "Protect your reset breaks; skipping them tends to catch up within a day."
            }
            RecommendationTag::PreAssignmentGrounding => {
                "Try a grounding exercise in the hour before assignments that trigger nerves."
            }
            RecommendationTag::EnergyPacing => {
                "Schedule lighter work or a movement break in the early afternoon."
            }
            RecommendationTag::StreakMaintenance => {
                "Keep the daily wellness habit going; consistency drives the benefit."
            }
            RecommendationTag::WorkloadBalancing => {
                "Consider rebalancing assignments away from your heaviest weekday."
            }
            RecommendationTag::CategoryDoubleDown => {
                "Lean into the wellness category that consistently rates highest for you."
            }
        }
    }
}

/// Details of a positive rule evaluation, used to fill nudge templates.
#[derive(Debug, Clone, Default)]
pub struct Detection {
    /// The detected tag: an assignment type, weekday name, hour label,
    /// wellness category, or streak length, depending on the rule.
    pub detail: String,
}

impl Detection {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Predicate signature: pure function of the history and the current time.
pub type Condition = fn(&EventHistory, DateTime<Utc>) -> Result<Option<Detection>>;

/// Nudge template signature: builds rendering-free nudge content.
pub type Template = fn(&Detection) -> NudgeDraft;

/// A declarative detection rule.
pub struct Rule {
    pub id: RuleId,
    pub timeframe: Timeframe,
    /// Occurrence count required before a nudge is generated
    pub threshold: u32,
    pub tag: RecommendationTag,
    pub condition: Condition,
    pub template: Template,
}

/// A detected user pattern tracked across analysis calls.
///
/// Occurrence counters are monotonic for the lifetime of the engine state:
/// a false condition never decrements or resets them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPattern {
    pub rule: RuleId,
    /// Confidence 0-1, derived from the occurrence count
    pub confidence: f64,
    pub occurrences: u32,
    pub timeframe: Timeframe,
    pub last_detected: DateTime<Utc>,
    /// Detail of the most recent detection
    #[serde(default)]
    pub last_detail: String,
}

impl UserPattern {
    pub fn new(rule: RuleId, timeframe: Timeframe, detection: &Detection, now: DateTime<Utc>) -> Self {
        Self {
            rule,
            confidence: Self::confidence_for(1),
            occurrences: 1,
            timeframe,
            last_detected: now,
            last_detail: detection.detail.clone(),
        }
    }

    /// Record another positive evaluation.
    pub fn record_occurrence(&mut self, detection: &Detection, now: DateTime<Utc>) {
        self.occurrences += 1;
        self.confidence = Self::confidence_for(self.occurrences);
        self.last_detected = now;
        self.last_detail = detection.detail.clone();
    }

    /// Confidence tier for an occurrence count.
    pub fn confidence_for(occurrences: u32) -> f64 {
        match occurrences {
            0 => 0.0,
            1 => 0.5,
            2 => 0.65,
            3..=4 => 0.8,
            _ => {
                // Approaches 1.0 asymptotically
                let excess = (occurrences - 4) as f64;
                (0.8 + 0.2 * (1.0 - (-excess / 5.0).exp())).min(1.0)
            }
        }
    }

    /// Ranking weight used by the recommendation generator.
    pub fn rank_weight(&self) -> f64 {
        self.confidence * self.occurrences as f64
    }
}
