//! Assignment complexity scoring.
//!
//! Maps categorical task attributes through fixed lookup tables to
//! component scores in [0, 1] and combines them with a fixed-weight sum.
//! `score_complexity` is a pure function of its inputs; identical
//! attributes always yield an identical total.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Stakes level of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stakes {
    Low,
    Medium,
    High,
    Critical,
}

impl Stakes {
    /// Component score for this stakes level.
    pub fn score(&self) -> f64 {
        match self {
            Stakes::Low => 0.2,
            Stakes::Medium => 0.5,
            Stakes::High => 0.8,
            Stakes::Critical => 1.0,
        }
    }
}

impl FromStr for Stakes {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Stakes::Low),
            "medium" => Ok(Stakes::Medium),
            "high" => Ok(Stakes::High),
            "critical" => Ok(Stakes::Critical),
            other => Err(ValidationError::InvalidValue {
                field: "stakes".to_string(),
                message: format!("unknown stakes level '{other}'"),
            }),
        }
    }
}

/// Time pressure on an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePressure {
    Relaxed,
    Standard,
    Urgent,
    Emergency,
}

impl TimePressure {
    pub fn score(&self) -> f64 {
        match self {
            TimePressure::Relaxed => 0.2,
            TimePressure::Standard => 0.5,
            TimePressure::Urgent => 0.8,
            TimePressure::Emergency => 1.0,
        }
    }
}

impl FromStr for TimePressure {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "relaxed" => Ok(TimePressure::Relaxed),
            "standard" => Ok(TimePressure::Standard),
            "urgent" => Ok(TimePressure::Urgent),
            "emergency" => Ok(TimePressure::Emergency),
            other => Err(ValidationError::InvalidValue {
                field: "time_pressure".to_string(),
                message: format!("unknown time pressure '{other}'"),
            }),
        }
    }
}

/// Expected emotional intensity of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionalIntensity {
    Low,
    Moderate,
    High,
    Extreme,
}

impl EmotionalIntensity {
    pub fn score(&self) -> f64 {
        match self {
            EmotionalIntensity::Low => 0.2,
            EmotionalIntensity::Moderate => 0.5,
            EmotionalIntensity::High => 0.8,
            EmotionalIntensity::Extreme => 1.0,
        }
    }
}

impl FromStr for EmotionalIntensity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(EmotionalIntensity::Low),
            "moderate" => Ok(EmotionalIntensity::Moderate),
            "high" => Ok(EmotionalIntensity::High),
            "extreme" => Ok(EmotionalIntensity::Extreme),
            other => Err(ValidationError::InvalidValue {
                field: "emotional_intensity".to_string(),
                message: format!("unknown emotional intensity '{other}'"),
            }),
        }
    }
}

/// Domain expertise scores by assignment domain tag. Unknown domains fall
/// back to the general baseline.
const DOMAIN_SCORES: &[(&str, f64)] = &[
    ("medical", 0.9),
    ("legal", 0.85),
    ("mental_health", 0.8),
    ("technical", 0.75),
    ("conference", 0.6),
    ("business", 0.6),
    ("educational", 0.5),
    ("community", 0.4),
];

const GENERAL_DOMAIN_SCORE: f64 = 0.3;

/// Domain expertise component score for a domain tag.
pub fn domain_score(domain: &str) -> f64 {
    let lower = domain.to_ascii_lowercase();
    DOMAIN_SCORES
        .iter()
        .find(|(tag, _)| lower == *tag)
        .map(|(_, score)| *score)
        .unwrap_or(GENERAL_DOMAIN_SCORE)
}

/// Attributes describing one assignment to be scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskAttributes {
    /// Domain tag (e.g. "medical", "legal")
    pub domain: String,
    pub stakes: Stakes,
    pub time_pressure: TimePressure,
    pub emotional_intensity: EmotionalIntensity,
    /// Expected duration in minutes
    pub duration_minutes: u32,
    /// Whether the content is technically dense
    pub technical_content: bool,
    /// Whether specific cultural context is present
    pub cultural_context: bool,
}

/// Fixed component weights. The sum is exactly 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityWeights {
    pub domain_expertise: f64,
    pub stakes: f64,
    pub time_pressure: f64,
    pub emotional_intensity: f64,
    pub technical_jargon: f64,
    pub multitasking: f64,
    pub cultural_sensitivity: f64,
}

impl ComplexityWeights {
    /// The fixed production weights.
    pub const fn fixed() -> Self {
        Self {
            domain_expertise: 0.25,
            stakes: 0.20,
            time_pressure: 0.15,
            emotional_intensity: 0.15,
            technical_jargon: 0.10,
            multitasking: 0.10,
            cultural_sensitivity: 0.05,
        }
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.domain_expertise
            + self.stakes
            + self.time_pressure
            + self.emotional_intensity
            + self.technical_jargon
            + self.multitasking
            + self.cultural_sensitivity
    }
}

impl Default for ComplexityWeights {
    fn default() -> Self {
        Self::fixed()
    }
}

/// Complexity breakdown for one assignment. One row per task id (upsert).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentComplexity {
    pub task_id: String,
    /// Domain tag the task was scored with; routing keys its
    /// domain-capacity match on this
    pub domain: String,
    pub domain_expertise_score: f64,
    pub stakes_score: f64,
    pub time_pressure_score: f64,
    pub emotional_intensity_score: f64,
    pub technical_jargon_score: f64,
    pub multitasking_score: f64,
    pub cultural_sensitivity_score: f64,
    /// Fixed-weight sum of the component scores
    pub total_complexity_score: f64,
    pub scored_at: DateTime<Utc>,
}

impl fmt::Display for AssignmentComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "task {} complexity {:.3}",
            self.task_id, self.total_complexity_score
        )
    }
}

/// Score an assignment's complexity from its attributes.
pub fn score_complexity(
    task_id: &str,
    attrs: &TaskAttributes,
    now: DateTime<Utc>,
) -> AssignmentComplexity {
    let weights = ComplexityWeights::fixed();

    let domain_expertise_score = domain_score(&attrs.domain);
    let stakes_score = attrs.stakes.score();
    let time_pressure_score = attrs.time_pressure.score();
    let emotional_intensity_score = attrs.emotional_intensity.score();
    let technical_jargon_score = if attrs.technical_content { 0.8 } else { 0.2 };
    let multitasking_score = if attrs.duration_minutes > 60 { 0.6 } else { 0.3 };
    let cultural_sensitivity_score = if attrs.cultural_context { 0.6 } else { 0.2 };

    let total_complexity_score = domain_expertise_score * weights.domain_expertise
        + stakes_score * weights.stakes
        + time_pressure_score * weights.time_pressure
        + emotional_intensity_score * weights.emotional_intensity
        + technical_jargon_score * weights.technical_jargon
        + multitasking_score * weights.multitasking
        + cultural_sensitivity_score * weights.cultural_sensitivity;

    AssignmentComplexity {
        task_id: task_id.to_string(),
        domain: attrs.domain.clone(),
        domain_expertise_score,
        stakes_score,
        time_pressure_score,
        emotional_intensity_score,
        technical_jargon_score,
        multitasking_score,
        cultural_sensitivity_score,
        total_complexity_score: total_complexity_score.clamp(0.0, 1.0),
        scored_at: now,
    }
}
