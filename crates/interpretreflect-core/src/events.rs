//! Domain event records logged by the user over time.
//!
//! Every reflection, assignment, reset, and wellness action produces an
//! append-only record. The pattern engine consumes these through
//! [`EventHistory`], a materialized per-user slice; it never queries the
//! store directly.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Emotions the engine treats as fatigue signals.
pub const FATIGUE_EMOTIONS: &[&str] = &["exhausted", "drained", "fatigued", "tired"];

/// Emotions the engine treats as anxiety/stress signals.
pub const ANXIETY_EMOTIONS: &[&str] = &["anxious", "stressed", "nervous", "worried"];

/// Emotions the engine treats as overwhelm signals.
pub const OVERWHELM_EMOTIONS: &[&str] = &["overwhelmed"];

/// Optional context captured alongside an emotion log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmotionContext {
    /// Assignment type this emotion relates to, if any
    #[serde(default)]
    pub assignment_type: Option<String>,

    /// Day of week (0-6, Sunday=0) at capture time
    #[serde(default)]
    pub day_of_week: Option<u8>,

    /// Hour of day (0-23) at capture time
    #[serde(default)]
    pub time_of_day: Option<u8>,

    /// Whether the emotion was logged after completing an assignment
    #[serde(default)]
    pub post_assignment: bool,
}

/// A single logged emotion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionLog {
    /// Emotion tag (e.g. "exhausted", "anxious", "calm")
    pub emotion: String,

    /// Intensity on a 1-5 scale
    pub intensity: u8,

    /// When the emotion was logged
    pub timestamp: DateTime<Utc>,

    /// Optional capture context
    #[serde(default)]
    pub context: Option<EmotionContext>,
}

impl EmotionLog {
    /// Whether this log's emotion belongs to the given family (case-insensitive).
    pub fn in_family(&self, family: &[&str]) -> bool {
        family.iter().any(|f| self.emotion.eq_ignore_ascii_case(f))
    }

    /// Day of week of the log (0-6, Sunday=0), from context if present.
    pub fn day_of_week(&self) -> u8 {
        self.context
            .as_ref()
            .and_then(|c| c.day_of_week)
            .unwrap_or_else(|| self.timestamp.weekday().num_days_from_sunday() as u8)
    }

    /// Hour of day of the log (0-23), from context if present.
    pub fn hour_of_day(&self) -> u8 {
        self.context
            .as_ref()
            .and_then(|c| c.time_of_day)
            .unwrap_or_else(|| self.timestamp.hour() as u8)
    }
}

/// Perceived difficulty of a completed assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Challenging,
    Overwhelming,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Challenging => "challenging",
            Difficulty::Overwhelming => "overwhelming",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "moderate" => Ok(Difficulty::Moderate),
            "challenging" => Ok(Difficulty::Challenging),
            "overwhelming" => Ok(Difficulty::Overwhelming),
            other => Err(ValidationError::InvalidValue {
                field: "difficulty".to_string(),
                message: format!("unknown difficulty '{other}'"),
            }),
        }
    }
}

/// A completed (or abandoned) interpreting assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentLog {
    /// Assignment type tag (e.g. "medical", "legal", "educational")
    #[serde(rename = "type")]
    pub assignment_type: String,

    /// Duration in minutes
    pub duration_minutes: u32,

    /// Perceived difficulty
    pub difficulty: Difficulty,

    /// Emotion tag logged right after the assignment, if any
    #[serde(default)]
    pub emotion_after: Option<String>,

    /// When the assignment ended
    pub timestamp: DateTime<Utc>,

    /// Whether the assignment was completed
    pub completed: bool,
}

/// A reset exercise the user took or skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetLog {
    /// Reset type (e.g. "breathing", "body-scan")
    #[serde(rename = "type")]
    pub reset_type: String,

    /// When the reset happened (or was skipped)
    pub timestamp: DateTime<Utc>,

    /// Self-rated effectiveness (1-5), absent when skipped
    #[serde(default)]
    pub effectiveness: Option<u8>,

    /// Whether the reset was skipped
    pub skipped: bool,

    /// Reason given for skipping
    #[serde(default)]
    pub reason: Option<String>,
}

/// Wellness action categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WellnessCategory {
    Breathwork,
    Movement,
    Mindfulness,
    Boundaries,
    Nutrition,
    Sleep,
}

impl WellnessCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WellnessCategory::Breathwork => "breathwork",
            WellnessCategory::Movement => "movement",
            WellnessCategory::Mindfulness => "mindfulness",
            WellnessCategory::Boundaries => "boundaries",
            WellnessCategory::Nutrition => "nutrition",
            WellnessCategory::Sleep => "sleep",
        }
    }

    /// All categories in declaration order.
    pub fn all() -> &'static [WellnessCategory] {
        &[
            WellnessCategory::Breathwork,
            WellnessCategory::Movement,
            WellnessCategory::Mindfulness,
            WellnessCategory::Boundaries,
            WellnessCategory::Nutrition,
            WellnessCategory::Sleep,
        ]
    }
}

impl fmt::Display for WellnessCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WellnessCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "breathwork" => Ok(WellnessCategory::Breathwork),
            "movement" => Ok(WellnessCategory::Movement),
            "mindfulness" => Ok(WellnessCategory::Mindfulness),
            "boundaries" => Ok(WellnessCategory::Boundaries),
            "nutrition" => Ok(WellnessCategory::Nutrition),
            "sleep" => Ok(WellnessCategory::Sleep),
            other => Err(ValidationError::InvalidValue {
                field: "category".to_string(),
                message: format!("unknown wellness category '{other}'"),
            }),
        }
    }
}

/// A wellness action the user performed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellnessActionLog {
    /// Action description (e.g. "box breathing", "evening walk")
    pub action: String,

    /// Category of the action
    pub category: WellnessCategory,

    /// When the action was performed
    pub timestamp: DateTime<Utc>,

    /// Duration in minutes, if tracked
    #[serde(default)]
    pub duration_minutes: Option<u32>,

    /// Self-rated effectiveness (1-5)
    #[serde(default)]
    pub effectiveness: Option<u8>,
}

/// A user's materialized event history.
///
/// Callers load the relevant slice from the store and hand it to the
/// pattern engine; the engine treats it as read-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventHistory {
    pub emotions: Vec<EmotionLog>,
    pub assignments: Vec<AssignmentLog>,
    pub resets: Vec<ResetLog>,
    pub wellness_actions: Vec<WellnessActionLog>,
}

impl EventHistory {
    /// True when no events of any kind are present.
    pub fn is_empty(&self) -> bool {
        self.emotions.is_empty()
            && self.assignments.is_empty()
            && self.resets.is_empty()
            && self.wellness_actions.is_empty()
    }

    /// Emotion logs at or after `since`.
    pub fn emotions_since(&self, since: DateTime<Utc>) -> impl Iterator<Item = &EmotionLog> {
        self.emotions.iter().filter(move |e| e.timestamp >= since)
    }

    /// Assignment logs at or after `since`.
    pub fn assignments_since(&self, since: DateTime<Utc>) -> impl Iterator<Item = &AssignmentLog> {
        self.assignments
            .iter()
            .filter(move |a| a.timestamp >= since)
    }

    /// Reset logs at or after `since`.
    pub fn resets_since(&self, since: DateTime<Utc>) -> impl Iterator<Item = &ResetLog> {
        self.resets.iter().filter(move |r| r.timestamp >= since)
    }

    /// Distinct assignment types present, sorted for deterministic iteration.
    pub fn assignment_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self
            .assignments
            .iter()
            .map(|a| a.assignment_type.to_ascii_lowercase())
            .collect();
        types.sort();
        types.dedup();
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn emotion(tag: &str, intensity: u8, ts: DateTime<Utc>) -> EmotionLog {
        EmotionLog {
            emotion: tag.to_string(),
            intensity,
            timestamp: ts,
            context: None,
        }
    }

    #[test]
    fn test_emotion_family_membership() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let log = emotion("Exhausted", 4, ts);
        assert!(log.in_family(FATIGUE_EMOTIONS));
        assert!(!log.in_family(ANXIETY_EMOTIONS));
    }

    #[test]
    fn test_day_of_week_prefers_context() {
        // 2026-03-02 is a Monday
        let ts = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let mut log = emotion("calm", 2, ts);
        assert_eq!(log.day_of_week(), 1);

        log.context = Some(EmotionContext {
            day_of_week: Some(5),
            ..Default::default()
        });
        assert_eq!(log.day_of_week(), 5);
    }

    #[test]
    fn test_history_windows() {
        let base = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let history = EventHistory {
            emotions: vec![
                emotion("calm", 2, base - Duration::days(10)),
                emotion("stressed", 4, base - Duration::days(1)),
            ],
            ..Default::default()
        };

        let recent: Vec<_> = history.emotions_since(base - Duration::days(7)).collect();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].emotion, "stressed");
    }

    #[test]
    fn test_assignment_types_sorted_deduped() {
        let base = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let mk = |t: &str| AssignmentLog {
            assignment_type: t.to_string(),
            duration_minutes: 60,
            difficulty: Difficulty::Moderate,
            emotion_after: None,
            timestamp: base,
            completed: true,
        };
        let history = EventHistory {
            assignments: vec![mk("medical"), mk("Legal"), mk("medical")],
            ..Default::default()
        };
        assert_eq!(history.assignment_types(), vec!["legal", "medical"]);
    }

    #[test]
    fn test_category_parse_roundtrip() {
        for cat in WellnessCategory::all() {
            let parsed: WellnessCategory = cat.as_str().parse().unwrap();
            assert_eq!(parsed, *cat);
        }
        assert!("yoga".parse::<WellnessCategory>().is_err());
    }
}
