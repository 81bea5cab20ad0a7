//! Nudge types surfaced by the pattern engine.
//!
//! A nudge is a short supportive message with an optional suggested action.
//! Lifecycle: created when a pattern crosses its rule's occurrence
//! threshold, active until dismissed or expired.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Display priority of a nudge.
///
/// Ordering is High before Medium before Low; `active_nudges` sorts on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NudgePriority {
    High,
    Medium,
    Low,
}

/// What kind of message a nudge carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NudgeKind {
    Insight,
    Suggestion,
    Encouragement,
    Warning,
}

/// A suggested follow-up action attached to a nudge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NudgeAction {
    /// Button/link label
    pub label: String,
    /// Action target understood by the surface rendering the nudge
    pub target: String,
}

/// Rendering-free content of a nudge, produced by a rule's template.
///
/// The engine turns a draft into a [`PatternNudge`] by attaching an id and
/// creation timestamp.
#[derive(Debug, Clone)]
pub struct NudgeDraft {
    pub kind: NudgeKind,
    pub priority: NudgePriority,
    pub title: String,
    pub message: String,
    pub action: Option<NudgeAction>,
    pub dismissible: bool,
    pub expires_in_hours: Option<u32>,
}

/// A surfaced nudge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternNudge {
    /// Unique id (uuid v4)
    pub id: String,

    pub priority: NudgePriority,
    pub kind: NudgeKind,
    pub title: String,
    pub message: String,

    #[serde(default)]
    pub action: Option<NudgeAction>,

    pub dismissible: bool,

    /// Hours until the nudge expires; `None` means it never expires
    #[serde(default)]
    pub expires_in_hours: Option<u32>,

    /// When the nudge was created. Expiry is computed from this field.
    pub created_at: DateTime<Utc>,
}

impl PatternNudge {
    /// Build a nudge from a draft, stamping id and creation time.
    pub fn from_draft(draft: NudgeDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            priority: draft.priority,
            kind: draft.kind,
            title: draft.title,
            message: draft.message,
            action: draft.action,
            dismissible: draft.dismissible,
            expires_in_hours: draft.expires_in_hours,
            created_at: now,
        }
    }

    /// Whether the nudge's expiry window has elapsed at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.expires_in_hours {
            Some(hours) => now > self.created_at + Duration::hours(hours as i64),
            None => false,
        }
    }
}
