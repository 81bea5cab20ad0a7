//! Pattern evaluation engine.
//!
//! Stateless functions over an explicit [`PatternState`]. One state per
//! user; a multi-tenant host keys states by user id and gets isolation by
//! construction. All operations take `now` explicitly so expiry and rule
//! windows are deterministic under test.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::warn;

use crate::events::EventHistory;
use crate::patterns::catalog::catalog;
use crate::patterns::nudge::PatternNudge;
use crate::patterns::rule::{Rule, RuleId, UserPattern};

/// How many recommendations `recommendations` returns at most.
const MAX_RECOMMENDATIONS: usize = 3;

/// Per-user engine state: detected patterns and active nudges.
///
/// Serializable so callers can checkpoint it between sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatternState {
    /// Detected patterns keyed by rule id. Entries are never removed and
    /// occurrence counters never decrease.
    pub patterns: BTreeMap<RuleId, UserPattern>,

    /// Nudges that have been surfaced and not yet dismissed or expired.
    pub nudges: Vec<PatternNudge>,
}

impl PatternState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Evaluate the full rule catalog against `history`.
///
/// Returns the nudges newly emitted by this call; they are also appended
/// to `state.nudges`.
pub fn analyze(
    state: &mut PatternState,
    history: &EventHistory,
    now: DateTime<Utc>,
) -> Vec<PatternNudge> {
    analyze_with_rules(state, catalog(), history, now)
}

/// Evaluate an explicit rule set. Exposed so rule-level fault isolation
/// and threshold behavior can be exercised with custom catalogs.
pub fn analyze_with_rules(
    state: &mut PatternState,
    rules: &[Rule],
    history: &EventHistory,
    now: DateTime<Utc>,
) -> Vec<PatternNudge> {
    purge_expired(state, now);

    let mut emitted = Vec::new();

    for rule in rules {
        let detection = match (rule.condition)(history, now) {
            Ok(Some(detection)) => detection,
            Ok(None) => continue,
            Err(e) => {
                // A faulty rule must not abort the batch.
                warn!("rule {} failed to evaluate, skipping: {e}", rule.id);
                continue;
            }
        };

        let crossed_threshold = match state.patterns.entry(rule.id) {
            Entry::Vacant(slot) => {
                // First match: record the pattern, no nudge yet.
                slot.insert(UserPattern::new(rule.id, rule.timeframe, &detection, now));
                false
            }
            Entry::Occupied(mut slot) => {
                let pattern = slot.get_mut();
                pattern.record_occurrence(&detection, now);
                pattern.occurrences >= rule.threshold
            }
        };

        if crossed_threshold {
            let draft = (rule.template)(&detection);
            let duplicate = state
                .nudges
                .iter()
                .any(|n| n.title == draft.title && n.message == draft.message);
            if !duplicate {
                let nudge = PatternNudge::from_draft(draft, now);
                state.nudges.push(nudge.clone());
                emitted.push(nudge);
            }
        }
    }

    emitted
}

/// Active nudges, expired ones purged, sorted high -> medium -> low.
pub fn active_nudges(state: &mut PatternState, now: DateTime<Utc>) -> Vec<PatternNudge> {
    purge_expired(state, now);
    let mut nudges = state.nudges.clone();
    nudges.sort_by_key(|n| n.priority);
    nudges
}

/// Remove the nudge with the given id. Idempotent.
pub fn dismiss_nudge(state: &mut PatternState, id: &str) {
    state.nudges.retain(|n| n.id != id);
}

/// Personalized recommendations: patterns ranked by confidence x
/// occurrences, top 3, mapped through each rule's recommendation tag.
pub fn recommendations(state: &PatternState) -> Vec<String> {
    let mut ranked: Vec<&UserPattern> = state.patterns.values().collect();
    ranked.sort_by(|a, b| {
        b.rank_weight()
            .partial_cmp(&a.rank_weight())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ranked
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .filter_map(|pattern| {
            catalog()
                .iter()
                .find(|r| r.id == pattern.rule)
                .map(|r| r.tag.recommendation().to_string())
        })
        .collect()
}

fn purge_expired(state: &mut PatternState, now: DateTime<Utc>) {
    state.nudges.retain(|n| !n.is_expired(now));
}
