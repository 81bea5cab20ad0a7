//! The detection rule catalog.
//!
//! Eight rules covering fatigue, anxiety, reset, and wellness patterns.
//! The ratio thresholds and window sizes here are the behavioral contract
//! of the engine; tests pin them. Minimum-support counts guard the ratio
//! denominators against noise from a handful of logs.

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeSet;

use crate::error::Result;
use crate::events::{
    EventHistory, WellnessCategory, ANXIETY_EMOTIONS, FATIGUE_EMOTIONS, OVERWHELM_EMOTIONS,
};
use crate::patterns::nudge::{NudgeAction, NudgeDraft, NudgeKind, NudgePriority};
use crate::patterns::rule::{Detection, RecommendationTag, Rule, RuleId, Timeframe};

/// Minimum assignments of one type before type-ratio rules apply.
const MIN_TYPE_OCCURRENCES: usize = 3;
/// Minimum emotion logs on one weekday before weekday-ratio rules apply.
const MIN_WEEKDAY_LOGS: usize = 4;
/// Minimum family emotion logs before concentration rules apply.
const MIN_FAMILY_LOGS: usize = 5;
/// Minimum highly-rated wellness actions for the category rule.
const MIN_RATED_ACTIONS: usize = 5;
/// Minimum appearances of one category among the rated actions.
const MIN_CATEGORY_COUNT: usize = 3;

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// The full rule catalog, in presentation order.
pub fn catalog() -> &'static [Rule] {
    &CATALOG
}

static CATALOG: [Rule; 8] = [
    Rule {
        id: RuleId::PostAssignmentFatigue,
        timeframe: Timeframe::Weekly,
        threshold: 3,
        tag: RecommendationTag::RecoveryPlanning,
        condition: post_assignment_fatigue,
        template: post_assignment_fatigue_nudge,
    },
    Rule {
        id: RuleId::WeekdayAnxiety,
        timeframe: Timeframe::Weekly,
        threshold: 2,
        tag: RecommendationTag::WeekdayPreparation,
        condition: weekday_anxiety,
        template: weekday_anxiety_nudge,
    },
    Rule {
        id: RuleId::SkippedResetStress,
        timeframe: Timeframe::Daily,
        threshold: 2,
        tag: RecommendationTag::ResetConsistency,
        condition: skipped_reset_stress,
        template: skipped_reset_stress_nudge,
    },
    Rule {
        id: RuleId::PreAssignmentAnxiety,
        timeframe: Timeframe::Weekly,
        threshold: 3,
        tag: RecommendationTag::PreAssignmentGrounding,
        condition: pre_assignment_anxiety,
        template: pre_assignment_anxiety_nudge,
    },
    Rule {
        id: RuleId::AfternoonExhaustion,
        timeframe: Timeframe::Daily,
        threshold: 3,
        tag: RecommendationTag::EnergyPacing,
        condition: afternoon_exhaustion,
        template: afternoon_exhaustion_nudge,
    },
    Rule {
        id: RuleId::WellnessStreak,
        timeframe: Timeframe::Weekly,
        threshold: 1,
        tag: RecommendationTag::StreakMaintenance,
        condition: wellness_streak,
        template: wellness_streak_nudge,
    },
    Rule {
        id: RuleId::WeekdayExhaustion,
        timeframe: Timeframe::Weekly,
        threshold: 2,
        tag: RecommendationTag::WorkloadBalancing,
        condition: weekday_exhaustion,
        template: weekday_exhaustion_nudge,
    },
    Rule {
        id: RuleId::EffectiveWellnessCategory,
        timeframe: Timeframe::Monthly,
        threshold: 2,
        tag: RecommendationTag::CategoryDoubleDown,
        condition: effective_wellness_category,
        template: effective_wellness_category_nudge,
    },
];

// ---------------------------------------------------------------------------
// Conditions
// ---------------------------------------------------------------------------

/// Fatigue emotions within 4 hours after >60% of one assignment type's
/// occurrences in the last 7 days.
fn post_assignment_fatigue(
    history: &EventHistory,
    now: DateTime<Utc>,
) -> Result<Option<Detection>> {
    let since = now - Duration::days(7);

    for ty in history.assignment_types() {
        let assignments: Vec<_> = history
            .assignments_since(since)
            .filter(|a| a.assignment_type.eq_ignore_ascii_case(&ty))
            .collect();
        if assignments.len() < MIN_TYPE_OCCURRENCES {
            continue;
        }

        let followed = assignments
            .iter()
            .filter(|a| {
                history.emotions.iter().any(|e| {
                    e.in_family(FATIGUE_EMOTIONS)
                        && e.timestamp > a.timestamp
                        && e.timestamp <= a.timestamp + Duration::hours(4)
                })
            })
            .count();

        if followed as f64 / assignments.len() as f64 > 0.6 {
            return Ok(Some(Detection::new(ty)));
        }
    }
    Ok(None)
}

/// Anxious/stressed logs at intensity >=3 exceeding 50% of one weekday's logs.
fn weekday_anxiety(history: &EventHistory, _now: DateTime<Utc>) -> Result<Option<Detection>> {
    for day in 0u8..7 {
        let on_day: Vec<_> = history
            .emotions
            .iter()
            .filter(|e| e.day_of_week() == day)
            .collect();
        if on_day.len() < MIN_WEEKDAY_LOGS {
            continue;
        }

        let anxious = on_day
            .iter()
            .filter(|e| e.in_family(ANXIETY_EMOTIONS) && e.intensity >= 3)
            .count();

        if anxious as f64 / on_day.len() as f64 > 0.5 {
            return Ok(Some(Detection::new(WEEKDAY_NAMES[day as usize])));
        }
    }
    Ok(None)
}

/// A stress spike within 24 hours after 3+ skipped resets in the last 3 days.
fn skipped_reset_stress(history: &EventHistory, now: DateTime<Utc>) -> Result<Option<Detection>> {
    let since = now - Duration::days(3);
    let skips: Vec<_> = history.resets_since(since).filter(|r| r.skipped).collect();
    if skips.len() < 3 {
        return Ok(None);
    }

    let Some(last_skip) = skips.iter().map(|r| r.timestamp).max() else {
        return Ok(None);
    };

    let spike = history.emotions.iter().any(|e| {
        (e.in_family(ANXIETY_EMOTIONS) || e.in_family(OVERWHELM_EMOTIONS))
            && e.intensity >= 4
            && e.timestamp > last_skip
            && e.timestamp <= last_skip + Duration::hours(24)
    });

    if spike {
        return Ok(Some(Detection::new(skips.len().to_string())));
    }
    Ok(None)
}

/// Anxious pre-assignment logs exceeding 70% of one assignment type's
/// occurrences.
fn pre_assignment_anxiety(
    history: &EventHistory,
    _now: DateTime<Utc>,
) -> Result<Option<Detection>> {
    for ty in history.assignment_types() {
        let type_count = history
            .assignments
            .iter()
            .filter(|a| a.assignment_type.eq_ignore_ascii_case(&ty))
            .count();
        if type_count < MIN_TYPE_OCCURRENCES {
            continue;
        }

        let anxious_pre = history
            .emotions
            .iter()
            .filter(|e| {
                e.in_family(ANXIETY_EMOTIONS)
                    && e.context.as_ref().is_some_and(|c| {
                        !c.post_assignment
                            && c.assignment_type
                                .as_deref()
                                .is_some_and(|t| t.eq_ignore_ascii_case(&ty))
                    })
            })
            .count();

        if anxious_pre as f64 / type_count as f64 > 0.7 {
            return Ok(Some(Detection::new(ty)));
        }
    }
    Ok(None)
}

/// One afternoon hour (12:00-17:00) holding >40% of all fatigue logs.
fn afternoon_exhaustion(history: &EventHistory, _now: DateTime<Utc>) -> Result<Option<Detection>> {
    let fatigue: Vec<_> = history
        .emotions
        .iter()
        .filter(|e| e.in_family(FATIGUE_EMOTIONS))
        .collect();
    if fatigue.len() < MIN_FAMILY_LOGS {
        return Ok(None);
    }

    for hour in 12u8..=17 {
        let in_hour = fatigue.iter().filter(|e| e.hour_of_day() == hour).count();
        if in_hour as f64 / fatigue.len() as f64 > 0.4 {
            return Ok(Some(Detection::new(format!("{hour}:00"))));
        }
    }
    Ok(None)
}

/// Consecutive-day wellness streak that is >=7 and a multiple of 7.
fn wellness_streak(history: &EventHistory, now: DateTime<Utc>) -> Result<Option<Detection>> {
    let days: BTreeSet<_> = history
        .wellness_actions
        .iter()
        .map(|w| w.timestamp.date_naive())
        .collect();
    if days.is_empty() {
        return Ok(None);
    }

    // Streak may end today or yesterday without breaking.
    let today = now.date_naive();
    let mut cursor = if days.contains(&today) {
        today
    } else if days.contains(&(today - Duration::days(1))) {
        today - Duration::days(1)
    } else {
        return Ok(None);
    };

    let mut streak = 0u32;
    while days.contains(&cursor) {
        streak += 1;
        cursor -= Duration::days(1);
    }

    if streak >= 7 && streak % 7 == 0 {
        return Ok(Some(Detection::new(streak.to_string())));
    }
    Ok(None)
}

/// One weekday holding >60% of all exhaustion/overwhelm logs.
fn weekday_exhaustion(history: &EventHistory, _now: DateTime<Utc>) -> Result<Option<Detection>> {
    let heavy: Vec<_> = history
        .emotions
        .iter()
        .filter(|e| e.in_family(FATIGUE_EMOTIONS) || e.in_family(OVERWHELM_EMOTIONS))
        .collect();
    if heavy.len() < MIN_FAMILY_LOGS {
        return Ok(None);
    }

    for day in 0u8..7 {
        let on_day = heavy.iter().filter(|e| e.day_of_week() == day).count();
        if on_day as f64 / heavy.len() as f64 > 0.6 {
            return Ok(Some(Detection::new(WEEKDAY_NAMES[day as usize])));
        }
    }
    Ok(None)
}

/// At least 5 highly-rated wellness actions with one category appearing
/// at least 3 times among them.
fn effective_wellness_category(
    history: &EventHistory,
    _now: DateTime<Utc>,
) -> Result<Option<Detection>> {
    let rated: Vec<_> = history
        .wellness_actions
        .iter()
        .filter(|w| w.effectiveness.is_some_and(|e| e >= 4))
        .collect();
    if rated.len() < MIN_RATED_ACTIONS {
        return Ok(None);
    }

    let mut best: Option<(WellnessCategory, usize)> = None;
    for cat in WellnessCategory::all() {
        let count = rated.iter().filter(|w| w.category == *cat).count();
        if count >= MIN_CATEGORY_COUNT && best.is_none_or(|(_, c)| count > c) {
            best = Some((*cat, count));
        }
    }

    Ok(best.map(|(cat, _)| Detection::new(cat.as_str())))
}

// ---------------------------------------------------------------------------
// Nudge templates
// ---------------------------------------------------------------------------

fn post_assignment_fatigue_nudge(d: &Detection) -> NudgeDraft {
    NudgeDraft {
        kind: NudgeKind::Insight,
        priority: NudgePriority::Medium,
        title: "Recovery pattern detected".to_string(),
        message: format!(
            "Most of your {} assignments this week were followed by fatigue within a few hours. \
             A short reset between assignments may help.",
            d.detail
        ),
        action: Some(NudgeAction {
            label: "Schedule a reset".to_string(),
            target: "reset".to_string(),
        }),
        dismissible: true,
        expires_in_hours: Some(48),
    }
}

fn weekday_anxiety_nudge(d: &Detection) -> NudgeDraft {
    NudgeDraft {
        kind: NudgeKind::Insight,
        priority: NudgePriority::Medium,
        title: format!("Tough {}s", d.detail),
        message: format!(
            "More than half of your {} check-ins log anxiety or stress. \
             A little extra preparation the evening before could take the edge off.",
            d.detail
        ),
        action: Some(NudgeAction {
            label: "Try a breathing exercise".to_string(),
            target: "breathwork".to_string(),
        }),
        dismissible: true,
        expires_in_hours: Some(72),
    }
}

fn skipped_reset_stress_nudge(d: &Detection) -> NudgeDraft {
    NudgeDraft {
        kind: NudgeKind::Warning,
        priority: NudgePriority::High,
        title: "Skipped resets are catching up".to_string(),
        message: format!(
            "You've skipped {} resets in the last few days and stress spiked within a day of \
             the last one. Even two minutes counts.",
            d.detail
        ),
        action: Some(NudgeAction {
            label: "Take a 2-minute reset".to_string(),
            target: "reset".to_string(),
        }),
        dismissible: true,
        expires_in_hours: Some(24),
    }
}

fn pre_assignment_anxiety_nudge(d: &Detection) -> NudgeDraft {
    NudgeDraft {
        kind: NudgeKind::Suggestion,
        priority: NudgePriority::Medium,
        title: "Pre-assignment nerves".to_string(),
        message: format!(
            "Anxiety shows up before most of your {} assignments. \
             A grounding exercise in the hour beforehand can help you settle.",
            d.detail
        ),
        action: Some(NudgeAction {
            label: "Ground before the next one".to_string(),
            target: "mindfulness".to_string(),
        }),
        dismissible: true,
        expires_in_hours: Some(48),
    }
}

fn afternoon_exhaustion_nudge(d: &Detection) -> NudgeDraft {
    NudgeDraft {
        kind: NudgeKind::Suggestion,
        priority: NudgePriority::Medium,
        title: "Afternoon energy dip".to_string(),
        message: format!(
            "Exhaustion clusters around {} for you. Scheduling lighter work or a movement \
             break there may smooth out the dip.",
            d.detail
        ),
        action: Some(NudgeAction {
            label: "Plan a movement break".to_string(),
            target: "movement".to_string(),
        }),
        dismissible: true,
        expires_in_hours: Some(48),
    }
}

fn wellness_streak_nudge(d: &Detection) -> NudgeDraft {
    NudgeDraft {
        kind: NudgeKind::Encouragement,
        priority: NudgePriority::Low,
        title: format!("{}-day wellness streak", d.detail),
        message: format!(
            "That's {} days in a row with at least one wellness action. Consistency like \
             this is what makes the practice stick.",
            d.detail
        ),
        action: None,
        dismissible: true,
        expires_in_hours: Some(24),
    }
}

fn weekday_exhaustion_nudge(d: &Detection) -> NudgeDraft {
    NudgeDraft {
        kind: NudgeKind::Warning,
        priority: NudgePriority::High,
        title: format!("{}s are wearing you down", d.detail),
        message: format!(
            "Most of your exhaustion and overwhelm logs land on {}s. It may be worth \
             rebalancing that day's assignment load.",
            d.detail
        ),
        action: Some(NudgeAction {
            label: "Review your schedule".to_string(),
            target: "schedule".to_string(),
        }),
        dismissible: true,
        expires_in_hours: Some(72),
    }
}

fn effective_wellness_category_nudge(d: &Detection) -> NudgeDraft {
    NudgeDraft {
        kind: NudgeKind::Insight,
        priority: NudgePriority::Low,
        title: "What's working for you".to_string(),
        message: format!(
            "Your highest-rated wellness actions are mostly {}. Doubling down on what \
             already works is the easiest win available.",
            d.detail
        ),
        action: None,
        dismissible: true,
        expires_in_hours: Some(168),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{
        AssignmentLog, Difficulty, EmotionContext, EmotionLog, ResetLog, WellnessActionLog,
    };
    use chrono::TimeZone;

    fn t(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
    }

    fn emotion(tag: &str, intensity: u8, ts: DateTime<Utc>) -> EmotionLog {
        EmotionLog {
            emotion: tag.to_string(),
            intensity,
            timestamp: ts,
            context: None,
        }
    }

    fn assignment(ty: &str, ts: DateTime<Utc>) -> AssignmentLog {
        AssignmentLog {
            assignment_type: ty.to_string(),
            duration_minutes: 60,
            difficulty: Difficulty::Challenging,
            emotion_after: None,
            timestamp: ts,
            completed: true,
        }
    }

    fn wellness(cat: WellnessCategory, eff: Option<u8>, ts: DateTime<Utc>) -> WellnessActionLog {
        WellnessActionLog {
            action: "action".to_string(),
            category: cat,
            timestamp: ts,
            duration_minutes: Some(10),
            effectiveness: eff,
        }
    }

    #[test]
    fn test_catalog_has_eight_rules() {
        assert_eq!(catalog().len(), 8);
    }

    #[test]
    fn test_post_assignment_fatigue_fires_above_ratio() {
        // 2026-03-09 is a Monday; use the prior week for data
        let now = t(9, 18);
        let mut history = EventHistory::default();
        // Three medical assignments, all followed by fatigue within 4h
        for day in 4..7 {
            history.assignments.push(assignment("medical", t(day, 9)));
            history.emotions.push(emotion("exhausted", 4, t(day, 11)));
        }

        let detection = post_assignment_fatigue(&history, now).unwrap();
        assert_eq!(detection.unwrap().detail, "medical");
    }

    #[test]
    fn test_post_assignment_fatigue_respects_window_and_ratio() {
        let now = t(9, 18);
        let mut history = EventHistory::default();
        // Fatigue 6 hours later: outside the 4-hour window
        for day in 4..7 {
            history.assignments.push(assignment("medical", t(day, 9)));
            history.emotions.push(emotion("exhausted", 4, t(day, 15)));
        }
        assert!(post_assignment_fatigue(&history, now).unwrap().is_none());

        // 2 of 3 followed = 66% > 60% fires; 1 of 3 does not
        let mut history = EventHistory::default();
        for day in 4..7 {
            history.assignments.push(assignment("medical", t(day, 9)));
        }
        history.emotions.push(emotion("drained", 3, t(4, 10)));
        assert!(post_assignment_fatigue(&history, now).unwrap().is_none());

        history.emotions.push(emotion("drained", 3, t(5, 10)));
        assert!(post_assignment_fatigue(&history, now).unwrap().is_some());
    }

    #[test]
    fn test_post_assignment_fatigue_needs_min_support() {
        let now = t(9, 18);
        let mut history = EventHistory::default();
        // Only two assignments: below minimum support even at 100% ratio
        for day in 5..7 {
            history.assignments.push(assignment("medical", t(day, 9)));
            history.emotions.push(emotion("exhausted", 4, t(day, 10)));
        }
        assert!(post_assignment_fatigue(&history, now).unwrap().is_none());
    }

    #[test]
    fn test_weekday_anxiety_fires() {
        // 2026-03-02, 03-09, 03-16, 03-23 are Mondays
        let mut history = EventHistory::default();
        for day in [2, 9, 16, 23] {
            history.emotions.push(emotion("anxious", 4, t(day, 9)));
        }
        let detection = weekday_anxiety(&history, t(24, 9)).unwrap();
        assert_eq!(detection.unwrap().detail, "Monday");
    }

    #[test]
    fn test_weekday_anxiety_ignores_low_intensity() {
        let mut history = EventHistory::default();
        for day in [2, 9, 16, 23] {
            history.emotions.push(emotion("anxious", 2, t(day, 9)));
        }
        assert!(weekday_anxiety(&history, t(24, 9)).unwrap().is_none());
    }

    #[test]
    fn test_weekday_anxiety_exactly_half_does_not_fire() {
        let mut history = EventHistory::default();
        for day in [2, 9] {
            history.emotions.push(emotion("anxious", 4, t(day, 9)));
        }
        for day in [16, 23] {
            history.emotions.push(emotion("calm", 2, t(day, 9)));
        }
        assert!(weekday_anxiety(&history, t(24, 9)).unwrap().is_none());
    }

    #[test]
    fn test_skipped_reset_stress_fires() {
        let now = t(4, 12);
        let mut history = EventHistory::default();
        for day in 2..5 {
            history.resets.push(ResetLog {
                reset_type: "breathing".to_string(),
                timestamp: t(day, 10),
                effectiveness: None,
                skipped: true,
                reason: Some("no time".to_string()),
            });
        }
        // Spike 2 hours after the last skip
        history.emotions.push(emotion("overwhelmed", 5, t(4, 12)));

        let detection = skipped_reset_stress(&history, now).unwrap();
        assert_eq!(detection.unwrap().detail, "3");
    }

    #[test]
    fn test_skipped_reset_stress_needs_three_skips_and_spike() {
        let now = t(4, 12);
        let mut history = EventHistory::default();
        for day in 3..5 {
            history.resets.push(ResetLog {
                reset_type: "breathing".to_string(),
                timestamp: t(day, 10),
                effectiveness: None,
                skipped: true,
                reason: None,
            });
        }
        history.emotions.push(emotion("stressed", 5, t(4, 12)));
        assert!(skipped_reset_stress(&history, now).unwrap().is_none());

        // Third skip but only a mild emotion afterwards
        history.resets.push(ResetLog {
            reset_type: "breathing".to_string(),
            timestamp: t(2, 10),
            effectiveness: None,
            skipped: true,
            reason: None,
        });
        history.emotions.clear();
        history.emotions.push(emotion("stressed", 3, t(4, 12)));
        assert!(skipped_reset_stress(&history, now).unwrap().is_none());
    }

    #[test]
    fn test_pre_assignment_anxiety_fires() {
        let mut history = EventHistory::default();
        for day in 2..5 {
            history.assignments.push(assignment("legal", t(day, 14)));
            history.emotions.push(EmotionLog {
                emotion: "nervous".to_string(),
                intensity: 3,
                timestamp: t(day, 12),
                context: Some(EmotionContext {
                    assignment_type: Some("legal".to_string()),
                    post_assignment: false,
                    ..Default::default()
                }),
            });
        }
        let detection = pre_assignment_anxiety(&history, t(5, 9)).unwrap();
        assert_eq!(detection.unwrap().detail, "legal");
    }

    #[test]
    fn test_pre_assignment_anxiety_ignores_post_assignment_context() {
        let mut history = EventHistory::default();
        for day in 2..5 {
            history.assignments.push(assignment("legal", t(day, 14)));
            history.emotions.push(EmotionLog {
                emotion: "nervous".to_string(),
                intensity: 3,
                timestamp: t(day, 16),
                context: Some(EmotionContext {
                    assignment_type: Some("legal".to_string()),
                    post_assignment: true,
                    ..Default::default()
                }),
            });
        }
        assert!(pre_assignment_anxiety(&history, t(5, 9)).unwrap().is_none());
    }

    #[test]
    fn test_afternoon_exhaustion_fires() {
        let mut history = EventHistory::default();
        // 3 of 5 fatigue logs at 14:00 = 60% > 40%
        for day in 2..5 {
            history.emotions.push(emotion("exhausted", 4, t(day, 14)));
        }
        history.emotions.push(emotion("tired", 3, t(2, 9)));
        history.emotions.push(emotion("drained", 3, t(3, 20)));

        let detection = afternoon_exhaustion(&history, t(6, 9)).unwrap();
        assert_eq!(detection.unwrap().detail, "14:00");
    }

    #[test]
    fn test_afternoon_exhaustion_needs_min_logs() {
        let mut history = EventHistory::default();
        for day in 2..5 {
            history.emotions.push(emotion("exhausted", 4, t(day, 14)));
        }
        assert!(afternoon_exhaustion(&history, t(6, 9)).unwrap().is_none());
    }

    #[test]
    fn test_wellness_streak_multiples_of_seven() {
        let now = t(20, 20);
        let mut history = EventHistory::default();
        // 7 consecutive days ending today
        for day in 14..=20 {
            history
                .wellness_actions
                .push(wellness(WellnessCategory::Movement, Some(4), t(day, 8)));
        }
        let detection = wellness_streak(&history, now).unwrap();
        assert_eq!(detection.unwrap().detail, "7");

        // 8 days: streak no longer a multiple of 7
        history
            .wellness_actions
            .push(wellness(WellnessCategory::Movement, Some(4), t(13, 8)));
        assert!(wellness_streak(&history, now).unwrap().is_none());
    }

    #[test]
    fn test_wellness_streak_may_end_yesterday() {
        let now = t(21, 8);
        let mut history = EventHistory::default();
        for day in 14..=20 {
            history
                .wellness_actions
                .push(wellness(WellnessCategory::Sleep, None, t(day, 8)));
        }
        // Nothing logged yet today; streak of 7 ending yesterday still counts
        let detection = wellness_streak(&history, now).unwrap();
        assert_eq!(detection.unwrap().detail, "7");
    }

    #[test]
    fn test_weekday_exhaustion_fires() {
        let mut history = EventHistory::default();
        // 4 of 5 heavy logs on Mondays = 80% > 60%
        for day in [2, 9, 16, 23] {
            history.emotions.push(emotion("overwhelmed", 4, t(day, 9)));
        }
        history.emotions.push(emotion("exhausted", 4, t(3, 9)));

        let detection = weekday_exhaustion(&history, t(24, 9)).unwrap();
        assert_eq!(detection.unwrap().detail, "Monday");
    }

    #[test]
    fn test_effective_wellness_category_fires() {
        let mut history = EventHistory::default();
        for day in 2..5 {
            history
                .wellness_actions
                .push(wellness(WellnessCategory::Breathwork, Some(5), t(day, 8)));
        }
        history
            .wellness_actions
            .push(wellness(WellnessCategory::Movement, Some(4), t(5, 8)));
        history
            .wellness_actions
            .push(wellness(WellnessCategory::Sleep, Some(4), t(6, 8)));

        let detection = effective_wellness_category(&history, t(7, 9)).unwrap();
        assert_eq!(detection.unwrap().detail, "breathwork");
    }

    #[test]
    fn test_effective_wellness_category_ignores_low_ratings() {
        let mut history = EventHistory::default();
        for day in 2..7 {
            history
                .wellness_actions
                .push(wellness(WellnessCategory::Breathwork, Some(3), t(day, 8)));
        }
        assert!(effective_wellness_category(&history, t(7, 9))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_empty_history_matches_nothing() {
        let history = EventHistory::default();
        let now = t(9, 9);
        for rule in catalog() {
            let result = (rule.condition)(&history, now).unwrap();
            assert!(result.is_none(), "rule {} fired on empty history", rule.id);
        }
    }
}
