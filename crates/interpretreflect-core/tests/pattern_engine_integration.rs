//! Integration tests for the pattern detection workflow: events stored in
//! SQLite, materialized into history, analyzed, and checkpointed.

use chrono::{DateTime, Duration, TimeZone, Utc};
use interpretreflect_core::{
    active_nudges, analyze, dismiss_nudge, recommendations, AssignmentLog, Database, Difficulty,
    EmotionLog, EventHistory, NudgePriority, PatternState, ResetLog, RuleId,
};

fn base() -> DateTime<Utc> {
    // 2026-03-02 is a Monday
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

fn seed_fatigue_week(db: &Database, user: &str) {
    // Three medical assignments this week, each followed by exhaustion
    // within two hours: the post-assignment fatigue rule's condition.
    for day in 0..3 {
        let at = base() + Duration::days(day);
        db.insert_assignment(
            user,
            &AssignmentLog {
                assignment_type: "medical".to_string(),
                duration_minutes: 90,
                difficulty: Difficulty::Challenging,
                emotion_after: Some("exhausted".to_string()),
                timestamp: at,
                completed: true,
            },
        )
        .unwrap();
        db.insert_emotion(
            user,
            &EmotionLog {
                emotion: "exhausted".to_string(),
                intensity: 4,
                timestamp: at + Duration::hours(2),
                context: None,
            },
        )
        .unwrap();
    }
}

#[test]
fn test_full_detection_workflow() {
    let db = Database::open_memory().unwrap();
    seed_fatigue_week(&db, "user-1");

    let now = base() + Duration::days(3);
    let history = db.event_history("user-1", now - Duration::days(90)).unwrap();
    let mut state = PatternState::new();

    // Threshold for the fatigue rule is 3: first call records the
    // pattern, the third call crosses the threshold.
    assert!(analyze(&mut state, &history, now).is_empty());
    assert!(analyze(&mut state, &history, now).is_empty());
    let emitted = analyze(&mut state, &history, now);

    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].title, "Recovery pattern detected");
    assert!(emitted[0].message.contains("medical"));
    assert_eq!(
        state.patterns[&RuleId::PostAssignmentFatigue].occurrences,
        3
    );

    // State survives a checkpoint through the kv store
    let json = serde_json::to_string(&state).unwrap();
    db.kv_set("pattern_state:user-1", &json).unwrap();
    let restored: PatternState =
        serde_json::from_str(&db.kv_get("pattern_state:user-1").unwrap().unwrap()).unwrap();
    assert_eq!(
        restored.patterns[&RuleId::PostAssignmentFatigue].occurrences,
        3
    );

    // Recommendations surface the rule's tag text
    let recs = recommendations(&restored);
    assert_eq!(recs.len(), 1);
    assert!(recs[0].contains("recovery buffer"));
}

#[test]
fn test_nudge_lifecycle_dismiss_and_expiry() {
    let db = Database::open_memory().unwrap();
    seed_fatigue_week(&db, "user-1");

    let now = base() + Duration::days(3);
    let history = db.event_history("user-1", now - Duration::days(90)).unwrap();
    let mut state = PatternState::new();

    for _ in 0..3 {
        analyze(&mut state, &history, now);
    }
    let active = active_nudges(&mut state, now);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].priority, NudgePriority::Medium);

    // Dismissal removes it; dismissing again is a no-op
    let id = active[0].id.clone();
    dismiss_nudge(&mut state, &id);
    dismiss_nudge(&mut state, &id);
    assert!(active_nudges(&mut state, now).is_empty());

    // Re-emitted on the next analysis, then expires after its 48h window
    let emitted = analyze(&mut state, &history, now);
    assert_eq!(emitted.len(), 1);
    assert!(active_nudges(&mut state, now + Duration::hours(49)).is_empty());
}

#[test]
fn test_multiple_users_do_not_interfere() {
    let db = Database::open_memory().unwrap();
    seed_fatigue_week(&db, "user-1");

    let now = base() + Duration::days(3);
    let since = now - Duration::days(90);

    let mut state_1 = PatternState::new();
    let mut state_2 = PatternState::new();

    let history_1 = db.event_history("user-1", since).unwrap();
    let history_2 = db.event_history("user-2", since).unwrap();

    for _ in 0..3 {
        analyze(&mut state_1, &history_1, now);
        analyze(&mut state_2, &history_2, now);
    }

    assert!(!state_1.patterns.is_empty());
    assert!(state_2.patterns.is_empty());
    assert!(state_2.nudges.is_empty());
}

#[test]
fn test_zero_event_user_yields_nothing() {
    let db = Database::open_memory().unwrap();
    let now = base();

    let history = db.event_history("nobody", now - Duration::days(90)).unwrap();
    assert!(history.is_empty());

    let mut state = PatternState::new();
    let emitted = analyze(&mut state, &history, now);

    assert!(emitted.is_empty());
    assert!(state.patterns.is_empty());
    assert!(recommendations(&state).is_empty());
    assert!(active_nudges(&mut state, now).is_empty());
}

#[test]
fn test_skipped_resets_surface_high_priority_warning() {
    let db = Database::open_memory().unwrap();
    let now = base() + Duration::days(3);

    for day in 1..4 {
        db.insert_reset(
            "user-1",
            &ResetLog {
                reset_type: "breathing".to_string(),
                timestamp: base() + Duration::days(day),
                effectiveness: None,
                skipped: true,
                reason: Some("back to back assignments".to_string()),
            },
        )
        .unwrap();
    }
    db.insert_emotion(
        "user-1",
        &EmotionLog {
            emotion: "overwhelmed".to_string(),
            intensity: 5,
            timestamp: base() + Duration::days(3) + Duration::hours(2),
            context: None,
        },
    )
    .unwrap();

    let analysis_time = now + Duration::hours(3);
    let history = db
        .event_history("user-1", analysis_time - Duration::days(90))
        .unwrap();
    let mut state = PatternState::new();

    // Threshold 2: second matching analysis emits
    assert!(analyze(&mut state, &history, analysis_time).is_empty());
    let emitted = analyze(&mut state, &history, analysis_time);

    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].priority, NudgePriority::High);
    assert!(emitted[0].title.contains("Skipped resets"));
}

#[test]
fn test_priority_ordering_across_rules() {
    // Drive two rules with different priorities from one history and
    // check the active list ordering.
    let now = base() + Duration::days(3);
    let mut history = EventHistory::default();

    // High-priority weekday exhaustion: 5 heavy logs, 4 on Mondays
    for week in 0..4 {
        history.emotions.push(EmotionLog {
            emotion: "overwhelmed".to_string(),
            intensity: 4,
            timestamp: base() + Duration::weeks(week),
            context: None,
        });
    }
    history.emotions.push(EmotionLog {
        emotion: "exhausted".to_string(),
        intensity: 4,
        timestamp: base() + Duration::days(1),
        context: None,
    });

    // Low-priority effective-category insight: 5 highly rated breathwork actions
    for day in 0..5 {
        history
            .wellness_actions
            .push(interpretreflect_core::WellnessActionLog {
                action: "box breathing".to_string(),
                category: interpretreflect_core::WellnessCategory::Breathwork,
                timestamp: base() + Duration::days(day),
                duration_minutes: Some(5),
                effectiveness: Some(5),
            });
    }

    let mut state = PatternState::new();
    analyze(&mut state, &history, now);
    analyze(&mut state, &history, now);

    let active = active_nudges(&mut state, now);
    assert_eq!(active.len(), 2);
    assert_eq!(active[0].priority, NudgePriority::High);
    assert_eq!(active[1].priority, NudgePriority::Low);
}
