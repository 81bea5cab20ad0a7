use clap::Subcommand;
use interpretreflect_core::storage::Database;
use interpretreflect_core::{
    AssignmentLog, Difficulty, EmotionContext, EmotionLog, ResetLog, WellnessActionLog,
    WellnessCategory,
};

use super::{resolve_timestamp, resolve_user, CliResult};

#[derive(Subcommand)]
pub enum LogAction {
    /// Log an emotion
    Emotion {
        /// Emotion tag (e.g. "exhausted", "anxious", "calm")
        #[arg(long)]
        emotion: String,
        /// Intensity, 1-5
        #[arg(long)]
        intensity: u8,
        /// Assignment type this emotion relates to
        #[arg(long)]
        assignment_type: Option<String>,
        /// Mark as logged after completing an assignment
        #[arg(long)]
        post_assignment: bool,
        /// RFC 3339 timestamp (defaults to now)
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        user: Option<String>,
    },
    /// Log a completed assignment
    Assignment {
        /// Assignment type tag (e.g. "medical", "legal")
        #[arg(long = "type")]
        assignment_type: String,
        /// Duration in minutes
        #[arg(long)]
        duration: u32,
        /// Perceived difficulty: easy|moderate|challenging|overwhelming
        #[arg(long)]
        difficulty: Difficulty,
        /// Emotion tag felt right afterwards
        #[arg(long)]
        emotion_after: Option<String>,
        /// Mark the assignment as not completed
        #[arg(long)]
        incomplete: bool,
        /// RFC 3339 timestamp (defaults to now)
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        user: Option<String>,
    },
    /// Log a reset exercise (taken or skipped)
    Reset {
        /// Reset type (e.g. "breathing", "body-scan")
        #[arg(long = "type")]
        reset_type: String,
        /// Self-rated effectiveness, 1-5
        #[arg(long)]
        effectiveness: Option<u8>,
        /// Mark the reset as skipped
        #[arg(long)]
        skipped: bool,
        /// Reason for skipping
        #[arg(long)]
        reason: Option<String>,
        /// RFC 3339 timestamp (defaults to now)
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        user: Option<String>,
    },
    /// Log a wellness action
    Wellness {
        /// Action description (e.g. "box breathing")
        #[arg(long)]
        action: String,
        /// Category: breathwork|movement|mindfulness|boundaries|nutrition|sleep
        #[arg(long)]
        category: WellnessCategory,
        /// Duration in minutes
        #[arg(long)]
        duration: Option<u32>,
        /// Self-rated effectiveness, 1-5
        #[arg(long)]
        effectiveness: Option<u8>,
        /// RFC 3339 timestamp (defaults to now)
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        user: Option<String>,
    },
}

pub fn run(action: LogAction) -> CliResult {
    let db = Database::open()?;

    match action {
        LogAction::Emotion {
            emotion,
            intensity,
            assignment_type,
            post_assignment,
            at,
            user,
        } => {
            let user = resolve_user(user)?;
            let timestamp = resolve_timestamp(at)?;
            let context = if assignment_type.is_some() || post_assignment {
                Some(EmotionContext {
                    assignment_type,
                    post_assignment,
                    ..Default::default()
                })
            } else {
                None
            };
            db.insert_emotion(
                &user,
                &EmotionLog {
                    emotion: emotion.clone(),
                    intensity,
                    timestamp,
                    context,
                },
            )?;
            println!("logged emotion '{emotion}' at intensity {intensity}");
        }
        LogAction::Assignment {
            assignment_type,
            duration,
            difficulty,
            emotion_after,
            incomplete,
            at,
            user,
        } => {
            let user = resolve_user(user)?;
            let timestamp = resolve_timestamp(at)?;
            db.insert_assignment(
                &user,
                &AssignmentLog {
                    assignment_type: assignment_type.clone(),
                    duration_minutes: duration,
                    difficulty,
                    emotion_after,
                    timestamp,
                    completed: !incomplete,
                },
            )?;
            println!("logged {assignment_type} assignment ({duration} min)");
        }
        LogAction::Reset {
            reset_type,
            effectiveness,
            skipped,
            reason,
            at,
            user,
        } => {
            let user = resolve_user(user)?;
            let timestamp = resolve_timestamp(at)?;
            db.insert_reset(
                &user,
                &ResetLog {
                    reset_type: reset_type.clone(),
                    timestamp,
                    effectiveness,
                    skipped,
                    reason,
                },
            )?;
            if skipped {
                println!("logged skipped {reset_type} reset");
            } else {
                println!("logged {reset_type} reset");
            }
        }
        LogAction::Wellness {
            action,
            category,
            duration,
            effectiveness,
            at,
            user,
        } => {
            let user = resolve_user(user)?;
            let timestamp = resolve_timestamp(at)?;
            db.insert_wellness_action(
                &user,
                &WellnessActionLog {
                    action: action.clone(),
                    category,
                    timestamp,
                    duration_minutes: duration,
                    effectiveness,
                },
            )?;
            println!("logged {category} action '{action}'");
        }
    }
    Ok(())
}
