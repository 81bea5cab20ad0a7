use chrono::Utc;
use clap::Subcommand;
use interpretreflect_core::{AssignmentOutcome, LoadBalancer};

use super::{resolve_timestamp, resolve_user, CliResult};

#[derive(Subcommand)]
pub enum OutcomeAction {
    /// Record an assignment outcome and adjust the user's capacity
    Record {
        /// Task id
        #[arg(long)]
        task: String,
        #[arg(long)]
        user: Option<String>,
        /// Performance score, 0-100
        #[arg(long)]
        performance: u32,
        /// Stress level, 0-10
        #[arg(long)]
        stress: u32,
        /// Actual recovery time in minutes
        #[arg(long)]
        recovery_minutes: Option<u32>,
        /// RFC 3339 completion timestamp (defaults to now)
        #[arg(long)]
        at: Option<String>,
    },
}

pub fn run(action: OutcomeAction) -> CliResult {
    let balancer = LoadBalancer::open()?;

    match action {
        OutcomeAction::Record {
            task,
            user,
            performance,
            stress,
            recovery_minutes,
            at,
        } => {
            let user = resolve_user(user)?;
            let outcome = AssignmentOutcome {
                task_id: task,
                user_id: user,
                performance_score: performance,
                stress_level: stress,
                actual_recovery_minutes: recovery_minutes,
                completed_at: resolve_timestamp(at)?,
            };
            let snapshot = balancer.record_outcome(&outcome, Utc::now())?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }
    Ok(())
}
