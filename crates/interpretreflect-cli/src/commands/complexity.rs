use chrono::Utc;
use clap::Subcommand;
use interpretreflect_core::{
    EmotionalIntensity, LoadBalancer, Stakes, TaskAttributes, TimePressure,
};

use super::CliResult;

#[derive(Subcommand)]
pub enum ComplexityAction {
    /// Score an assignment's complexity and record it by task id
    Score {
        /// Task id
        #[arg(long)]
        task: String,
        /// Domain tag (e.g. "medical", "legal", "educational")
        #[arg(long)]
        domain: String,
        /// Stakes: low|medium|high|critical
        #[arg(long)]
        stakes: Stakes,
        /// Time pressure: relaxed|standard|urgent|emergency
        #[arg(long)]
        time_pressure: TimePressure,
        /// Emotional intensity: low|moderate|high|extreme
        #[arg(long)]
        emotional_intensity: EmotionalIntensity,
        /// Expected duration in minutes
        #[arg(long)]
        duration: u32,
        /// Content is technically dense
        #[arg(long)]
        technical: bool,
        /// Specific cultural context is present
        #[arg(long)]
        cultural_context: bool,
    },
    /// Show the recorded complexity score for a task
    Show {
        /// Task id
        #[arg(long)]
        task: String,
    },
}

pub fn run(action: ComplexityAction) -> CliResult {
    let balancer = LoadBalancer::open()?;

    match action {
        ComplexityAction::Score {
            task,
            domain,
            stakes,
            time_pressure,
            emotional_intensity,
            duration,
            technical,
            cultural_context,
        } => {
            let attrs = TaskAttributes {
                domain,
                stakes,
                time_pressure,
                emotional_intensity,
                duration_minutes: duration,
                technical_content: technical,
                cultural_context,
            };
            let complexity = balancer.score_assignment(&task, &attrs, Utc::now());
            println!("{}", serde_json::to_string_pretty(&complexity)?);
        }
        ComplexityAction::Show { task } => match balancer.db().get_complexity(&task)? {
            Some(complexity) => println!("{}", serde_json::to_string_pretty(&complexity)?),
            None => println!("no complexity score recorded for task '{task}'"),
        },
    }
    Ok(())
}
