use chrono::Utc;
use clap::Subcommand;
use interpretreflect_core::{CapacityUpdate, LoadBalancer};

use super::{resolve_user, CliResult};

#[derive(Subcommand)]
pub enum CapacityAction {
    /// Show the current capacity snapshot (defaults for a new user)
    Show {
        #[arg(long)]
        user: Option<String>,
    },
    /// Merge a partial update and append a new snapshot
    Update {
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        available_capacity: Option<f64>,
        #[arg(long)]
        working_memory_load: Option<f64>,
        #[arg(long)]
        attention_reserve: Option<f64>,
        #[arg(long)]
        decision_fatigue_level: Option<f64>,
        #[arg(long)]
        multitasking_efficiency: Option<f64>,
        #[arg(long)]
        error_rate_under_pressure: Option<f64>,
        #[arg(long)]
        high_load_performance: Option<f64>,
        #[arg(long)]
        medical_terminology_capacity: Option<f64>,
        #[arg(long)]
        legal_complexity_capacity: Option<f64>,
        #[arg(long)]
        technical_jargon_capacity: Option<f64>,
        #[arg(long)]
        emotional_resilience_capacity: Option<f64>,
        #[arg(long)]
        recovery_rate: Option<f64>,
        #[arg(long)]
        optimal_break_duration: Option<u32>,
    },
}

pub fn run(action: CapacityAction) -> CliResult {
    let balancer = LoadBalancer::open()?;

    match action {
        CapacityAction::Show { user } => {
            let user = resolve_user(user)?;
            let capacity = balancer.current_capacity(&user, Utc::now())?;
            println!("{}", serde_json::to_string_pretty(&capacity)?);
        }
        CapacityAction::Update {
            user,
            available_capacity,
            working_memory_load,
            attention_reserve,
            decision_fatigue_level,
            multitasking_efficiency,
            error_rate_under_pressure,
            high_load_performance,
            medical_terminology_capacity,
            legal_complexity_capacity,
            technical_jargon_capacity,
            emotional_resilience_capacity,
            recovery_rate,
            optimal_break_duration,
        } => {
            let user = resolve_user(user)?;
            let update = CapacityUpdate {
                available_capacity,
                working_memory_load,
                attention_reserve,
                decision_fatigue_level,
                multitasking_efficiency,
                error_rate_under_pressure,
                high_load_performance,
                medical_terminology_capacity,
                legal_complexity_capacity,
                technical_jargon_capacity,
                emotional_resilience_capacity,
                recovery_rate,
                optimal_break_duration,
            };
            if update.is_empty() {
                println!("nothing to update; pass at least one field");
                return Ok(());
            }
            let merged = balancer.update_capacity(&user, &update, Utc::now())?;
            println!("{}", serde_json::to_string_pretty(&merged)?);
        }
    }
    Ok(())
}
