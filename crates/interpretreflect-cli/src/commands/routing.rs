use chrono::Utc;
use clap::Subcommand;
use interpretreflect_core::LoadBalancer;

use super::{resolve_user, CliResult};

#[derive(Subcommand)]
pub enum RoutingAction {
    /// Recommend whether a user should take an assignment
    Recommend {
        /// Task id (must have a recorded complexity score)
        #[arg(long)]
        task: String,
        #[arg(long)]
        user: Option<String>,
    },
}

pub fn run(action: RoutingAction) -> CliResult {
    let balancer = LoadBalancer::open()?;

    match action {
        RoutingAction::Recommend { task, user } => {
            let user = resolve_user(user)?;
            let recommendation = balancer.recommend(&task, &user, Utc::now())?;
            println!("{}", serde_json::to_string_pretty(&recommendation)?);
        }
    }
    Ok(())
}
