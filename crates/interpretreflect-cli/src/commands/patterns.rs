use chrono::{Duration, Utc};
use clap::Subcommand;
use interpretreflect_core::storage::{Config, Database};
use interpretreflect_core::{analyze, recommendations};

use super::{load_state, resolve_user, save_state, CliResult};

#[derive(Subcommand)]
pub enum PatternsAction {
    /// Run pattern analysis over the user's event history
    Analyze {
        #[arg(long)]
        user: Option<String>,
    },
    /// Personalized recommendations from detected patterns
    Recommendations {
        #[arg(long)]
        user: Option<String>,
    },
}

pub fn run(action: PatternsAction) -> CliResult {
    let config = Config::load()?;
    let db = Database::open()?;

    match action {
        PatternsAction::Analyze { user } => {
            let user = resolve_user(user)?;
            let now = Utc::now();
            let since = now - Duration::days(config.retention.event_window_days as i64);

            let history = db.event_history(&user, since)?;
            let mut state = load_state(&db, &user);

            let emitted = analyze(&mut state, &history, now);

            if config.nudges.persist_state {
                save_state(&db, &user, &state);
            }

            if emitted.is_empty() {
                println!("no new nudges");
            } else {
                println!("{}", serde_json::to_string_pretty(&emitted)?);
            }
        }
        PatternsAction::Recommendations { user } => {
            let user = resolve_user(user)?;
            let state = load_state(&db, &user);
            let recs = recommendations(&state);

            if recs.is_empty() {
                println!("no recommendations yet; keep logging");
            } else {
                for (i, rec) in recs.iter().enumerate() {
                    println!("{}. {rec}", i + 1);
                }
            }
        }
    }
    Ok(())
}
