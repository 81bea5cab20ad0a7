use chrono::Utc;
use clap::Subcommand;
use interpretreflect_core::storage::Database;
use interpretreflect_core::{active_nudges, dismiss_nudge};

use super::{load_state, resolve_user, save_state, CliResult};

#[derive(Subcommand)]
pub enum NudgesAction {
    /// List active nudges, highest priority first
    List {
        #[arg(long)]
        user: Option<String>,
    },
    /// Dismiss a nudge by id
    Dismiss {
        /// Nudge id
        id: String,
        #[arg(long)]
        user: Option<String>,
    },
}

pub fn run(action: NudgesAction) -> CliResult {
    let db = Database::open()?;

    match action {
        NudgesAction::List { user } => {
            let user = resolve_user(user)?;
            let mut state = load_state(&db, &user);

            let nudges = active_nudges(&mut state, Utc::now());
            // Purging expired nudges mutates the state; keep the checkpoint in step
            save_state(&db, &user, &state);

            if nudges.is_empty() {
                println!("no active nudges");
            } else {
                println!("{}", serde_json::to_string_pretty(&nudges)?);
            }
        }
        NudgesAction::Dismiss { id, user } => {
            let user = resolve_user(user)?;
            let mut state = load_state(&db, &user);

            dismiss_nudge(&mut state, &id);
            save_state(&db, &user, &state);

            println!("dismissed {id}");
        }
    }
    Ok(())
}
