use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "interpretreflect-cli", version, about = "InterpretReflect CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log emotions, assignments, resets, and wellness actions
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Pattern analysis and recommendations
    Patterns {
        #[command(subcommand)]
        action: commands::patterns::PatternsAction,
    },
    /// Active nudge management
    Nudges {
        #[command(subcommand)]
        action: commands::nudges::NudgesAction,
    },
    /// Assignment complexity scoring
    Complexity {
        #[command(subcommand)]
        action: commands::complexity::ComplexityAction,
    },
    /// Cognitive capacity snapshots
    Capacity {
        #[command(subcommand)]
        action: commands::capacity::CapacityAction,
    },
    /// Routing recommendations
    Routing {
        #[command(subcommand)]
        action: commands::routing::RoutingAction,
    },
    /// Assignment outcome recording
    Outcome {
        #[command(subcommand)]
        action: commands::outcome::OutcomeAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("REFLECT_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Log { action } => commands::log::run(action),
        Commands::Patterns { action } => commands::patterns::run(action),
        Commands::Nudges { action } => commands::nudges::run(action),
        Commands::Complexity { action } => commands::complexity::run(action),
        Commands::Capacity { action } => commands::capacity::run(action),
        Commands::Routing { action } => commands::routing::run(action),
        Commands::Outcome { action } => commands::outcome::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
