use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tripwise", version, about = "Tripwise trip planning CLI")]
struct Cli {
    /// Preferences file (defaults to ~/.config/tripwise/preferences.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate how long an activity takes
    Estimate(commands::estimate::EstimateArgs),
    /// Estimate travel between two coordinates
    Travel(commands::travel::TravelArgs),
    /// Build a time-stamped day schedule from itinerary items
    Schedule(commands::schedule::ScheduleArgs),
    /// Score candidates and apply an automation level
    Select(commands::select::SelectArgs),
    /// Summarize a candidate set
    Analyze(commands::analyze::AnalyzeArgs),
    /// Show the day structure of a trip
    Trip(commands::trip::TripArgs),
    /// Preference management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;
    let result = match cli.command {
        Commands::Estimate(args) => commands::estimate::run(args, config),
        Commands::Travel(args) => commands::travel::run(args, config),
        Commands::Schedule(args) => commands::schedule::run(args, config),
        Commands::Select(args) => commands::select::run(args, config),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Trip(args) => commands::trip::run(args),
        Commands::Config { action } => commands::config::run(action, config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
