use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// Filter directives for stderr logging, e.g. `SLEUTH_LOG=sleuth_core=debug`.
const LOG_ENV: &str = "SLEUTH_LOG";

#[derive(Parser)]
#[command(name = "sleuth", version, about = "Sleuth CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Countdown timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Inspect trust tiers and render partner answers
    Trust {
        #[command(subcommand)]
        action: commands::trust::TrustAction,
    },
    /// Play one timed episode and apply its outcome to progress
    Play(commands::play::PlayArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Trust { action } => commands::trust::run(action),
        Commands::Play(args) => commands::play::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
