//! Command line interface for playing, training and evaluating board game
//! agents

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "boardgames")]
#[command(version, about = "Two-player board games with search and learned agents", long_about = None)]
struct Cli {
    /// Log more detail (repeat for trace output)
    #[arg(long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play games between two players
    Play(boardgames::cli::commands::play::PlayArgs),

    /// Train Q-tables against a scripted opponent
    Train(Box<boardgames::cli::commands::train::TrainArgs>),

    /// Evaluate stored Q-tables
    Evaluate(boardgames::cli::commands::evaluate::EvaluateArgs),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("boardgames={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Play(args) => boardgames::cli::commands::play::execute(args),
        Commands::Train(args) => boardgames::cli::commands::train::execute(*args),
        Commands::Evaluate(args) => boardgames::cli::commands::evaluate::execute(args),
    }
}
