//! Annuvin CLI - Terminal front end for the Annuvin engine
//!
//! Commands:
//! - play: Play against the engine
//! - selfplay: Watch the engine play both sides

use clap::{Parser, Subcommand};

mod display;
mod play;
mod selfplay;

#[derive(Parser)]
#[command(name = "annuvin")]
#[command(about = "Annuvin hex strategy game")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine
    Play(play::PlayArgs),
    /// Engine vs engine from the initial position
    Selfplay(selfplay::SelfplayArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Selfplay(args) => selfplay::run(args),
    }
}
