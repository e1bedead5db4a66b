//! Development tasks for the tactics workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{Plan, Simulate};

/// Development tasks for the tactics workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for grid tactics", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a single A* query on a map and draw the result
    Plan(Plan),

    /// Run a scenario for a number of ticks and print what happened
    Simulate(Simulate),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for TACTICS_DATA, TACTICS_CONFIG, TACTICS_LOG)
    let _ = dotenvy::dotenv();
    utils::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Plan(cmd) => cmd.execute(),
        Command::Simulate(cmd) => cmd.execute(),
    }
}
