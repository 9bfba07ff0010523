#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a full session against the maze service.

mod logging;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use maze_scout_core::{GameState, WELCOME_BANNER};
use maze_scout_oracle_http::{HttpOracle, OracleConfig};
use maze_scout_system_session::{SessionController, DEFAULT_PREFERRED_HEADING};
use tracing::info;

/// Prompt-driven maze runner.
///
/// The surface is deliberately flagless: the identity is read interactively
/// and connection settings come from `maze-scout.toml` or the environment.
#[derive(Parser)]
#[command(name = "maze-scout", version, about = "Blind explorer for the remote maze service")]
struct Cli {}

/// Entry point for the Maze Scout command-line interface.
fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let Cli {} = Cli::parse();

    println!("{WELCOME_BANNER}");
    let identity = prompt_identity().context("failed to read the identity")?;

    let config =
        OracleConfig::from_default_sources().context("failed to resolve the service config")?;
    let oracle = HttpOracle::connect(&config).context("failed to build the service client")?;
    let session = oracle
        .authenticate(&identity)
        .context("authentication failed")?;
    info!(base_url = %oracle.base_url(), "session authenticated");

    let controller = SessionController::new(&oracle, session, DEFAULT_PREFERRED_HEADING);
    let summary = controller.run().context("the run ended in an error")?;

    match summary.game_state {
        GameState::GameOver => println!(
            "Game over after {} of {} levels.",
            summary.levels_completed, summary.total_levels
        ),
        _ => println!(
            "Solved {} of {} levels.",
            summary.levels_completed, summary.total_levels
        ),
    }
    Ok(())
}

fn prompt_identity() -> Result<String> {
    print!("Enter your identity to continue: ");
    io::stdout().flush()?;

    let mut identity = String::new();
    let _bytes = io::stdin().lock().read_line(&mut identity)?;
    let identity = identity.trim().to_owned();
    anyhow::ensure!(!identity.is_empty(), "an identity is required");
    Ok(identity)
}
