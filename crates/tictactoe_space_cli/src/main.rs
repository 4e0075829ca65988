//! tictactoe_space - unified CLI
//!
//! Enumerates the tic-tac-toe state space or plays one game between two
//! fixed random-policy players.

#![warn(missing_docs)]

mod cli;
mod config;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use config::PlayConfig;
use std::path::PathBuf;
use tictactoe_space::{Board, Explorer, GameRunner, Player, rules};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Space { o_first, json } => run_space(o_first, json),
        Command::Play {
            o_first,
            seed,
            config,
        } => run_play(o_first, seed, config),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Enumerate the state and action space and print counts
#[instrument]
fn run_space(o_first: bool, json: bool) -> Result<()> {
    let explorer = Explorer::new(Board::new(!o_first));
    let summary = explorer.space()?.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let first = explorer.root().turn();
    println!("First mover:     {}", first);
    println!("States:          {}", summary.states);
    println!("Terminal states: {}", summary.terminal);
    println!("  X wins:        {}", summary.x_wins);
    println!("  O wins:        {}", summary.o_wins);
    println!("  Draws:         {}", summary.draws);
    println!("Actions:         {}", summary.actions);
    Ok(())
}

/// Play one game between two random fixed-policy players
#[instrument]
fn run_play(o_first: bool, seed: Option<u64>, config: Option<PathBuf>) -> Result<()> {
    let config = match config {
        Some(path) => PlayConfig::from_file(path)?,
        None => PlayConfig::default(),
    }
    .with_overrides(seed, o_first);

    let start_x = *config.start_x();
    let explorer = Explorer::new(Board::new(start_x));
    let player_x = Player::seeded(&explorer, true, *config.seed())?;
    let player_o = Player::seeded(&explorer, false, config.effective_o_seed())?;
    info!(
        x_seed = *config.seed(),
        o_seed = config.effective_o_seed(),
        "Players ready"
    );

    let report = GameRunner::new(Board::new(start_x), player_x, player_o).run()?;

    for (i, played) in report.moves().iter().enumerate() {
        println!("{:>2}. {}", i + 1, played);
    }
    println!();
    println!("{}", report.board());
    println!();
    let outcome = report.outcome();
    if outcome.is_draw() {
        println!("{} (board full, no line)", outcome);
    } else if let Some(line) = outcome
        .winner()
        .and_then(|mark| rules::winning_line(report.board().squares(), mark))
    {
        println!("{} ({})", outcome, line);
    }
    Ok(())
}
