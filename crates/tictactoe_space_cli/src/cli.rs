//! Command-line interface for tictactoe_space.

use clap::{Parser, Subcommand};

/// Tic-tac-toe state-space enumeration and random-policy games
#[derive(Parser, Debug)]
#[command(name = "tictactoe_space")]
#[command(about = "Enumerate tic-tac-toe states and play fixed random policies", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Enumerate the full state and action space and report counts
    Space {
        /// O moves first instead of X
        #[arg(long)]
        o_first: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play one game between two random fixed-policy players
    Play {
        /// O moves first instead of X
        #[arg(long)]
        o_first: bool,

        /// Seed for X's policy (O uses seed + 1 unless configured)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Path to a TOML play configuration
        #[arg(short, long)]
        config: Option<std::path::PathBuf>,
    },
}
