//! Command-line interface for noughts.

use clap::{Parser, Subcommand};
use noughts_engine::Mark;
use std::path::PathBuf;

/// Noughts - tic-tac-toe against a minimax adversary
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Play tic-tac-toe against a perfect-play AI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play rounds against the AI on stdin/stdout
    Play {
        /// Path to the config file (defaults apply if it doesn't exist)
        #[arg(short, long, default_value = "noughts.toml")]
        config: PathBuf,

        /// Preference file holding `player` (overrides the config entry)
        #[arg(long)]
        preferences: Option<PathBuf>,

        /// Play as this mark instead of the stored preference
        #[arg(short, long)]
        mark: Option<Mark>,

        /// Emit JSON frames instead of the text board
        #[arg(long)]
        json: bool,
    },

    /// Print the move the AI would choose on a board
    BestMove {
        /// Nine cells row-major: X, O, or . for empty (e.g. "XX.OO....")
        #[arg(short, long)]
        board: String,

        /// Mark to move
        #[arg(short, long)]
        to_move: Mark,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}
