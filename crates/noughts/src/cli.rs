//! Command-line interface for noughts.

use clap::{Parser, Subcommand};
use noughts_core::{Board, Mode, Player, Position};
use std::path::PathBuf;

/// Noughts - noughts and crosses against a perfect-play engine
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Noughts and crosses against a perfect-play engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Preferences file (created when settings change)
        #[arg(long, default_value = "noughts.toml")]
        config: PathBuf,

        /// Statistics file
        #[arg(long, default_value = "noughts_stats.json")]
        stats: PathBuf,

        /// Opponent: human-vs-human or human-vs-engine
        #[arg(long)]
        mode: Option<Mode>,

        /// Side the human plays against the engine (x or o)
        #[arg(long)]
        side: Option<Player>,

        /// Pause before the engine replies, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Print the engine's best move for a position
    Solve {
        /// Nine cells of X, O and '.', e.g. "XX.OO...."
        board: Board,

        /// Side to move (defaults to the side implied by piece counts)
        #[arg(long)]
        side: Option<Player>,

        /// Play this square first (0-8 or a label such as "center"), then solve the reply
        #[arg(long, value_parser = parse_position)]
        play: Option<Position>,
    },

    /// Show or reset the win/draw tally
    Stats {
        /// Statistics file
        #[arg(long, default_value = "noughts_stats.json")]
        stats: PathBuf,

        /// Zero every counter
        #[arg(long)]
        reset: bool,
    },
}

fn parse_position(s: &str) -> Result<Position, String> {
    Position::from_label_or_number(s)
        .ok_or_else(|| format!("{s:?} is not a square; use 0-8 or a label such as \"top-left\""))
}
