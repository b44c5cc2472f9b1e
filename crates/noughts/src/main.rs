//! Noughts - unified CLI
//!
//! Terminal noughts and crosses against a perfect-play engine.

#![warn(missing_docs)]

mod cli;
mod config;
mod stats;
mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::Preferences;
use noughts_core::{Board, Player, Position, WIN_SCORE, evaluate, search};
use stats::Tally;
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            stats,
            mode,
            side,
            delay_ms,
        } => {
            let prefs = Preferences::load(&config)?.with_overrides(mode, side, delay_ms);
            let tally = Tally::load(&stats)?;
            tui::run_tui(prefs, config, tally, stats).await
        }
        Command::Solve { board, side, play } => {
            init_stderr_logging();
            run_solve(board, side, play)
        }
        Command::Stats { stats, reset } => {
            init_stderr_logging();
            run_stats(stats, reset)
        }
    }
}

/// Logs to stderr for the non-interactive commands.
fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Print the engine's choice for a position, optionally after playing one square
#[instrument(skip(board), fields(board = %board.notation()))]
fn run_solve(board: Board, side: Option<Player>, play: Option<Position>) -> Result<()> {
    let side = side
        .or_else(|| board.implied_to_move())
        .with_context(|| {
            format!(
                "Cannot tell whose move it is on {}; pass --side",
                board.notation()
            )
        })?;

    let (board, side) = match play {
        Some(pos) => {
            let next = apply_opening(&board, side, pos)?;
            println!("{side} plays {} ({})", pos.to_index(), pos.label());
            (next, side.opponent())
        }
        None => (board, side),
    };

    let report = search(&board, side, side.opponent());
    let best = report.best();
    info!(nodes = report.nodes(), "Solved position");

    println!("{board}\n");
    match best.index {
        Some(index) => {
            let label = Position::from_index(index).map_or("?", |pos| pos.label());
            println!("{side} to move: play {index} ({label})");
        }
        None => println!("Position is already over: {}", evaluate(&board)),
    }
    println!("Score: {} ({})", best.score, describe_score(best.score));
    println!("Nodes searched: {}", report.nodes());
    Ok(())
}

/// Places `side` at `pos` on a board whose match is still running.
fn apply_opening(board: &Board, side: Player, pos: Position) -> Result<Board> {
    let status = evaluate(board);
    if status.is_terminal() {
        anyhow::bail!("Cannot play {} on {}: {status}", pos.label(), board.notation());
    }
    board
        .with_move(pos.to_index(), side)
        .with_context(|| format!("Cannot play {} on {}", pos.label(), board.notation()))
}

/// Plain-language reading of a search score.
fn describe_score(score: i32) -> String {
    let plies = |n: i32| if n == 1 { "1 ply".to_string() } else { format!("{n} plies") };
    if score > 0 {
        format!("forced win in {}", plies(WIN_SCORE - score))
    } else if score < 0 {
        format!("forced loss in {}", plies(WIN_SCORE + score))
    } else {
        "draw with best play".to_string()
    }
}

/// Show or reset the tally
#[instrument(skip(path), fields(path = %path.display()))]
fn run_stats(path: PathBuf, reset: bool) -> Result<()> {
    let mut tally = Tally::load(&path)?;
    if reset {
        tally.reset();
        tally.save(&path)?;
        info!("Statistics reset");
    }

    println!("X wins: {}", tally.x_wins());
    println!("O wins: {}", tally.o_wins());
    println!("Draws:  {}", tally.draws());
    println!("Played: {}", tally.total());
    Ok(())
}
