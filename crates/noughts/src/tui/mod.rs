//! Terminal UI for noughts.

mod app;
mod input;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    style::Print,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use crate::config::Preferences;
use crate::stats::Tally;
use app::App;

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the TUI until the player quits.
pub async fn run_tui(
    prefs: Preferences,
    prefs_path: PathBuf,
    tally: Tally,
    stats_path: PathBuf,
) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    let log_file = std::fs::File::create("noughts.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized

    info!(mode = %prefs.mode(), human_side = %prefs.human_side(), "Starting Noughts TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(prefs, prefs_path, tally, stats_path);
    let res = run_game(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("Noughts TUI stopped");

    res
}

/// Draw, then either let the engine reply or wait for a key.
#[instrument(skip_all)]
async fn run_game(terminal: &mut Term, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit() {
            return Ok(());
        }

        if app.engine_due() {
            tokio::time::sleep(app.engine_delay()).await;
            app.play_engine()?;
            ring_if_due(terminal, app)?;
            continue;
        }

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            debug!(key = ?key.code, "Key pressed");
            if let Some(action) = input::action_for(key) {
                app.handle(action);
                ring_if_due(terminal, app)?;
            }
        }
    }
}

/// Writes a terminal bell when the last action asked for one.
fn ring_if_due(terminal: &mut Term, app: &mut App) -> Result<()> {
    if app.take_bell() {
        execute!(terminal.backend_mut(), Print('\u{7}'))?;
    }
    Ok(())
}
