//! Stateless UI rendering for the match screen.

use noughts_core::{Player, Position, Square};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::app::App;
use crate::config::Theme;

const KEY_HELP: &str = "arrows/1-9 move  enter place  u undo  n new  m mode  x/o side  \
     h hint  t theme  s sound  r reset tally  q quit";

/// Colours for one theme.
#[derive(Debug, Clone, Copy)]
struct Palette {
    background: Color,
    text: Color,
    dim: Color,
    title: Color,
    status: Color,
    x: Color,
    o: Color,
    hint: Color,
    highlight: Color,
    cursor: Color,
    cursor_text: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Reset,
                text: Color::White,
                dim: Color::DarkGray,
                title: Color::Cyan,
                status: Color::Yellow,
                x: Color::LightBlue,
                o: Color::LightRed,
                hint: Color::Green,
                highlight: Color::Green,
                cursor: Color::White,
                cursor_text: Color::Black,
            },
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                dim: Color::Gray,
                title: Color::Blue,
                status: Color::Magenta,
                x: Color::Blue,
                o: Color::Red,
                hint: Color::Green,
                highlight: Color::LightGreen,
                cursor: Color::DarkGray,
                cursor_text: Color::White,
            },
        }
    }
}

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let palette = Palette::for_theme(app.theme());

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(3), // Tally
            Constraint::Length(1), // Keys
        ])
        .split(area);

    let config = app.session().config();
    let title = Paragraph::new(format!(
        "Noughts - {} (you: {}){}",
        config.mode.label(),
        app.human_side(),
        if *app.prefs().sound() { "" } else { " [muted]" }
    ))
    .style(Style::default().fg(palette.title).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], app, &palette);

    let status = if app.message().is_empty() {
        app.status_line()
    } else {
        format!("{}  {}", app.status_line(), app.message())
    };
    let status_text = Paragraph::new(status)
        .style(Style::default().fg(palette.status))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_text, chunks[2]);

    let tally = app.tally();
    let tally_text = Paragraph::new(format!(
        "X wins: {}   O wins: {}   Draws: {}",
        tally.x_wins(),
        tally.o_wins(),
        tally.draws()
    ))
    .alignment(Alignment::Center)
    .block(Block::default().title("Tally").borders(Borders::ALL));
    frame.render_widget(tally_text, chunks[3]);

    let keys = Paragraph::new(KEY_HELP)
        .style(Style::default().fg(palette.dim))
        .alignment(Alignment::Center);
    frame.render_widget(keys, chunks[4]);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (row, positions) in Position::ALL.chunks(3).enumerate() {
        draw_row(frame, rows[row * 2], app, palette, positions);
        if row < 2 {
            draw_separator(frame, rows[row * 2 + 1], palette);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, app: &App, palette: &Palette, positions: &[Position]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for (col, pos) in positions.iter().enumerate() {
        draw_cell(frame, cols[col * 2], app, palette, *pos);
        if col < 2 {
            draw_separator_vertical(frame, cols[col * 2 + 1], palette);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, app: &App, palette: &Palette, pos: Position) {
    let game = app.session().game();
    let index = pos.to_index();
    let winning = game
        .status()
        .line()
        .is_some_and(|line| line.contains(&index));

    let (symbol, mut style) = match game.board().get(index) {
        Some(Square::Occupied(Player::X)) => (
            " X ",
            Style::default().fg(palette.x).add_modifier(Modifier::BOLD),
        ),
        Some(Square::Occupied(Player::O)) => (
            " O ",
            Style::default().fg(palette.o).add_modifier(Modifier::BOLD),
        ),
        _ if app.hint() == Some(index) => (" * ", Style::default().fg(palette.hint)),
        _ => ("   ", Style::default().fg(palette.dim)),
    };

    if winning {
        style = style.bg(palette.highlight).fg(Color::Black);
    }
    if pos == app.cursor() {
        style = style.bg(palette.cursor).fg(palette.cursor_text);
    }

    let paragraph =
        Paragraph::new(Line::from(Span::styled(symbol, style))).alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect, palette: &Palette) {
    let sep = Paragraph::new("─────────────────────────────────────────")
        .style(Style::default().fg(palette.dim));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect, palette: &Palette) {
    let sep = Paragraph::new("│").style(Style::default().fg(palette.dim));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
