use std::{io::{self, Stdout, Write, stdout}, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, KeyEventKind, read, poll};

use crate::config::Color;
use crate::grid::Cell;
use crate::session::{Snapshot, Status};

const APPLE: &str = "🍎";
const STAR: &str = "⭐";

/// How cells look on screen. Domain colors only become glyphs here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    background: &'static str,
    player: &'static str,
}

impl Palette {
    pub fn new(background: Color, player: Color) -> Self {
        Palette { background: swatch(background), player: swatch(player) }
    }
}

pub fn swatch(color: Color) -> &'static str {
    match color {
        Color::Red => "🟥",
        Color::Orange => "🟧",
        Color::Yellow => "🟨",
        Color::Green => "🟩",
        Color::Blue => "🟦",
        Color::Purple => "🟪",
        Color::Brown => "🟫",
        Color::White => "⬜",
        Color::Black => "⬛",
    }
}

/// Lays out one frame as text lines, one per grid row, with the two side
/// labels next to the middle rows.
pub fn render_rows(snapshot: &Snapshot, palette: &Palette) -> Vec<String> {
    let labels = match snapshot.status {
        Status::Playing => ["SCORE:".to_string(), snapshot.score.to_string()],
        Status::Won => ["CONGRATULATIONS!".to_string(), "You have beat the game".to_string()],
        Status::Lost => ["GAME OVER:".to_string(), format!("Your score: {}", snapshot.score)],
    };

    let paint = |cell: Cell| -> &'static str {
        match (snapshot.status, cell) {
            (Status::Playing, Cell::Body) => palette.player,
            (Status::Playing, Cell::Food) => APPLE,
            (Status::Playing, Cell::Empty) => palette.background,
            (Status::Won, Cell::Body) => STAR,
            (Status::Won, _) => swatch(Color::Yellow),
            (Status::Lost, Cell::Body) => swatch(Color::Black),
            (Status::Lost, _) => swatch(Color::Red),
        }
    };

    let second_label_row = snapshot.grid.rows() / 2;
    let first_label_row = second_label_row.checked_sub(1);

    snapshot.grid.rows_iter().enumerate()
        .map(|(i, row)| {
            let mut line: String = row.iter().map(|cell| paint(*cell)).collect();
            if Some(i) == first_label_row {
                line.push_str("    ");
                line.push_str(&labels[0]);
            } else if i == second_label_row {
                if first_label_row.is_none() {
                    line.push_str("    ");
                    line.push_str(&labels[0]);
                }
                line.push_str("    ");
                line.push_str(&labels[1]);
            }
            line
        })
        .collect()
}

pub fn is_key_press(ev: &KeyEvent) -> bool {
    ev.kind == KeyEventKind::Press
}

pub struct TermManager {
    stdout: Stdout,
    palette: Palette,
}

impl TermManager {
    pub fn new(palette: Palette) -> Self {
        TermManager { stdout: stdout(), palette }
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    /// Waits for a fresh key press. Events already queued, releases and
    /// auto-repeats of a held key don't count.
    pub fn read_key_press_blocking(&self) -> io::Result<KeyEvent> {
        self.read_key_events_queue()?;
        loop {
            if let Event::Key(ev) = read()? {
                if is_key_press(&ev) {
                    return Ok(ev);
                }
            }
        }
    }

    /// Drains whatever key events are pending without waiting for more.
    pub fn read_key_events_queue(&self) -> io::Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }

        Ok(events)
    }

    pub fn draw(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))?;
        for (y, line) in render_rows(snapshot, &self.palette).iter().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, y as u16), style::Print(line))?;
        }
        self.stdout.flush()
    }
}
