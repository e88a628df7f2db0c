use std::{thread::sleep, time::{Duration, Instant}};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;

use crate::config::Config;
use crate::error::Result;
use crate::session::{Session, Status};
use crate::snake::Direction::{self, *};
use crate::term::{Palette, TermManager};

const POLL_INTERVAL_MS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
}

impl Command {
    pub fn from_key_event(ev: &KeyEvent) -> Option<Command> {
        if ev.kind == KeyEventKind::Release {
            return None;
        }
        if is_ctrl_c(ev) {
            return Some(Command::Quit);
        }

        match ev.code {
            KeyCode::Char('w') | KeyCode::Up => Some(Command::Turn(Up)),
            KeyCode::Char('a') | KeyCode::Left => Some(Command::Turn(Left)),
            KeyCode::Char('s') | KeyCode::Down => Some(Command::Turn(Down)),
            KeyCode::Char('d') | KeyCode::Right => Some(Command::Turn(Right)),
            KeyCode::Esc | KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Finished { status: Status, score: u32 },
    Quit { score: u32 },
}

pub struct SnakeGame<'a> {
    config: &'a Config,
    term: TermManager,
}

impl<'a> SnakeGame<'a> {
    pub fn new(config: &'a Config) -> Self {
        let term = TermManager::new(Palette::new(config.background(), config.player()));
        SnakeGame { config, term }
    }

    /// Takes over the terminal, plays one session and hands the terminal
    /// back, whatever happened in between.
    pub fn run(&mut self) -> Result<Ending> {
        self.term.setup()?;
        let res = self.play();
        self.term.restore()?;
        res
    }

    fn play(&mut self) -> Result<Ending> {
        let mut session = Session::new(self.config)?;
        let mut intent: Option<Direction> = None;
        let mut last_tick = Instant::now();

        self.term.draw(&session.snapshot())?;

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for key_ev in self.term.read_key_events_queue()? {
                match Command::from_key_event(&key_ev) {
                    Some(Command::Turn(dir)) => intent = Some(dir),
                    Some(Command::Quit) => {
                        info!("Player quit with score {}", session.score());
                        return Ok(Ending::Quit { score: session.score() });
                    }
                    None => {}
                }
            }

            if last_tick.elapsed() < self.config.tick_interval() {
                continue;
            }
            last_tick = Instant::now();

            session.tick(intent.take())?;
            self.term.draw(&session.snapshot())?;

            let status = session.status();
            if status.is_over() {
                // Leave the end screen up until a key is pressed
                self.term.read_key_press_blocking()?;
                return Ok(Ending::Finished { status, score: session.score() });
            }
        }
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
