use log::info;
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::config::Config;
use crate::engine::{Board, StepOutcome};
use crate::error::Result;
use crate::grid::Grid;
use crate::snake::{Direction, Snake, INITIAL_SNAKE_LENGTH};

pub const INITIAL_FOOD_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

impl Status {
    pub fn is_over(self) -> bool {
        self != Status::Playing
    }
}

/// What a renderer needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub score: u32,
    pub status: Status,
}

/// One game, from the first tick until it is won or lost.
#[derive(Debug)]
pub struct Session<R = ThreadRng> {
    board: Board,
    direction: Direction,
    status: Status,
    rng: R,
}

impl Session<ThreadRng> {
    pub fn new(config: &Config) -> Result<Self> {
        Session::new_with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> Session<R> {
    /// Starts the classic layout: a three segment snake in the top left
    /// corner heading right, and an initial batch of food.
    pub fn new_with_rng(config: &Config, mut rng: R) -> Result<Self> {
        let snake = Snake::new((0, INITIAL_SNAKE_LENGTH - 1), INITIAL_SNAKE_LENGTH, Direction::Right);
        let mut board = Board::new(config.rows(), config.cols(), snake, []);
        board.spawn_food(INITIAL_FOOD_COUNT, &mut rng)?;

        info!("New session on a {}x{} grid", config.rows(), config.cols());
        Ok(Session::from_board(board, Direction::Right, rng))
    }

    pub fn from_board(board: Board, direction: Direction, rng: R) -> Self {
        Session { board, direction, status: Status::Playing, rng }
    }

    /// Sets the direction used by the next tick. Reversals are allowed; the
    /// collision rules decide what they cost.
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.status.is_over() {
            self.direction = direction;
        }
    }

    /// Applies the latest intent, if any, and advances one step. Does nothing
    /// once the game is over.
    pub fn tick(&mut self, intent: Option<Direction>) -> Result<Status> {
        if self.status.is_over() {
            return Ok(self.status);
        }
        if let Some(direction) = intent {
            self.set_direction(direction);
        }

        self.status = match self.board.step(self.direction, &mut self.rng)? {
            StepOutcome::Collided(collision) => {
                info!("Lost to {:?} collision with score {}", collision, self.board.score());
                Status::Lost
            }
            StepOutcome::Continued if self.board.is_full() => {
                info!("Won with score {}", self.board.score());
                Status::Won
            }
            StepOutcome::Continued => Status::Playing,
        };

        Ok(self.status)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot { grid: self.board.grid(), score: self.board.score(), status: self.status }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.board.score()
    }

    #[cfg(test)]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub fn board(&self) -> &Board {
        &self.board
    }
}
