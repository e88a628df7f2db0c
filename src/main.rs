mod config;
mod engine;
mod error;
mod food;
mod game;
mod grid;
mod session;
mod snake;
mod term;

use std::{env, fs::File, path::PathBuf};

use anyhow::Context;
use log::info;
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};

use crate::config::Config;
use crate::game::{Ending, SnakeGame};
use crate::session::Status;

/// `(row, col)`
pub type Coords = (usize, usize);

const LOG_FILE: &str = "snake.log";

fn main() -> anyhow::Result<()> {
    // The screen belongs to the game, so logs go to a file
    WriteLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        File::create(LOG_FILE).context("creating log file")?,
    )
    .context("initializing logger")?;

    info!("Starting snake");

    let config_path = env::args_os().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref()).context("loading config")?;

    let mut game = SnakeGame::new(&config);
    let ending = game.run().context("running game")?;

    // Winning, losing and quitting all exit cleanly
    match ending {
        Ending::Finished { status: Status::Won, score } => println!("You won! Score: {}", score),
        Ending::Finished { score, .. } => println!("Game over! Score: {}", score),
        Ending::Quit { score } => println!("Quit. Score: {}", score),
    }

    info!("Exiting with {:?}", ending);
    Ok(())
}
