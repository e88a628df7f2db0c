use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnakeError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The food spawner was asked for more items than there are empty cells.
    #[error("no empty cell left to place food")]
    NoSpaceAvailable,

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SnakeError>;
