use log::debug;
use rand::Rng;

use crate::error::{Result, SnakeError};
use crate::grid::{Cell, Grid};
use crate::snake::Snake;
use crate::Coords;

/// Places `count` food items on empty cells picked uniformly at random.
///
/// Sampling retries until it hits an empty cell, so it only terminates if
/// enough empty cells exist; that is checked up front and reported as
/// `NoSpaceAvailable`. Accepted cells are stamped onto `grid` right away so a
/// batch never places two items on the same cell.
pub fn spawn<R: Rng>(count: usize, grid: &mut Grid, snake: &Snake, rng: &mut R) -> Result<Vec<Coords>> {
    let free = grid.count(Cell::Empty);
    if count > free {
        return Err(SnakeError::NoSpaceAvailable);
    }

    let mut placed = Vec::with_capacity(count);
    while placed.len() < count {
        let pos = (rng.gen_range(0..grid.rows()), rng.gen_range(0..grid.cols()));
        if grid.get(pos) == Some(Cell::Empty) && !snake.contains(&pos) {
            grid.set(pos, Cell::Food);
            placed.push(pos);
        }
    }

    debug!("Spawned food at {:?}", placed);
    Ok(placed)
}
