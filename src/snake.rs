use std::collections::VecDeque;

use crate::Coords;
use Direction::*;

pub const INITIAL_SNAKE_LENGTH: usize = 3;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// The cell one step away from `pos`, or `None` when that would leave the
    /// non-negative quadrant. The upper bounds are the grid's business.
    pub fn step(self, pos: Coords) -> Option<Coords> {
        let (row, col) = pos;
        match self {
            Up => Some((row.checked_sub(1)?, col)),
            Down => Some((row.checked_add(1)?, col)),
            Left => Some((row, col.checked_sub(1)?)),
            Right => Some((row, col.checked_add(1)?)),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Coords>, // head first
    grow_next_move: bool,
}

impl Snake {
    /// Lays out `size` segments behind `head`, trailing away from `direction`.
    /// Segments that would fall off the top or left edge are dropped.
    pub fn new(head: Coords, size: usize, direction: Direction) -> Self {
        let back = direction.opposite();
        let body = std::iter::successors(Some(head), |pos| back.step(*pos))
            .take(size.max(1))
            .collect();
        Snake { body, grow_next_move: false }
    }

    /// Builds a snake from explicit segments, head first.
    #[cfg(test)]
    pub fn from_body(body: impl IntoIterator<Item = Coords>) -> Self {
        let body: VecDeque<Coords> = body.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Snake { body, grow_next_move: false }
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, pos: &Coords) -> bool {
        self.body.contains(pos)
    }

    /// Moves the head to `new_head`. The tail follows unless a growth is
    /// pending, in which case it stays put and the flag is consumed.
    pub fn advance(&mut self, new_head: Coords) {
        self.body.push_front(new_head);

        if self.grow_next_move {
            self.grow_next_move = false;
        } else {
            self.body.pop_back();
        }
    }

    pub fn grow(&mut self) {
        self.grow_next_move = true;
    }
}
