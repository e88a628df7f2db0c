use std::collections::HashSet;

use crate::snake::Snake;
use crate::Coords;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Body,
    Food,
}

/// Fixed-size occupancy map, addressed by `(row, col)`.
///
/// The grid is a derived view: the engine rebuilds it from the snake and the
/// food set after every step, so it never holds anything they don't.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid { rows, cols, cells: vec![Cell::Empty; rows * cols] }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, pos: Coords) -> bool {
        pos.0 < self.rows && pos.1 < self.cols
    }

    /// Out of bounds positions have no cell.
    pub fn get(&self, pos: Coords) -> Option<Cell> {
        if self.in_bounds(pos) {
            Some(self.cells[self.index(pos)])
        } else {
            None
        }
    }

    /// Writes are ignored for out of bounds positions.
    pub fn set(&mut self, pos: Coords, value: Cell) {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.cells[idx] = value;
        }
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = Cell::Empty);
    }

    pub fn count(&self, value: Cell) -> usize {
        self.cells.iter().filter(|c| **c == value).count()
    }

    /// Clears the grid, then stamps body cells, then food cells.
    pub fn rebuild(&mut self, snake: &Snake, food: &HashSet<Coords>) {
        self.clear();
        for pos in snake.body() {
            self.set(*pos, Cell::Body);
        }
        for pos in food {
            self.set(*pos, Cell::Food);
        }
    }

    /// Rows of cells, top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1))
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, pos: Coords) -> usize {
        pos.0 * self.cols + pos.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction;

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.capacity(), 12);
        assert_eq!(grid.count(Cell::Empty), 12);
        assert_eq!(grid.get((2, 3)), Some(Cell::Empty));
    }

    #[test]
    fn bounds_follow_rows_then_cols() {
        let grid = Grid::new(3, 4);
        assert!(grid.in_bounds((2, 3)));
        assert!(!grid.in_bounds((3, 0)));
        assert!(!grid.in_bounds((0, 4)));
        assert_eq!(grid.get((0, 4)), None);
    }

    #[test]
    fn set_get_and_clear() {
        let mut grid = Grid::new(2, 2);
        grid.set((1, 0), Cell::Food);
        grid.set((0, 1), Cell::Body);
        grid.set((5, 5), Cell::Body);
        assert_eq!(grid.get((1, 0)), Some(Cell::Food));
        assert_eq!(grid.get((0, 1)), Some(Cell::Body));
        assert_eq!(grid.count(Cell::Body), 1);

        grid.clear();
        assert_eq!(grid.count(Cell::Empty), 4);
    }

    #[test]
    fn rebuild_stamps_snake_and_food() {
        let mut grid = Grid::new(3, 3);
        grid.set((2, 2), Cell::Body);

        let snake = Snake::new((0, 2), 3, Direction::Right);
        let food: HashSet<Coords> = [(1, 1), (2, 0)].into_iter().collect();
        grid.rebuild(&snake, &food);

        assert_eq!(grid.count(Cell::Body), 3);
        assert_eq!(grid.count(Cell::Food), 2);
        assert_eq!(grid.get((2, 2)), Some(Cell::Empty));
        assert_eq!(grid.get((0, 0)), Some(Cell::Body));
        assert_eq!(grid.get((2, 0)), Some(Cell::Food));
    }

    #[test]
    fn rows_iter_yields_each_row() {
        let mut grid = Grid::new(2, 3);
        grid.set((1, 2), Cell::Food);
        let rows: Vec<&[Cell]> = grid.rows_iter().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], &[Cell::Empty, Cell::Empty, Cell::Food][..]);
    }
}
