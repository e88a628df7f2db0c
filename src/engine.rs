use std::collections::HashSet;

use log::{debug, info};
use rand::Rng;

use crate::error::Result;
use crate::food;
use crate::grid::{Cell, Grid};
use crate::snake::{Direction, Snake};
use crate::Coords;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continued,
    Collided(Collision),
}

/// Everything a step mutates: the snake, the food set, the score and the
/// grid derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    snake: Snake,
    food: HashSet<Coords>,
    score: u32,
}

impl Board {
    /// Food positions that land on the snake or off the grid are dropped.
    pub fn new(rows: usize, cols: usize, snake: Snake, food: impl IntoIterator<Item = Coords>) -> Self {
        let mut grid = Grid::new(rows, cols);
        let food = food
            .into_iter()
            .filter(|pos| grid.in_bounds(*pos) && !snake.contains(pos))
            .collect();
        grid.rebuild(&snake, &food);
        Board { grid, snake, food, score: 0 }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[cfg(test)]
    pub fn food(&self) -> &HashSet<Coords> {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_full(&self) -> bool {
        self.snake.len() == self.grid.capacity()
    }

    /// Adds `count` food items on empty cells.
    pub fn spawn_food<R: Rng>(&mut self, count: usize, rng: &mut R) -> Result<()> {
        let placed = food::spawn(count, &mut self.grid, &self.snake, rng)?;
        self.food.extend(placed);
        Ok(())
    }

    /// Advances the snake one cell in `direction`.
    ///
    /// The collision check runs against the whole pre-move body, the tail
    /// included, even though the tail would vacate its cell this step.
    pub fn step<R: Rng>(&mut self, direction: Direction, rng: &mut R) -> Result<StepOutcome> {
        let head = self.snake.head();

        let new_head = match direction.step(head).filter(|pos| self.grid.in_bounds(*pos)) {
            Some(pos) => pos,
            None => {
                info!("Snake hit the wall moving {:?} from {:?}", direction, head);
                return Ok(StepOutcome::Collided(Collision::Wall));
            }
        };

        if self.snake.contains(&new_head) {
            info!("Snake bit itself at {:?}", new_head);
            return Ok(StepOutcome::Collided(Collision::Body));
        }

        if self.food.remove(&new_head) {
            self.score += 1;
            self.snake.grow();
            debug!("Ate food at {:?}, score {}", new_head, self.score);

            // The grid still shows the eaten cell as food and the whole old
            // body, so its empty cells are exactly the ones free after the move.
            let replenish = self.grid.count(Cell::Empty).min(1);
            self.spawn_food(replenish, rng)?;
        }

        self.snake.advance(new_head);
        self.grid.rebuild(&self.snake, &self.food);

        Ok(StepOutcome::Continued)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn rng() -> ChaCha12Rng {
        ChaCha12Rng::seed_from_u64(RNG_SEED)
    }

    fn body(board: &Board) -> Vec<Coords> {
        board.snake().body().iter().copied().collect()
    }

    fn assert_in_sync(board: &Board) {
        assert_eq!(board.grid().count(Cell::Body), board.snake().len());
        assert_eq!(board.grid().count(Cell::Food), board.food().len());
        for pos in board.snake().body() {
            assert_eq!(board.grid().get(*pos), Some(Cell::Body));
        }
        for pos in board.food() {
            assert_eq!(board.grid().get(*pos), Some(Cell::Food));
        }
    }

    #[test]
    fn eating_grows_scores_and_replenishes() {
        let mut board = Board::new(5, 5, Snake::new((0, 2), 3, Right), [(0, 3)]);
        let outcome = board.step(Right, &mut rng()).unwrap();

        assert_eq!(outcome, StepOutcome::Continued);
        assert_eq!(body(&board), vec![(0, 3), (0, 2), (0, 1), (0, 0)]);
        assert_eq!(board.score(), 1);
        assert_eq!(board.food().len(), 1);
        let new_food = *board.food().iter().next().unwrap();
        assert!(!board.snake().contains(&new_food));
        assert_in_sync(&board);
    }

    #[test]
    fn plain_move_drops_the_tail() {
        let mut board = Board::new(5, 5, Snake::new((0, 2), 3, Right), [(4, 4)]);
        board.step(Down, &mut rng()).unwrap();

        assert_eq!(body(&board), vec![(1, 2), (0, 2), (0, 1)]);
        assert_eq!(board.score(), 0);
        assert_eq!(board.food().iter().copied().collect::<Vec<_>>(), vec![(4, 4)]);
        assert_in_sync(&board);
    }

    #[test]
    fn walls_on_every_side() {
        let cases = [
            (Snake::new((0, 2), 1, Right), Up),
            (Snake::new((2, 0), 1, Right), Left),
            (Snake::new((2, 2), 1, Right), Down),
            (Snake::new((1, 2), 1, Right), Right),
        ];
        for (snake, direction) in cases {
            let mut board = Board::new(3, 3, snake, []);
            let before = board.clone();
            let outcome = board.step(direction, &mut rng()).unwrap();
            assert_eq!(outcome, StepOutcome::Collided(Collision::Wall));
            assert_eq!(board, before);
        }
    }

    #[test]
    fn reversing_into_the_neck_is_fatal() {
        let mut board = Board::new(5, 5, Snake::new((0, 2), 3, Right), []);
        assert_eq!(board.step(Left, &mut rng()).unwrap(), StepOutcome::Collided(Collision::Body));
    }

    #[test]
    fn moving_into_the_current_tail_is_fatal() {
        // A 2x2 loop: the head's next cell is the tail, which would be vacated.
        let snake = Snake::from_body(vec![(1, 0), (1, 1), (0, 1), (0, 0)]);
        let mut board = Board::new(3, 3, snake, []);
        assert_eq!(board.step(Up, &mut rng()).unwrap(), StepOutcome::Collided(Collision::Body));
    }

    #[test]
    fn single_segment_may_reverse() {
        let mut board = Board::new(3, 3, Snake::new((1, 1), 1, Right), []);
        assert_eq!(board.step(Left, &mut rng()).unwrap(), StepOutcome::Continued);
        assert_eq!(body(&board), vec![(1, 0)]);
    }

    #[test]
    fn filling_move_skips_replenishment() {
        let snake = Snake::from_body(vec![(0, 1), (0, 0), (1, 0)]);
        let mut board = Board::new(2, 2, snake, [(1, 1)]);
        board.step(Down, &mut rng()).unwrap();

        assert!(board.is_full());
        assert!(board.food().is_empty());
        assert_eq!(board.score(), 1);
        assert_in_sync(&board);
    }

    #[test]
    fn leftover_food_survives_a_crowded_grid() {
        // 1x6: snake of 3, three food items, no empty cell to refill into.
        let mut board = Board::new(1, 6, Snake::new((0, 2), 3, Right), [(0, 3), (0, 4), (0, 5)]);
        let mut rng = rng();

        assert_eq!(board.step(Right, &mut rng).unwrap(), StepOutcome::Continued);
        assert_eq!(board.food().len(), 2);
        assert_eq!(board.step(Right, &mut rng).unwrap(), StepOutcome::Continued);
        assert_eq!(board.step(Right, &mut rng).unwrap(), StepOutcome::Continued);
        assert!(board.is_full());
        assert_eq!(board.score(), 3);
        assert_in_sync(&board);
    }

    #[test]
    fn grid_tracks_entities_through_a_long_run() {
        let mut rng = rng();
        let mut board = Board::new(8, 8, Snake::new((0, 2), 3, Right), []);
        board.spawn_food(3, &mut rng).unwrap();

        let directions = [Right, Down, Left, Down];
        let mut steps = 0;
        'outer: for _ in 0..40 {
            for direction in directions {
                for _ in 0..rng.gen_range(1..4) {
                    let food_before = board.food().len();
                    match board.step(direction, &mut rng).unwrap() {
                        StepOutcome::Continued => steps += 1,
                        StepOutcome::Collided(_) => break 'outer,
                    }
                    assert_in_sync(&board);
                    assert_eq!(board.food().len(), food_before);
                    let unique: HashSet<_> = board.snake().body().iter().collect();
                    assert_eq!(unique.len(), board.snake().len());
                }
            }
        }
        assert!(steps > 0);
    }
}
