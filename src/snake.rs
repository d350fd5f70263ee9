use std::collections::VecDeque;

use crate::config::SNAKE_COLOR;
use crate::draw::{Drawable, Rgb};
use crate::grid::{Cell, Grid};
use Direction::*;
use MoveResult::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Cell, old_tail: Option<Cell> },
    /// The new head landed on the body; the snake started over.
    Reset { length: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Head first.
    positions: VecDeque<Cell>,
    length: usize,
    direction: Direction,
    next_direction: Option<Direction>,
    start: Cell,
}

impl Snake {
    pub fn new(start: Cell) -> Self {
        Snake {
            positions: VecDeque::from([start]),
            length: 1,
            direction: Right,
            next_direction: None,
            start,
        }
    }

    pub fn head(&self) -> Cell {
        self.positions[0]
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Target body size; the body catches up one cell per move.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.next_direction
    }

    /// Queues a turn for the next move. Reversals are ignored.
    pub fn set_pending_direction(&mut self, new_direction: Direction) {
        if !self.direction.is_opposite(new_direction) {
            self.next_direction = Some(new_direction);
        }
    }

    pub fn update_direction(&mut self) {
        if let Some(dir) = self.next_direction.take() {
            self.direction = dir;
        }
    }

    pub fn advance(&mut self, grid: &Grid) -> MoveResult {
        self.update_direction();

        let new_head = grid.step(self.head(), self.direction);

        // Skip the head and the neck
        if self.positions.iter().skip(2).any(|&pos| pos == new_head) {
            let length = self.length;
            self.reset();
            return Reset { length };
        }

        self.positions.push_front(new_head);

        let old_tail = if self.positions.len() > self.length {
            self.positions.pop_back()
        } else {
            None
        };

        Moved { new_head, old_tail }
    }

    pub fn grow(&mut self) {
        self.length += 1;
    }

    pub fn reset(&mut self) {
        *self = Snake::new(self.start);
    }
}

impl Drawable for Snake {
    fn positions(&self) -> Vec<Cell> {
        self.positions.iter().copied().collect()
    }

    fn color(&self) -> Rgb {
        SNAKE_COLOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(32, 24)
    }

    fn snake_of_length(grid: &Grid, length: usize) -> Snake {
        let mut snake = Snake::new(grid.center());
        for _ in 1..length {
            snake.grow();
        }
        for _ in 1..length {
            snake.advance(grid);
        }
        snake
    }

    #[test]
    fn test_new_snake() {
        let snake = Snake::new(Cell::new(16, 12));

        assert_eq!(snake.head(), Cell::new(16, 12));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.length(), 1);
        assert_eq!(snake.direction(), Right);
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn test_opposite_directions() {
        assert!(Up.is_opposite(Down));
        assert!(Down.is_opposite(Up));
        assert!(Left.is_opposite(Right));
        assert!(Right.is_opposite(Left));

        assert!(!Up.is_opposite(Left));
        assert!(!Right.is_opposite(Right));
    }

    #[test]
    fn test_reversal_rejected() {
        let grid = grid();
        let mut snake = Snake::new(grid.center());

        snake.set_pending_direction(Left);
        assert_eq!(snake.pending_direction(), None);

        snake.advance(&grid);
        assert_eq!(snake.direction(), Right);
        assert_eq!(snake.head(), Cell::new(17, 12));
    }

    #[test]
    fn test_reversal_checked_against_current_direction() {
        let mut snake = Snake::new(grid().center());

        snake.set_pending_direction(Up);
        snake.set_pending_direction(Down);
        assert_eq!(snake.pending_direction(), Some(Down));

        snake.update_direction();
        assert_eq!(snake.direction(), Down);
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn test_turn_is_committed_on_advance() {
        let grid = grid();
        let mut snake = Snake::new(grid.center());

        snake.set_pending_direction(Up);
        assert_eq!(snake.direction(), Right);

        snake.advance(&grid);
        assert_eq!(snake.direction(), Up);
        assert_eq!(snake.head(), Cell::new(16, 11));
    }

    #[test]
    fn test_wraps_at_right_edge() {
        let grid = grid();
        let mut snake = Snake::new(Cell::new(31, 5));

        let res = snake.advance(&grid);

        assert_eq!(res, Moved { new_head: Cell::new(0, 5), old_tail: Some(Cell::new(31, 5)) });
        assert_eq!(snake.head(), Cell::new(0, 5));
    }

    #[test]
    fn test_growth_applies_on_next_advance() {
        let grid = grid();
        let mut snake = Snake::new(grid.center());

        snake.grow();
        assert_eq!(snake.length(), 2);
        assert_eq!(snake.len(), 1);

        let res = snake.advance(&grid);
        assert_eq!(res, Moved { new_head: Cell::new(17, 12), old_tail: None });
        assert_eq!(snake.len(), 2);

        snake.advance(&grid);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.positions(), vec![Cell::new(18, 12), Cell::new(17, 12)]);
    }

    #[test]
    fn test_self_collision_resets() {
        let grid = grid();
        let mut snake = snake_of_length(&grid, 4);
        snake.advance(&grid);
        assert_eq!(
            snake.positions(),
            vec![Cell::new(20, 12), Cell::new(19, 12), Cell::new(18, 12), Cell::new(17, 12)]
        );

        snake.set_pending_direction(Down);
        snake.advance(&grid);
        snake.set_pending_direction(Left);
        snake.advance(&grid);
        snake.set_pending_direction(Up);
        let res = snake.advance(&grid);

        assert_eq!(res, Reset { length: 4 });
        assert_eq!(snake, Snake::new(grid.center()));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Cell::new(16, 12));
        assert_eq!(snake.direction(), Right);
    }

    #[test]
    fn test_turning_does_not_hit_neck() {
        let grid = grid();
        let mut snake = snake_of_length(&grid, 3);

        for dir in [Down, Left, Up, Right, Down] {
            snake.set_pending_direction(dir);
            assert!(matches!(snake.advance(&grid), Moved { .. }));
        }
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_short_snake_never_collides() {
        let grid = Grid::new(2, 2);
        let mut snake = snake_of_length(&grid, 2);

        for dir in [Down, Left, Up, Right, Down, Left] {
            snake.set_pending_direction(dir);
            assert!(matches!(snake.advance(&grid), Moved { .. }));
        }
    }

    #[test]
    fn test_body_never_exceeds_length() {
        let grid = Grid::new(6, 5);
        let mut snake = Snake::new(grid.center());
        let turns = [Down, Left, Up, Left, Down, Right];

        for i in 0..300 {
            if i % 3 == 0 {
                snake.grow();
            }
            if i % 4 == 0 {
                snake.set_pending_direction(turns[i % turns.len()]);
            }
            snake.advance(&grid);
            assert!(snake.len() <= snake.length());
        }
    }

    #[test]
    fn test_moves_one_cell_per_tick_without_input() {
        let grid = grid();
        let mut snake = Snake::new(Cell::new(0, 3));

        for i in 1..=100 {
            snake.advance(&grid);
            assert_eq!(snake.head(), Cell::new(i % 32, 3));
            assert_eq!(snake.direction(), Right);
        }
    }
}
