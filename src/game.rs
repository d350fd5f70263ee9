use anyhow::Result;
use rand::Rng;
use tracing::{debug, info};

use crate::apple::Apple;
use crate::clock::ClockContext;
use crate::draw::Drawable;
use crate::grid::{Cell, Grid};
use crate::input::{InputHandler, KeyAction};
use crate::snake::{MoveResult::{self, *}, Snake};
use crate::term::RenderContext;

use crossterm::event::KeyEvent;

/// What happened during one tick.
#[derive(Debug, PartialEq, Eq)]
pub struct TickReport {
    pub movement: MoveResult,
    /// Where the eaten apple was, if the head reached it.
    pub ate_apple: Option<Cell>,
}

pub struct SnakeGame<R: Rng> {
    grid: Grid,
    fps: u32,
    snake: Snake,
    apple: Apple,
    input: InputHandler,
    rng: R,
}

impl<R: Rng> SnakeGame<R> {
    pub fn new(grid: Grid, fps: u32, mut rng: R) -> Self {
        let snake = Snake::new(grid.center());
        let apple = Apple::new(&grid, &mut rng);

        debug!(width = grid.width(), height = grid.height(), apple = ?apple.position(), "new game");
        SnakeGame { grid, fps, snake, apple, input: InputHandler::new(), rng }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> &Apple {
        &self.apple
    }

    /// Feeds key presses to the snake. Returns `false` once quit was requested.
    pub fn handle_keys(&mut self, keys: &[KeyEvent]) -> bool {
        for key in keys {
            match self.input.handle_key_event(*key) {
                KeyAction::Turn(dir) => self.snake.set_pending_direction(dir),
                KeyAction::Quit => return false,
                KeyAction::None => {}
            }
        }
        true
    }

    /// Moves the snake one cell and feeds it if it reached the apple.
    pub fn step(&mut self) -> TickReport {
        self.snake.update_direction();
        let movement = self.snake.advance(&self.grid);

        if let Reset { length } = movement {
            info!(length, "snake ran into itself, starting over");
        }

        let ate_apple = if self.snake.head() == self.apple.position() {
            let eaten = self.apple.position();
            self.snake.grow();
            let next = self.apple.relocate(&self.grid, &mut self.rng);
            debug!(at = ?eaten, next = ?next, length = self.snake.length(), "apple eaten");
            Some(eaten)
        } else {
            None
        };

        TickReport { movement, ate_apple }
    }

    pub fn render(&self, ctx: &mut RenderContext) -> Result<()> {
        ctx.clear_screen();
        self.snake.draw(ctx);
        self.apple.draw(ctx);
        ctx.present_frame()
    }

    /// Runs until the player quits.
    pub fn play(&mut self, ctx: &mut RenderContext, clock: &mut ClockContext) -> Result<()> {
        loop {
            let keys = ctx.poll_input()?;
            if !self.handle_keys(&keys) {
                info!(length = self.snake().length(), apple = ?self.apple().position(), "quit requested");
                return Ok(());
            }

            self.step();
            self.render(ctx)?;

            clock.tick(self.fps);
        }
    }

    #[cfg(test)]
    fn place_apple(&mut self, at: Cell) {
        self.apple = Apple::at(at);
    }
}
