use rand::Rng;

use crate::config::APPLE_COLOR;
use crate::draw::{Drawable, Rgb};
use crate::grid::{Cell, Grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Apple {
    position: Cell,
}

impl Apple {
    pub fn new<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Self {
        Apple { position: grid.random_cell(rng) }
    }

    pub fn at(position: Cell) -> Self {
        Apple { position }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    /// Moves the apple to a random cell. The snake's body is not avoided, so
    /// the apple can land underneath it.
    pub fn relocate<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> Cell {
        self.position = grid.random_cell(rng);
        self.position
    }
}

impl Drawable for Apple {
    fn positions(&self) -> Vec<Cell> {
        vec![self.position]
    }

    fn color(&self) -> Rgb {
        APPLE_COLOR
    }
}
