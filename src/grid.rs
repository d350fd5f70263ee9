use rand::Rng;

use crate::snake::Direction;

/// A grid cell, as (column, row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

/// The playfield. Movement off one edge comes back in on the opposite one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    pub fn new(width: u16, height: u16) -> Self {
        Grid { width: width as i32, height: height as i32 }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// One step from `cell` towards `direction`, wrapped on both axes.
    pub fn step(&self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        Cell::new(
            (cell.x + dx).rem_euclid(self.width),
            (cell.y + dy).rem_euclid(self.height),
        )
    }

    /// Uniformly random cell anywhere on the grid.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }

    /// Row-major index of an in-bounds cell.
    pub fn index(&self, cell: Cell) -> usize {
        (cell.y * self.width + cell.x) as usize
    }

    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }
}
