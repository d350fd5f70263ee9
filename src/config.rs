use thiserror::Error;

use crate::draw::Rgb;
use crate::grid::Grid;

pub const SCREEN_WIDTH: u32 = 640;
pub const SCREEN_HEIGHT: u32 = 480;
pub const CELL_SIZE: u32 = 20;
pub const SPEED: u32 = 20;

pub const BOARD_BACKGROUND_COLOR: Rgb = Rgb(0, 0, 0);
pub const BORDER_COLOR: Rgb = Rgb(93, 216, 228);
pub const APPLE_COLOR: Rgb = Rgb(255, 0, 0);
pub const SNAKE_COLOR: Rgb = Rgb(0, 255, 0);

pub const WINDOW_TITLE: &str = "Snake Game";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cell size must be greater than zero")]
    ZeroCellSize,
    #[error("{axis} of {canvas} is not a positive multiple of the cell size {cell_size}")]
    NotCellAligned { axis: &'static str, canvas: u32, cell_size: u32 },
    #[error("grid of {width}x{height} cells is too large")]
    GridTooLarge { width: u32, height: u32 },
    #[error("frame rate must be greater than zero")]
    ZeroFps,
}

/// Canvas and timing settings. Sizes are in pixels, as a windowed build
/// would see them; the grid is the canvas divided into square cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub cell_size: u32,
    pub fps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            canvas_width: SCREEN_WIDTH,
            canvas_height: SCREEN_HEIGHT,
            cell_size: CELL_SIZE,
            fps: SPEED,
        }
    }
}

impl GameConfig {
    pub fn new(canvas_width: u32, canvas_height: u32, cell_size: u32, fps: u32) -> Self {
        GameConfig { canvas_width, canvas_height, cell_size, fps }
    }

    pub fn grid(&self) -> Result<Grid, ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }

        let width = cells_along("width", self.canvas_width, self.cell_size)?;
        let height = cells_along("height", self.canvas_height, self.cell_size)?;

        match (u16::try_from(width), u16::try_from(height)) {
            (Ok(w), Ok(h)) => Ok(Grid::new(w, h)),
            _ => Err(ConfigError::GridTooLarge { width, height }),
        }
    }
}

fn cells_along(axis: &'static str, canvas: u32, cell_size: u32) -> Result<u32, ConfigError> {
    if canvas == 0 || canvas % cell_size != 0 {
        return Err(ConfigError::NotCellAligned { axis, canvas, cell_size });
    }
    Ok(canvas / cell_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let grid = GameConfig::default().grid().unwrap();
        assert_eq!(grid.width(), 32);
        assert_eq!(grid.height(), 24);
        assert_eq!(GameConfig::default().fps, 20);
    }

    #[test]
    fn test_custom_grid() {
        let grid = GameConfig::new(200, 100, 10, 5).grid().unwrap();
        assert_eq!((grid.width(), grid.height()), (20, 10));
    }

    #[test]
    fn test_invalid_configs() {
        assert_eq!(GameConfig::new(640, 480, 0, 20).grid(), Err(ConfigError::ZeroCellSize));
        assert_eq!(GameConfig::new(640, 480, 20, 0).grid(), Err(ConfigError::ZeroFps));
        assert_eq!(
            GameConfig::new(650, 480, 20, 20).grid(),
            Err(ConfigError::NotCellAligned { axis: "width", canvas: 650, cell_size: 20 })
        );
        assert_eq!(
            GameConfig::new(640, 0, 20, 20).grid(),
            Err(ConfigError::NotCellAligned { axis: "height", canvas: 0, cell_size: 20 })
        );
        assert_eq!(
            GameConfig::new(70_000, 1, 1, 20).grid(),
            Err(ConfigError::GridTooLarge { width: 70_000, height: 1 })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = GameConfig::new(650, 480, 20, 20).grid().unwrap_err();
        assert_eq!(err.to_string(), "width of 650 is not a positive multiple of the cell size 20");
    }
}
