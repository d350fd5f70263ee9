use crossterm::style::Color;

use crate::grid::Cell;
use crate::term::RenderContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::Rgb { r, g, b }
    }
}

/// Anything that occupies cells on the board and paints them in one color.
pub trait Drawable {
    fn positions(&self) -> Vec<Cell>;

    fn color(&self) -> Rgb;

    fn draw(&self, ctx: &mut RenderContext) {
        let color = self.color();
        for pos in self.positions() {
            ctx.draw_cell(pos, color);
        }
    }
}
