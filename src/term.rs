use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{bail, Context, Result};
use crossterm::{cursor, execute, queue, style::{self, Color, Stylize}, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::{debug, warn};

use crate::config::{BOARD_BACKGROUND_COLOR, BORDER_COLOR, WINDOW_TITLE};
use crate::draw::Rgb;
use crate::grid::{Cell, Grid};

/// Terminal columns per grid cell, so cells come out roughly square.
const CELL_COLUMNS: u16 = 2;

/// Where the board sits inside the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    origin: (u16, u16),
    bordered: bool,
}

impl Layout {
    fn fit(term_size: (u16, u16), grid: &Grid) -> Result<Self> {
        let (term_w, term_h) = term_size;
        let board_w = grid.width() as u32 * CELL_COLUMNS as u32;
        let board_h = grid.height() as u32;
        let (term_w, term_h) = (term_w as u32, term_h as u32);

        if board_w > term_w || board_h > term_h {
            bail!(
                "terminal is {}x{} but the {}x{} grid needs at least {}x{}; \
                 enlarge the terminal or pass a larger --cell-size",
                term_w, term_h, grid.width(), grid.height(), board_w, board_h
            );
        }

        let bordered = board_w + 2 <= term_w && board_h + 2 <= term_h;
        let origin = ((term_w - board_w) / 2, (term_h - board_h) / 2);

        Ok(Layout { origin: (origin.0 as u16, origin.1 as u16), bordered })
    }

    fn screen_pos(&self, cell: Cell) -> (u16, u16) {
        (self.origin.0 + cell.x as u16 * CELL_COLUMNS, self.origin.1 + cell.y as u16)
    }
}

/// One color per grid cell. `None` means "unknown", which forces a repaint.
#[derive(Debug, Clone, PartialEq)]
struct FrameBuffer {
    cells: Vec<Option<Rgb>>,
}

impl FrameBuffer {
    fn new(grid: &Grid) -> Self {
        FrameBuffer { cells: vec![None; grid.cell_count()] }
    }

    fn fill(&mut self, color: Rgb) {
        self.cells.fill(Some(color));
    }

    fn invalidate(&mut self) {
        self.cells.fill(None);
    }

    fn set(&mut self, index: usize, color: Rgb) {
        self.cells[index] = Some(color);
    }

    /// Indices and colors of cells that differ from what `shown` holds.
    fn changes<'a>(&'a self, shown: &'a FrameBuffer) -> impl Iterator<Item = (usize, Rgb)> + 'a {
        self.cells.iter().zip(shown.cells.iter()).enumerate()
            .filter_map(|(i, (new, old))| match new {
                Some(color) if new != old => Some((i, *color)),
                _ => None,
            })
    }
}

/// The drawing surface and input source for the game loop.
pub struct RenderContext {
    stdout: Stdout,
    grid: Grid,
    layout: Layout,
    back: FrameBuffer,
    front: FrameBuffer,
    active: bool,
}

impl RenderContext {
    pub fn new(grid: Grid) -> Result<Self> {
        let size = terminal::size().context("Error reading terminal size")?;
        let layout = Layout::fit(size, &grid)?;

        Ok(RenderContext {
            stdout: stdout(),
            grid,
            layout,
            back: FrameBuffer::new(&grid),
            front: FrameBuffer::new(&grid),
            active: false,
        })
    }

    pub fn setup(&mut self) -> Result<()> {
        self.active = true;
        execute!(self.stdout, EnterAlternateScreen, terminal::SetTitle(WINDOW_TITLE))
            .context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
            .context("Error hiding cursor")?;

        debug!(layout = ?self.layout, "terminal ready");
        self.redraw_all()
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        terminal::disable_raw_mode().context("Error disabling raw mode")?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;

        debug!("terminal restored");
        Ok(())
    }

    pub fn clear_screen(&mut self) {
        self.back.fill(BOARD_BACKGROUND_COLOR);
    }

    pub fn draw_cell(&mut self, pos: Cell, color: Rgb) {
        if self.grid.contains(pos) {
            let index = self.grid.index(pos);
            self.back.set(index, color);
        }
    }

    pub fn present_frame(&mut self) -> Result<()> {
        let width = self.grid.width();

        for (i, color) in self.back.changes(&self.front) {
            let cell = Cell::new(i as i32 % width, i as i32 / width);
            let (x, y) = self.layout.screen_pos(cell);
            queue!(
                self.stdout,
                cursor::MoveTo(x, y),
                style::PrintStyledContent("  ".on(Color::from(color)))
            )?;
        }

        self.front.clone_from(&self.back);
        self.stdout.flush().context("Error flushing frame")
    }

    /// Drains pending key presses without blocking.
    pub fn poll_input(&mut self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while event::poll(Duration::ZERO).context("Error polling input")? {
            match event::read().context("Error reading input")? {
                Event::Key(ev) if ev.kind == KeyEventKind::Press => events.push(ev),
                Event::Resize(w, h) => self.handle_resize((w, h))?,
                _ => {}
            }
        }

        Ok(events)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn handle_resize(&mut self, size: (u16, u16)) -> Result<()> {
        match Layout::fit(size, &self.grid) {
            Ok(layout) => self.layout = layout,
            Err(err) => warn!("keeping previous layout: {err}"),
        }
        self.redraw_all()
    }

    fn redraw_all(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        self.front.invalidate();

        if self.layout.bordered {
            self.draw_border()?;
        }
        Ok(())
    }

    fn draw_border(&mut self) -> Result<()> {
        let (ox, oy) = self.layout.origin;
        let (left, top) = (ox - 1, oy - 1);
        let right = ox + self.grid.width() as u16 * CELL_COLUMNS;
        let bottom = oy + self.grid.height() as u16;
        let color = Color::from(BORDER_COLOR);

        for x in left..=right {
            let ch = if x == left || x == right {'+'} else {'-'};
            queue!(self.stdout, cursor::MoveTo(x, top), style::PrintStyledContent(ch.with(color)))?;
            queue!(self.stdout, cursor::MoveTo(x, bottom), style::PrintStyledContent(ch.with(color)))?;
        }

        for y in oy..bottom {
            queue!(self.stdout, cursor::MoveTo(left, y), style::PrintStyledContent('|'.with(color)))?;
            queue!(self.stdout, cursor::MoveTo(right, y), style::PrintStyledContent('|'.with(color)))?;
        }

        self.stdout.flush().context("Error flushing border")
    }
}

impl Drop for RenderContext {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!("failed to restore terminal: {err:#}");
        }
    }
}
