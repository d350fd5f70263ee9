mod apple;
mod clock;
mod config;
mod draw;
mod game;
mod grid;
mod input;
mod snake;
mod term;

use std::{fs::File, path::{Path, PathBuf}, sync::Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{GameConfig, CELL_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH, SPEED};

#[derive(Parser)]
#[command(name = "classic-snake")]
#[command(version, about = "Classic snake on a wrapping grid")]
struct Cli {
    /// Canvas width in pixels
    #[arg(long, default_value_t = SCREEN_WIDTH)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = SCREEN_HEIGHT)]
    height: u32,

    /// Side of one grid cell in pixels
    #[arg(long, default_value_t = CELL_SIZE)]
    cell_size: u32,

    /// Game ticks per second
    #[arg(long, default_value_t = SPEED)]
    fps: u32,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = GameConfig::new(cli.width, cli.height, cli.cell_size, cli.fps);
    let grid = config.grid().context("Invalid game configuration")?;

    let mut ctx = term::RenderContext::new(grid)?;
    let mut clock = clock::ClockContext::new();
    let mut game = game::SnakeGame::new(grid, config.fps, rand::thread_rng());

    ctx.setup()?;
    // Quitting returns here; the terminal is restored before exiting
    let res = game.play(&mut ctx, &mut clock);
    ctx.restore()?;

    res
}

/// The screen belongs to the game, so stderr logging stays quiet by default.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let (writer, ansi, default_filter) = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), false, "classic_snake=info")
        }
        None => (BoxMakeWriter::new(std::io::stderr), true, "classic_snake=warn"),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(ansi))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    Ok(())
}
