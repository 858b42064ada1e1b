mod story;
mod terminal;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::util::SubscriberInitExt;
use vn_engine::{Config, Engine};

use crate::terminal::TerminalConsole;

#[derive(Parser)]
#[command(name = "vnplay")]
#[command(version, about = "Play a vn-engine scene in the terminal", long_about = None)]
struct Cli {
    /// Frames per second of the emulated display
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Frames a key press counts as held (terminals don't report releases)
    #[arg(long, default_value_t = 6)]
    hold_frames: u16,

    /// Write logs to this file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Maximum log level
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

fn setup_logging(cli: &Cli) -> Result<()> {
    // the terminal belongs to the scene, so logs only go to a file
    let Some(path) = &cli.log else {
        return Ok(());
    };

    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(file))
        .finish()
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli)?;

    let terminal = ratatui::init();
    let console = TerminalConsole::new(terminal, cli.fps, cli.hold_frames);
    let mut vn = Engine::init(console, Config::default());

    let result = story::run(&mut vn).context("scene failed");
    ratatui::restore();

    info!("played {} frames", vn.platform().frames());
    result
}
