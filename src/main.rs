//! KidType Challenge - phase-based sentence typing game
//!
//! Pick a learning phase, type its sentences one by one, collect points.
//! Runs in the terminal; logs go to a file so the screen stays clean.

mod catalog;
mod cli;
mod game;

use anyhow::Context;
use catalog::JsonFileProvider;
use clap::Parser;
use cli::{App, Display, InputHandler};
use game::{GameConfig, GameController, GameStatus};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "KidType Challenge")]
#[command(about = "Type curated sentences phase by phase")]
struct Args {
    /// Path to the phase catalog (JSON)
    #[arg(short, long, default_value = catalog::provider::DEFAULT_CATALOG_PATH)]
    phases: PathBuf,

    /// Pause after a correct sentence before the next one (ms)
    #[arg(long, default_value = "1000")]
    advance_delay_ms: u64,

    /// How long feedback messages stay on screen (ms)
    #[arg(long, default_value = "1500")]
    feedback_ms: u64,

    /// Wait for an explicit start after selecting a phase
    #[arg(long)]
    no_auto_start: bool,

    /// Seed for a reproducible sentence order
    #[arg(long)]
    seed: Option<u64>,

    /// Log file
    #[arg(long, default_value = "kidtype.log")]
    log_file: PathBuf,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            advance_delay: Duration::from_millis(self.advance_delay_ms),
            feedback_duration: Duration::from_millis(self.feedback_ms),
            auto_start: !self.no_auto_start,
        }
    }
}

fn init_tracing(log_file: &Path) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match OpenOptions::new().create(true).append(true).open(log_file) {
        Ok(file) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
            tracing::info!(path = %log_file.display(), "logging initialized");
        }
        // Never write logs over the game screen
        Err(_) => tracing_subscriber::registry().with(env_filter).init(),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_file);

    let config = args.game_config();
    let controller = match args.seed {
        Some(seed) => GameController::seeded(config, seed),
        None => GameController::new(config),
    };
    let provider = JsonFileProvider::new(&args.phases);
    tracing::info!(catalog = %provider.path().display(), "starting");
    let mut app = App::new(Box::new(provider), controller);

    InputHandler::enable_raw_mode().context("failed to enable raw mode")?;
    let display = Display::alternate().context("failed to prepare terminal")?;
    let input = InputHandler::new();

    let result = app.run(&display, &input);

    display.shutdown().context("failed to restore terminal")?;
    result.context("terminal I/O failed")?;

    let state = app.state();
    if state.status() == GameStatus::GameOver {
        println!("🎉 Final score: {}", state.score());
    }
    println!("Thanks for practicing!");

    Ok(())
}
