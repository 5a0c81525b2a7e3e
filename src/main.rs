use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use effect_snake::config::GameConfig;
use effect_snake::error::{ConfigError, GameError};
use effect_snake::game::GameState;
use effect_snake::input::{GameInput, InputHandler};
use effect_snake::logger;
use effect_snake::screen::ScreenState;
use effect_snake::terminal_runtime::{restore_terminal, TerminalSession};
use effect_snake::view::RenderPayload;
use thiserror::Error;

/// Upper bound on how long one input poll may block.
const FRAME_POLL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON file overriding tick and food timings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,

    /// Write a debug log to the platform cache directory.
    #[arg(long)]
    log: bool,

    /// Write a debug log to this file instead.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("simulation aborted: {0}")]
    Game(#[from] GameError),
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    match (&cli.log_file, cli.log) {
        (Some(path), _) => logger::init(path)?,
        (None, true) => logger::init(&logger::default_log_path())?,
        (None, false) => {}
    }

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(config, seed),
        None => GameState::new(config),
    };

    install_panic_hook();
    let result = run(state);
    if let Err(error) = &result {
        log::error!("{error}");
    }
    result
}

fn run(mut state: GameState) -> Result<(), AppError> {
    let mut session = TerminalSession::enter()?;
    let mut input = InputHandler::new();
    let started = Instant::now();
    let mut last_tick = Instant::now();

    loop {
        let board = session.draw(&RenderPayload::capture(&state))?;
        input.set_board_area(board);

        let playing = state.screen() == ScreenState::Playing;
        let wait = state
            .tick_interval()
            .saturating_sub(last_tick.elapsed())
            .min(FRAME_POLL);
        if let Some(game_input) = input.poll_input(wait, playing)? {
            if game_input == GameInput::Quit {
                log::info!("quit requested");
                break;
            }
            state.apply_input(game_input)?;
        }

        if last_tick.elapsed() >= state.tick_interval() {
            state.tick(started.elapsed())?;
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
