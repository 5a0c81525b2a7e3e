//! Opt-in file logging.
//!
//! The terminal belongs to the game, so log records go to a file and only
//! when one is requested on the command line.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

const APP_DIR_NAME: &str = "effect-snake";
const LOG_FILE_NAME: &str = "effect-snake.log";

/// Default log location: the platform cache directory, else the working directory.
#[must_use]
pub fn default_log_path() -> PathBuf {
    match dirs::cache_dir() {
        Some(mut base) => {
            base.push(APP_DIR_NAME);
            base.push(LOG_FILE_NAME);
            base
        }
        None => PathBuf::from(LOG_FILE_NAME),
    }
}

/// Reads the level from `RUST_LOG`, defaulting to debug.
#[must_use]
pub fn level_from_env(value: Option<&str>) -> LevelFilter {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Debug,
    }
}

/// Installs a file logger at `path`, creating parent directories as needed.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let level = level_from_env(std::env::var("RUST_LOG").ok().as_deref());
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|builder| builder)
        .build();
    let file = File::create(path)?;

    WriteLogger::init(level, config, file).map_err(io::Error::other)?;
    log::info!("logging to {}", path.display());
    Ok(())
}
