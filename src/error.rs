use std::io;

use thiserror::Error;

/// Caller contract violations raised by the simulation core.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GameError {
    #[error("snake must contain at least one segment")]
    EmptySnake,
    #[error("cannot remove the last remaining snake segment")]
    LastSegment,
    #[error("turn request must carry a moving direction")]
    StillTurn,
}

/// Failures while loading a `GameConfig` file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}
