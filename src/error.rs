use crate::Position;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Mine at {0:?} lies outside the playable region")]
    MineOutOfBounds(Position),
    #[error("Mine at {0:?} was given more than once")]
    DuplicateMine(Position),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Missing {0} in board config")]
    Missing(&'static str),
    #[error("Invalid {field} in board config: {value:?}")]
    Invalid { field: &'static str, value: String },
    #[error("Board must have at least one column and one row")]
    ZeroDimension,
    #[error("Board needs more than {reserved} rows, got {rows}", reserved = crate::CONTROL_ROWS)]
    TooFewRows { rows: usize },
    #[error("Board of {cols}x{rows} exceeds the {max} limit per side", max = crate::config::MAX_SIDE)]
    TooLarge { cols: usize, rows: usize },
    #[error("Too many mines ({mines}) for {capacity} playable tiles")]
    TooManyMines { mines: usize, capacity: usize },
}

#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error("Unable to write leaderboard {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Player name {0:?} cannot be stored on the leaderboard")]
    InvalidName(String),
}
