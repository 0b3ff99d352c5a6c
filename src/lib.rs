pub mod board;
pub mod config;
pub mod error;
pub mod flood;
pub mod game;
pub mod leaderboard;
pub mod player;
pub mod position;
pub mod session;
pub mod tile;
pub mod timer;

pub use board::{Board, FlagOutcome, RevealOutcome};
pub use config::{BoardConfig, SessionOptions, CONTROL_ROWS};
pub use error::{ConfigError, GameError, LeaderboardError};
pub use game::{Event, Frame, Game, Outcome, Phase};
pub use leaderboard::{Entry, Leaderboard, LeaderboardStore};
pub use player::{NameInput, PlayerName};
pub use position::Position;
pub use session::Session;
pub use tile::Tile;
pub use timer::{Clock, GameClock, ManualClock, SystemClock, Timer};
