use crate::ConfigError;
use std::path::Path;
use std::str::FromStr;

/// Rows at the bottom of the board reserved for the control strip. They are
/// never part of the minefield.
pub const CONTROL_ROWS: usize = 2;

/// Largest column or row count. Tile coordinates are `i32`.
pub const MAX_SIDE: usize = i32::MAX as usize;

/// Board dimensions and mine count. `rows` includes the control strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub cols: usize,
    pub rows: usize,
    pub mines: usize,
}

impl BoardConfig {
    pub fn new(cols: usize, rows: usize, mines: usize) -> Result<Self, ConfigError> {
        let config = Self { cols, rows, mines };
        config.validate()?;
        Ok(config)
    }

    /// Reads a config file holding `columns rows mines`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = text.parse()?;
        log::info!(
            "Loaded board config from {}: {}x{} with {} mines",
            path.display(),
            config.cols,
            config.rows,
            config.mines
        );
        Ok(config)
    }

    pub fn playable_rows(&self) -> usize {
        self.rows.saturating_sub(CONTROL_ROWS)
    }

    pub fn playable_cells(&self) -> usize {
        self.playable_rows().saturating_mul(self.cols)
    }

    /// Rejects boards that mine placement could never fill. At least one safe
    /// tile must remain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if self.cols > MAX_SIDE || self.rows > MAX_SIDE {
            return Err(ConfigError::TooLarge {
                cols: self.cols,
                rows: self.rows,
            });
        }
        if self.rows <= CONTROL_ROWS {
            return Err(ConfigError::TooFewRows { rows: self.rows });
        }
        let capacity = self.playable_cells();
        if self.mines >= capacity {
            return Err(ConfigError::TooManyMines {
                mines: self.mines,
                capacity,
            });
        }
        Ok(())
    }
}

impl FromStr for BoardConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let mut next = |field: &'static str| -> Result<usize, ConfigError> {
            let token = tokens.next().ok_or(ConfigError::Missing(field))?;
            token.parse().map_err(|_| ConfigError::Invalid {
                field,
                value: token.to_string(),
            })
        };
        let cols = next("columns")?;
        let rows = next("rows")?;
        let mines = next("mines")?;
        Self::new(cols, rows, mines)
    }
}

/// Per-session behaviour that is not part of the board itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionOptions {
    /// Restart the elapsed-time clock when a new game is started from within
    /// a session. Off by default: the clock keeps running across new games.
    pub reset_timer_on_new_game: bool,
    /// Fixed RNG seed for mine placement. `None` draws from OS entropy.
    pub seed: Option<u64>,
}
