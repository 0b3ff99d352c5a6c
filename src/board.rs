use crate::{flood, BoardConfig, GameError, Position, Tile};
use itertools::iproduct;
use ndarray::Array2;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Out of bounds, already open or flagged.
    NoChange,
    /// Number of safe tiles opened, including any flood-filled region.
    Revealed(usize),
    HitMine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

/// The minefield plus what the player has uncovered. Both grids cover only
/// the playable rows; the control strip below them has no tiles.
#[derive(Debug, Clone)]
pub struct Board {
    mines: Array2<bool>,
    tiles: Array2<Tile>,
    config: BoardConfig,
}

impl Board {
    pub fn new(config: BoardConfig) -> Result<Self, GameError> {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(config: BoardConfig, rng: &mut R) -> Result<Self, GameError> {
        config.validate()?;
        let mut board = Self::empty(config);
        board.place_mines(rng);
        Ok(board)
    }

    /// Builds a board with mines at exactly the given positions. The config's
    /// mine count is taken from `mines`.
    pub fn from_mines(cols: usize, rows: usize, mines: &[Position]) -> Result<Self, GameError> {
        let config = BoardConfig::new(cols, rows, mines.len())?;
        let mut board = Self::empty(config);
        for &pos in mines {
            let index = board.index(pos).ok_or(GameError::MineOutOfBounds(pos))?;
            if board.mines[index] {
                return Err(GameError::DuplicateMine(pos));
            }
            board.mines[index] = true;
        }
        Ok(board)
    }

    fn empty(config: BoardConfig) -> Self {
        let shape = (config.playable_rows(), config.cols);
        Self {
            mines: Array2::from_elem(shape, false),
            tiles: Array2::default(shape),
            config,
        }
    }

    /// Rejection-samples distinct tiles until the configured count is placed.
    /// Terminates because the config guarantees `mines < playable_cells`.
    fn place_mines<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (rows, cols) = self.mines.dim();
        let mut mines_placed = 0;

        while mines_placed < self.config.mines {
            let row = rng.gen_range(0..rows);
            let col = rng.gen_range(0..cols);

            if !self.mines[[row, col]] {
                self.mines[[row, col]] = true;
                mines_placed += 1;
            }
        }
        log::debug!(
            "Placed {} mines on a {}x{} minefield",
            mines_placed,
            rows,
            cols
        );
    }

    /// Hides every tile and re-places all mines.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tiles.fill(Tile::Hidden);
        self.mines.fill(false);
        self.place_mines(rng);
    }

    fn index(&self, pos: Position) -> Option<[usize; 2]> {
        let (rows, cols) = self.mines.dim();
        pos.index(rows, cols)
    }

    pub fn is_playable(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    pub fn tile(&self, pos: Position) -> Option<Tile> {
        self.index(pos).map(|index| self.tiles[index])
    }

    pub fn has_mine(&self, pos: Position) -> bool {
        self.index(pos).is_some_and(|index| self.mines[index])
    }

    pub fn adjacent_mines(&self, pos: Position) -> u8 {
        adjacent_mine_count(&self.mines, pos)
    }

    pub fn reveal_tile(&mut self, pos: Position) -> RevealOutcome {
        let Some(index) = self.index(pos) else {
            return RevealOutcome::NoChange;
        };
        if !self.tiles[index].is_hidden() {
            return RevealOutcome::NoChange;
        }

        if self.mines[index] {
            self.tiles[index] = Tile::RevealedMine;
            self.reveal_all_mines();
            return RevealOutcome::HitMine;
        }

        let count = self.adjacent_mines(pos);
        if count == 0 {
            let opened = flood::flood_fill(&self.mines, &mut self.tiles, pos);
            RevealOutcome::Revealed(opened.len())
        } else {
            self.tiles[index] = Tile::Revealed(count);
            RevealOutcome::Revealed(1)
        }
    }

    /// Uncovers every hidden mine. Flagged mines keep their flag.
    fn reveal_all_mines(&mut self) {
        ndarray::Zip::from(&mut self.tiles)
            .and(&self.mines)
            .for_each(|tile, &mine| {
                if mine && tile.is_hidden() {
                    *tile = Tile::RevealedMine;
                }
            });
    }

    pub fn toggle_flag(&mut self, pos: Position) -> FlagOutcome {
        let Some(index) = self.index(pos) else {
            return FlagOutcome::NoChange;
        };

        match self.tiles[index] {
            Tile::Hidden => {
                self.tiles[index] = Tile::Flagged;
                FlagOutcome::Flagged
            }
            Tile::Flagged => {
                self.tiles[index] = Tile::Hidden;
                FlagOutcome::Unflagged
            }
            Tile::Revealed(_) | Tile::RevealedMine => FlagOutcome::NoChange,
        }
    }

    /// True once every safe tile is open. Scans the whole grid on each call.
    pub fn is_won(&self) -> bool {
        ndarray::Zip::from(&self.tiles)
            .and(&self.mines)
            .all(|tile, &mine| mine || tile.is_revealed())
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let (rows, cols) = self.mines.dim();
        iproduct!(0..rows, 0..cols).map(Position::from)
    }

    pub fn mine_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(move |&pos| self.has_mine(pos))
    }

    pub fn tiles(&self) -> &Array2<Tile> {
        &self.tiles
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    /// Total rows and columns, control strip included.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.config.rows, self.config.cols)
    }

    pub fn mines_count(&self) -> usize {
        self.config.mines
    }
}

/// Mines in the 8-neighbourhood of `pos`, clamped to the grid.
pub(crate) fn adjacent_mine_count(mines: &Array2<bool>, pos: Position) -> u8 {
    let (rows, cols) = mines.dim();
    pos.neighbors()
        .filter_map(|p| p.index(rows, cols))
        .filter(|&index| mines[index])
        .count() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(cols: usize, rows: usize, mines: usize) -> BoardConfig {
        BoardConfig::new(cols, rows, mines).unwrap()
    }

    #[test]
    fn test_place_mines_count_and_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let board = Board::with_rng(config(9, 11, 20), &mut rng).unwrap();

        let mines: Vec<Position> = board.mine_positions().collect();
        assert_eq!(mines.len(), 20);
        assert!(mines.iter().all(|p| p.row < 9 && p.col < 9));
    }

    #[test]
    fn test_place_mines_fills_all_but_one() {
        let mut rng = StdRng::seed_from_u64(1);
        let board = Board::with_rng(config(3, 5, 8), &mut rng).unwrap();
        assert_eq!(board.mine_positions().count(), 8);
    }

    #[test]
    fn test_too_many_mines_rejected() {
        let err = Board::new(BoardConfig {
            cols: 3,
            rows: 5,
            mines: 9,
        })
        .unwrap_err();
        assert!(matches!(
            err,
            GameError::Config(crate::ConfigError::TooManyMines { .. })
        ));
    }

    #[test]
    fn test_from_mines_rejects_bad_positions() {
        let err = Board::from_mines(3, 5, &[Position::new(3, 0)]).unwrap_err();
        assert!(matches!(err, GameError::MineOutOfBounds(_)));

        let twice = [Position::new(0, 0), Position::new(0, 0)];
        let err = Board::from_mines(3, 5, &twice).unwrap_err();
        assert!(matches!(err, GameError::DuplicateMine(_)));
    }

    #[test]
    fn test_control_strip_is_not_playable() {
        let mut board = Board::from_mines(3, 5, &[Position::new(0, 0)]).unwrap();

        assert!(board.is_playable(Position::new(2, 2)));
        assert!(!board.is_playable(Position::new(3, 0)));
        assert_eq!(board.reveal_tile(Position::new(3, 0)), RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag(Position::new(4, 1)), FlagOutcome::NoChange);
        assert_eq!(board.reveal_tile(Position::new(-1, 0)), RevealOutcome::NoChange);
    }

    #[test]
    fn test_adjacent_mines_ignores_control_strip() {
        let board = Board::from_mines(3, 4, &[Position::new(1, 1)]).unwrap();
        assert_eq!(board.adjacent_mines(Position::new(0, 0)), 1);
        assert_eq!(board.adjacent_mines(Position::new(1, 1)), 0);
    }

    #[test]
    fn test_reveal_numbered_tile_does_not_cascade() {
        let mut board = Board::from_mines(3, 5, &[Position::new(0, 0)]).unwrap();

        assert_eq!(board.reveal_tile(Position::new(1, 1)), RevealOutcome::Revealed(1));
        assert_eq!(board.tile(Position::new(1, 1)), Some(Tile::Revealed(1)));
        assert_eq!(board.tile(Position::new(2, 2)), Some(Tile::Hidden));
        assert_eq!(board.reveal_tile(Position::new(1, 1)), RevealOutcome::NoChange);
    }

    #[test]
    fn test_reveal_mine_shows_all_mines() {
        let mines = [Position::new(0, 0), Position::new(2, 2), Position::new(1, 2)];
        let mut board = Board::from_mines(3, 5, &mines).unwrap();
        board.toggle_flag(Position::new(2, 2));

        assert_eq!(board.reveal_tile(Position::new(0, 0)), RevealOutcome::HitMine);
        assert_eq!(board.tile(Position::new(0, 0)), Some(Tile::RevealedMine));
        assert_eq!(board.tile(Position::new(1, 2)), Some(Tile::RevealedMine));
        assert_eq!(board.tile(Position::new(2, 2)), Some(Tile::Flagged));
        assert_eq!(board.tile(Position::new(1, 1)), Some(Tile::Hidden));
    }

    #[test]
    fn test_flag_toggle() {
        let mut board = Board::from_mines(3, 5, &[Position::new(0, 0)]).unwrap();
        let pos = Position::new(2, 2);

        assert_eq!(board.toggle_flag(pos), FlagOutcome::Flagged);
        assert_eq!(board.reveal_tile(pos), RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag(pos), FlagOutcome::Unflagged);
        assert_eq!(board.tile(pos), Some(Tile::Hidden));

        board.reveal_tile(Position::new(1, 1));
        assert_eq!(board.toggle_flag(Position::new(1, 1)), FlagOutcome::NoChange);
    }

    #[test]
    fn test_is_won_requires_every_safe_tile() {
        let mut board = Board::from_mines(2, 3, &[Position::new(0, 0)]).unwrap();
        assert!(!board.is_won());

        board.reveal_tile(Position::new(0, 1));
        assert!(board.is_won());
    }

    #[test]
    fn test_flagged_safe_tile_blocks_win() {
        let mut board = Board::from_mines(3, 3, &[Position::new(0, 0)]).unwrap();
        board.toggle_flag(Position::new(0, 2));
        board.reveal_tile(Position::new(0, 1));
        assert!(!board.is_won());

        board.toggle_flag(Position::new(0, 2));
        board.reveal_tile(Position::new(0, 2));
        assert!(board.is_won());
    }

    #[test]
    fn test_reset_hides_tiles_and_replaces_mines() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut board = Board::with_rng(config(6, 8, 5), &mut rng).unwrap();
        let safe = board.positions().find(|&p| !board.has_mine(p)).unwrap();
        let mine = board.mine_positions().next().unwrap();
        board.reveal_tile(safe);
        board.toggle_flag(mine);

        board.reset(&mut rng);

        assert!(board.tiles().iter().all(|t| t.is_hidden()));
        assert_eq!(board.mine_positions().count(), 5);
    }
}
