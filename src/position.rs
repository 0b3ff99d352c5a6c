use crate::config::MAX_SIDE;

/// A tile coordinate. Signed so that neighbours of edge tiles can be expressed
/// and then rejected by a bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn neighbors(&self) -> impl Iterator<Item = Position> + '_ {
        (-1..=1).flat_map(move |dr| {
            (-1..=1).filter_map(move |dc| {
                if dr == 0 && dc == 0 {
                    None
                } else {
                    Some(Position::new(self.row + dr, self.col + dc))
                }
            })
        })
    }

    /// Array index of this position in a `rows x cols` grid, if it lies inside.
    pub fn index(&self, rows: usize, cols: usize) -> Option<[usize; 2]> {
        let row = usize::try_from(self.row).ok()?;
        let col = usize::try_from(self.col).ok()?;
        (row < rows && col < cols).then_some([row, col])
    }
}

/// Grid indices of a validated board. `BoardConfig` caps each side at
/// `MAX_SIDE`, so both indices fit in an `i32`.
impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        debug_assert!(row <= MAX_SIDE && col <= MAX_SIDE);
        Position::new(row as i32, col as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_grid(pos: Position, rows: usize, cols: usize) -> Vec<[usize; 2]> {
        pos.neighbors().filter_map(|n| n.index(rows, cols)).collect()
    }

    #[test]
    fn test_neighbors_clipped_at_corners() {
        // 2 rows x 4 columns
        assert_eq!(in_grid(Position::new(0, 0), 2, 4), vec![[0, 1], [1, 0], [1, 1]]);
        assert_eq!(in_grid(Position::new(1, 3), 2, 4), vec![[0, 2], [0, 3], [1, 2]]);
    }

    #[test]
    fn test_neighbors_clipped_on_one_axis() {
        // Bottom edge of a wide grid keeps both column neighbours
        assert_eq!(in_grid(Position::new(1, 2), 2, 4).len(), 5);
        // A single column keeps only the tiles above and below
        assert_eq!(in_grid(Position::new(1, 0), 3, 1), vec![[0, 0], [2, 0]]);
    }

    #[test]
    fn test_from_grid_indices() {
        assert_eq!(Position::from((3, 7)), Position::new(3, 7));
        assert_eq!(Position::from((3, 7)).index(4, 8), Some([3, 7]));
        // Rows and columns are not interchangeable
        assert_eq!(Position::from((3, 7)).index(8, 4), None);
    }

    #[test]
    fn test_index_bounds() {
        assert_eq!(Position::new(0, 0).index(2, 3), Some([0, 0]));
        assert_eq!(Position::new(1, 2).index(2, 3), Some([1, 2]));
        assert_eq!(Position::new(2, 0).index(2, 3), None);
        assert_eq!(Position::new(0, 3).index(2, 3), None);
        assert_eq!(Position::new(-1, 0).index(2, 3), None);
        assert_eq!(Position::new(0, -1).index(2, 3), None);
        // Width and height are checked independently
        assert_eq!(Position::new(0, 2).index(1, 3), Some([0, 2]));
        assert_eq!(Position::new(2, 0).index(3, 1), Some([2, 0]));
        assert_eq!(Position::new(0, 2).index(3, 1), None);
    }
}
