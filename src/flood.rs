//! Flood-fill reveal of zero-count regions.
//!
//! Uses an explicit work stack rather than recursion so that revealing a
//! large empty board cannot exhaust the call stack.

use crate::board::adjacent_mine_count;
use crate::{Position, Tile};
use ndarray::Array2;
use std::collections::HashSet;

/// Opens `start` and every tile reachable from it through zero-count tiles.
/// Numbered tiles are opened but never expanded; flagged, open and
/// out-of-bounds tiles are skipped. `start` must be a hidden safe tile.
///
/// Returns the positions opened, in reveal order.
pub fn flood_fill(mines: &Array2<bool>, tiles: &mut Array2<Tile>, start: Position) -> Vec<Position> {
    let (rows, cols) = mines.dim();
    let mut visited = HashSet::new();
    let mut to_visit = vec![start];
    let mut opened = Vec::new();

    while let Some(pos) = to_visit.pop() {
        if !visited.insert(pos) {
            continue;
        }
        let Some(index) = pos.index(rows, cols) else {
            continue;
        };
        if !tiles[index].is_hidden() || mines[index] {
            continue;
        }

        let count = adjacent_mine_count(mines, pos);
        tiles[index] = Tile::Revealed(count);
        opened.push(pos);

        if count == 0 {
            to_visit.extend(pos.neighbors().filter(|p| !visited.contains(p)));
        }
    }

    log::debug!("Flood fill from {:?} opened {} tiles", start, opened.len());
    opened
}
