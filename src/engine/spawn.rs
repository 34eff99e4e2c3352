use rand::distributions::Distribution;
use rand::distributions::WeightedIndex;
use rand::seq::IteratorRandom;
use rand::Rng;

use super::grid::{Grid, Tile};

const NEW_TILE_CHOICES: [Tile; 2] = [2, 4];
const NEW_TILE_WEIGHTS: [u8; 2] = [9, 1];

/// Place a new tile in an empty cell chosen uniformly at random: a 2 nine
/// times out of ten, otherwise a 4. Returns the coordinate written, or None
/// when the board has no room. A full board is not by itself the end of the
/// game; that is the grid's adjacency scan to decide.
pub(crate) fn spawn_tile<T: Rng>(grid: &mut Grid, rng: &mut T) -> Option<(usize, usize)> {
    let (row, col) = grid.empty_cells().choose(rng)?;
    let weighted_index =
        WeightedIndex::new(NEW_TILE_WEIGHTS).expect("NEW_TILE_WEIGHTS should never be empty");
    let value = NEW_TILE_CHOICES[weighted_index.sample(rng)];
    grid.set(row, col, value);
    Some((row, col))
}
