use rand::RngCore;

use super::grid::{Direction, Grid, Score};
use super::history::{History, Snapshot};
use super::spawn::spawn_tile;

/// Phase distinguishes a live session from one with no legal moves left.
/// GameOver is terminal only for directional input; undo, redo, and reset
/// all stay available.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    Playing,
    GameOver,
}

/// Board owns the live (grid, score) pair, its undo/redo history, and the
/// random number generator used to place new tiles. All mutation of session
/// state funnels through here, one player intent at a time.
pub(crate) struct Board {
    rng: Box<dyn RngCore>,
    live: Snapshot,
    history: History,
    phase: Phase,
}

impl Board {
    /// Initialize a fresh board using the given random number generator:
    /// two spawned tiles on an otherwise empty grid.
    pub(crate) fn new(mut rng: impl RngCore + 'static) -> Self {
        let mut grid = Grid::default();
        spawn_tile(&mut grid, &mut rng);
        spawn_tile(&mut grid, &mut rng);
        Self {
            rng: Box::new(rng),
            live: Snapshot { grid, score: 0 },
            history: History::default(),
            phase: Phase::Playing,
        }
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.live.grid
    }

    pub(crate) fn score(&self) -> Score {
        self.live.score
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    /// Attempt to shift the board in the given direction. A move that
    /// changes the board commits the pre-move snapshot, credits the points,
    /// spawns a tile, and may end the game; a move that changes nothing is
    /// invisible, costing neither a history slot nor a spawn.
    pub(crate) fn shift(&mut self, direction: Direction) -> bool {
        if self.phase == Phase::GameOver {
            return false;
        }
        let before = self.live;
        let Some(points) = self.live.grid.shift(direction) else {
            return false;
        };
        self.history.record(before);
        self.live.score += points;
        spawn_tile(&mut self.live.grid, &mut self.rng);
        if self.live.grid.is_stuck() {
            self.phase = Phase::GameOver;
            log::info!("out of moves, final score {}", self.live.score);
        }
        true
    }

    /// Step back to the state before the last committed move. Returns false
    /// when there is no history left.
    pub(crate) fn undo(&mut self) -> bool {
        match self.history.undo(self.live) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Step forward along an undone timeline. Returns false when there is
    /// nothing to redo.
    pub(crate) fn redo(&mut self) -> bool {
        match self.history.redo(self.live) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Start over: empty grid, zero score, empty history, two fresh tiles.
    pub(crate) fn reset(&mut self) {
        let mut grid = Grid::default();
        spawn_tile(&mut grid, &mut self.rng);
        spawn_tile(&mut grid, &mut self.rng);
        self.live = Snapshot { grid, score: 0 };
        self.history.clear();
        self.phase = Phase::Playing;
        log::info!("board reset");
    }

    // The phase is a function of the grid, so restoring a snapshot
    // re-derives it; undoing out of a lost position resumes play.
    fn restore(&mut self, snapshot: Snapshot) {
        self.live = snapshot;
        self.phase = if snapshot.grid.is_stuck() {
            Phase::GameOver
        } else {
            Phase::Playing
        };
    }

    #[cfg(test)]
    pub(crate) fn set_live(&mut self, grid: Grid, score: Score) {
        self.restore(Snapshot { grid, score });
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::engine::grid::SIZE;

    fn board() -> Board {
        Board::new(SmallRng::seed_from_u64(42))
    }

    #[test]
    fn new_board_has_two_starting_tiles() {
        let board = board();
        let mut values = Vec::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                let value = board.grid().get(row, col);
                if value != 0 {
                    values.push(value);
                }
            }
        }
        assert_eq!(values.len(), 2);
        assert!(values.iter().all(|v| matches!(v, 2 | 4)));
        assert_eq!(board.score(), 0);
        assert_eq!(board.phase(), Phase::Playing);
    }

    #[test]
    fn scoring_move_commits_history_and_spawns() {
        let mut board = board();
        board.set_live(Grid::from([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]), 0);

        assert!(board.shift(Direction::Left));
        assert_eq!(board.score(), 4);
        assert_eq!(board.grid().get(0, 0), 4);
        // the merged row plus exactly one spawned tile
        assert_eq!(board.grid().empty_cells().count(), 14);
        assert_eq!(board.phase(), Phase::Playing);

        assert!(board.undo());
        assert_eq!(board.score(), 0);
        assert_eq!(
            *board.grid(),
            Grid::from([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]])
        );
    }

    #[test]
    fn noop_move_is_invisible() {
        let mut board = board();
        let packed_row = Grid::from([[2, 4, 8, 16], [0; 4], [0; 4], [0; 4]]);
        board.set_live(packed_row, 0);

        assert!(!board.shift(Direction::Left));
        assert_eq!(*board.grid(), packed_row);
        // no snapshot was recorded for the failed attempt
        assert!(!board.undo());
    }

    #[test]
    fn committed_move_invalidates_redo() {
        let mut board = board();
        board.set_live(Grid::from([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]), 0);

        assert!(board.shift(Direction::Left));
        assert!(board.undo());
        assert!(board.shift(Direction::Left));
        assert!(!board.redo());
    }

    #[test]
    fn filling_the_last_cell_ends_the_game() {
        let mut board = board();
        // the bottom row slides left, leaving one hole whose neighbors are
        // 8s; whatever spawns there, no move remains
        board.set_live(
            Grid::from([[4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 8], [0, 2, 4, 8]]),
            100,
        );

        assert!(board.shift(Direction::Left));
        assert_eq!(board.phase(), Phase::GameOver);
        assert_eq!(board.score(), 100);
        assert!(board.grid().is_stuck());

        // directional input is dead now
        assert!(!board.shift(Direction::Right));
        assert_eq!(board.score(), 100);
    }

    #[test]
    fn undo_out_of_game_over_resumes_play() {
        let mut board = board();
        board.set_live(
            Grid::from([[4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 8], [0, 2, 4, 8]]),
            0,
        );
        assert!(board.shift(Direction::Left));
        assert_eq!(board.phase(), Phase::GameOver);

        assert!(board.undo());
        assert_eq!(board.phase(), Phase::Playing);
        assert!(board.shift(Direction::Left));
    }

    #[test]
    fn reset_clears_score_and_history() {
        let mut board = board();
        board.set_live(Grid::from([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]), 0);
        assert!(board.shift(Direction::Left));
        assert!(board.score() > 0);

        board.reset();
        assert_eq!(board.score(), 0);
        assert_eq!(board.phase(), Phase::Playing);
        assert_eq!(board.grid().empty_cells().count(), 14);
        assert!(!board.undo());
        assert!(!board.redo());
    }
}
