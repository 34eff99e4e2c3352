use super::grid::{Grid, Score};

/// A (grid, score) pair captured before a move is applied. Grid is a plain
/// value, so a snapshot never aliases the live board it was taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pub(crate) grid: Grid,
    pub(crate) score: Score,
}

const MAX_UNDO: usize = 10;

/// Bounded linear undo/redo over snapshots. The undo stack keeps the most
/// recent MAX_UNDO entries; the redo stack lives only until the next
/// committed move invalidates its timeline.
#[derive(Default)]
pub(crate) struct History {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
}

impl History {
    /// Commit the pre-move state of a move that changed the board.
    pub(crate) fn record(&mut self, snapshot: Snapshot) {
        self.push_undo(snapshot);
        self.redo.clear();
    }

    /// Step back once, parking `live` on the redo stack. None when there is
    /// nothing to undo.
    pub(crate) fn undo(&mut self, live: Snapshot) -> Option<Snapshot> {
        let restored = self.undo.pop()?;
        self.redo.push(live);
        Some(restored)
    }

    /// Step forward once, parking `live` on the undo stack. None when there
    /// is nothing to redo.
    pub(crate) fn redo(&mut self, live: Snapshot) -> Option<Snapshot> {
        let restored = self.redo.pop()?;
        self.push_undo(live);
        Some(restored)
    }

    pub(crate) fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    // Every push lands here so the MAX_UNDO bound holds on the redo path
    // too, not just on commits.
    fn push_undo(&mut self, snapshot: Snapshot) {
        if self.undo.len() == MAX_UNDO {
            self.undo.remove(0);
        }
        self.undo.push(snapshot);
    }
}
