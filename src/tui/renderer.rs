use crate::engine::grid::{Grid, Score};
use crate::error::Result;

/// Everything a backend needs to draw one frame.
pub(crate) struct Scene {
    pub(crate) grid: Grid,
    pub(crate) score: Score,
    pub(crate) high_score: Score,
    pub(crate) game_over: bool,
}

pub(crate) trait Renderer {
    fn render(&mut self, scene: &Scene) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
    /// Hand the terminal back to the shell no matter what state the screen
    /// is in. Used on the error path before the process exits.
    fn recover(&mut self);
}
