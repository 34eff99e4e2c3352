use crate::engine::board::{Board, Phase};
use crate::engine::grid::Direction;
use crate::error::Result;
use crate::scores::Scoreboard;
use crate::tui::events::{Event, EventSource, UserInput};
use crate::tui::renderer::{Renderer, Scene};

/// Term48 ties the board, the scoreboard, and the terminal together. One
/// event is fully processed (move, spawn, score, end-of-game check, redraw)
/// before the next is read; the only blocking point is the wait for input.
pub(crate) struct Term48<R: Renderer, E: EventSource> {
    board: Board,
    scoreboard: Scoreboard,
    renderer: R,
    event_source: E,
}

impl<R: Renderer, E: EventSource> Term48<R, E> {
    pub(crate) fn new(board: Board, scoreboard: Scoreboard, renderer: R, event_source: E) -> Self {
        Self {
            board,
            scoreboard,
            renderer,
            event_source,
        }
    }

    /// Run consumes the instance and takes over the terminal until the
    /// player quits.
    pub(crate) fn run(mut self) -> Result<()> {
        let result = self.inner_run();
        if result.is_err() {
            self.renderer.recover();
        }
        result
    }

    fn inner_run(&mut self) -> Result<()> {
        loop {
            let scene = self.scene();
            self.renderer.render(&scene)?;

            match self.event_source.next_event()? {
                Event::UserInput(UserInput::Shift(direction)) => self.shift(direction),
                Event::UserInput(UserInput::Undo) => {
                    self.board.undo();
                }
                Event::UserInput(UserInput::Redo) => {
                    self.board.redo();
                }
                Event::UserInput(UserInput::Reset) => {
                    self.scoreboard.record(self.board.score());
                    self.board.reset();
                }
                Event::UserInput(UserInput::Quit) => {
                    self.scoreboard.record(self.board.score());
                    break;
                }
                Event::Resize => self.renderer.clear()?,
            }
        }
        Ok(())
    }

    fn shift(&mut self, direction: Direction) {
        if self.board.shift(direction) {
            self.scoreboard.record(self.board.score());
        }
    }

    fn scene(&self) -> Scene {
        Scene {
            grid: *self.board.grid(),
            score: self.board.score(),
            high_score: self.scoreboard.high_score(),
            game_over: self.board.phase() == Phase::GameOver,
        }
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::engine::grid::Grid;

    struct ScriptedEvents {
        script: RefCell<VecDeque<Event>>,
    }

    impl ScriptedEvents {
        fn new(inputs: Vec<UserInput>) -> Self {
            let mut script: VecDeque<Event> =
                inputs.into_iter().map(Event::UserInput).collect();
            script.push_back(Event::UserInput(UserInput::Quit));
            Self {
                script: RefCell::new(script),
            }
        }
    }

    impl EventSource for ScriptedEvents {
        fn next_event(&self) -> Result<Event> {
            Ok(self
                .script
                .borrow_mut()
                .pop_front()
                .expect("script always ends with Quit"))
        }
    }

    #[derive(Default)]
    struct NullRenderer {
        frames: usize,
        last_scene: Option<Scene>,
    }

    impl Renderer for NullRenderer {
        fn render(&mut self, scene: &Scene) -> Result<()> {
            self.frames += 1;
            self.last_scene = Some(Scene {
                grid: scene.grid,
                score: scene.score,
                high_score: scene.high_score,
                game_over: scene.game_over,
            });
            Ok(())
        }

        fn clear(&mut self) -> Result<()> {
            Ok(())
        }

        fn recover(&mut self) {}
    }

    #[test]
    fn quit_persists_the_final_score() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("high_score.json");
        let scoreboard = Scoreboard::load(&path);
        let mut board = Board::new(SmallRng::seed_from_u64(42));
        board.set_live(Grid::from([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]), 0);

        let app = Term48::new(
            board,
            scoreboard,
            NullRenderer::default(),
            ScriptedEvents::new(vec![UserInput::Shift(Direction::Left)]),
        );
        app.run().expect("scripted session never errors");

        assert_eq!(Scoreboard::load(&path).high_score(), 4);
    }

    #[test]
    fn undo_rolls_the_visible_score_back_but_not_the_best() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("high_score.json");
        let scoreboard = Scoreboard::load(&path);
        let mut board = Board::new(SmallRng::seed_from_u64(42));
        board.set_live(Grid::from([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]]), 0);

        let mut app = Term48::new(
            board,
            scoreboard,
            NullRenderer::default(),
            ScriptedEvents::new(vec![UserInput::Shift(Direction::Left), UserInput::Undo]),
        );
        app.inner_run().expect("scripted session never errors");

        let scene = app.renderer.last_scene.expect("at least one frame drawn");
        assert_eq!(scene.score, 0);
        assert_eq!(scene.high_score, 4);
        // one frame per event: shift, undo, quit
        assert_eq!(app.renderer.frames, 3);
    }

    #[test]
    fn reset_folds_the_session_score_into_the_best() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("high_score.json");
        let scoreboard = Scoreboard::load(&path);
        let mut board = Board::new(SmallRng::seed_from_u64(42));
        board.set_live(Grid::from([[4, 4, 0, 0], [0; 4], [0; 4], [0; 4]]), 0);

        let mut app = Term48::new(
            board,
            scoreboard,
            NullRenderer::default(),
            ScriptedEvents::new(vec![UserInput::Shift(Direction::Left), UserInput::Reset]),
        );
        app.inner_run().expect("scripted session never errors");

        let scene = app.renderer.last_scene.expect("at least one frame drawn");
        assert_eq!(scene.score, 0);
        assert_eq!(scene.high_score, 8);
        assert_eq!(Scoreboard::load(&path).high_score(), 8);
    }
}
