use crate::engine::grid::Direction;
use crate::error::Result;

pub(crate) trait EventSource {
    /// Block until the player does something worth reacting to.
    fn next_event(&self) -> Result<Event>;
}

pub(crate) enum Event {
    UserInput(UserInput),
    Resize,
}

pub(crate) enum UserInput {
    Shift(Direction),
    Undo,
    Redo,
    Reset,
    Quit,
}
