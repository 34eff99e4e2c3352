use std::io::Write;

use crossterm::{
    cursor,
    event::{self, Event as CrossTermEvent, KeyCode, KeyEvent},
    style, terminal, ExecutableCommand, QueueableCommand,
};

use super::colors::tile_colors;
use super::events::{Event, EventSource, UserInput};
use super::renderer::{Renderer, Scene};
use crate::engine::grid::{Direction, SIZE};
use crate::error::Result;

const TILE_WIDTH: usize = 6;
const TILE_HEIGHT: usize = 3;
const BOARD_X_OFFSET: u16 = 1;
const BOARD_Y_OFFSET: u16 = 1;
const BOARD_INNER_WIDTH: usize = SIZE * TILE_WIDTH;
const BOARD_INNER_HEIGHT: usize = SIZE * TILE_HEIGHT;
const LEGEND: &str = "arrows/hjkl shift  u undo  r redo  esc reset  q quit";

const MIN_COLS: u16 = LEGEND.len() as u16 + BOARD_X_OFFSET;
const MIN_ROWS: u16 = BOARD_Y_OFFSET + BOARD_INNER_HEIGHT as u16 + 2 + 1;

pub(crate) struct Crossterm<T: Write> {
    w: Box<T>,
}

impl<T: Write> Crossterm<T> {
    pub(crate) fn new(mut w: Box<T>) -> Result<Self> {
        terminal::enable_raw_mode()?;
        w.execute(terminal::EnterAlternateScreen)?;
        w.execute(cursor::Hide)?;
        Ok(Self { w })
    }

    fn restore(&mut self) {
        let _ = self.w.execute(cursor::Show);
        let _ = self.w.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl<T: Write> Drop for Crossterm<T> {
    fn drop(&mut self) {
        self.restore();
    }
}

impl<T: Write> Renderer for Crossterm<T> {
    fn render(&mut self, scene: &Scene) -> Result<()> {
        let (width, height) = terminal::size()?;
        self.w.queue(terminal::Clear(terminal::ClearType::All))?;
        self.w.queue(style::ResetColor)?;
        if width < MIN_COLS || height < MIN_ROWS {
            self.w.queue(cursor::MoveTo(0, 0))?;
            self.w.queue(style::Print(format!(
                "terminal too small, need at least {} x {}",
                MIN_COLS, MIN_ROWS
            )))?;
        } else {
            self.draw_header(scene)?;
            self.draw_frame()?;
            self.draw_tiles(scene)?;
            self.draw_legend()?;
            if scene.game_over {
                self.draw_game_over(scene)?;
            }
        }
        self.w.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.w.queue(style::ResetColor)?;
        self.w.queue(terminal::Clear(terminal::ClearType::All))?;
        self.w.flush()?;
        Ok(())
    }

    fn recover(&mut self) {
        self.restore();
    }
}

impl<T: Write> Crossterm<T> {
    fn draw_header(&mut self, scene: &Scene) -> Result<()> {
        self.w.queue(cursor::MoveTo(BOARD_X_OFFSET, 0))?;
        self.w.queue(style::Print(format!(
            "score {:>8}   best {:>8}",
            scene.score, scene.high_score
        )))?;
        Ok(())
    }

    fn draw_frame(&mut self) -> Result<()> {
        let corner = boxy::Char::upper_left(boxy::Weight::Doubled);
        let top_left: char = corner.clone().into();
        let top_right: char = corner.clone().rotate_cw(1).into();
        let bottom_right: char = corner.clone().rotate_cw(2).into();
        let bottom_left: char = corner.rotate_ccw(1).into();
        let horizontal: char = boxy::Char::horizontal(boxy::Weight::Doubled).into();
        let vertical: char = boxy::Char::vertical(boxy::Weight::Doubled).into();

        let bar: String = std::iter::repeat(horizontal).take(BOARD_INNER_WIDTH).collect();
        self.w.queue(cursor::MoveTo(BOARD_X_OFFSET, BOARD_Y_OFFSET))?;
        self.w
            .queue(style::Print(format!("{}{}{}", top_left, bar, top_right)))?;
        for line in 0..BOARD_INNER_HEIGHT as u16 {
            let y = BOARD_Y_OFFSET + 1 + line;
            self.w.queue(cursor::MoveTo(BOARD_X_OFFSET, y))?;
            self.w.queue(style::Print(vertical))?;
            self.w
                .queue(cursor::MoveTo(BOARD_X_OFFSET + 1 + BOARD_INNER_WIDTH as u16, y))?;
            self.w.queue(style::Print(vertical))?;
        }
        self.w.queue(cursor::MoveTo(
            BOARD_X_OFFSET,
            BOARD_Y_OFFSET + 1 + BOARD_INNER_HEIGHT as u16,
        ))?;
        self.w.queue(style::Print(format!(
            "{}{}{}",
            bottom_left, bar, bottom_right
        )))?;
        Ok(())
    }

    fn draw_tiles(&mut self, scene: &Scene) -> Result<()> {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let value = scene.grid.get(row, col);
                let (background, foreground) = tile_colors(value);
                self.w.queue(style::SetBackgroundColor(background))?;
                self.w.queue(style::SetForegroundColor(foreground))?;
                let x = BOARD_X_OFFSET + 1 + (col * TILE_WIDTH) as u16;
                let y = BOARD_Y_OFFSET + 1 + (row * TILE_HEIGHT) as u16;
                for line in 0..TILE_HEIGHT {
                    self.w.queue(cursor::MoveTo(x, y + line as u16))?;
                    if value != 0 && line == TILE_HEIGHT / 2 {
                        self.w.queue(style::Print(format!(
                            "{:^width$}",
                            value,
                            width = TILE_WIDTH
                        )))?;
                    } else {
                        self.w.queue(style::Print(" ".repeat(TILE_WIDTH)))?;
                    }
                }
                self.w.queue(style::ResetColor)?;
            }
        }
        Ok(())
    }

    fn draw_legend(&mut self) -> Result<()> {
        self.w.queue(cursor::MoveTo(
            BOARD_X_OFFSET,
            BOARD_Y_OFFSET + BOARD_INNER_HEIGHT as u16 + 2,
        ))?;
        self.w.queue(style::Print(LEGEND))?;
        Ok(())
    }

    fn draw_game_over(&mut self, scene: &Scene) -> Result<()> {
        let lines = [
            String::from(" game over "),
            format!(" final score {} ", scene.score),
            String::from(" esc to restart "),
        ];
        self.w.queue(style::SetBackgroundColor(style::Color::Rgb {
            r: 20,
            g: 20,
            b: 20,
        }))?;
        self.w.queue(style::SetForegroundColor(style::Color::Rgb {
            r: 250,
            g: 248,
            b: 239,
        }))?;
        let y = BOARD_Y_OFFSET + 1 + (BOARD_INNER_HEIGHT as u16) / 2 - 1;
        for (i, line) in lines.iter().enumerate() {
            let x = BOARD_X_OFFSET
                + 1
                + (BOARD_INNER_WIDTH.saturating_sub(line.len()) / 2) as u16;
            self.w.queue(cursor::MoveTo(x, y + i as u16))?;
            self.w.queue(style::Print(line))?;
        }
        self.w.queue(style::ResetColor)?;
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct CrosstermEvents {}

impl EventSource for CrosstermEvents {
    /// Block until the next event the game cares about.
    fn next_event(&self) -> Result<Event> {
        loop {
            match event::read()? {
                CrossTermEvent::Key(ke) => match handle_key_event(ke) {
                    Some(input) => return Ok(Event::UserInput(input)),
                    None => continue,
                },
                CrossTermEvent::Resize(_, _) => return Ok(Event::Resize),
                _ => continue,
            }
        }
    }
}

fn handle_key_event(ke: KeyEvent) -> Option<UserInput> {
    match ke.code {
        KeyCode::Left | KeyCode::Char('h') => Some(UserInput::Shift(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(UserInput::Shift(Direction::Right)),
        KeyCode::Up | KeyCode::Char('k') => Some(UserInput::Shift(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(UserInput::Shift(Direction::Down)),
        KeyCode::Char('u') => Some(UserInput::Undo),
        KeyCode::Char('r') => Some(UserInput::Redo),
        KeyCode::Esc => Some(UserInput::Reset),
        KeyCode::Char('q') => Some(UserInput::Quit),
        _ => None,
    }
}
