use std::io::stdout;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::thread_rng;

mod engine;
mod error;
mod scores;
mod term48;
mod tui;

use engine::board::Board;
use scores::Scoreboard;
use term48::Term48;
use tui::crossterm::{Crossterm, CrosstermEvents};

#[derive(Parser)]
#[command(version, about = "2048 in the terminal, with undo")]
struct Cli {
    /// File the best score is persisted to.
    #[arg(long, default_value = "high_score.json")]
    score_file: PathBuf,

    /// File log lines are appended to; the terminal itself belongs to the
    /// board.
    #[arg(long, default_value = "term48.log")]
    log_file: PathBuf,

    #[command(flatten)]
    verbosity: clap_verbosity_flag::Verbosity<clap_verbosity_flag::InfoLevel>,
}

fn setup_logging(cli: &Cli) -> error::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message,
            ))
        })
        .level(cli.verbosity.log_level_filter())
        .chain(fern::log_file(&cli.log_file)?)
        .apply()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli)?;

    let board = Board::new(thread_rng());
    let scoreboard = Scoreboard::load(&cli.score_file);
    log::info!("session start, best so far {}", scoreboard.high_score());

    let w = stdout().lock();
    let renderer = Crossterm::new(Box::new(w))?;
    let event_source = CrosstermEvents::default();

    Term48::new(board, scoreboard, renderer, event_source).run()?;

    Ok(())
}
