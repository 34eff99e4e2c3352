use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::engine::grid::Score;

// The whole on-disk schema; a session that never beats the record never
// rewrites the file.
#[derive(Debug, Default, Deserialize, Serialize)]
struct ScoreFile {
    high_score: Score,
}

/// Scoreboard keeps the best score seen across sessions in a small JSON
/// file. Persistence is best effort in both directions: a missing or
/// mangled file reads as zero, and a failed write is logged and forgotten.
/// The player never sees a persistence failure.
pub(crate) struct Scoreboard {
    path: PathBuf,
    high_score: Score,
}

impl Scoreboard {
    pub(crate) fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let high_score = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<ScoreFile>(&raw) {
                Ok(record) => record.high_score,
                Err(e) => {
                    log::warn!("ignoring mangled score file {}: {}", path.display(), e);
                    0
                }
            },
            Err(_) => 0,
        };
        Self { path, high_score }
    }

    pub(crate) fn high_score(&self) -> Score {
        self.high_score
    }

    /// Fold a session score into the record, writing through when it beats
    /// the stored best.
    pub(crate) fn record(&mut self, score: Score) {
        if score > self.high_score {
            self.high_score = score;
            self.write();
        }
    }

    fn write(&self) {
        let record = ScoreFile {
            high_score: self.high_score,
        };
        let raw =
            serde_json::to_string(&record).expect("a single-integer record always serializes");
        if let Err(e) = fs::write(&self.path, raw) {
            log::warn!("unable to write score file {}: {}", self.path.display(), e);
        }
    }
}
