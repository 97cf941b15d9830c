use crate::difficulty::Difficulty;
use crate::storage::{self, StoreError};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SCORES_FILE_NAME: &str = "hangman_scores.json";
const SCORES_FORMAT: &str = "hangman.scores";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: i32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub turns_used: u32,
    #[serde(default)]
    pub won: bool,
    #[serde(default)]
    pub recorded_at: Option<DateTime<Local>>,
}

impl ScoreRecord {
    #[must_use]
    pub fn new(score: i32, difficulty: Difficulty, turns_used: u32, won: bool) -> Self {
        Self {
            score,
            difficulty,
            turns_used,
            won,
            recorded_at: Some(Local::now()),
        }
    }
}

/// Every score recorded on this machine, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreHistory {
    scores: Vec<ScoreRecord>,
}

impl ScoreHistory {
    pub fn push(&mut self, record: ScoreRecord) {
        self.scores.push(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Highest recorded score, or 0 with no scores.
    #[must_use]
    pub fn max_score(&self) -> i32 {
        self.scores.iter().map(|s| s.score).max().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreRecord> {
        self.scores.iter()
    }
}

#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SCORES_FILE_NAME),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the history. A missing or unreadable file is an empty history.
    #[must_use]
    pub fn load(&self) -> ScoreHistory {
        match storage::read_record::<ScoreHistory>(&self.path, SCORES_FORMAT) {
            Ok(Some(history)) => history,
            Ok(None) => ScoreHistory::default(),
            Err(e) => {
                log::warn!("Ignoring stored scores: {e}");
                ScoreHistory::default()
            }
        }
    }

    /// Appends a record to the stored history and returns the updated history.
    ///
    /// A file that cannot be parsed is replaced, but one written by another
    /// version or for another purpose, or one that cannot be read, is left
    /// alone and the error returned.
    pub fn append(&self, record: ScoreRecord) -> Result<ScoreHistory, StoreError> {
        let mut history = match storage::read_record::<ScoreHistory>(&self.path, SCORES_FORMAT) {
            Ok(Some(history)) => history,
            Ok(None) => ScoreHistory::default(),
            Err(e @ StoreError::Malformed { .. }) => {
                log::warn!("Replacing stored scores: {e}");
                ScoreHistory::default()
            }
            Err(e) => return Err(e),
        };
        history.push(record);
        storage::write_record(&self.path, SCORES_FORMAT, &history)?;
        Ok(history)
    }

    /// Deletes the stored history. Returns whether any was found.
    pub fn clear(&self) -> Result<bool, StoreError> {
        storage::remove_record(&self.path)
    }
}
