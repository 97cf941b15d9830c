use crate::difficulty::Difficulty;
use crate::storage::{self, StoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "hangman_config.json";
const CONFIG_FORMAT: &str = "hangman.config";

pub const DEFAULT_MINIMUM_WORD_LENGTH: usize = 5;
/// Lowest minimum word length the game accepts.
pub const MINIMUM_MINIMUM_WORD_LENGTH: usize = 2;
/// Suggested ceiling for the minimum word length; longer settings are allowed.
pub const MAXIMUM_MINIMUM_WORD_LENGTH: usize = 45;

/// Game settings, persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub difficulty: Difficulty,
    pub keep_duplicates: bool,
    pub keep_proper_nouns: bool,
    pub minimum_word_length: usize,
    pub file_path: Option<PathBuf>,
    pub display_file_path: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            keep_duplicates: true,
            keep_proper_nouns: true,
            minimum_word_length: DEFAULT_MINIMUM_WORD_LENGTH,
            file_path: None,
            display_file_path: true,
        }
    }
}

impl Config {
    /// Raises a minimum word length below the floor up to the floor.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.minimum_word_length = self.minimum_word_length.max(MINIMUM_MINIMUM_WORD_LENGTH);
        self
    }

    /// File path as it should be shown to the player, if at all.
    #[must_use]
    pub fn visible_file_path(&self) -> Option<&Path> {
        if self.display_file_path {
            self.file_path.as_deref()
        } else {
            None
        }
    }
}

/// Reads and writes the config file in a data directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(CONFIG_FILE_NAME),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored config. A missing or unreadable file yields the
    /// defaults.
    #[must_use]
    pub fn load(&self) -> Config {
        match storage::read_record::<Config>(&self.path, CONFIG_FORMAT) {
            Ok(Some(config)) => config.normalized(),
            Ok(None) => Config::default(),
            Err(e) => {
                log::warn!("Ignoring stored configuration: {e}");
                Config::default()
            }
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), StoreError> {
        storage::write_record(&self.path, CONFIG_FORMAT, config)
    }

    /// Overwrites the stored config with the defaults and returns them.
    pub fn reset(&self) -> Result<Config, StoreError> {
        let config = Config::default();
        self.save(&config)?;
        Ok(config)
    }
}
