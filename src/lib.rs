// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod config;
pub mod difficulty;
pub mod drawing;
pub mod game_state;
pub mod logging;
pub mod scorer;
pub mod scores;
pub mod storage;
pub mod tui;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use config::{Config, ConfigStore};
pub use difficulty::Difficulty;
pub use game_state::{GameState, GameStatus, GuessOutcome, play_game};
pub use scorer::{Scorer, score_for};
pub use scores::{ScoreHistory, ScoreRecord, ScoreStore};
pub use wordbank::{LoadError, WordFilter, WordPool, load_word_pool, load_word_pool_from_file};
