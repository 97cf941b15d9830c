//! Word source loading and filtering.
//!
//! A word source is any whitespace-separated text. Each token is stripped of
//! everything but letters and digits, then kept or dropped according to a
//! [`WordFilter`]. The survivors form the [`WordPool`] the secret word is
//! drawn from.

use crate::config::Config;
use crate::info_log;
use rand::Rng;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const EMBEDDED_WORD_SOURCE: &str = include_str!("resources/words.txt");
pub const EMBEDDED_SOURCE_NAME: &str = "built-in word list";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read word source \"{}\": {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no usable words found in {0} with the current settings")]
    EmptyPool(String),
}

/// Rules deciding which tokens of a word source become candidate words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordFilter {
    pub minimum_word_length: usize,
    pub keep_duplicates: bool,
    pub keep_proper_nouns: bool,
}

impl From<&Config> for WordFilter {
    fn from(config: &Config) -> Self {
        Self {
            minimum_word_length: config.minimum_word_length,
            keep_duplicates: config.keep_duplicates,
            keep_proper_nouns: config.keep_proper_nouns,
        }
    }
}

/// Candidate secret words in the order they appeared in the source.
/// A word's index is its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Picks a word uniformly at random.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        if self.words.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.words.len());
        self.get(index)
    }
}

/// Removes every character that is not a letter or a digit.
fn strip_token(token: &str) -> String {
    token.chars().filter(|c| c.is_alphanumeric()).collect()
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// Builds a pool from word source text. Returns `None` if nothing survives
/// the filter; callers turn that into [`LoadError::EmptyPool`] with the name
/// of the source.
fn build_pool(data: &str, filter: WordFilter) -> Option<WordPool> {
    let mut words = Vec::new();
    let mut seen = HashSet::new();

    for token in data.split_whitespace() {
        let word = strip_token(token);
        if word.is_empty() || word.chars().count() < filter.minimum_word_length {
            continue;
        }
        if !filter.keep_duplicates && seen.contains(&word.to_lowercase()) {
            continue;
        }
        if !filter.keep_proper_nouns && starts_uppercase(&word) {
            continue;
        }
        seen.insert(word.to_lowercase());
        words.push(word);
    }

    if words.is_empty() {
        None
    } else {
        Some(WordPool { words })
    }
}

pub fn load_word_pool_from_str(data: &str, filter: WordFilter) -> Result<WordPool, LoadError> {
    build_pool(data, filter).ok_or_else(|| LoadError::EmptyPool(EMBEDDED_SOURCE_NAME.to_string()))
}

/// Loads a pool from a text file. Invalid UTF-8 is replaced rather than
/// rejected.
pub fn load_word_pool_from_file<P: AsRef<Path>>(
    path: P,
    filter: WordFilter,
) -> Result<WordPool, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let data = String::from_utf8_lossy(&bytes);

    let pool = build_pool(&data, filter).ok_or_else(|| {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        LoadError::EmptyPool(format!("\"{name}\""))
    })?;
    info_log!("Loaded {} words from {}", pool.len(), path.display());
    Ok(pool)
}

/// Loads from the configured file, or from the embedded source when no file
/// is configured.
pub fn load_word_pool(config: &Config) -> Result<WordPool, LoadError> {
    let filter = WordFilter::from(config);
    match &config.file_path {
        Some(path) => load_word_pool_from_file(path, filter),
        None => load_word_pool_from_str(EMBEDDED_WORD_SOURCE, filter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn filter(min: usize, keep_duplicates: bool, keep_proper_nouns: bool) -> WordFilter {
        WordFilter {
            minimum_word_length: min,
            keep_duplicates,
            keep_proper_nouns,
        }
    }

    fn words(pool: &WordPool) -> Vec<&str> {
        pool.iter().collect()
    }

    #[test]
    fn test_strips_punctuation() {
        let pool = load_word_pool_from_str("\"hello,\" (world)! it's", filter(2, true, true)).unwrap();
        assert_eq!(words(&pool), vec!["hello", "world", "its"]);
    }

    #[test]
    fn test_minimum_length_counts_after_stripping() {
        let pool = load_word_pool_from_str("cat... mouse tiger!!", filter(5, true, true)).unwrap();
        assert_eq!(words(&pool), vec!["mouse", "tiger"]);
    }

    #[test]
    fn test_keeps_duplicates_when_asked() {
        let pool = load_word_pool_from_str("apple Apple apple", filter(2, true, true)).unwrap();
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_drops_case_insensitive_duplicates() {
        let pool = load_word_pool_from_str("Apple apple APPLE pear", filter(2, false, true)).unwrap();
        assert_eq!(words(&pool), vec!["Apple", "pear"]);
    }

    #[test]
    fn test_drops_proper_nouns() {
        let pool = load_word_pool_from_str("London bridge Thames river", filter(2, true, false)).unwrap();
        assert_eq!(words(&pool), vec!["bridge", "river"]);
    }

    #[test]
    fn test_skipped_proper_noun_does_not_block_lowercase_form() {
        let pool = load_word_pool_from_str("The the", filter(2, false, false)).unwrap();
        assert_eq!(words(&pool), vec!["the"]);
    }

    #[test]
    fn test_digits_are_kept() {
        let pool = load_word_pool_from_str("route66 #42", filter(2, true, true)).unwrap();
        assert_eq!(words(&pool), vec!["route66", "42"]);
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        let pool = load_word_pool_from_str("café naïve", filter(5, true, true)).unwrap();
        assert_eq!(words(&pool), vec!["naïve"]);
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        let result = load_word_pool_from_str("a an ... !!", filter(3, true, true));
        assert!(matches!(result, Err(LoadError::EmptyPool(_))));
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let path = std::env::temp_dir().join("hangman_wordbank_missing_file.txt");
        let _ = std::fs::remove_file(&path);
        let result = load_word_pool_from_file(&path, filter(2, true, true));
        assert!(matches!(result, Err(LoadError::SourceUnavailable { .. })));
    }

    #[test]
    fn test_directory_is_source_unavailable() {
        let result = load_word_pool_from_file(std::env::temp_dir(), filter(2, true, true));
        assert!(matches!(result, Err(LoadError::SourceUnavailable { .. })));
    }

    #[test]
    fn test_embedded_source_loads_with_defaults() {
        let pool = load_word_pool(&Config::default()).unwrap();
        assert!(pool.len() > 50);
        assert!(pool.iter().all(|w| w.chars().count() >= 5));
    }

    #[test]
    fn test_get_by_index() {
        let pool = load_word_pool_from_str("alpha bravo", filter(2, true, true)).unwrap();
        assert_eq!(pool.get(0), Some("alpha"));
        assert_eq!(pool.get(1), Some("bravo"));
        assert_eq!(pool.get(2), None);
    }

    #[test]
    fn test_choose_returns_pool_member() {
        let pool = load_word_pool_from_str("alpha bravo charlie delta", filter(2, true, true)).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let word = pool.choose(&mut rng).unwrap();
            assert!(pool.iter().any(|w| w == word));
        }
    }

    #[test]
    fn test_choose_on_empty_pool() {
        let pool = WordPool::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pool.choose(&mut rng).is_none());
    }
}
