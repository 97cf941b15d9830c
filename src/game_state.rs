use crate::difficulty::Difficulty;
use crate::scorer::Scorer;
use crate::{debug_log, info_log};
use chrono::{Local, TimeDelta};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Placeholder for letters of the secret word that are not revealed yet.
pub const HIDDEN: char = '-';

/// How to play, shown on request by every interface.
pub const RULES: &str = "\
Guess the hidden word one letter at a time, or guess the whole word at once.
Every letter that is not in the word costs a life and adds to the gallows.
Guessing a wrong letter again is free. Guessing the wrong word loses the game.
Each revealed letter takes a turn, as does each word guess.

Points for a win:
  15 bonus for getting the word in a single turn
  2 for every turn left out of the difficulty's lives
  5 x the difficulty multiplier (Easy 1, Medium 2, Hard 3, Extreme 4)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    LostOutOfLives,
    LostWrongWord,
}

impl GameStatus {
    #[must_use]
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    NotInWord,
    Repeat,
    AddedToWord,
    GotWord,
    OutOfLives,
    WrongWord,
}

impl GuessOutcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GuessOutcome::NotInWord => "not in word",
            GuessOutcome::Repeat => "repeat",
            GuessOutcome::AddedToWord => "added to word",
            GuessOutcome::GotWord => "got word",
            GuessOutcome::OutOfLives => "out of lives",
            GuessOutcome::WrongWord => "wrong word",
        }
    }
}

impl fmt::Display for GuessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("enter a letter or a word")]
    Empty,
    #[error("a guess cannot contain spaces")]
    ContainsWhitespace,
    #[error("the game is already over")]
    GameOver,
}

/// Checks raw player input and turns it into a guess the game accepts:
/// surrounding whitespace trimmed, lower-cased, non-empty and a single word.
pub fn validate_guess(raw: &str) -> Result<String, GuessError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GuessError::Empty);
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(GuessError::ContainsWhitespace);
    }
    Ok(trimmed.to_lowercase())
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().map(fold).eq(b.chars().map(fold))
}

/// State of one round of Hangman.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    secret_word: String,
    revealed: Vec<char>,
    incorrect_guesses: Vec<String>,
    incorrect_count: u32,
    turns_used: u32,
    lives_total: u32,
    status: GameStatus,
}

impl GameState {
    /// Starts a round. With no lives at all the round is lost before the
    /// first guess.
    #[must_use]
    pub fn new(secret_word: &str, lives_total: u32) -> Self {
        let status = if lives_total == 0 {
            GameStatus::LostOutOfLives
        } else {
            GameStatus::InProgress
        };
        Self {
            secret_word: secret_word.to_string(),
            revealed: vec![HIDDEN; secret_word.chars().count()],
            incorrect_guesses: Vec::new(),
            incorrect_count: 0,
            turns_used: 0,
            lives_total,
            status,
        }
    }

    #[must_use]
    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    /// The secret word with unguessed letters shown as [`HIDDEN`].
    #[must_use]
    pub fn revealed_pattern(&self) -> String {
        self.revealed.iter().collect()
    }

    #[must_use]
    pub fn incorrect_guesses(&self) -> &[String] {
        &self.incorrect_guesses
    }

    #[must_use]
    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    #[must_use]
    pub fn turns_used(&self) -> u32 {
        self.turns_used
    }

    #[must_use]
    pub fn lives_total(&self) -> u32 {
        self.lives_total
    }

    #[must_use]
    pub fn lives_remaining(&self) -> u32 {
        self.lives_total.saturating_sub(self.incorrect_count)
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Applies one guess. Single characters are letter guesses; anything
    /// longer is a guess at the whole word, and a wrong one ends the game.
    pub fn guess(&mut self, guess: &str) -> Result<GuessOutcome, GuessError> {
        if self.status.is_over() {
            return Err(GuessError::GameOver);
        }

        let mut chars = guess.chars();
        let outcome = match (chars.next(), chars.next()) {
            (None, _) => return Err(GuessError::Empty),
            (Some(letter), None) => self.guess_letter(letter),
            (Some(_), Some(_)) => self.guess_word(guess),
        };
        debug_log!(
            "guess '{}' -> {} (pattern {}, {}/{} incorrect)",
            guess,
            outcome,
            self.revealed_pattern(),
            self.incorrect_count,
            self.lives_total
        );
        Ok(outcome)
    }

    fn guess_letter(&mut self, letter: char) -> GuessOutcome {
        let letter = fold(letter);
        let positions: Vec<usize> = self
            .secret_word
            .chars()
            .enumerate()
            .filter(|&(_, c)| fold(c) == letter)
            .map(|(i, _)| i)
            .collect();

        if positions.is_empty() {
            let as_guess = letter.to_string();
            if self.incorrect_guesses.contains(&as_guess) {
                return GuessOutcome::Repeat;
            }
            self.incorrect_guesses.push(as_guess);
            self.incorrect_count += 1;
            if self.incorrect_count >= self.lives_total {
                self.status = GameStatus::LostOutOfLives;
                return GuessOutcome::OutOfLives;
            }
            self.turns_used += 1;
            return GuessOutcome::NotInWord;
        }

        for i in positions {
            self.revealed[i] = letter;
            self.turns_used += 1;
        }
        if eq_ignore_case(&self.revealed_pattern(), &self.secret_word) {
            self.status = GameStatus::Won;
            GuessOutcome::GotWord
        } else {
            GuessOutcome::AddedToWord
        }
    }

    fn guess_word(&mut self, guess: &str) -> GuessOutcome {
        self.turns_used += 1;
        if eq_ignore_case(guess, &self.secret_word) {
            self.revealed = guess.chars().collect();
            self.status = GameStatus::Won;
            GuessOutcome::GotWord
        } else {
            self.incorrect_count = self.lives_total;
            self.incorrect_guesses.push(guess.to_string());
            self.status = GameStatus::LostWrongWord;
            GuessOutcome::WrongWord
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    Exit,
}

/// What the player is told before the first guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStart {
    pub difficulty: Difficulty,
    pub lives_total: u32,
    pub word_length: usize,
    pub pool_size: usize,
    pub source_path: Option<PathBuf>,
    pub scores_recorded: usize,
    pub max_score: i32,
}

/// Result of one played game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub status: GameStatus,
    pub secret_word: String,
    pub turns_used: u32,
    pub incorrect_guesses: Vec<String>,
    pub difficulty: Difficulty,
    /// Points awarded; zero unless the game was won.
    pub score: i32,
    pub elapsed: TimeDelta,
}

impl GameSummary {
    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        self.status == GameStatus::InProgress
    }

    /// The wrong word that ended the game, if that is how it ended.
    #[must_use]
    pub fn wrong_word(&self) -> Option<&str> {
        if self.status == GameStatus::LostWrongWord {
            self.incorrect_guesses.last().map(String::as_str)
        } else {
            None
        }
    }
}

/// Formats a game's duration for the end-of-game message.
#[must_use]
pub fn format_game_time(elapsed: TimeDelta) -> String {
    let total = elapsed.num_seconds().max(0);
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours} hour(s) {minutes} minute(s) {seconds} second(s)")
    } else if minutes > 0 {
        format!("{minutes} minute(s) {seconds} second(s)")
    } else {
        format!("{seconds} second(s)")
    }
}

/// Seam between the game loop and whatever the player is looking at.
pub trait GameInterface {
    fn display_start(&mut self, start: &GameStart, game: &GameState);
    /// Reads the next action. `None` means the input was rejected and the
    /// player should be asked again.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_invalid(&mut self, error: &GuessError);
    fn display_outcome(&mut self, game: &GameState, outcome: GuessOutcome);
    fn display_win(&mut self, summary: &GameSummary);
    fn display_loss(&mut self, game: &GameState, summary: &GameSummary);
    fn display_exit_message(&mut self);
}

/// Plays `game` to the end, or until the player leaves.
pub fn play_game<I: GameInterface + ?Sized>(
    game: &mut GameState,
    start: &GameStart,
    interface: &mut I,
) -> GameSummary {
    let started = Local::now();
    let mut scorer = Scorer::new();
    interface.display_start(start, game);
    info_log!(
        "Game started on {} with a {}-letter word",
        start.difficulty,
        game.secret_word().chars().count()
    );

    while !game.status().is_over() {
        let guess = match interface.read_action() {
            Some(UserAction::Guess(raw)) => match validate_guess(&raw) {
                Ok(guess) => guess,
                Err(e) => {
                    interface.display_invalid(&e);
                    continue;
                }
            },
            Some(UserAction::Exit) => {
                info_log!("Player left the game early");
                interface.display_exit_message();
                break;
            }
            None => continue,
        };

        match game.guess(&guess) {
            Ok(outcome) => interface.display_outcome(game, outcome),
            Err(e) => interface.display_invalid(&e),
        }
    }

    let score = if game.status() == GameStatus::Won {
        scorer.record(game.turns_used(), start.difficulty)
    } else {
        0
    };
    let summary = GameSummary {
        status: game.status(),
        secret_word: game.secret_word().to_string(),
        turns_used: game.turns_used(),
        incorrect_guesses: game.incorrect_guesses().to_vec(),
        difficulty: start.difficulty,
        score,
        elapsed: Local::now() - started,
    };

    match summary.status {
        GameStatus::Won => interface.display_win(&summary),
        GameStatus::LostOutOfLives | GameStatus::LostWrongWord => {
            interface.display_loss(game, &summary);
        }
        GameStatus::InProgress => {}
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_hides_every_letter() {
        let game = GameState::new("lantern", 14);
        assert_eq!(game.revealed_pattern(), "-------");
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.lives_remaining(), 14);
        assert_eq!(game.turns_used(), 0);
    }

    #[test]
    fn test_no_lives_is_already_lost() {
        let mut game = GameState::new("ox", 0);
        assert_eq!(game.status(), GameStatus::LostOutOfLives);
        assert_eq!(game.lives_remaining(), 0);
        assert_eq!(game.guess("z"), Err(GuessError::GameOver));
        assert_eq!(game.incorrect_count(), 0);
        assert_eq!(game.lives_remaining(), 0);
    }

    #[test]
    fn test_cat_walkthrough() {
        let mut game = GameState::new("cat", 3);

        assert_eq!(game.guess("z"), Ok(GuessOutcome::NotInWord));
        assert_eq!(game.incorrect_count(), 1);

        assert_eq!(game.guess("z"), Ok(GuessOutcome::Repeat));
        assert_eq!(game.incorrect_count(), 1);

        assert_eq!(game.guess("c"), Ok(GuessOutcome::AddedToWord));
        assert_eq!(game.revealed_pattern(), "c--");

        assert_eq!(game.guess("a"), Ok(GuessOutcome::AddedToWord));
        assert_eq!(game.revealed_pattern(), "ca-");

        assert_eq!(game.guess("t"), Ok(GuessOutcome::GotWord));
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.revealed_pattern(), "cat");
        assert_eq!(game.incorrect_guesses(), ["z".to_string()]);
    }

    #[test]
    fn test_letter_reveals_every_position() {
        let mut game = GameState::new("banana", 10);
        assert_eq!(game.guess("a"), Ok(GuessOutcome::AddedToWord));
        assert_eq!(game.revealed_pattern(), "-a-a-a");
        assert_eq!(game.turns_used(), 3);
    }

    #[test]
    fn test_case_insensitive_against_capitalised_word() {
        let mut game = GameState::new("Thames", 10);
        assert_eq!(game.guess("t"), Ok(GuessOutcome::AddedToWord));
        assert_eq!(game.revealed_pattern(), "t-----");
        for letter in ["h", "a", "m", "e"] {
            assert_eq!(game.guess(letter), Ok(GuessOutcome::AddedToWord));
        }
        assert_eq!(game.guess("s"), Ok(GuessOutcome::GotWord));
        assert_eq!(game.revealed_pattern(), "thames");
    }

    #[test]
    fn test_running_out_of_lives() {
        let mut game = GameState::new("ox", 2);
        assert_eq!(game.guess("a"), Ok(GuessOutcome::NotInWord));
        assert_eq!(game.turns_used(), 1);
        assert_eq!(game.guess("b"), Ok(GuessOutcome::OutOfLives));
        assert_eq!(game.status(), GameStatus::LostOutOfLives);
        assert_eq!(game.incorrect_count(), game.lives_total());
        // The losing guess is not counted as a turn.
        assert_eq!(game.turns_used(), 1);
    }

    #[test]
    fn test_repeat_miss_is_free() {
        let mut game = GameState::new("ox", 2);
        game.guess("q").unwrap();
        for _ in 0..5 {
            assert_eq!(game.guess("q"), Ok(GuessOutcome::Repeat));
        }
        assert_eq!(game.incorrect_count(), 1);
        assert_eq!(game.turns_used(), 1);
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_wrong_word_is_instant_loss() {
        let mut game = GameState::new("harbour", 20);
        assert_eq!(game.guess("harbout"), Ok(GuessOutcome::WrongWord));
        assert_eq!(game.status(), GameStatus::LostWrongWord);
        assert_eq!(game.incorrect_count(), 20);
        assert_eq!(game.lives_remaining(), 0);
        assert_eq!(game.turns_used(), 1);
        assert_eq!(game.incorrect_guesses().last().map(String::as_str), Some("harbout"));
    }

    #[test]
    fn test_right_word_wins() {
        let mut game = GameState::new("Beacon", 6);
        game.guess("b").unwrap();
        assert_eq!(game.guess("beacon"), Ok(GuessOutcome::GotWord));
        assert_eq!(game.revealed_pattern(), "beacon");
        assert_eq!(game.turns_used(), 2);
    }

    #[test]
    fn test_guess_after_game_over_is_rejected() {
        let mut game = GameState::new("ox", 1);
        assert_eq!(game.guess("z"), Ok(GuessOutcome::OutOfLives));
        let before = game.clone();
        assert_eq!(game.guess("o"), Err(GuessError::GameOver));
        assert_eq!(game, before);
    }

    #[test]
    fn test_empty_guess_is_rejected() {
        let mut game = GameState::new("ox", 3);
        assert_eq!(game.guess(""), Err(GuessError::Empty));
        assert_eq!(game.turns_used(), 0);
    }

    #[test]
    fn test_validate_guess() {
        assert_eq!(validate_guess("  A \n"), Ok("a".to_string()));
        assert_eq!(validate_guess("Lantern"), Ok("lantern".to_string()));
        assert_eq!(validate_guess(""), Err(GuessError::Empty));
        assert_eq!(validate_guess("   \n"), Err(GuessError::Empty));
        assert_eq!(validate_guess("two words"), Err(GuessError::ContainsWhitespace));
        assert_eq!(validate_guess("tab\tbed"), Err(GuessError::ContainsWhitespace));
    }

    #[test]
    fn test_format_game_time() {
        assert_eq!(format_game_time(TimeDelta::seconds(42)), "42 second(s)");
        assert_eq!(format_game_time(TimeDelta::seconds(125)), "2 minute(s) 5 second(s)");
        assert_eq!(
            format_game_time(TimeDelta::seconds(3 * 3600 + 61)),
            "3 hour(s) 1 minute(s) 1 second(s)"
        );
        assert_eq!(format_game_time(TimeDelta::milliseconds(-5)), "0 second(s)");
    }

    #[test]
    fn test_outcome_text() {
        assert_eq!(GuessOutcome::NotInWord.to_string(), "not in word");
        assert_eq!(GuessOutcome::GotWord.to_string(), "got word");
        assert_eq!(GuessOutcome::WrongWord.as_str(), "wrong word");
    }

    struct ScriptedInterface {
        actions: Vec<UserAction>,
        outcomes: Vec<GuessOutcome>,
        invalid: Vec<GuessError>,
        won: bool,
        lost: bool,
        exited: bool,
    }

    impl ScriptedInterface {
        fn new(actions: &[&str]) -> Self {
            Self {
                actions: actions
                    .iter()
                    .rev()
                    .map(|a| {
                        if *a == ":quit" {
                            UserAction::Exit
                        } else {
                            UserAction::Guess((*a).to_string())
                        }
                    })
                    .collect(),
                outcomes: Vec::new(),
                invalid: Vec::new(),
                won: false,
                lost: false,
                exited: false,
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_start(&mut self, _start: &GameStart, _game: &GameState) {}

        fn read_action(&mut self) -> Option<UserAction> {
            Some(self.actions.pop().unwrap_or(UserAction::Exit))
        }

        fn display_invalid(&mut self, error: &GuessError) {
            self.invalid.push(error.clone());
        }

        fn display_outcome(&mut self, _game: &GameState, outcome: GuessOutcome) {
            self.outcomes.push(outcome);
        }

        fn display_win(&mut self, _summary: &GameSummary) {
            self.won = true;
        }

        fn display_loss(&mut self, _game: &GameState, _summary: &GameSummary) {
            self.lost = true;
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    fn start(difficulty: Difficulty) -> GameStart {
        GameStart {
            difficulty,
            lives_total: difficulty.lives(),
            word_length: 3,
            pool_size: 1,
            source_path: None,
            scores_recorded: 0,
            max_score: 0,
        }
    }

    #[test]
    fn test_play_game_win_is_scored() {
        let mut game = GameState::new("cat", Difficulty::Medium.lives());
        let mut interface = ScriptedInterface::new(&["CAT"]);
        let summary = play_game(&mut game, &start(Difficulty::Medium), &mut interface);
        assert_eq!(summary.status, GameStatus::Won);
        assert_eq!(summary.turns_used, 1);
        assert_eq!(summary.score, 51);
        assert!(interface.won);
        assert!(!interface.exited);
    }

    #[test]
    fn test_play_game_rejects_invalid_input_and_continues() {
        let mut game = GameState::new("ox", Difficulty::Extreme.lives());
        let mut interface = ScriptedInterface::new(&["", "o x", "o", "x"]);
        let summary = play_game(&mut game, &start(Difficulty::Extreme), &mut interface);
        assert_eq!(
            interface.invalid,
            vec![GuessError::Empty, GuessError::ContainsWhitespace]
        );
        assert_eq!(
            interface.outcomes,
            vec![GuessOutcome::AddedToWord, GuessOutcome::GotWord]
        );
        assert_eq!(summary.status, GameStatus::Won);
    }

    #[test]
    fn test_play_game_loss_scores_zero() {
        let mut game = GameState::new("ox", Difficulty::Hard.lives());
        let mut interface = ScriptedInterface::new(&["oz"]);
        let summary = play_game(&mut game, &start(Difficulty::Hard), &mut interface);
        assert_eq!(summary.status, GameStatus::LostWrongWord);
        assert_eq!(summary.score, 0);
        assert_eq!(summary.wrong_word(), Some("oz"));
        assert!(interface.lost);
    }

    #[test]
    fn test_play_game_exit_abandons() {
        let mut game = GameState::new("ox", Difficulty::Hard.lives());
        let mut interface = ScriptedInterface::new(&["o", ":quit"]);
        let summary = play_game(&mut game, &start(Difficulty::Hard), &mut interface);
        assert!(summary.is_abandoned());
        assert!(interface.exited);
        assert!(!interface.won && !interface.lost);
        assert_eq!(summary.score, 0);
    }
}
