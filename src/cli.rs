use crate::config::{Config, MINIMUM_MINIMUM_WORD_LENGTH};
use crate::difficulty::Difficulty;
use crate::drawing::render_gallows;
use crate::game_state::{
    GameInterface, GameStart, GameState, GameSummary, GuessError, GuessOutcome, RULES,
    UserAction, format_game_time,
};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

pub const QUIT_COMMAND: &str = ":quit";
pub const HELP_COMMAND: &str = ":help";

/// Hangman: guess the word before the gallows is finished
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = RULES)]
pub struct Cli {
    /// Text file to draw words from (any whitespace-separated text)
    #[arg(short = 'i', long = "input")]
    pub word_source: Option<PathBuf>,

    /// Game difficulty; sets the number of lives
    #[arg(short, long, value_enum)]
    pub difficulty: Option<Difficulty>,

    /// Shortest word that can be chosen (at least 2)
    #[arg(short = 'm', long = "min-length", value_parser = parse_min_length)]
    pub minimum_word_length: Option<usize>,

    /// Skip words that already appeared in the source, ignoring case
    #[arg(long, overrides_with = "keep_duplicates")]
    pub no_duplicates: bool,

    /// Allow the same word to appear in the pool more than once
    #[arg(long, overrides_with = "no_duplicates")]
    pub keep_duplicates: bool,

    /// Skip capitalised words
    #[arg(long, overrides_with = "keep_proper_nouns")]
    pub no_proper_nouns: bool,

    /// Allow capitalised words
    #[arg(long, overrides_with = "no_proper_nouns")]
    pub keep_proper_nouns: bool,

    /// Do not show the word source path during the game
    #[arg(long, overrides_with = "show_path")]
    pub hide_path: bool,

    /// Show the word source path during the game
    #[arg(long, overrides_with = "hide_path")]
    pub show_path: bool,

    /// Directory holding settings and scores
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Play in plain line mode instead of the full-screen interface
    #[arg(long = "cli")]
    pub line_mode: bool,

    /// Restore the default settings before playing
    #[arg(long)]
    pub reset_config: bool,

    /// Delete all recorded scores and exit
    #[arg(long)]
    pub reset_scores: bool,

    /// Print the recorded scores and exit
    #[arg(long)]
    pub scores: bool,
}

fn parse_min_length(value: &str) -> Result<usize, String> {
    let length: usize = value
        .parse()
        .map_err(|_| format!("'{value}' is not a whole number"))?;
    if length < MINIMUM_MINIMUM_WORD_LENGTH {
        return Err(format!(
            "minimum word length must be at least {MINIMUM_MINIMUM_WORD_LENGTH}"
        ));
    }
    Ok(length)
}

impl Cli {
    /// Overrides the stored settings with whatever was given on the command
    /// line.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(path) = &self.word_source {
            config.file_path = Some(path.clone());
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(length) = self.minimum_word_length {
            config.minimum_word_length = length;
        }
        if self.no_duplicates {
            config.keep_duplicates = false;
        } else if self.keep_duplicates {
            config.keep_duplicates = true;
        }
        if self.no_proper_nouns {
            config.keep_proper_nouns = false;
        } else if self.keep_proper_nouns {
            config.keep_proper_nouns = true;
        }
        if self.hide_path {
            config.display_file_path = false;
        } else if self.show_path {
            config.display_file_path = true;
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

pub fn display_start(start: &GameStart, game: &GameState) {
    println!(
        "Hangman - {} difficulty ({} lives)",
        start.difficulty, start.lives_total
    );
    match &start.source_path {
        Some(path) => println!("Words: {} from {}", start.pool_size, path.display()),
        None => println!("Words: {}", start.pool_size),
    }
    println!(
        "Scores on this computer: {} | Current max score: {}",
        start.scores_recorded, start.max_score
    );
    println!("The word has {} letters.", start.word_length);
    display_progress(game);
}

pub fn display_progress(game: &GameState) {
    println!(
        "\nWord: {}   Lives: {}/{}",
        game.revealed_pattern(),
        game.lives_remaining(),
        game.lives_total()
    );
    if !game.incorrect_guesses().is_empty() {
        println!("Incorrect: {}", game.incorrect_guesses().join(", "));
    }
}

pub fn display_gallows(incorrect: u32) {
    for line in render_gallows(incorrect) {
        println!("{line}");
    }
}

/// Reads one line of input. End of input counts as leaving the game.
/// Asking for help prints the rules and returns `None`.
pub fn read_action<R: BufRead>(reader: &mut R) -> Option<UserAction> {
    println!(
        "\nGuess a letter or the whole word ('{HELP_COMMAND}' for rules, '{QUIT_COMMAND}' to leave):"
    );
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => Some(UserAction::Exit),
        Ok(_) if input.trim() == QUIT_COMMAND => Some(UserAction::Exit),
        Ok(_) if input.trim() == HELP_COMMAND => {
            println!("\n{RULES}");
            None
        }
        Ok(_) => Some(UserAction::Guess(input)),
    }
}

pub fn display_invalid(error: &GuessError) {
    println!("Invalid guess: {error}.");
}

pub fn display_outcome(game: &GameState, outcome: GuessOutcome) {
    match outcome {
        GuessOutcome::Repeat => println!("You already guessed that letter."),
        GuessOutcome::NotInWord => {
            println!("Not in the word.");
            display_gallows(game.incorrect_count());
        }
        GuessOutcome::AddedToWord => println!("Good guess!"),
        GuessOutcome::GotWord | GuessOutcome::OutOfLives | GuessOutcome::WrongWord => {}
    }
    if !game.status().is_over() {
        display_progress(game);
    }
}

pub fn display_win(summary: &GameSummary) {
    println!(
        "\nCongratulations, you guessed \"{}\" on {} difficulty in {} turn(s) in {}.",
        summary.secret_word,
        summary.difficulty,
        summary.turns_used,
        format_game_time(summary.elapsed)
    );
    println!("Score: {}", summary.score);
}

pub fn display_loss(game: &GameState, summary: &GameSummary) {
    display_gallows(game.incorrect_count());
    match summary.wrong_word() {
        Some(word) => println!("\nThe word you guessed ({word}) is incorrect."),
        None => println!("\nYou have run out of lives."),
    }
    println!("The word was \"{}\".", summary.secret_word);
}

pub fn display_exit_message() {
    println!("Leaving the game. This game's score will not be recorded.");
}

/// CLI implementation of the `GameInterface` trait over any line reader.
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_start(&mut self, start: &GameStart, game: &GameState) {
        display_start(start, game);
    }

    fn read_action(&mut self) -> Option<UserAction> {
        read_action(&mut self.reader)
    }

    fn display_invalid(&mut self, error: &GuessError) {
        display_invalid(error);
    }

    fn display_outcome(&mut self, game: &GameState, outcome: GuessOutcome) {
        display_outcome(game, outcome);
    }

    fn display_win(&mut self, summary: &GameSummary) {
        display_win(summary);
    }

    fn display_loss(&mut self, game: &GameState, summary: &GameSummary) {
        display_loss(game, summary);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
