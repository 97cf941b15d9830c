use hangman::cli::{CliInterface, parse_cli};
use hangman::config::ConfigStore;
use hangman::game_state::{GameStart, GameState, GameStatus, GameSummary, play_game};
use hangman::scores::{ScoreRecord, ScoreStore};
use hangman::storage::resolve_data_dir;
use hangman::tui::TuiInterface;
use hangman::wordbank::{EMBEDDED_SOURCE_NAME, load_word_pool};
use hangman::{info_log, logging};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = parse_cli();
    let data_dir = resolve_data_dir(cli.data_dir.as_deref());
    let use_tui = !cli.line_mode && !cli.scores && !cli.reset_scores;
    logging::init(use_tui.then_some(data_dir.as_path()));
    info_log!("Using data directory {}", data_dir.display());

    let config_store = ConfigStore::new(&data_dir);
    let score_store = ScoreStore::new(&data_dir);

    if cli.reset_scores {
        return match score_store.clear() {
            Ok(true) => {
                println!("Deleted scores data on this computer.");
                ExitCode::SUCCESS
            }
            Ok(false) => {
                println!("No scores data found in {}.", data_dir.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to delete scores: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let history = score_store.load();
    if cli.scores {
        println!("Scores on this computer: {}", history.len());
        println!("Current max score: {}", history.max_score());
        for record in history.iter() {
            let result = if record.won { "won" } else { "lost" };
            let when = record
                .recorded_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            println!(
                "{:>5}  {:<8} {:<4} {:>3} turn(s)  {}",
                record.score, record.difficulty, result, record.turns_used, when
            );
        }
        return ExitCode::SUCCESS;
    }

    let mut config = if cli.reset_config {
        config_store.reset().unwrap_or_else(|e| {
            eprintln!("Failed to reset settings: {e}");
            Default::default()
        })
    } else {
        config_store.load()
    };
    cli.apply_to(&mut config);
    let mut config = config.normalized();
    // Stored paths must still work when the game is started elsewhere.
    if let Some(path) = config.file_path.as_mut()
        && let Ok(absolute) = std::path::absolute(&*path)
    {
        *path = absolute;
    }

    let pool = match load_word_pool(&config) {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Please restart and choose another word source.");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config_store.save(&config) {
        eprintln!("Failed to save settings: {e}");
    }

    let Some(secret_word) = pool.choose(&mut rand::rng()) else {
        eprintln!("No words available.");
        return ExitCode::FAILURE;
    };
    let mut game = GameState::new(secret_word, config.difficulty.lives());
    let start = GameStart {
        difficulty: config.difficulty,
        lives_total: config.difficulty.lives(),
        word_length: secret_word.chars().count(),
        pool_size: pool.len(),
        source_path: match &config.file_path {
            Some(_) => config.visible_file_path().map(|p| p.to_path_buf()),
            None => Some(EMBEDDED_SOURCE_NAME.into()),
        },
        scores_recorded: history.len(),
        max_score: history.max_score(),
    };

    let summary = if use_tui {
        match TuiInterface::new() {
            Ok(mut interface) => play_game(&mut game, &start, &mut interface),
            Err(e) => {
                eprintln!("Failed to start the full-screen interface ({e}); using line mode.");
                play_in_line_mode(&mut game, &start)
            }
        }
    } else {
        play_in_line_mode(&mut game, &start)
    };

    if !summary.is_abandoned() {
        let won = summary.status == GameStatus::Won;
        let record = ScoreRecord::new(summary.score, summary.difficulty, summary.turns_used, won);
        if let Err(e) = score_store.append(record) {
            eprintln!("Failed to save score: {e}");
        }
    }
    ExitCode::SUCCESS
}

fn play_in_line_mode(game: &mut GameState, start: &GameStart) -> GameSummary {
    let mut interface = CliInterface::new(io::stdin().lock());
    play_game(game, start, &mut interface)
}
