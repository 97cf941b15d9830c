//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides a full-screen terminal interface using Ratatui.
//!
//! # Layout
//! Title bar, the gallows on the left, the word and guess history on the
//! right, then a status line and key help.
//!
//! # State Machine
//! - `EnteringGuess` → (game ends) → `GameOver` → any key returns control
//!   to the caller.

use crate::drawing::render_gallows;
use crate::game_state::{
    GameInterface, GameStart, GameState, GameSummary, GuessError, GuessOutcome, RULES,
    UserAction, format_game_time,
};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const MAX_INPUT_LENGTH: usize = 45;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const LOSS_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringGuess,
    /// Game has ended - result stored in `message` and `message_style`
    GameOver,
}

/// Everything about the current game the screen shows.
#[derive(Debug, Default)]
struct Board {
    pattern: String,
    lives_remaining: u32,
    lives_total: u32,
    incorrect_count: u32,
    incorrect_guesses: Vec<String>,
    difficulty: String,
    source: Option<String>,
    score_line: String,
}

impl Board {
    fn update(&mut self, game: &GameState) {
        self.pattern = game.revealed_pattern();
        self.lives_remaining = game.lives_remaining();
        self.lives_total = game.lives_total();
        self.incorrect_count = game.incorrect_count();
        self.incorrect_guesses = game.incorrect_guesses().to_vec();
    }
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    board: &'a Board,
    current_input: &'a str,
    state: TuiState,
    show_rules: bool,
    message: &'a str,
    message_style: Style,
    error_message: &'a str,
    status: &'a str,
}

/// Full-screen implementation of [`GameInterface`].
///
/// Restores the terminal when dropped.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    board: Board,
    current_input: String,
    state: TuiState,
    show_rules: bool,
    message: String,
    message_style: Style,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            board: Board::default(),
            current_input: String::new(),
            state: TuiState::EnteringGuess,
            show_rules: false,
            message: String::new(),
            message_style: MESSAGE_STYLE,
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            board: &self.board,
            current_input: &self.current_input,
            state: self.state,
            show_rules: self.show_rules,
            message: &self.message,
            message_style: self.message_style,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Min(20),    // Gallows and word
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(26), Constraint::Min(30)])
            .split(rows[1]);

        Self::render_title(f, rows[0], ctx.board);
        Self::render_gallows(f, columns[0], ctx.board.incorrect_count);
        if ctx.show_rules {
            Self::render_rules(f, columns[1]);
        } else {
            Self::render_info(f, columns[1], ctx);
        }
        Self::render_status(f, rows[2], ctx.status);
        Self::render_instructions(f, rows[3], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect, board: &Board) {
        let title = if board.difficulty.is_empty() {
            "HANGMAN".to_string()
        } else {
            format!("HANGMAN - {} difficulty", board.difficulty)
        };
        let paragraph = Paragraph::new(title)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect, incorrect: u32) {
        let lines: Vec<Line> = render_gallows(incorrect).into_iter().map(Line::from).collect();
        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Gallows").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let board = ctx.board;
        let mut lines = Vec::new();

        // Word
        let spaced: Vec<String> = board.pattern.chars().map(|c| c.to_string()).collect();
        lines.push(Line::from(vec![
            Span::styled("Word: ", HEADER_STYLE),
            Span::styled(spaced.join(" "), WORD_STYLE),
        ]));
        lines.push(Line::from(""));

        // Lives
        let lives_style = if board.lives_remaining * 4 <= board.lives_total {
            ERROR_STYLE
        } else {
            INFO_STYLE
        };
        lines.push(Line::from(vec![Span::styled(
            format!("Lives: {}/{}", board.lives_remaining, board.lives_total),
            lives_style,
        )]));

        // Incorrect guesses
        let incorrect = if board.incorrect_guesses.is_empty() {
            "none".to_string()
        } else {
            board.incorrect_guesses.join(", ")
        };
        lines.push(Line::from(format!("Incorrect: {incorrect}")));
        lines.push(Line::from(""));

        if let Some(source) = &board.source {
            lines.push(Line::from(format!("Source: {source}")));
        }
        if !board.score_line.is_empty() {
            lines.push(Line::from(board.score_line.as_str()));
        }
        lines.push(Line::from(""));

        // Input
        if ctx.state == TuiState::EnteringGuess {
            lines.push(Line::from(vec![
                Span::styled("Guess: ", HEADER_STYLE),
                Span::raw(format!("{}_", ctx.current_input)),
            ]));
            lines.push(Line::from(""));
        }

        // Messages
        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, ctx.message_style)]));
        }

        // Error messages
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Game").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_rules(f: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(RULES)
            .block(Block::default().title("Rules").borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::EnteringGuess => {
                "Type a letter or the whole word | ENTER: Submit | BACKSPACE: Delete | ?: Rules | ESC: Quit"
            }
            TuiState::GameOver => "Press any key to finish",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Waits briefly for a key press. Returns `Ok(None)` when nothing usable
    /// arrived.
    fn next_key() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to avoid double input
                if key.kind != KeyEventKind::Press {
                    return Ok(None);
                }
                // Alt-tab can leave replacement or control characters behind
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!("next_key() - Ignoring invalid character: {:?}", c);
                    return Ok(None);
                }
                Ok(Some(key))
            }
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Esc => {
                info_log!("handle_guess_input() - ESC pressed, returning Exit");
                return Some(UserAction::Exit);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(UserAction::Exit);
            }
            _ if Self::has_modifier_keys(&key) => {
                debug_log!("handle_guess_input() - Ignoring key with modifier: {:?}", key.modifiers);
            }
            KeyCode::Char('?') if self.current_input.is_empty() => {
                self.show_rules = !self.show_rules;
            }
            KeyCode::Char(c) if c.is_whitespace() => {
                self.error_message = GuessError::ContainsWhitespace.to_string();
            }
            KeyCode::Char(c) if self.current_input.chars().count() < MAX_INPUT_LENGTH => {
                self.error_message.clear();
                self.show_rules = false;
                self.current_input.push(c);
            }
            KeyCode::Backspace => {
                self.error_message.clear();
                self.current_input.pop();
            }
            KeyCode::Enter if self.current_input.is_empty() => {
                self.error_message = GuessError::Empty.to_string();
            }
            KeyCode::Enter => {
                let guess = std::mem::take(&mut self.current_input);
                self.error_message.clear();
                info_log!("handle_guess_input() - Submitting guess '{}'", guess);
                return Some(UserAction::Guess(guess));
            }
            _ => {
                debug_log!("handle_guess_input() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }

    /// Shows the final screen until the player presses a key.
    fn wait_for_dismissal(&mut self) {
        self.state = TuiState::GameOver;
        self.show_rules = false;
        loop {
            if self.draw().is_err() {
                return;
            }
            match Self::next_key() {
                Ok(Some(_)) | Err(_) => return,
                Ok(None) => {}
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_start(&mut self, start: &GameStart, game: &GameState) {
        self.board.update(game);
        self.board.difficulty = start.difficulty.to_string();
        self.board.source = start
            .source_path
            .as_ref()
            .map(|p| p.display().to_string());
        self.board.score_line = format!(
            "Scores on this computer: {} | Max score: {}",
            start.scores_recorded, start.max_score
        );
        self.message = format!(
            "A {}-letter word was chosen from {} words.",
            start.word_length, start.pool_size
        );
        self.status = "Enter your first guess".to_string();
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        self.state = TuiState::EnteringGuess;
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match Self::next_key() {
                Ok(Some(key)) => {
                    if let Some(action) = self.handle_guess_input(key) {
                        return Some(action);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Input error {}, returning Exit", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_invalid(&mut self, error: &GuessError) {
        self.error_message = format!("Invalid guess: {error}");
        self.draw_or_log();
    }

    fn display_outcome(&mut self, game: &GameState, outcome: GuessOutcome) {
        self.board.update(game);
        self.message_style = MESSAGE_STYLE;
        self.message = match outcome {
            GuessOutcome::NotInWord => "Not in the word.".to_string(),
            GuessOutcome::Repeat => "You already guessed that letter.".to_string(),
            GuessOutcome::AddedToWord => "Good guess!".to_string(),
            GuessOutcome::GotWord | GuessOutcome::OutOfLives | GuessOutcome::WrongWord => {
                String::new()
            }
        };
        self.status = format!("Turns used: {}", game.turns_used());
        self.draw_or_log();
    }

    fn display_win(&mut self, summary: &GameSummary) {
        self.message = format!(
            "Congratulations, you won on {} difficulty in {} turn(s) in {}. Score: {}",
            summary.difficulty,
            summary.turns_used,
            format_game_time(summary.elapsed),
            summary.score
        );
        self.message_style = SUCCESS_STYLE;
        self.status = format!("Game Over - You won! The word was {}", summary.secret_word);
        self.wait_for_dismissal();
    }

    fn display_loss(&mut self, game: &GameState, summary: &GameSummary) {
        self.board.update(game);
        self.board.pattern.clone_from(&summary.secret_word);
        self.message = match summary.wrong_word() {
            Some(word) => format!("The word you guessed ({word}) is incorrect."),
            None => "You have run out of lives.".to_string(),
        };
        self.message_style = LOSS_STYLE;
        self.status = format!("Game Over - The word was {}", summary.secret_word);
        self.wait_for_dismissal();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "This game's score will not be recorded".to_string();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
