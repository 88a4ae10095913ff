//! Game state management for the browser crossword

use crossword_core::{
    Arrow, CellCheck, CheckReport, Clock, CrosswordError, Direction, Generator, Position, PuzzleSession,
    PuzzleSize, WordClue,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ticks a check result stays visible (~2 seconds when ticked every 100ms)
pub const CHECK_TICKS: u32 = 20;

/// Ticks a status message stays visible
const MESSAGE_TICKS: u32 = 30;

/// Screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenState {
    Playing,
    Win,
}

/// One grid cell as the page draws it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub row: usize,
    pub col: usize,
    pub blocked: bool,
    /// Clue number starting here
    pub number: Option<u32>,
    /// What the player typed
    pub input: Option<char>,
    /// Present only while a check result is showing
    pub check: Option<CellCheck>,
    pub selected: bool,
    pub in_active_word: bool,
}

/// One clue as the page lists it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSnapshot {
    pub direction: Direction,
    pub number: u32,
    pub clue: String,
    pub length: usize,
    pub complete: bool,
    pub active: bool,
}

/// Everything the page needs to render one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Row-major
    pub cells: Vec<CellSnapshot>,
    pub words: Vec<WordSnapshot>,
    pub direction: Direction,
    pub completed_count: usize,
    pub total: usize,
    pub solved: bool,
    pub elapsed: String,
    pub screen: ScreenState,
    pub size: PuzzleSize,
    pub message: Option<String>,
}

/// The game state
pub struct GameState {
    /// Current puzzle and the player's progress
    session: PuzzleSession,
    /// Words new puzzles are drawn from
    pool: Vec<WordClue>,
    generator: Generator,
    size: PuzzleSize,
    clock: Clock,
    screen: ScreenState,
    /// Last check, cleared when its timer runs out
    check: Option<CheckReport>,
    check_timer: u32,
    message: Option<String>,
    message_timer: u32,
    /// Set once the win screen has been shown for this puzzle
    celebrated: bool,
}

impl GameState {
    /// Build the first puzzle from `pool`
    pub fn new(
        pool: Vec<WordClue>,
        mut generator: Generator,
        size: PuzzleSize,
        clock: Clock,
    ) -> Result<Self, CrosswordError> {
        let crossword = generator.generate(&pool, size)?;
        Ok(Self {
            session: PuzzleSession::with_clock(crossword, clock),
            pool,
            generator,
            size,
            clock,
            screen: ScreenState::Playing,
            check: None,
            check_timer: 0,
            message: None,
            message_timer: 0,
            celebrated: false,
        })
    }

    pub fn session(&self) -> &PuzzleSession {
        &self.session
    }

    pub fn screen(&self) -> ScreenState {
        self.screen
    }

    pub fn size(&self) -> PuzzleSize {
        self.size
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn check(&self) -> Option<&CheckReport> {
        self.check.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.session.is_solved()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.session.elapsed_secs()
    }

    pub fn elapsed_string(&self) -> String {
        self.session.elapsed_string()
    }

    fn show_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_timer = MESSAGE_TICKS;
    }

    /// Replace the puzzle with a fresh one at `size`. On failure the current
    /// puzzle stays and the error is shown as a message.
    pub fn new_puzzle(&mut self, size: PuzzleSize) -> bool {
        match self.generator.generate(&self.pool, size) {
            Ok(crossword) => {
                let placed = crossword.words().len();
                let requested = placed + crossword.unplaced().len();
                self.session = PuzzleSession::with_clock(crossword, self.clock);
                self.size = size;
                self.screen = ScreenState::Playing;
                self.check = None;
                self.check_timer = 0;
                self.celebrated = false;
                if placed < requested {
                    self.show_message(format!("Placed {} of {} words", placed, requested));
                } else {
                    self.show_message(format!("New {} puzzle", size));
                }
                true
            }
            Err(err) => {
                debug!(error = %err, "puzzle generation failed");
                self.show_message(err.to_string());
                false
            }
        }
    }

    /// Update game state (called from the page's timer)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if self.check_timer > 0 {
            self.check_timer -= 1;
            if self.check_timer == 0 {
                self.check = None;
            }
        }

        if !self.celebrated && self.is_complete() {
            self.celebrated = true;
            self.screen = ScreenState::Win;
        }
    }

    /// Select the clicked cell
    pub fn select_cell(&mut self, row: usize, col: usize) -> bool {
        if self.screen != ScreenState::Playing {
            return false;
        }
        self.session.select_cell(Position::new(row, col))
    }

    /// Handle a `KeyboardEvent.key` name, returns true if anything was handled
    pub fn handle_key(&mut self, key: &str, ctrl: bool) -> bool {
        match self.screen {
            ScreenState::Win => self.handle_endgame_key(key),
            ScreenState::Playing => self.handle_game_key(key, ctrl),
        }
    }

    fn handle_endgame_key(&mut self, key: &str) -> bool {
        match key {
            "Enter" | " " | "n" | "N" => self.new_puzzle(self.size),
            "Escape" => {
                // Back to the finished grid
                self.screen = ScreenState::Playing;
                true
            }
            _ => false,
        }
    }

    fn handle_game_key(&mut self, key: &str, ctrl: bool) -> bool {
        if ctrl {
            return match key {
                "e" | "E" => {
                    self.check_puzzle();
                    true
                }
                "r" | "R" => {
                    self.reveal();
                    true
                }
                _ => false,
            };
        }

        if let Some(arrow) = Arrow::from_key_name(key) {
            self.ensure_selection();
            self.session.move_by_arrow(arrow);
            return true;
        }

        match key {
            "Tab" => {
                self.session.toggle_direction();
                true
            }
            "]" => self.cycle_clue(1),
            "[" => self.cycle_clue(-1),
            "Backspace" => {
                self.session.backspace();
                true
            }
            "Delete" => {
                self.session.clear_cell();
                true
            }
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_alphabetic() => {
                        self.ensure_selection();
                        self.session.type_character(c)
                    }
                    _ => false,
                }
            }
        }
    }

    /// Check every filled cell and keep the result visible for a while
    pub fn check_puzzle(&mut self) {
        let report = self.session.check_all();
        let (correct, incorrect) = (report.correct_count(), report.incorrect_count());
        if correct + incorrect == 0 {
            self.show_message("Nothing to check yet");
        } else if incorrect == 0 {
            self.show_message(format!("All {} letters correct", correct));
        } else {
            self.show_message(format!("{} correct, {} incorrect", correct, incorrect));
        }
        self.check = Some(report);
        self.check_timer = CHECK_TICKS;
    }

    /// Fill in the selected word
    pub fn reveal(&mut self) -> bool {
        if self.session.selected().is_none() {
            self.show_message("Please select a word first");
            return false;
        }
        match self.session.reveal_selected_word() {
            Some(index) => {
                let word = &self.session.words()[index];
                let msg = format!("Revealed {} {}", word.number, word.direction);
                self.show_message(msg);
                true
            }
            None => false,
        }
    }

    /// First letter or arrow before any click lands on the first clue.
    /// Until then nothing is selected and the clock has not started.
    fn ensure_selection(&mut self) {
        if self.session.selected().is_none() {
            self.session.select_word(0);
        }
    }

    /// Select the next (or previous) clue in placement order
    fn cycle_clue(&mut self, step: isize) -> bool {
        let total = self.session.total_words() as isize;
        if total == 0 {
            return false;
        }
        let next = match self.session.active_word_index() {
            Some(current) => (current as isize + step).rem_euclid(total),
            None if step > 0 => 0,
            None => total - 1,
        };
        self.session.select_word(next as usize)
    }

    fn in_active_word(&self, pos: Position) -> bool {
        self.session
            .active_word()
            .map(|word| word.contains(pos))
            .unwrap_or(false)
    }

    /// Everything the page needs to draw the current frame
    pub fn snapshot(&self) -> PuzzleSnapshot {
        let crossword = self.session.crossword();
        let grid = crossword.grid();
        let selected = self.session.selected();

        let cells = grid
            .positions()
            .map(|pos| CellSnapshot {
                row: pos.row,
                col: pos.col,
                blocked: !grid.is_letter(pos),
                number: crossword.number_at(pos),
                input: self.session.input(pos),
                check: self.check.as_ref().and_then(|report| report.get(pos)),
                selected: selected == Some(pos),
                in_active_word: self.in_active_word(pos),
            })
            .collect();

        let active = self.session.active_word_index();
        let completed = self.session.completed_words();
        let words = self
            .session
            .words()
            .iter()
            .enumerate()
            .map(|(i, word)| WordSnapshot {
                direction: word.direction,
                number: word.number,
                clue: word.clue.clone(),
                length: word.len(),
                complete: completed.get(i).copied().unwrap_or(false),
                active: active == Some(i),
            })
            .collect();

        PuzzleSnapshot {
            rows: grid.rows(),
            cols: grid.cols(),
            cells,
            words,
            direction: self.session.direction(),
            completed_count: self.session.completed_count(),
            total: self.session.total_words(),
            solved: self.session.is_solved(),
            elapsed: self.session.elapsed_string(),
            screen: self.screen,
            size: self.size,
            message: self.message.clone(),
        }
    }
}
