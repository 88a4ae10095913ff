//! Mutable solving state layered over a constructed crossword.
//!
//! Every operation is a silent no-op on input it cannot apply (a blocked or
//! out-of-range cell, nothing selected, a solved puzzle); the `bool`/`Option`
//! return only tells the caller whether anything changed.

use crate::{Arrow, Crossword, Direction, Grid, PlacedWord, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, trace};

/// Millisecond timestamp source
pub type Clock = fn() -> u64;

/// Wall-clock milliseconds since the Unix epoch
pub fn system_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No cell selected yet; the clock is not running
    Empty,
    /// Clock running
    Active,
    /// Every word complete. Terminal.
    Solved,
}

/// Result of checking one filled cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellCheck {
    Correct,
    Incorrect,
}

/// Per-cell outcome of [`PuzzleSession::check_all`]. Empty cells are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    cells: BTreeMap<Position, CellCheck>,
}

impl CheckReport {
    pub fn get(&self, pos: Position) -> Option<CellCheck> {
        self.cells.get(&pos).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, CellCheck)> + '_ {
        self.cells.iter().map(|(pos, check)| (*pos, *check))
    }

    pub fn correct_count(&self) -> usize {
        self.cells.values().filter(|c| **c == CellCheck::Correct).count()
    }

    pub fn incorrect_count(&self) -> usize {
        self.cells.values().filter(|c| **c == CellCheck::Incorrect).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A player's progress on one crossword
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    crossword: Crossword,
    /// Typed letters, always uppercase
    inputs: BTreeMap<Position, char>,
    selected: Option<Position>,
    direction: Direction,
    /// When the first cell was selected
    started_at: Option<u64>,
    /// When the last word was completed
    solved_at: Option<u64>,
    clock: Clock,
}

impl PuzzleSession {
    pub fn new(crossword: Crossword) -> Self {
        Self::with_clock(crossword, system_clock)
    }

    /// Create a session reading time from `clock`
    pub fn with_clock(crossword: Crossword, clock: Clock) -> Self {
        Self {
            crossword,
            inputs: BTreeMap::new(),
            selected: None,
            direction: Direction::Across,
            started_at: None,
            solved_at: None,
            clock,
        }
    }

    pub fn crossword(&self) -> &Crossword {
        &self.crossword
    }

    pub fn grid(&self) -> &Grid {
        self.crossword.grid()
    }

    pub fn words(&self) -> &[PlacedWord] {
        self.crossword.words()
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Letter typed at `pos`
    pub fn input(&self, pos: Position) -> Option<char> {
        self.inputs.get(&pos).copied()
    }

    pub fn inputs(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.inputs.iter().map(|(pos, c)| (*pos, *c))
    }

    /// Timestamp of the first selection
    pub fn started_at(&self) -> Option<u64> {
        self.started_at
    }

    pub fn phase(&self) -> SessionPhase {
        if self.solved_at.is_some() {
            SessionPhase::Solved
        } else if self.started_at.is_some() {
            SessionPhase::Active
        } else {
            SessionPhase::Empty
        }
    }

    /// Select a letter cell. Starts the clock on the first selection.
    pub fn select_cell(&mut self, pos: Position) -> bool {
        if !self.grid().is_letter(pos) {
            trace!(%pos, "ignoring selection of a blocked or out-of-range cell");
            return false;
        }
        self.selected = Some(pos);
        if self.started_at.is_none() {
            self.started_at = Some((self.clock)());
            debug!(%pos, "session clock started");
        }
        true
    }

    /// Select the start of word `index`, switching to its direction
    pub fn select_word(&mut self, index: usize) -> bool {
        let Some(word) = self.words().get(index) else {
            return false;
        };
        let (start, direction) = (word.start(), word.direction);
        self.direction = direction;
        self.select_cell(start)
    }

    /// Index of the word through the selection in the current direction
    pub fn active_word_index(&self) -> Option<usize> {
        self.crossword.word_index_at(self.selected?, self.direction)
    }

    pub fn active_word(&self) -> Option<&PlacedWord> {
        self.active_word_index().map(|i| &self.words()[i])
    }

    /// Store a letter at the selection and advance in the current direction
    pub fn type_character(&mut self, ch: char) -> bool {
        if self.is_solved() || !ch.is_alphabetic() {
            return false;
        }
        let Some(pos) = self.selected else {
            trace!("ignoring typed character with nothing selected");
            return false;
        };
        let Some(letter) = ch.to_uppercase().next() else {
            return false;
        };

        self.inputs.insert(pos, letter);
        let next = pos.step(self.direction, 1);
        if self.grid().is_letter(next) {
            self.selected = Some(next);
        }
        self.update_solved();
        true
    }

    /// Clear the selected cell; if it is already empty, step back and clear that cell instead
    pub fn backspace(&mut self) -> bool {
        if self.is_solved() {
            return false;
        }
        let Some(pos) = self.selected else {
            return false;
        };
        if self.inputs.remove(&pos).is_some() {
            return true;
        }

        let (dr, dc) = self.direction.delta();
        let previous = pos
            .offset(-dr, -dc)
            .filter(|prev| self.grid().is_letter(*prev));
        match previous {
            Some(prev) => {
                self.selected = Some(prev);
                self.inputs.remove(&prev);
                true
            }
            None => false,
        }
    }

    /// Clear the selected cell without moving
    pub fn clear_cell(&mut self) -> bool {
        if self.is_solved() {
            return false;
        }
        self.selected
            .and_then(|pos| self.inputs.remove(&pos))
            .is_some()
    }

    /// Flip between across and down, keeping the selection
    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.perpendicular();
    }

    /// Move the selection one cell, forcing the arrow's direction
    pub fn move_by_arrow(&mut self, arrow: Arrow) -> bool {
        let Some(pos) = self.selected else {
            return false;
        };
        self.direction = arrow.direction();

        let (dr, dc) = arrow.delta();
        match pos.offset(dr, dc) {
            Some(target) if self.grid().is_letter(target) => self.select_cell(target),
            _ => {
                trace!(%pos, ?arrow, "arrow move blocked");
                false
            }
        }
    }

    /// Whether every letter of `word` has been typed correctly
    pub fn is_word_complete(&self, word: &PlacedWord) -> bool {
        word.letters()
            .all(|(pos, letter)| self.input(pos) == Some(letter))
    }

    /// Completion flag per word, in number order
    pub fn completed_words(&self) -> Vec<bool> {
        self.words().iter().map(|w| self.is_word_complete(w)).collect()
    }

    pub fn completed_count(&self) -> usize {
        self.words()
            .iter()
            .filter(|w| self.is_word_complete(w))
            .count()
    }

    pub fn total_words(&self) -> usize {
        self.words().len()
    }

    pub fn is_solved(&self) -> bool {
        self.total_words() > 0 && self.completed_count() == self.total_words()
    }

    /// Classify every filled letter cell as correct or incorrect
    pub fn check_all(&self) -> CheckReport {
        let mut report = CheckReport::default();
        for word in self.words() {
            for (pos, letter) in word.letters() {
                if let Some(input) = self.input(pos) {
                    let check = if input == letter {
                        CellCheck::Correct
                    } else {
                        CellCheck::Incorrect
                    };
                    report.cells.insert(pos, check);
                }
            }
        }
        report
    }

    /// Fill in the word through `pos`, preferring the current direction.
    ///
    /// Returns the index of the revealed word.
    pub fn reveal_word_at(&mut self, pos: Position) -> Option<usize> {
        if self.is_solved() {
            return None;
        }
        let index = self
            .crossword
            .word_index_at(pos, self.direction)
            .or_else(|| self.crossword.word_index_at(pos, self.direction.perpendicular()))?;

        let letters: Vec<_> = self.words()[index].letters().collect();
        self.inputs.extend(letters);
        debug!(number = self.words()[index].number, "word revealed");
        self.update_solved();
        Some(index)
    }

    pub fn reveal_selected_word(&mut self) -> Option<usize> {
        self.reveal_word_at(self.selected?)
    }

    /// Elapsed solving time in milliseconds; frozen once solved
    pub fn elapsed_ms(&self) -> u64 {
        match (self.started_at, self.solved_at) {
            (Some(start), Some(end)) => end.saturating_sub(start),
            (Some(start), None) => (self.clock)().saturating_sub(start),
            (None, _) => 0,
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_ms() / 1000
    }

    /// Format the elapsed time as MM:SS
    pub fn elapsed_string(&self) -> String {
        let secs = self.elapsed_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    fn update_solved(&mut self) {
        if self.solved_at.is_none() && self.is_solved() {
            let now = (self.clock)();
            self.solved_at = Some(now);
            // Solving without ever selecting still gets a zero-length clock
            self.started_at.get_or_insert(now);
            debug!(words = self.total_words(), elapsed_ms = self.elapsed_ms(), "puzzle solved");
        }
    }
}
