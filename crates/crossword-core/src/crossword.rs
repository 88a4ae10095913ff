use crate::{Direction, Grid, PlacedWord, Position, WordClue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A constructed puzzle: the trimmed grid plus its numbered words
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crossword {
    grid: Grid,
    words: Vec<PlacedWord>,
    /// Input words that did not make it into the grid
    unplaced: Vec<WordClue>,
    /// Construction attempts actually run
    attempts: usize,
}

impl Crossword {
    pub fn new(grid: Grid, words: Vec<PlacedWord>, unplaced: Vec<WordClue>, attempts: usize) -> Self {
        Self {
            grid,
            words,
            unplaced,
            attempts,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Placed words in placement (and numbering) order
    pub fn words(&self) -> &[PlacedWord] {
        &self.words
    }

    pub fn unplaced(&self) -> &[WordClue] {
        &self.unplaced
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Clue number shown in the cell at `pos`, if a word starts there.
    ///
    /// When an across and a down word share a start cell the lower number wins.
    pub fn number_at(&self, pos: Position) -> Option<u32> {
        self.words
            .iter()
            .filter(|w| w.start() == pos)
            .map(|w| w.number)
            .min()
    }

    /// Index of the word covering `pos` in `direction`
    pub fn word_index_at(&self, pos: Position, direction: Direction) -> Option<usize> {
        self.words
            .iter()
            .position(|w| w.direction == direction && w.contains(pos))
    }

    pub fn word_at(&self, pos: Position, direction: Direction) -> Option<&PlacedWord> {
        self.word_index_at(pos, direction).map(|i| &self.words[i])
    }

    /// Across clues, in number order
    pub fn across(&self) -> impl Iterator<Item = &PlacedWord> {
        self.words.iter().filter(|w| w.direction == Direction::Across)
    }

    /// Down clues, in number order
    pub fn down(&self) -> impl Iterator<Item = &PlacedWord> {
        self.words.iter().filter(|w| w.direction == Direction::Down)
    }
}

impl fmt::Display for Crossword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)?;
        for (heading, words) in [
            ("Across", self.across().collect::<Vec<_>>()),
            ("Down", self.down().collect::<Vec<_>>()),
        ] {
            if words.is_empty() {
                continue;
            }
            writeln!(f, "\n{}", heading)?;
            for word in words {
                writeln!(f, "{:>3}. {} ({})", word.number, word.clue, word.len())?;
            }
        }
        Ok(())
    }
}
