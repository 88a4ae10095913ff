use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell position in a grid (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The position `distance` cells away in `direction`
    pub fn step(self, direction: Direction, distance: usize) -> Self {
        match direction {
            Direction::Across => Self::new(self.row, self.col + distance),
            Direction::Down => Self::new(self.row + distance, self.col),
        }
    }

    /// Move by a signed offset, returning `None` when it would leave the grid on the top/left
    pub fn offset(self, row_delta: isize, col_delta: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(row_delta)?;
        let col = self.col.checked_add_signed(col_delta)?;
        Some(Self::new(row, col))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row + 1, self.col + 1)
    }
}

/// Word direction in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Across,
    Down,
}

impl Direction {
    /// The direction crossing this one
    pub fn perpendicular(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    /// Unit (row, col) step along this direction
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Across => write!(f, "Across"),
            Direction::Down => write!(f, "Down"),
        }
    }
}

/// Arrow keys understood by session navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    /// Direction an arrow press forces on the session
    pub fn direction(self) -> Direction {
        match self {
            Arrow::Left | Arrow::Right => Direction::Across,
            Arrow::Up | Arrow::Down => Direction::Down,
        }
    }

    pub fn delta(self) -> (isize, isize) {
        match self {
            Arrow::Up => (-1, 0),
            Arrow::Down => (1, 0),
            Arrow::Left => (0, -1),
            Arrow::Right => (0, 1),
        }
    }

    /// Parse a browser `KeyboardEvent.key` name
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Arrow::Up),
            "ArrowDown" => Some(Arrow::Down),
            "ArrowLeft" => Some(Arrow::Left),
            "ArrowRight" => Some(Arrow::Right),
            _ => None,
        }
    }
}

/// A word and its clue, as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordClue {
    pub word: String,
    pub clue: String,
}

impl WordClue {
    pub fn new(word: impl Into<String>, clue: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            clue: clue.into(),
        }
    }

    /// The uppercased answer letters
    pub fn answer(&self) -> String {
        self.word.trim().to_uppercase()
    }

    /// Whether the word can go into a grid at all (non-empty, letters only)
    pub fn is_placeable(&self) -> bool {
        let word = self.word.trim();
        !word.is_empty() && word.chars().all(|c| c.is_alphabetic())
    }
}

/// A word positioned in a constructed grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedWord {
    /// Uppercased answer
    pub word: String,
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub clue: String,
    /// Clue number, 1-based in placement order
    pub number: u32,
}

impl PlacedWord {
    pub fn start(&self) -> Position {
        Position::new(self.row, self.col)
    }

    /// Number of letters
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }

    /// Position of the last letter
    pub fn end(&self) -> Position {
        self.start().step(self.direction, self.len().saturating_sub(1))
    }

    /// Every position along the word, first letter first
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.len()).map(move |i| self.start().step(self.direction, i))
    }

    /// Every (position, letter) pair along the word
    pub fn letters(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.cells().zip(self.word.chars())
    }

    /// Index of `pos` within the word, if the word covers it
    pub fn offset_of(&self, pos: Position) -> Option<usize> {
        let offset = match self.direction {
            Direction::Across if pos.row == self.row && pos.col >= self.col => pos.col - self.col,
            Direction::Down if pos.col == self.col && pos.row >= self.row => pos.row - self.row,
            _ => return None,
        };
        (offset < self.len()).then_some(offset)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.offset_of(pos).is_some()
    }

    /// Answer letter at `pos`
    pub fn letter_at(&self, pos: Position) -> Option<char> {
        self.offset_of(pos).and_then(|i| self.word.chars().nth(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(word: &str, row: usize, col: usize, direction: Direction) -> PlacedWord {
        PlacedWord {
            word: word.to_string(),
            row,
            col,
            direction,
            clue: String::new(),
            number: 1,
        }
    }

    #[test]
    fn test_offset_of_across() {
        let word = placed("CAT", 2, 1, Direction::Across);
        assert_eq!(word.offset_of(Position::new(2, 1)), Some(0));
        assert_eq!(word.offset_of(Position::new(2, 3)), Some(2));
        assert_eq!(word.offset_of(Position::new(2, 4)), None);
        assert_eq!(word.offset_of(Position::new(2, 0)), None);
        assert_eq!(word.offset_of(Position::new(1, 2)), None);
    }

    #[test]
    fn test_offset_of_down() {
        let word = placed("CAR", 0, 4, Direction::Down);
        assert_eq!(word.letter_at(Position::new(1, 4)), Some('A'));
        assert_eq!(word.end(), Position::new(2, 4));
        assert!(!word.contains(Position::new(3, 4)));
    }

    #[test]
    fn test_cells_follow_direction() {
        let word = placed("ART", 1, 1, Direction::Down);
        let cells: Vec<_> = word.cells().collect();
        assert_eq!(
            cells,
            vec![Position::new(1, 1), Position::new(2, 1), Position::new(3, 1)]
        );
    }

    #[test]
    fn test_word_clue_placeable() {
        assert!(WordClue::new("conform", "to act").is_placeable());
        assert!(!WordClue::new("", "empty").is_placeable());
        assert!(!WordClue::new("well-being", "hyphen").is_placeable());
        assert_eq!(WordClue::new(" deform ", "x").answer(), "DEFORM");
    }

    #[test]
    fn test_arrow_direction() {
        assert_eq!(Arrow::Left.direction(), Direction::Across);
        assert_eq!(Arrow::Right.direction(), Direction::Across);
        assert_eq!(Arrow::Up.direction(), Direction::Down);
        assert_eq!(Arrow::Down.direction(), Direction::Down);
        assert_eq!(Arrow::from_key_name("ArrowUp"), Some(Arrow::Up));
        assert_eq!(Arrow::from_key_name("Tab"), None);
    }

    #[test]
    fn test_position_offset() {
        let pos = Position::new(0, 3);
        assert_eq!(pos.offset(-1, 0), None);
        assert_eq!(pos.offset(0, -1), Some(Position::new(0, 2)));
    }
}
