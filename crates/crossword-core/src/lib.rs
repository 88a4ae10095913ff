//! Crossword puzzle engine.
//!
//! Builds a compact crossing grid from a list of (word, clue) pairs and tracks
//! a player's progress on it. Presentation is left to the caller.
//!
//! ```
//! use crossword_core::{construct, PuzzleSession, Position, WordClue};
//!
//! let words = [WordClue::new("cat", "feline"), WordClue::new("car", "vehicle")];
//! let crossword = construct(&words, 50).unwrap();
//! let mut session = PuzzleSession::new(crossword);
//!
//! session.select_cell(Position::new(0, 0));
//! for c in "cat".chars() {
//!     session.type_character(c);
//! }
//! assert_eq!(session.completed_count(), 1);
//! ```

mod constructor;
mod crossword;
mod error;
mod generator;
mod grid;
mod session;
mod types;
pub mod vocabulary;

pub use constructor::{construct, DEFAULT_MAX_ATTEMPTS, WORKING_GRID_SIZE};
pub use crossword::Crossword;
pub use error::{CrosswordError, VocabularyError};
pub use generator::{Generator, GeneratorConfig, PuzzleSize};
pub use grid::{Cell, Grid};
pub use session::{system_clock, CellCheck, CheckReport, Clock, PuzzleSession, SessionPhase};
pub use types::{Arrow, Direction, PlacedWord, Position, WordClue};
pub use vocabulary::VocabularyData;
