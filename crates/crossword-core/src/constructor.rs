//! Greedy crossword grid construction.
//!
//! Words are placed longest first into an oversized working grid. Each later
//! word is laid perpendicular across the first already-placed letter it
//! matches whose position passes the legality check; words that fit nowhere
//! are dropped for that attempt. The best of several attempts is trimmed to
//! its bounding box and numbered in placement order.

use crate::{Cell, Crossword, CrosswordError, Direction, Grid, PlacedWord, Position, WordClue};
use tracing::{debug, warn};

/// Side length of the working grid used during construction
pub const WORKING_GRID_SIZE: usize = 25;

/// Default number of construction attempts
pub const DEFAULT_MAX_ATTEMPTS: usize = 50;

/// Construct a crossword from `words`, keeping the best of up to `max_attempts` attempts.
///
/// Attempts only differ when equal-length words are reordered between them, so
/// callers wanting variety should shuffle the input (see [`crate::Generator`]).
pub fn construct(words: &[WordClue], max_attempts: usize) -> Result<Crossword, CrosswordError> {
    construct_with(words, max_attempts, |_| {})
}

/// Construct with a hook that may reorder the entries before each attempt
pub(crate) fn construct_with<F>(
    words: &[WordClue],
    max_attempts: usize,
    mut reorder: F,
) -> Result<Crossword, CrosswordError>
where
    F: FnMut(&mut [Entry]),
{
    let mut skipped = Vec::new();
    let mut entries = Vec::with_capacity(words.len());
    for word in words {
        if word.is_placeable() {
            entries.push(Entry::new(word.clone()));
        } else {
            warn!(word = %word.word, "skipping word that cannot be placed in a grid");
            skipped.push(word.clone());
        }
    }

    if entries.is_empty() {
        return Err(CrosswordError::EmptyWordList);
    }

    let max_attempts = max_attempts.max(1);
    let mut best: Option<(Vec<Entry>, Layout)> = None;
    let mut attempts = 0;

    for attempt in 0..max_attempts {
        attempts = attempt + 1;

        let mut order = entries.clone();
        reorder(&mut order);
        // Stable: input order breaks ties between equal lengths
        order.sort_by(|a, b| b.letters.len().cmp(&a.letters.len()));

        let Some(layout) = attempt_layout(&order) else {
            debug!(attempt, "first word does not fit the working grid");
            continue;
        };

        let placed = layout.placements.len();
        debug!(attempt, placed, total = order.len(), "construction attempt finished");

        let best_count = best.as_ref().map_or(0, |(_, l)| l.placements.len());
        if placed > best_count {
            best = Some((order, layout));
        }
        if placed == entries.len() {
            break;
        }
    }

    let Some((order, layout)) = best else {
        return Err(CrosswordError::NoWordsPlaced { attempts });
    };

    let crossword = trim(&order, &layout, skipped, attempts);
    debug!(
        placed = crossword.words().len(),
        unplaced = crossword.unplaced().len(),
        rows = crossword.grid().rows(),
        cols = crossword.grid().cols(),
        "crossword constructed"
    );
    Ok(crossword)
}

/// A word prepared for placement
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    letters: Vec<char>,
    source: WordClue,
}

impl Entry {
    fn new(source: WordClue) -> Self {
        Self {
            letters: source.answer().chars().collect(),
            source,
        }
    }
}

/// A word's position in the working grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    entry: usize,
    start: Position,
    direction: Direction,
}

/// A proposed start for a word, possibly off the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    row: isize,
    col: isize,
    direction: Direction,
}

/// Result of one attempt
#[derive(Debug, Clone)]
struct Layout {
    grid: WorkGrid,
    placements: Vec<Placement>,
}

/// The oversized grid words are placed into during an attempt
#[derive(Debug, Clone)]
struct WorkGrid {
    size: usize,
    cells: Vec<Option<char>>,
}

impl WorkGrid {
    fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    fn index(&self, row: isize, col: isize) -> Option<usize> {
        let size = self.size as isize;
        (row >= 0 && col >= 0 && row < size && col < size)
            .then(|| row as usize * self.size + col as usize)
    }

    /// Letter at (row, col); out-of-bounds reads as empty
    fn get(&self, row: isize, col: isize) -> Option<char> {
        self.index(row, col).and_then(|i| self.cells[i])
    }

    fn set(&mut self, pos: Position, letter: char) {
        let i = pos.row * self.size + pos.col;
        self.cells[i] = Some(letter);
    }
}

/// Run one greedy placement pass over words already sorted longest first
fn attempt_layout(order: &[Entry]) -> Option<Layout> {
    let first = order.first()?;
    let mut layout = Layout {
        grid: WorkGrid::new(WORKING_GRID_SIZE),
        placements: Vec::with_capacity(order.len()),
    };

    let len = first.letters.len();
    if len > WORKING_GRID_SIZE {
        return None;
    }
    let anchor = Candidate {
        row: (WORKING_GRID_SIZE / 2) as isize,
        col: ((WORKING_GRID_SIZE - len) / 2) as isize,
        direction: Direction::Across,
    };
    let start = validate_candidate(&layout.grid, &first.letters, anchor)?;
    place(&mut layout, order, 0, start, Direction::Across);

    for index in 1..order.len() {
        if let Some((start, direction)) = find_placement(&layout, order, &order[index].letters) {
            place(&mut layout, order, index, start, direction);
        }
    }

    Some(layout)
}

/// Find the first legal crossing position for `letters`
fn find_placement(
    layout: &Layout,
    order: &[Entry],
    letters: &[char],
) -> Option<(Position, Direction)> {
    crossing_candidates(layout, order, letters)
        .find_map(|candidate| {
            validate_candidate(&layout.grid, letters, candidate)
                .map(|start| (start, candidate.direction))
        })
}

/// Every position where `letters` would cross a placed word at a shared letter.
///
/// Order: placed words in placement order, then candidate letter index, then
/// the placed word's letter index.
fn crossing_candidates<'a>(
    layout: &'a Layout,
    order: &'a [Entry],
    letters: &'a [char],
) -> impl Iterator<Item = Candidate> + 'a {
    layout.placements.iter().flat_map(move |placed| {
        let placed_letters = &order[placed.entry].letters;
        letters.iter().enumerate().flat_map(move |(j, &letter)| {
            placed_letters
                .iter()
                .enumerate()
                .filter(move |(_, other)| **other == letter)
                .map(move |(k, _)| crossing_at(placed, j, k))
        })
    })
}

/// Start of a word whose letter `j` sits on letter `k` of `placed`
fn crossing_at(placed: &Placement, j: usize, k: usize) -> Candidate {
    let (row, col) = (placed.start.row as isize, placed.start.col as isize);
    let (j, k) = (j as isize, k as isize);
    match placed.direction.perpendicular() {
        Direction::Across => Candidate {
            row: row + k,
            col: col - j,
            direction: Direction::Across,
        },
        Direction::Down => Candidate {
            row: row - j,
            col: col + k,
            direction: Direction::Down,
        },
    }
}

/// Check whether `letters` may be written at `candidate`, returning its start on success
fn validate_candidate(grid: &WorkGrid, letters: &[char], candidate: Candidate) -> Option<Position> {
    let len = letters.len() as isize;
    let (dr, dc) = candidate.direction.delta();
    let (pr, pc) = candidate.direction.perpendicular().delta();
    let (row, col) = (candidate.row, candidate.col);

    // Whole span on the grid
    grid.index(row, col)?;
    grid.index(row + dr * (len - 1), col + dc * (len - 1))?;

    // Nothing directly before or after
    if grid.get(row - dr, col - dc).is_some() || grid.get(row + dr * len, col + dc * len).is_some() {
        return None;
    }

    for (i, &letter) in letters.iter().enumerate() {
        let (r, c) = (row + dr * i as isize, col + dc * i as isize);
        match grid.get(r, c) {
            Some(existing) if existing != letter => return None,
            Some(_) => {}
            None => {
                if grid.get(r - pr, c - pc).is_some() || grid.get(r + pr, c + pc).is_some() {
                    return None;
                }
            }
        }
    }

    Some(Position::new(row as usize, col as usize))
}

fn place(layout: &mut Layout, order: &[Entry], entry: usize, start: Position, direction: Direction) {
    for (i, &letter) in order[entry].letters.iter().enumerate() {
        layout.grid.set(start.step(direction, i), letter);
    }
    layout.placements.push(Placement {
        entry,
        start,
        direction,
    });
}

/// Cut the layout down to its bounding box and number the words
fn trim(order: &[Entry], layout: &Layout, mut unplaced: Vec<WordClue>, attempts: usize) -> Crossword {
    let mut min_row = usize::MAX;
    let mut min_col = usize::MAX;
    let mut max_row = 0;
    let mut max_col = 0;

    for placement in &layout.placements {
        let end = placement
            .start
            .step(placement.direction, order[placement.entry].letters.len() - 1);
        min_row = min_row.min(placement.start.row);
        min_col = min_col.min(placement.start.col);
        max_row = max_row.max(end.row);
        max_col = max_col.max(end.col);
    }

    let mut grid = Grid::new(max_row - min_row + 1, max_col - min_col + 1);
    for pos in grid.positions().collect::<Vec<_>>() {
        let letter = layout
            .grid
            .get((pos.row + min_row) as isize, (pos.col + min_col) as isize);
        if let Some(letter) = letter {
            grid.set(pos, Cell::Letter(letter));
        }
    }

    let words = layout
        .placements
        .iter()
        .enumerate()
        .map(|(i, placement)| {
            let entry = &order[placement.entry];
            PlacedWord {
                word: entry.letters.iter().collect(),
                row: placement.start.row - min_row,
                col: placement.start.col - min_col,
                direction: placement.direction,
                clue: entry.source.clue.clone(),
                number: i as u32 + 1,
            }
        })
        .collect();

    let placed: Vec<usize> = layout.placements.iter().map(|p| p.entry).collect();
    unplaced.extend(
        order
            .iter()
            .enumerate()
            .filter(|(i, _)| !placed.contains(i))
            .map(|(_, entry)| entry.source.clone()),
    );

    Crossword::new(grid, words, unplaced, attempts)
}
