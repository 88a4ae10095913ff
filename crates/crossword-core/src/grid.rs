use crate::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single square of a constructed grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    /// Occupied by at least one placed word
    Letter(char),
    /// No word runs through this square
    Blocked,
}

impl Cell {
    pub fn letter(&self) -> Option<char> {
        match self {
            Cell::Letter(c) => Some(*c),
            Cell::Blocked => None,
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Cell::Blocked)
    }
}

/// The trimmed crossword grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create an all-blocked grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![vec![Cell::Blocked; cols]; rows],
        }
    }

    /// Build a grid from rows of optional letters
    pub fn from_rows(rows: Vec<Vec<Option<char>>>) -> Self {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let cells = rows
            .into_iter()
            .map(|row| {
                let mut row: Vec<Cell> = row
                    .into_iter()
                    .map(|c| c.map_or(Cell::Blocked, Cell::Letter))
                    .collect();
                row.resize(cols, Cell::Blocked);
                row
            })
            .collect::<Vec<_>>();
        Self {
            rows: cells.len(),
            cols,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// The cell at `pos`, or `None` when out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.cells.get(pos.row).and_then(|row| row.get(pos.col)).copied()
    }

    pub fn letter(&self, pos: Position) -> Option<char> {
        self.get(pos).and_then(|cell| cell.letter())
    }

    pub fn is_letter(&self, pos: Position) -> bool {
        self.letter(pos).is_some()
    }

    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(pos.row).and_then(|row| row.get_mut(pos.col)) {
            *slot = cell;
        }
    }

    /// Number of letter cells
    pub fn letter_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_blocked())
            .count()
    }

    /// Iterate every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Position::new(row, col)))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row
                .iter()
                .map(|cell| cell.letter().unwrap_or('#'))
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_pads_short_rows() {
        let grid = Grid::from_rows(vec![vec![Some('C'), Some('A'), Some('T')], vec![Some('A')]]);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.get(Position::new(1, 2)), Some(Cell::Blocked));
        assert_eq!(grid.letter_count(), 4);
    }

    #[test]
    fn test_out_of_bounds_is_none() {
        let grid = Grid::new(2, 2);
        assert_eq!(grid.get(Position::new(2, 0)), None);
        assert!(!grid.in_bounds(Position::new(0, 2)));
        assert!(!grid.is_letter(Position::new(0, 0)));
    }

    #[test]
    fn test_display_marks_blocked() {
        let grid = Grid::from_rows(vec![vec![Some('A'), None], vec![None, Some('B')]]);
        assert_eq!(grid.to_string(), "A#\n#B\n");
    }
}
