//! Board grid: cell access, swapping, match scanning, elimination and gravity
//!
//! Every operation treats out-of-range positions as a no-op (or a neutral
//! value) instead of failing, so callers can feed raw input coordinates.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::gem::GemKind;
use crate::consts::{COLS, ROWS};

/// Minimum run length that counts as a match
pub const MIN_RUN: usize = 3;

/// A (row, col) grid coordinate. Signed so invalid input can be represented
/// and rejected rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Position shifted by (d_row, d_col)
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// True if `other` shares an edge with this position (no diagonals)
    pub fn is_adjacent(self, other: Position) -> bool {
        matches!(
            (self.row.abs_diff(other.row), self.col.abs_diff(other.col)),
            (0, 1) | (1, 0)
        )
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Errors from parsing the text form of a board
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown gem glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
}

/// The ROWS x COLS gem grid (row 0 is the top)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[GemKind; COLS]; ROWS],
}

impl Board {
    /// Create an all-empty board
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(cells: [[GemKind; COLS]; ROWS]) -> Self {
        Self { cells }
    }

    pub fn rows(&self) -> &[[GemKind; COLS]; ROWS] {
        &self.cells
    }

    #[inline]
    fn index(pos: Position) -> Option<(usize, usize)> {
        if pos.row < 0 || pos.row >= ROWS as i32 || pos.col < 0 || pos.col >= COLS as i32 {
            return None;
        }
        Some((pos.row as usize, pos.col as usize))
    }

    /// Check that a position lies inside the grid
    pub fn is_valid(&self, pos: Position) -> bool {
        Self::index(pos).is_some()
    }

    /// Gem at `pos`, `Empty` when out of range
    pub fn get(&self, pos: Position) -> GemKind {
        Self::index(pos)
            .map(|(r, c)| self.cells[r][c])
            .unwrap_or_default()
    }

    /// Set the gem at `pos`. Returns false (and does nothing) when out of range.
    pub fn set(&mut self, pos: Position, kind: GemKind) -> bool {
        match Self::index(pos) {
            Some((r, c)) => {
                self.cells[r][c] = kind;
                true
            }
            None => false,
        }
    }

    /// Score value of the gem at `pos` (0 when empty or out of range)
    pub fn score_at(&self, pos: Position) -> u64 {
        self.get(pos).score()
    }

    /// Exchange two cells. No adjacency check; no-op if either position is invalid.
    pub fn swap(&mut self, a: Position, b: Position) {
        let (Some((ar, ac)), Some((br, bc))) = (Self::index(a), Self::index(b)) else {
            return;
        };
        let tmp = self.cells[ar][ac];
        self.cells[ar][ac] = self.cells[br][bc];
        self.cells[br][bc] = tmp;
    }

    /// Overwrite every cell with a random color
    pub fn fill_random<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = GemKind::random(rng);
            }
        }
    }

    /// All positions belonging to a horizontal or vertical run of at least
    /// [`MIN_RUN`] equal, non-empty gems.
    ///
    /// Each position appears once. Row runs are emitted first (top to bottom,
    /// left to right), then column runs (left to right, top to bottom).
    pub fn find_matches(&self) -> Vec<Position> {
        let mut marked = [[false; COLS]; ROWS];
        let mut points = Vec::new();

        for row in 0..ROWS {
            for_each_run(
                COLS,
                |col| self.cells[row][col],
                |run| {
                    for col in run {
                        mark(&mut marked, &mut points, row, col);
                    }
                },
            );
        }
        for col in 0..COLS {
            for_each_run(
                ROWS,
                |row| self.cells[row][col],
                |run| {
                    for row in run {
                        mark(&mut marked, &mut points, row, col);
                    }
                },
            );
        }

        points
    }

    pub fn has_match(&self) -> bool {
        !self.find_matches().is_empty()
    }

    /// Total score of every gem currently part of a match
    pub fn match_value(&self) -> u64 {
        self.find_matches().iter().map(|&p| self.score_at(p)).sum()
    }

    /// Clear the given cells. Invalid positions are skipped.
    pub fn eliminate(&mut self, points: &[Position]) {
        for &pos in points {
            self.set(pos, GemKind::Empty);
        }
    }

    /// Drop gems down over empty gaps, column by column, in one pass.
    ///
    /// Returns the number of vacated cells left at the top of each column.
    pub fn collapse(&mut self) -> [usize; COLS] {
        let mut vacated = [0; COLS];
        for (col, slot) in vacated.iter_mut().enumerate() {
            let mut empty = 0;
            for row in (0..ROWS).rev() {
                if self.cells[row][col].is_empty() {
                    empty += 1;
                } else if empty > 0 {
                    self.cells[row + empty][col] = self.cells[row][col];
                    self.cells[row][col] = GemKind::Empty;
                }
            }
            *slot = empty;
        }
        vacated
    }

    /// Fill the top `vacated[col]` cells of each column with random colors
    pub fn refill<R: Rng + ?Sized>(&mut self, rng: &mut R, vacated: &[usize; COLS]) {
        for (col, &count) in vacated.iter().enumerate() {
            for row in 0..count.min(ROWS) {
                self.cells[row][col] = GemKind::random(rng);
            }
        }
    }

    /// Collapse then refill. Does not look for the matches this may create.
    pub fn apply_gravity<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let vacated = self.collapse();
        log::trace!("Gravity vacated {:?}", vacated);
        self.refill(rng, &vacated);
    }

    /// Number of empty cells on the board
    pub fn empty_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|k| k.is_empty())
            .count()
    }

    /// Gems of one column from top to bottom, `None` when out of range
    pub fn column(&self, col: usize) -> Option<[GemKind; ROWS]> {
        (col < COLS).then(|| std::array::from_fn(|row| self.cells[row][col]))
    }
}

/// Run-length scan over one line of `len` cells. Calls `on_run` with the index
/// range of every run of [`MIN_RUN`] or more equal, non-empty gems.
fn for_each_run(
    len: usize,
    kind_at: impl Fn(usize) -> GemKind,
    mut on_run: impl FnMut(std::ops::Range<usize>),
) {
    let mut start = 0;
    while start < len {
        let kind = kind_at(start);
        let mut end = start + 1;
        while end < len && kind_at(end) == kind {
            end += 1;
        }
        if !kind.is_empty() && end - start >= MIN_RUN {
            on_run(start..end);
        }
        start = end;
    }
}

#[inline]
fn mark(marked: &mut [[bool; COLS]; ROWS], points: &mut Vec<Position>, row: usize, col: usize) {
    if !marked[row][col] {
        marked[row][col] = true;
        points.push(Position::new(row as i32, col as i32));
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for kind in row {
                write!(f, "{}", kind.glyph())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parse ROWS whitespace-separated lines of COLS glyphs (`R O Y G W B P`, `.` = empty)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.split_whitespace().collect();
        if lines.len() != ROWS {
            return Err(BoardParseError::RowCount {
                expected: ROWS,
                found: lines.len(),
            });
        }

        let mut board = Board::new();
        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != COLS {
                return Err(BoardParseError::RowWidth {
                    row,
                    expected: COLS,
                    found: width,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                board.cells[row][col] = GemKind::from_glyph(glyph)
                    .ok_or(BoardParseError::UnknownGlyph { glyph, row, col })?;
            }
        }
        Ok(board)
    }
}
