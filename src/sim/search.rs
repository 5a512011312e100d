//! Speculative move search: deadlock detection and best-move hints
//!
//! Both searches probe a swap, evaluate the board, and swap back. The probe is
//! scoped by [`Board::with_swapped`] so the board is restored on every exit path.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::board::{Board, Position};
use crate::consts::{COLS, ROWS};

/// Neighbor order used by the hint search: up, down, left, right
pub const DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Best available swap and what it would score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub from: Position,
    pub to: Position,
    /// Sum of the score values of every gem the swap would match
    pub score: u64,
}

/// Holds a swap applied for the guard's lifetime; swaps back on drop
struct SwapGuard<'a> {
    board: &'a mut Board,
    a: Position,
    b: Position,
}

impl<'a> SwapGuard<'a> {
    fn new(board: &'a mut Board, a: Position, b: Position) -> Self {
        board.swap(a, b);
        Self { board, a, b }
    }
}

impl Deref for SwapGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for SwapGuard<'_> {
    fn drop(&mut self) {
        self.board.swap(self.a, self.b);
    }
}

fn cells() -> impl Iterator<Item = Position> {
    (0..ROWS as i32).flat_map(|row| (0..COLS as i32).map(move |col| Position::new(row, col)))
}

impl Board {
    /// Evaluate `probe` on the board with `a` and `b` swapped, then restore it
    pub fn with_swapped<T>(
        &mut self,
        a: Position,
        b: Position,
        probe: impl FnOnce(&Board) -> T,
    ) -> T {
        let guard = SwapGuard::new(self, a, b);
        probe(&guard)
    }

    /// True if swapping some cell with its right or lower neighbor creates a match.
    /// False means the board is deadlocked.
    pub fn has_possible_move(&mut self) -> bool {
        for pos in cells() {
            for neighbor in [pos.offset(0, 1), pos.offset(1, 0)] {
                if !self.is_valid(neighbor) {
                    continue;
                }
                if self.with_swapped(pos, neighbor, Board::has_match) {
                    return true;
                }
            }
        }
        false
    }

    /// Highest-scoring single swap, or `None` if no swap scores.
    ///
    /// Cells are scanned top to bottom, left to right, each trying its
    /// neighbors in [`DIRECTIONS`] order. Ties keep the first candidate found.
    pub fn find_best_move(&mut self) -> Option<Hint> {
        let mut best: Option<Hint> = None;

        for from in cells() {
            for (d_row, d_col) in DIRECTIONS {
                let to = from.offset(d_row, d_col);
                if !self.is_valid(to) {
                    continue;
                }
                // Swapping equal gems changes nothing
                if self.get(from) == self.get(to) {
                    continue;
                }

                let score = self.with_swapped(from, to, Board::match_value);
                if score > best.map_or(0, |h| h.score) {
                    best = Some(Hint { from, to, score });
                }
            }
        }

        best
    }
}
