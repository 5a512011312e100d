//! Board engine: grid, RNG and undo history behind one synchronous API
//!
//! The engine knows nothing about timing, scoring totals or input devices.
//! A caller (see [`crate::sim::tick`]) sequences its operations into turns.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use super::board::{Board, Position};
use super::gem::GemKind;
use super::history::History;
use super::search::Hint;

/// Owns the board, its random source and the undo stack
#[derive(Debug, Clone)]
pub struct BoardEngine<R = Pcg32> {
    board: Board,
    rng: R,
    history: History,
    last_undo_score: u64,
}

impl BoardEngine<Pcg32> {
    /// Engine with a seeded PCG stream and a freshly initialized board
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }
}

impl<R: RngCore> BoardEngine<R> {
    /// Engine drawing from `rng`, with a freshly initialized board
    pub fn with_rng(rng: R) -> Self {
        let mut engine = Self::from_board(Board::new(), rng);
        engine.init();
        engine
    }

    /// Engine over an existing layout (no initialization)
    pub fn from_board(board: Board, rng: R) -> Self {
        Self {
            board,
            rng,
            history: History::new(),
            last_undo_score: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Fill the board with random gems, regenerating the whole board until it
    /// holds no match.
    ///
    /// This loop is probabilistic: it terminates quickly as long as
    /// `KIND_COUNT` is large relative to the board size.
    pub fn init(&mut self) {
        let mut attempts = 1u32;
        loop {
            self.board.fill_random(&mut self.rng);
            if !self.board.has_match() {
                break;
            }
            attempts += 1;
        }
        log::debug!("Board initialized after {} attempt(s)", attempts);
    }

    /// Regenerate the layout (same as [`init`](Self::init)). Score and history are untouched.
    pub fn reset(&mut self) {
        self.init();
    }

    /// Gem at `pos`, `Empty` when out of range
    pub fn cell_color(&self, pos: Position) -> GemKind {
        self.board.get(pos)
    }

    /// Score value at `pos`, 0 when empty or out of range
    pub fn cell_score_value(&self, pos: Position) -> u64 {
        self.board.score_at(pos)
    }

    /// Exchange two cells. No adjacency or match validation; no-op on invalid positions.
    pub fn swap(&mut self, a: Position, b: Position) {
        self.board.swap(a, b);
    }

    pub fn check_matches(&self) -> Vec<Position> {
        self.board.find_matches()
    }

    /// Empty the given cells. Score them with [`cell_score_value`](Self::cell_score_value) first.
    pub fn eliminate(&mut self, points: &[Position]) {
        self.board.eliminate(points);
    }

    /// Compact every column downward and refill the vacated top cells
    pub fn apply_gravity(&mut self) {
        self.board.apply_gravity(&mut self.rng);
    }

    pub fn has_possible_move(&mut self) -> bool {
        self.board.has_possible_move()
    }

    pub fn find_best_move(&mut self) -> Option<Hint> {
        self.board.find_best_move()
    }

    /// Push a snapshot of the current board with `score`
    pub fn save_cur_state(&mut self, score: u64) {
        self.history.push(&self.board, score);
    }

    /// Drop the newest snapshot without restoring it
    pub fn pop_last_state(&mut self) {
        self.history.pop();
    }

    /// Restore the newest snapshot. Returns false if there was none.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(step) => {
                self.board = step.board;
                self.last_undo_score = step.score;
                true
            }
            None => false,
        }
    }

    /// Score recorded by the most recent successful [`undo`](Self::undo)
    pub fn last_undo_score(&self) -> u64 {
        self.last_undo_score
    }

    /// Score of the newest snapshot, `None` when the history is empty
    pub fn last_step_score(&self) -> Option<u64> {
        self.history.peek_score()
    }

    /// Empty the history and forget the last undo score
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.last_undo_score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{COLS, ROWS};
    use crate::sim::fixtures::{ONE_MOVE, STRIPES};
    use proptest::prelude::*;
    use rand::RngCore;

    fn engine(layout: &str) -> BoardEngine {
        let board = layout.parse().expect("valid board");
        BoardEngine::from_board(board, Pcg32::seed_from_u64(1))
    }

    fn pos(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    /// Eliminate and drop until the board settles. Returns the number of rounds.
    fn run_cascade<R: RngCore>(engine: &mut BoardEngine<R>) -> usize {
        let mut rounds = 0;
        loop {
            let points = engine.check_matches();
            if points.is_empty() {
                return rounds;
            }
            engine.eliminate(&points);
            engine.apply_gravity();
            rounds += 1;
            assert!(rounds < 10_000, "cascade did not settle");
        }
    }

    #[test]
    fn test_new_board_is_full_and_match_free() {
        let engine = BoardEngine::new(12345);
        assert_eq!(engine.board().empty_count(), 0);
        assert!(engine.check_matches().is_empty());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_same_seed_same_board() {
        let a = BoardEngine::new(99999);
        let b = BoardEngine::new(99999);
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_reset_keeps_history() {
        let mut engine = BoardEngine::new(3);
        engine.save_cur_state(120);
        let before = engine.board().clone();
        engine.reset();
        assert!(engine.check_matches().is_empty());
        assert_ne!(engine.board(), &before);
        assert_eq!(engine.last_step_score(), Some(120));
    }

    #[test]
    fn test_cell_queries_out_of_range() {
        let engine = engine(STRIPES);
        assert_eq!(engine.cell_color(pos(-1, 0)), GemKind::Empty);
        assert_eq!(engine.cell_score_value(pos(0, 8)), 0);
        assert_eq!(engine.cell_color(pos(0, 0)), GemKind::Red);
        assert_eq!(engine.cell_score_value(pos(0, 0)), 10);
    }

    #[test]
    fn test_undo_round_trip() {
        let mut engine = engine(ONE_MOVE);
        let before = engine.board().clone();

        engine.save_cur_state(250);
        engine.swap(pos(0, 2), pos(1, 2));
        assert!(!engine.check_matches().is_empty());

        assert!(engine.undo());
        assert_eq!(engine.board(), &before);
        assert_eq!(engine.last_undo_score(), 250);
        assert!(!engine.undo());
    }

    #[test]
    fn test_rejected_swap_pops_state() {
        let mut engine = engine(STRIPES);
        let before = engine.board().clone();

        engine.save_cur_state(40);
        engine.swap(pos(0, 0), pos(0, 1));
        assert!(engine.check_matches().is_empty());
        engine.swap(pos(0, 0), pos(0, 1));
        engine.pop_last_state();

        assert_eq!(engine.board(), &before);
        assert_eq!(engine.last_step_score(), None);
        assert!(!engine.undo());
        assert_eq!(engine.last_undo_score(), 0);
    }

    #[test]
    fn test_pop_on_empty_history_is_noop() {
        let mut engine = engine(STRIPES);
        engine.pop_last_state();
        assert_eq!(engine.last_step_score(), None);
    }

    #[test]
    fn test_clear_history() {
        let mut engine = engine(STRIPES);
        engine.save_cur_state(10);
        engine.save_cur_state(20);
        assert!(engine.undo());
        engine.clear_history();
        assert_eq!(engine.last_step_score(), None);
        assert_eq!(engine.last_undo_score(), 0);
        assert!(!engine.undo());
    }

    #[test]
    fn test_committed_move_cascades_to_rest() {
        let mut engine = engine(ONE_MOVE);
        engine.swap(pos(0, 2), pos(1, 2));
        let first = engine.check_matches();
        assert_eq!(first, vec![pos(0, 0), pos(0, 1), pos(0, 2)]);
        let gained: u64 = first.iter().map(|&p| engine.cell_score_value(p)).sum();
        assert_eq!(gained, 30);

        let rounds = run_cascade(&mut engine);
        assert!(rounds >= 1);
        assert_eq!(engine.board().empty_count(), 0);
        assert!(engine.check_matches().is_empty());
    }

    #[test]
    fn test_gravity_through_engine() {
        let original: Board = STRIPES.parse().expect("valid board");
        let mut engine = engine(STRIPES);
        let points: Vec<_> = (0..COLS as i32).map(|c| pos(ROWS as i32 - 1, c)).collect();
        engine.eliminate(&points);
        assert_eq!(engine.board().empty_count(), COLS);
        engine.apply_gravity();
        assert_eq!(engine.board().empty_count(), 0);
        // Every column shifted down by one
        for col in 0..COLS {
            assert_eq!(
                engine.board().column(col).unwrap()[1..],
                original.column(col).unwrap()[..ROWS - 1]
            );
        }
    }

    proptest! {
        #[test]
        fn prop_init_never_leaves_free_matches(seed in any::<u64>()) {
            let mut engine = BoardEngine::new(seed);
            prop_assert!(engine.check_matches().is_empty());
            engine.reset();
            prop_assert!(engine.check_matches().is_empty());
            prop_assert_eq!(engine.board().empty_count(), 0);
        }

        #[test]
        fn prop_cascade_settles(seed in any::<u64>(), row in 0i32..8, col in 0i32..7) {
            let mut engine = BoardEngine::new(seed);
            engine.swap(pos(row, col), pos(row, col + 1));
            run_cascade(&mut engine);
            prop_assert!(engine.check_matches().is_empty());
            prop_assert_eq!(engine.board().empty_count(), 0);
        }
    }
}
