//! Undo history: a stack of full board snapshots

use serde::{Deserialize, Serialize};

use super::board::Board;

/// Board and score as they were before a move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub board: Board,
    pub score: u64,
}

/// Last-in-first-out stack of [`Step`]s. Unbounded for the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    steps: Vec<Step>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot `board` and `score`
    pub fn push(&mut self, board: &Board, score: u64) {
        self.steps.push(Step {
            board: board.clone(),
            score,
        });
    }

    /// Remove and return the newest step
    pub fn pop(&mut self) -> Option<Step> {
        self.steps.pop()
    }

    /// Score of the newest step, if any
    pub fn peek_score(&self) -> Option<u64> {
        self.steps.last().map(|s| s.score)
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
