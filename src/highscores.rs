//! High score leaderboards
//!
//! One table per game mode, top 10 each. Endless ranks by score; Challenge
//! ranks by level reached, then score. Storage is left to the caller (the
//! tables are serde-serializable).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

pub use crate::consts::MAX_HIGH_SCORES;
use crate::sim::GameMode;

/// Name used when the player leaves theirs blank
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u64,
    /// Challenge level reached (1 in Endless)
    pub level: u32,
}

/// Ranked entries for one mode, best first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub entries: Vec<HighScoreEntry>,
}

impl Leaderboard {
    /// Index a new result would take, or `None` if the table is full and it
    /// beats nobody. Ties rank below existing entries.
    fn insertion_index(&self, mode: GameMode, score: u64, level: u32) -> Option<usize> {
        let index = self
            .entries
            .iter()
            .position(|e| compare(mode, score, level, e) == Ordering::Greater)
            .unwrap_or(self.entries.len());
        (index < MAX_HIGH_SCORES).then_some(index)
    }
}

/// How a result ranks against an existing entry (`Greater` = better)
fn compare(mode: GameMode, score: u64, level: u32, entry: &HighScoreEntry) -> Ordering {
    match mode {
        GameMode::Endless => score.cmp(&entry.score),
        GameMode::Challenge => level
            .cmp(&entry.level)
            .then_with(|| score.cmp(&entry.score)),
    }
}

/// High score tables for both modes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    pub endless: Leaderboard,
    pub challenge: Leaderboard,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self, mode: GameMode) -> &Leaderboard {
        match mode {
            GameMode::Endless => &self.endless,
            GameMode::Challenge => &self.challenge,
        }
    }

    fn board_mut(&mut self, mode: GameMode) -> &mut Leaderboard {
        match mode {
            GameMode::Endless => &mut self.endless,
            GameMode::Challenge => &mut self.challenge,
        }
    }

    /// Check if a result would make the table
    pub fn qualifies(&self, mode: GameMode, score: u64, level: u32) -> bool {
        self.potential_rank(mode, score, level).is_some()
    }

    /// Get the rank a result would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, mode: GameMode, score: u64, level: u32) -> Option<usize> {
        self.board(mode)
            .insertion_index(mode, score, level)
            .map(|i| i + 1)
    }

    /// Add a result to the table for `mode` (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    ///
    /// A blank `name` is stored as [`DEFAULT_PLAYER_NAME`]. Endless results
    /// are recorded at level 1.
    pub fn record(&mut self, mode: GameMode, name: &str, score: u64, level: u32) -> Option<usize> {
        let level = match mode {
            GameMode::Endless => 1,
            GameMode::Challenge => level.max(1),
        };
        let board = self.board_mut(mode);
        let index = board.insertion_index(mode, score, level)?;

        let name = name.trim();
        let name = if name.is_empty() {
            DEFAULT_PLAYER_NAME
        } else {
            name
        };
        board.entries.insert(
            index,
            HighScoreEntry {
                name: name.to_string(),
                score,
                level,
            },
        );
        board.entries.truncate(MAX_HIGH_SCORES);

        log::info!(
            "{} high score #{}: {} {} (level {})",
            mode.as_str(),
            index + 1,
            name,
            score,
            level
        );
        Some(index + 1)
    }

    /// Best score in `mode`'s table (if any)
    pub fn top_score(&self, mode: GameMode) -> Option<u64> {
        self.board(mode).entries.first().map(|e| e.score)
    }

    pub fn is_empty(&self) -> bool {
        self.endless.entries.is_empty() && self.challenge.entries.is_empty()
    }

    /// Empty both tables
    pub fn clear(&mut self) {
        self.endless.entries.clear();
        self.challenge.entries.clear();
    }
}
