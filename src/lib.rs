//! Jewel Rush - A match-3 gem swapping game
//!
//! Core modules:
//! - `sim`: Deterministic board simulation (matching, gravity, hints, undo, sessions)
//! - `highscores`: Per-mode leaderboards
//! - `settings`: Player preferences and challenge tuning

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{ChallengeRules, Settings};

/// Game configuration constants
pub mod consts {
    /// Board rows
    pub const ROWS: usize = 8;
    /// Board columns
    pub const COLS: usize = 8;
    /// Number of distinct gem colors (excluding Empty).
    /// Must stay large relative to the board or initialization may retry for a long time.
    pub const KIND_COUNT: usize = 7;

    /// Default delay between cascade steps (milliseconds, paced by the caller)
    pub const CASCADE_STEP_MS: u32 = 500;
    /// Default time a hint stays visible (milliseconds, paced by the caller)
    pub const HINT_DURATION_MS: u32 = 3000;

    /// Maximum entries per leaderboard
    pub const MAX_HIGH_SCORES: usize = 10;
}
