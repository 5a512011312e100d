//! Game session state and the events a turn can produce

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::board::{Board, Position};
use super::engine::BoardEngine;
use super::search::Hint;
use crate::settings::{ChallengeRules, Settings};

/// Which rule set the session plays under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// No clock; play until the player ends the game
    #[default]
    Endless,
    /// Timed levels with rising target scores
    Challenge,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Endless => "endless",
            GameMode::Challenge => "challenge",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "endless" => Some(GameMode::Endless),
            "challenge" => Some(GameMode::Challenge),
            _ => None,
        }
    }
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to select gems
    Idle,
    /// A committed swap is resolving; selections are ignored
    Cascading,
    /// Session ended
    GameOver,
}

/// Something that happened during a tick, for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// New game started (or restarted)
    NewGame { mode: GameMode },
    /// First gem of a pair selected
    Selected(Position),
    /// Second selection was not adjacent; selection dropped
    SelectionCleared,
    /// Swap produced a match and was kept
    Swapped { from: Position, to: Position },
    /// Swap produced no match and was reverted
    SwapRejected { from: Position, to: Position },
    /// Matched gems were eliminated
    Matched { points: Vec<Position>, gained: u64 },
    /// Gravity pass ran and refilled the board
    Refilled,
    /// Cascade finished; the board is stable
    Settled,
    /// No move was left, so the board was regenerated (score kept)
    Reshuffled,
    /// Last move taken back
    Undone { score: u64 },
    HintShown(Hint),
    NoHint,
    /// Challenge target reached in time
    LevelComplete {
        level: u32,
        next_level: u32,
        target: u64,
    },
    /// Challenge countdown ran out
    TimeUp,
    /// Session over; feed this to the high score table
    GameOver {
        mode: GameMode,
        score: u64,
        level: u32,
    },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed (board RNG and challenge targets)
    pub seed: u64,
    pub mode: GameMode,
    pub phase: GamePhase,
    pub engine: BoardEngine,
    pub score: u64,
    /// Challenge level (1-based; stays 1 in Endless)
    pub level: u32,
    pub target_score: u64,
    /// Challenge countdown (seconds)
    pub remaining_secs: u32,
    /// First gem of a pending swap
    pub selected: Option<Position>,
    /// Most recent hint, cleared once the board changes
    pub hint: Option<Hint>,
    pub rules: ChallengeRules,
}

impl GameState {
    /// Create a session with default challenge rules
    pub fn new(seed: u64, mode: GameMode) -> Self {
        Self::with_rules(seed, mode, ChallengeRules::default())
    }

    pub fn from_settings(settings: &Settings, seed: u64) -> Self {
        Self::with_rules(seed, settings.mode, settings.challenge)
    }

    pub fn with_rules(seed: u64, mode: GameMode, rules: ChallengeRules) -> Self {
        let mut state = Self {
            seed,
            mode,
            phase: GamePhase::Idle,
            engine: BoardEngine::from_board(Board::new(), Pcg32::seed_from_u64(seed)),
            score: 0,
            level: 1,
            target_score: rules.target_for_level(1, seed),
            remaining_secs: 0,
            selected: None,
            hint: None,
            rules,
        };
        state.start();
        state
    }

    /// Start a fresh game in the current mode and level
    pub fn start(&mut self) {
        self.engine.clear_history();
        self.engine.init();
        self.score = 0;
        self.selected = None;
        self.hint = None;
        self.phase = GamePhase::Idle;
        self.remaining_secs = match self.mode {
            GameMode::Challenge => self.rules.time_for_level(self.level),
            GameMode::Endless => 0,
        };
        log::info!(
            "New {} game (seed {}, level {})",
            self.mode.as_str(),
            self.seed,
            self.level
        );
    }

    /// Switch mode, going back to level 1, and start over
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.set_level(1);
        self.start();
    }

    /// Jump to a challenge level (takes effect on the target immediately)
    pub fn set_level(&mut self, level: u32) {
        self.level = level.max(1);
        self.target_score = self.rules.target_for_level(self.level, self.seed);
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_endless() {
        let state = GameState::new(12345, GameMode::Endless);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.remaining_secs, 0);
        assert!(state.engine.check_matches().is_empty());
    }

    #[test]
    fn test_new_challenge() {
        let state = GameState::new(12345, GameMode::Challenge);
        assert_eq!(state.remaining_secs, 120);
        assert_eq!(state.target_score, 1000);
    }

    #[test]
    fn test_set_mode_resets_level() {
        let mut state = GameState::new(7, GameMode::Challenge);
        state.set_level(4);
        state.score = 900;
        state.engine.save_cur_state(900);

        state.set_mode(GameMode::Endless);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.target_score, 1000);
        assert_eq!(state.engine.last_step_score(), None);
    }

    #[test]
    fn test_level_changes_time() {
        let mut state = GameState::new(7, GameMode::Challenge);
        state.set_level(3);
        state.start();
        assert_eq!(state.remaining_secs, 110);
        assert!(state.target_score >= 2000);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(GameMode::from_str("Challenge"), Some(GameMode::Challenge));
        assert_eq!(GameMode::from_str(GameMode::Endless.as_str()), Some(GameMode::Endless));
        assert_eq!(GameMode::from_str("zen"), None);
    }
}
