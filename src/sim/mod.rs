//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable scan order (row-major, top-left first)
//! - No rendering, audio or platform dependencies

pub mod board;
pub mod engine;
pub mod gem;
pub mod history;
pub mod search;
pub mod state;
pub mod tick;

#[cfg(test)]
pub(crate) mod fixtures;

pub use board::{Board, BoardParseError, MIN_RUN, Position};
pub use engine::BoardEngine;
pub use gem::GemKind;
pub use history::{History, Step};
pub use search::{DIRECTIONS, Hint};
pub use state::{GameEvent, GameMode, GamePhase, GameState};
pub use tick::{TickInput, tick, tick_clock};
