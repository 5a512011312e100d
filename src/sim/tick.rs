//! Turn sequencing
//!
//! `tick` applies player input and advances a running cascade by one step;
//! `tick_clock` advances the challenge countdown by one second. The caller
//! decides how often to call each (see `Settings::cascade_step_ms`).

use super::board::Position;
use super::state::{GameEvent, GameMode, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Grid cell the player picked (already mapped from screen coordinates)
    pub select: Option<Position>,
    /// Take back the last move
    pub undo: bool,
    /// Ask for the best available move
    pub hint: bool,
    /// Start over in the current mode
    pub restart: bool,
    /// End the session now
    pub end_game: bool,
}

/// Advance the session by one step
///
/// Input is only honored while `Idle`. A swap committed during this tick
/// starts cascading on the next one.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.restart {
        state.start();
        events.push(GameEvent::NewGame { mode: state.mode });
        return events;
    }

    if state.phase == GamePhase::GameOver {
        return events;
    }

    if input.end_game {
        end_game(state, &mut events);
        return events;
    }

    match state.phase {
        GamePhase::Idle => {
            if input.undo {
                undo(state, &mut events);
            }
            if input.hint {
                hint(state, &mut events);
            }
            if let Some(pos) = input.select {
                select(state, pos, &mut events);
            }
        }
        GamePhase::Cascading => cascade_step(state, &mut events),
        GamePhase::GameOver => {}
    }

    events
}

/// Advance the challenge countdown by one second
pub fn tick_clock(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.mode != GameMode::Challenge || state.phase == GamePhase::GameOver {
        return events;
    }

    state.remaining_secs = state.remaining_secs.saturating_sub(1);

    if state.score >= state.target_score {
        let level = state.level;
        state.set_level(level + 1);
        state.remaining_secs = state.rules.time_for_level(state.level);
        log::info!(
            "Level {} complete, level {} target {}",
            level,
            state.level,
            state.target_score
        );
        events.push(GameEvent::LevelComplete {
            level,
            next_level: state.level,
            target: state.target_score,
        });
        return events;
    }

    if state.remaining_secs == 0 {
        events.push(GameEvent::TimeUp);
        end_game(state, &mut events);
    }

    events
}

fn end_game(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.phase = GamePhase::GameOver;
    state.selected = None;
    state.hint = None;
    log::info!(
        "Game over: {} score {} (level {})",
        state.mode.as_str(),
        state.score,
        state.level
    );
    events.push(GameEvent::GameOver {
        mode: state.mode,
        score: state.score,
        level: state.level,
    });
}

fn undo(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.engine.undo() {
        state.score = state.engine.last_undo_score();
        state.selected = None;
        state.hint = None;
        events.push(GameEvent::Undone { score: state.score });
    }
}

fn hint(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.hint = state.engine.find_best_move();
    match state.hint {
        Some(hint) => events.push(GameEvent::HintShown(hint)),
        None => events.push(GameEvent::NoHint),
    }
}

fn select(state: &mut GameState, pos: Position, events: &mut Vec<GameEvent>) {
    if !state.engine.board().is_valid(pos) {
        return;
    }

    match state.selected.take() {
        None => {
            state.selected = Some(pos);
            events.push(GameEvent::Selected(pos));
        }
        Some(first) if first.is_adjacent(pos) => try_swap(state, first, pos, events),
        Some(_) => events.push(GameEvent::SelectionCleared),
    }
}

/// Swap, keep it only if it matches, and remember the pre-swap board for undo
fn try_swap(state: &mut GameState, from: Position, to: Position, events: &mut Vec<GameEvent>) {
    state.engine.save_cur_state(state.score);
    state.engine.swap(from, to);

    if state.engine.check_matches().is_empty() {
        state.engine.swap(from, to);
        state.engine.pop_last_state();
        events.push(GameEvent::SwapRejected { from, to });
        return;
    }

    state.hint = None;
    state.phase = GamePhase::Cascading;
    events.push(GameEvent::Swapped { from, to });
}

/// Eliminate pending matches, or drop and refill when there are none
fn cascade_step(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let points = state.engine.check_matches();
    if !points.is_empty() {
        // Score before eliminating: elimination erases the colors
        let gained: u64 = points
            .iter()
            .map(|&p| state.engine.cell_score_value(p))
            .sum();
        state.engine.eliminate(&points);
        state.score += gained;
        log::debug!("Matched {} gems for {} points", points.len(), gained);
        events.push(GameEvent::Matched { points, gained });
        return;
    }

    state.engine.apply_gravity();
    events.push(GameEvent::Refilled);
    if !state.engine.check_matches().is_empty() {
        return;
    }

    state.phase = GamePhase::Idle;
    events.push(GameEvent::Settled);

    if !state.engine.has_possible_move() {
        log::info!("No moves left, reshuffling board (score kept)");
        while !state.engine.has_possible_move() {
            state.engine.reset();
        }
        events.push(GameEvent::Reshuffled);
    }
}
