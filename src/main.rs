//! Jewel Rush entry point
//!
//! Headless autoplay: starts a session from `jewel_rush.json` (if present),
//! plays the hinted move until the board runs out of moves or the move budget
//! is spent, then prints the board and records the result.
//!
//! Usage: `jewel-rush [seed] [moves]`

use std::time::{SystemTime, UNIX_EPOCH};

use jewel_rush::highscores::DEFAULT_PLAYER_NAME;
use jewel_rush::sim::{GameEvent, GameMode, GamePhase, GameState, TickInput, tick, tick_clock};
use jewel_rush::{HighScores, Settings};

const SETTINGS_PATH: &str = "jewel_rush.json";
const DEFAULT_MOVES: u32 = 50;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let arg_seed = args.next().and_then(|s| parse_arg(&s, "seed"));
    let moves = args
        .next()
        .and_then(|s| parse_arg(&s, "moves"))
        .map_or(DEFAULT_MOVES, |m: u64| m.min(u64::from(u32::MAX)) as u32);

    let settings = Settings::load(SETTINGS_PATH);
    let seed = arg_seed.or(settings.seed).unwrap_or_else(time_seed);
    log::info!("Jewel Rush starting (seed {}, {} moves)", seed, moves);

    let mut state = GameState::from_settings(&settings, seed);
    let mut clock = Clock::new(settings.cascade_step_ms);
    let mut played = 0;

    while played < moves && !state.is_over() {
        let Some(hint) = state.engine.find_best_move() else {
            log::warn!("No move available on a settled board");
            break;
        };

        for pos in [hint.from, hint.to] {
            let input = TickInput {
                select: Some(pos),
                ..Default::default()
            };
            report(&tick(&mut state, &input));
        }
        played += 1;

        while state.phase == GamePhase::Cascading {
            report(&tick(&mut state, &TickInput::default()));
            if state.mode == GameMode::Challenge {
                for _ in 0..clock.advance() {
                    report(&tick_clock(&mut state));
                }
            }
        }
    }

    if !state.is_over() {
        let input = TickInput {
            end_game: true,
            ..Default::default()
        };
        report(&tick(&mut state, &input));
    }

    println!("{}", state.engine.board());
    println!(
        "{} game over after {} moves: score {}, level {}",
        state.mode.as_str(),
        played,
        state.score,
        state.level
    );

    let mut high_scores = HighScores::new();
    if let Some(rank) = high_scores.record(state.mode, DEFAULT_PLAYER_NAME, state.score, state.level)
    {
        println!("High score rank #{}", rank);
    }
}

/// Parse a numeric argument, warning and ignoring it when malformed
fn parse_arg(s: &str, what: &str) -> Option<u64> {
    match s.parse() {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("Ignoring {} {:?}: {}", what, s, e);
            None
        }
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}

/// Converts cascade steps into whole challenge-clock seconds
struct Clock {
    step_ms: u32,
    accumulator_ms: u32,
}

impl Clock {
    fn new(step_ms: u32) -> Self {
        Self {
            step_ms,
            accumulator_ms: 0,
        }
    }

    /// Account for one cascade step; returns how many seconds elapsed
    fn advance(&mut self) -> u32 {
        self.accumulator_ms = self.accumulator_ms.saturating_add(self.step_ms);
        let secs = self.accumulator_ms / 1000;
        self.accumulator_ms %= 1000;
        secs
    }
}

fn report(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::Matched { points, gained } => {
                log::debug!("+{} ({} gems)", gained, points.len())
            }
            GameEvent::LevelComplete {
                next_level, target, ..
            } => println!("Level up! Level {} target {}", next_level, target),
            GameEvent::TimeUp => println!("Time's up!"),
            other => log::trace!("{:?}", other),
        }
    }
}
