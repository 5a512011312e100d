//! Game settings and preferences
//!
//! Stored as JSON. Missing fields take their defaults, so old files keep loading.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{CASCADE_STEP_MS, HINT_DURATION_MS};
use crate::sim::GameMode;

/// Errors reading or writing a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
}

/// Challenge mode tuning: per-level countdown and target score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChallengeRules {
    /// Countdown for level 1 (seconds)
    pub base_time_secs: u32,
    /// Seconds removed per level
    pub time_step_secs: u32,
    /// Countdown never drops below this
    pub min_time_secs: u32,
    /// Target score for level 1
    pub base_target: u64,
    /// Target increase per level (also the width of the random bonus)
    pub target_step: u64,
}

impl Default for ChallengeRules {
    fn default() -> Self {
        Self {
            base_time_secs: 120,
            time_step_secs: 5,
            min_time_secs: 30,
            base_target: 1000,
            target_step: 500,
        }
    }
}

impl ChallengeRules {
    /// Countdown length for `level` (1-based)
    pub fn time_for_level(&self, level: u32) -> u32 {
        let reduction = level.saturating_sub(1).saturating_mul(self.time_step_secs);
        self.base_time_secs
            .saturating_sub(reduction)
            .max(self.min_time_secs)
    }

    /// Target score for `level` (1-based).
    ///
    /// Level 1 is fixed; later levels add `target_step` per level plus a
    /// bonus in `[0, target_step * (level - 1))` derived from `seed`.
    pub fn target_for_level(&self, level: u32, seed: u64) -> u64 {
        if level <= 1 {
            return self.base_target;
        }
        let steps = u64::from(level - 1);
        let range = self.target_step.saturating_mul(steps);
        // Deterministic per (seed, level) so replays see the same targets
        let level_seed = u64::from(level)
            .wrapping_mul(2654435761)
            .wrapping_add(seed);
        let bonus = level_seed.checked_rem(range).unwrap_or(0);
        self.base_target + steps * self.target_step + bonus
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mode a new game starts in
    pub mode: GameMode,
    /// Fixed board seed (random per run when unset)
    pub seed: Option<u64>,

    // === Pacing (applied by the caller) ===
    /// Delay between cascade steps (ms)
    pub cascade_step_ms: u32,
    /// How long a hint stays visible (ms)
    pub hint_duration_ms: u32,

    // === Audio ===
    pub music_enabled: bool,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    pub challenge: ChallengeRules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::Endless,
            seed: None,
            cascade_step_ms: CASCADE_STEP_MS,
            hint_duration_ms: HINT_DURATION_MS,
            music_enabled: true,
            music_volume: 0.5,
            challenge: ChallengeRules::default(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.music_volume = settings.music_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from `path`, falling back to defaults if the file is
    /// missing or unreadable
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
