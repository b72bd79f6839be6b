//! Data-driven game balance
//!
//! Every gameplay constant lives here so it can be tweaked from JSON without a
//! rebuild. Missing fields fall back to the shipped defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors while loading a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value: {0}")]
    Invalid(&'static str),
}

/// Game balance constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Difficulty ===
    /// Added to the multiplier on each difficulty step
    pub difficulty_step: f32,
    /// Spawn interval at session start (ms)
    pub initial_frequency_ms: u32,
    /// Removed from the spawn interval on each difficulty step (ms)
    pub frequency_step_ms: u32,
    /// Spawn interval never drops below this (ms)
    pub min_frequency_ms: u32,
    /// Added to obstacle speed on each difficulty step
    pub speed_step: f32,
    /// Obstacle speed never exceeds this
    pub max_obstacle_speed: f32,
    /// Time between automatic difficulty steps (ms). 0 disables the ramp.
    pub difficulty_interval_ms: u32,

    // === Spawning ===
    /// Largest batch spawned on one timer tick
    pub max_batch: usize,
    /// Horizontal spawn margin from each viewport edge
    pub spawn_margin_x: i32,
    /// Vertical spawn position (above the viewport)
    pub spawn_y: f32,
    /// Horizontal drift range, +/- (pixels/s)
    pub drift_range: i32,
    /// Spin range, +/- (degrees/s)
    pub spin_range: i32,
    /// Obstacle hit-box inset from the sprite bounds on every side
    pub hitbox_inset: f32,
    /// Obstacles are swept once below viewport height plus this margin
    pub cleanup_margin: f32,

    // === Player ===
    /// Horizontal speed while an arrow key is held (pixels/s)
    pub key_speed: f32,
    /// Horizontal speed for a pointer nudge (pixels/s)
    pub nudge_speed: f32,
    /// Pointer travel before a nudge registers (pixels)
    pub nudge_dead_zone: f32,
    /// Slide control keeps the player this far from each edge
    pub slide_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            difficulty_step: 0.4,
            initial_frequency_ms: 300,
            frequency_step_ms: 100,
            min_frequency_ms: 300,
            speed_step: 50.0,
            max_obstacle_speed: 1000.0,
            difficulty_interval_ms: 10_000,

            max_batch: 8,
            spawn_margin_x: 50,
            spawn_y: -50.0,
            drift_range: 150,
            spin_range: 150,
            hitbox_inset: 5.0,
            cleanup_margin: 50.0,

            key_speed: 400.0,
            nudge_speed: 200.0,
            nudge_dead_zone: 10.0,
            slide_margin: 50.0,
        }
    }
}

impl Tuning {
    /// LocalStorage key for developer overrides
    pub const STORAGE_KEY: &'static str = "emoji_dodge_tuning";

    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the spawn timer or ranges
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.min_frequency_ms == 0 {
            return Err(TuningError::Invalid("min_frequency_ms must be positive"));
        }
        if self.initial_frequency_ms < self.min_frequency_ms {
            return Err(TuningError::Invalid(
                "initial_frequency_ms must not be below min_frequency_ms",
            ));
        }
        if self.max_batch == 0 {
            return Err(TuningError::Invalid("max_batch must be positive"));
        }
        if self.drift_range < 0 || self.spin_range < 0 || self.spawn_margin_x < 0 {
            return Err(TuningError::Invalid("ranges must be non-negative"));
        }
        if self.difficulty_step < 0.0 || self.speed_step < 0.0 {
            return Err(TuningError::Invalid("difficulty steps must be non-negative"));
        }
        Ok(())
    }

    /// Load the override from a key-value store, falling back to defaults
    pub fn load(store: &dyn crate::platform::KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning override");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring tuning override: {}", e);
                    Self::default()
                }
            },
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Tuning override unavailable: {}", e);
                Self::default()
            }
        }
    }
}
