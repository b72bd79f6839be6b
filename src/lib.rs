//! Emoji Dodge - a falling-emoji dodging arcade game
//!
//! Core modules:
//! - `sim`: Simulation (progress, spawning, input mapping, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction (profile detection, storage)
//! - `tuning`: Data-driven game balance
//! - `session`: Frame driver tying the simulation to storage
//! - `highscore`: Best score persisted across sessions
//! - `settings`: Player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscore;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscore::HighScore;
pub use platform::{PlatformProfile, ProfileKind};
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep. Per-frame accruals (score, background
    /// scroll) are tuned for 60 Hz.
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 6;

    /// Smallest supported viewport
    pub const VIEWPORT_MIN_WIDTH: f32 = 300.0;
    pub const VIEWPORT_MIN_HEIGHT: f32 = 450.0;

    /// Sprite edge length for both the player and obstacles (pixels)
    pub const SPRITE_SIZE: f32 = 60.0;
    /// Player rests at this fraction of the viewport height
    pub const PLAYER_Y_FRACTION: f32 = 0.6;

    /// Difficulty multiplier at session start
    pub const BASE_DIFFICULTY: f32 = 1.5;
}

/// Viewport size in CSS pixels (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport, clamped to the minimum supported size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(consts::VIEWPORT_MIN_WIDTH),
            height: height.max(consts::VIEWPORT_MIN_HEIGHT),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
