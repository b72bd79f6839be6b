//! Game state and core simulation types
//!
//! One `GameState` per session. Restart builds a fresh one and carries only
//! the high score over.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::input::PointerTracker;
use super::progress::Progress;
use super::timer::IntervalTimer;
use crate::consts::*;
use crate::platform::PlatformProfile;
use crate::tuning::Tuning;
use crate::Viewport;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Session ended; only a restart leaves this phase
    GameOver,
}

/// Obstacle visuals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Bomb,
    Lightning,
    Fire,
    Comet,
    Tornado,
    Meat,
    Snake,
    Shark,
    Crocodile,
    Ghost,
    Skull,
    Invader,
    Robot,
    Pumpkin,
    CrossedSwords,
    Dagger,
    Explosion,
    Banana,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 18] = [
        ObstacleKind::Bomb,
        ObstacleKind::Lightning,
        ObstacleKind::Fire,
        ObstacleKind::Comet,
        ObstacleKind::Tornado,
        ObstacleKind::Meat,
        ObstacleKind::Snake,
        ObstacleKind::Shark,
        ObstacleKind::Crocodile,
        ObstacleKind::Ghost,
        ObstacleKind::Skull,
        ObstacleKind::Invader,
        ObstacleKind::Robot,
        ObstacleKind::Pumpkin,
        ObstacleKind::CrossedSwords,
        ObstacleKind::Dagger,
        ObstacleKind::Explosion,
        ObstacleKind::Banana,
    ];

    /// Emoji shown for this obstacle
    pub fn glyph(&self) -> &'static str {
        match self {
            ObstacleKind::Bomb => "💣",
            ObstacleKind::Lightning => "⚡️",
            ObstacleKind::Fire => "🔥",
            ObstacleKind::Comet => "☄️",
            ObstacleKind::Tornado => "🌪️",
            ObstacleKind::Meat => "🍖",
            ObstacleKind::Snake => "🐍",
            ObstacleKind::Shark => "🦈",
            ObstacleKind::Crocodile => "🐊",
            ObstacleKind::Ghost => "👻",
            ObstacleKind::Skull => "💀",
            ObstacleKind::Invader => "👾",
            ObstacleKind::Robot => "🤖",
            ObstacleKind::Pumpkin => "🎃",
            ObstacleKind::CrossedSwords => "⚔️",
            ObstacleKind::Dagger => "🗡️",
            ObstacleKind::Explosion => "💥",
            ObstacleKind::Banana => "🍌",
        }
    }
}

/// A falling obstacle
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Sprite center (pixels)
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    /// Current rotation (degrees, visual only)
    pub rotation: f32,
    /// Degrees per second
    pub angular_vel: f32,
}

impl Obstacle {
    /// Collision box: the sprite bounds shrunk by `inset` on every side
    pub fn hitbox(&self, inset: f32) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(SPRITE_SIZE / 2.0)).inset(inset)
    }
}

/// The player's duck
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Sprite center (pixels)
    pub pos: Vec2,
    /// Horizontal velocity (pixels/s)
    pub vel_x: f32,
    /// Velocity requested by a pointer nudge; held keys override it
    pub drive_x: f32,
    /// Set when an obstacle hit the player
    pub hit: bool,
}

impl Player {
    pub fn new(viewport: &Viewport) -> Self {
        Self {
            pos: Vec2::new(viewport.width / 2.0, viewport.height * PLAYER_Y_FRACTION),
            vel_x: 0.0,
            drive_x: 0.0,
            hit: false,
        }
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(SPRITE_SIZE / 2.0))
    }

    /// Keep the whole sprite inside the viewport
    pub fn clamp_to(&mut self, viewport: &Viewport) {
        let half = SPRITE_SIZE / 2.0;
        self.pos.x = self.pos.x.clamp(half, viewport.width - half);
        self.pos.y = viewport.height * PLAYER_Y_FRACTION;
    }
}

/// Things the outside world reacts to (sound, HUD, persistence)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A spawn timer tick created obstacles
    ObstaclesSpawned { count: usize },
    /// The difficulty ramp stepped
    DifficultyIncreased { multiplier: f32 },
    /// The session ended
    GameOver {
        score: u64,
        high_score: u64,
        new_record: bool,
    },
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed
    pub seed: u64,
    /// Device preset, fixed for the session
    pub profile: PlatformProfile,
    /// Balance constants, fixed for the session
    pub tuning: Tuning,
    pub viewport: Viewport,
    /// Score and difficulty
    pub progress: Progress,
    /// Best score, carried across restarts
    pub high_score: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// Active obstacles (unordered)
    pub obstacles: Vec<Obstacle>,
    /// Pointer drag bookkeeping
    pub pointer: PointerTracker,
    pub spawn_timer: IntervalTimer,
    pub difficulty_timer: IntervalTimer,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a fresh session
    pub fn new(
        seed: u64,
        profile: PlatformProfile,
        tuning: Tuning,
        viewport: Viewport,
        high_score: u64,
    ) -> Self {
        Self {
            seed,
            progress: Progress::new(&profile, &tuning),
            profile,
            tuning,
            viewport,
            high_score,
            phase: GamePhase::Running,
            player: Player::new(&viewport),
            obstacles: Vec::new(),
            pointer: PointerTracker::default(),
            spawn_timer: IntervalTimer::default(),
            difficulty_timer: IntervalTimer::default(),
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// A new session with the same profile, tuning and viewport
    pub fn restarted(&self, seed: u64, high_score: u64) -> Self {
        Self::new(
            seed,
            self.profile,
            self.tuning.clone(),
            self.viewport,
            high_score,
        )
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Apply a new viewport size, keeping the player on screen
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.player.clamp_to(&viewport);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_state() -> GameState {
        GameState::new(
            7,
            PlatformProfile::STANDARD,
            Tuning::default(),
            Viewport::new(800.0, 600.0),
            55,
        )
    }

    #[test]
    fn test_new_session_defaults() {
        let state = new_state();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.progress.score, 0.0);
        assert_eq!(state.progress.difficulty_multiplier, BASE_DIFFICULTY);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos, Vec2::new(400.0, 360.0));
        assert_eq!(state.high_score, 55);
    }

    #[test]
    fn test_obstacle_set_has_18_distinct_glyphs() {
        let glyphs: std::collections::HashSet<_> =
            ObstacleKind::ALL.iter().map(|k| k.glyph()).collect();
        assert_eq!(glyphs.len(), 18);
    }

    #[test]
    fn test_obstacle_hitbox_is_inset() {
        let obstacle = Obstacle {
            id: 1,
            kind: ObstacleKind::Bomb,
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            rotation: 0.0,
            angular_vel: 0.0,
        };
        let hb = obstacle.hitbox(5.0);
        assert_eq!(hb.min, Vec2::new(75.0, 75.0));
        assert_eq!(hb.max, Vec2::new(125.0, 125.0));
    }

    #[test]
    fn test_resize_reclamps_player() {
        let mut state = new_state();
        state.player.pos.x = 790.0;
        state.resize(Viewport::new(400.0, 800.0));
        assert_eq!(state.player.pos.x, 370.0);
        assert!((state.player.pos.y - 480.0).abs() < 1e-3);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = new_state();
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }
}
