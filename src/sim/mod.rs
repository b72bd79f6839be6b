//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod progress;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{Aabb, first_collision};
pub use input::{ControlScheme, PlayerCommand, PointerEvent, PointerPhase, PointerTracker, map_pointer};
pub use progress::Progress;
pub use spawner::{batch_size, spawn_batch, spawn_obstacle, sweep_offscreen};
pub use state::{GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Player};
pub use tick::{TickInput, game_over, tick};
pub use timer::IntervalTimer;
