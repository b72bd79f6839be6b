//! Obstacle spawning and off-screen cleanup

use glam::Vec2;
use rand::Rng;

use super::progress::Progress;
use super::state::{GameState, Obstacle, ObstacleKind};
use crate::tuning::Tuning;
use crate::Viewport;

/// Obstacles per spawn tick: one per started unit of difficulty, capped
pub fn batch_size(multiplier: f32, max_batch: usize) -> usize {
    (multiplier.max(0.0).ceil() as usize).min(max_batch)
}

/// Roll one obstacle just above the top edge
pub fn spawn_obstacle<R: Rng + ?Sized>(
    rng: &mut R,
    id: u32,
    viewport: &Viewport,
    progress: &Progress,
    tuning: &Tuning,
) -> Obstacle {
    let min_x = tuning.spawn_margin_x;
    let max_x = (viewport.width as i32 - tuning.spawn_margin_x).max(min_x);
    let x = rng.random_range(min_x..=max_x);

    let kind = ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())];
    let drift = rng.random_range(-tuning.drift_range..=tuning.drift_range);
    let spin = rng.random_range(-tuning.spin_range..=tuning.spin_range);

    Obstacle {
        id,
        kind,
        pos: Vec2::new(x as f32, tuning.spawn_y),
        vel: Vec2::new(drift as f32, progress.fall_speed()),
        rotation: 0.0,
        angular_vel: spin as f32,
    }
}

/// Spawn one batch sized by the current difficulty. Returns the batch size.
pub fn spawn_batch(state: &mut GameState) -> usize {
    let count = batch_size(state.progress.difficulty_multiplier, state.tuning.max_batch);
    for _ in 0..count {
        let id = state.next_entity_id();
        let obstacle = spawn_obstacle(
            &mut state.rng,
            id,
            &state.viewport,
            &state.progress,
            &state.tuning,
        );
        state.obstacles.push(obstacle);
    }
    count
}

/// Drop obstacles that fell past the bottom edge plus `margin`.
/// Returns how many were removed.
pub fn sweep_offscreen(obstacles: &mut Vec<Obstacle>, viewport_height: f32, margin: f32) -> usize {
    let before = obstacles.len();
    let limit = viewport_height + margin;
    obstacles.retain(|o| o.pos.y <= limit);
    before - obstacles.len()
}
