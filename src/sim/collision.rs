//! Axis-aligned hit-box overlap
//!
//! Obstacles spin visually, but their hit-boxes never rotate. A fast obstacle
//! can cover more than a hit-box per step, so each one is tested over the
//! whole span it moved through during the step.

use glam::Vec2;

use super::state::Obstacle;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Shrink every side by `amount` (never past the center)
    pub fn inset(&self, amount: f32) -> Self {
        let center = (self.min + self.max) * 0.5;
        let half = ((self.max - self.min) * 0.5 - Vec2::splat(amount)).max(Vec2::ZERO);
        Self::from_center(center, half)
    }

    /// Box covering both this box and the same box moved by `delta`
    pub fn swept(&self, delta: Vec2) -> Self {
        Self {
            min: self.min.min(self.min + delta),
            max: self.max.max(self.max + delta),
        }
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// ID of the first obstacle that touched `player` while moving over the
/// last `dt` seconds. Obstacle positions are end-of-step.
pub fn first_collision(player: &Aabb, obstacles: &[Obstacle], inset: f32, dt: f32) -> Option<u32> {
    obstacles
        .iter()
        .find(|o| o.hitbox(inset).swept(-o.vel * dt).overlaps(player))
        .map(|o| o.id)
}
