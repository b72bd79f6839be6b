//! Scene assembly: turns a `GameState` into a triangle list

use glam::Vec2;

use super::shapes;
use super::vertex::{Rgba, Vertex, colors};
use crate::consts::SPRITE_SIZE;
use crate::sim::{GameState, ObstacleKind};

/// Distance between background stripes (pixels)
const STRIPE_SPACING: f32 = 48.0;
const STRIPE_HEIGHT: f32 = 6.0;
/// Obstacle fill is drawn slightly inside the frame
const OBSTACLE_FILL_HALF: f32 = SPRITE_SIZE / 2.0 - 6.0;
const OBSTACLE_FRAME_HALF: f32 = SPRITE_SIZE / 2.0 - 2.0;
const PLAYER_BODY_HALF: f32 = 18.0;
const DASH: f32 = 5.0;
const GAP: f32 = 5.0;
const LINE_WIDTH: f32 = 2.0;

/// Fill color for an obstacle kind, loosely matching its emoji
pub fn obstacle_tint(kind: ObstacleKind) -> Rgba {
    match kind {
        ObstacleKind::Bomb => [0.15, 0.15, 0.2, 1.0],
        ObstacleKind::Lightning => [1.0, 0.9, 0.2, 1.0],
        ObstacleKind::Fire => [1.0, 0.45, 0.1, 1.0],
        ObstacleKind::Comet => [0.9, 0.5, 0.3, 1.0],
        ObstacleKind::Tornado => [0.7, 0.75, 0.8, 1.0],
        ObstacleKind::Meat => [0.75, 0.35, 0.25, 1.0],
        ObstacleKind::Snake => [0.3, 0.75, 0.3, 1.0],
        ObstacleKind::Shark => [0.45, 0.6, 0.75, 1.0],
        ObstacleKind::Crocodile => [0.25, 0.55, 0.2, 1.0],
        ObstacleKind::Ghost => [0.95, 0.95, 1.0, 1.0],
        ObstacleKind::Skull => [0.85, 0.85, 0.8, 1.0],
        ObstacleKind::Invader => [0.6, 0.3, 0.85, 1.0],
        ObstacleKind::Robot => [0.6, 0.65, 0.7, 1.0],
        ObstacleKind::Pumpkin => [1.0, 0.55, 0.0, 1.0],
        ObstacleKind::CrossedSwords => [0.75, 0.75, 0.85, 1.0],
        ObstacleKind::Dagger => [0.65, 0.7, 0.8, 1.0],
        ObstacleKind::Explosion => [1.0, 0.3, 0.1, 1.0],
        ObstacleKind::Banana => [1.0, 0.95, 0.35, 1.0],
    }
}

/// Build every vertex for one frame, back to front
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let vp = state.viewport;
    let mut vertices = Vec::with_capacity(1024);

    // Scrolling background
    let scroll = state.progress.background_offset.rem_euclid(STRIPE_SPACING);
    let mut y = -scroll;
    while y < vp.height {
        vertices.extend(shapes::rect(
            Vec2::new(0.0, y),
            Vec2::new(vp.width, y + STRIPE_HEIGHT),
            colors::BACKGROUND_STRIPE,
        ));
        y += STRIPE_SPACING;
    }

    for obstacle in &state.obstacles {
        vertices.extend(shapes::rotated_square(
            obstacle.pos,
            OBSTACLE_FILL_HALF,
            obstacle.rotation,
            obstacle_tint(obstacle.kind),
        ));
        vertices.extend(shapes::square_frame(
            obstacle.pos,
            OBSTACLE_FRAME_HALF,
            obstacle.rotation,
            LINE_WIDTH,
            colors::OBSTACLE_FRAME,
        ));
    }

    let player = &state.player;
    let (body, outline) = if player.hit {
        (colors::PLAYER_BODY_HIT, colors::PLAYER_BOX_HIT)
    } else {
        (colors::PLAYER_BODY, colors::PLAYER_BOX)
    };
    vertices.extend(shapes::rect(
        player.pos - Vec2::splat(PLAYER_BODY_HALF),
        player.pos + Vec2::splat(PLAYER_BODY_HALF),
        body,
    ));
    vertices.extend(shapes::dashed_box(
        player.pos,
        Vec2::splat(SPRITE_SIZE),
        DASH,
        GAP,
        LINE_WIDTH,
        outline,
    ));

    if state.is_game_over() {
        vertices.extend(shapes::rect(
            Vec2::ZERO,
            Vec2::new(vp.width, vp.height),
            colors::GAME_OVER_OVERLAY,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlatformProfile;
    use crate::sim::{game_over, spawn_batch};
    use crate::tuning::Tuning;
    use crate::Viewport;

    fn state() -> GameState {
        GameState::new(
            5,
            PlatformProfile::STANDARD,
            Tuning::default(),
            Viewport::new(800.0, 600.0),
            0,
        )
    }

    fn count_color(vertices: &[Vertex], color: Rgba) -> usize {
        vertices.iter().filter(|v| v.color == color).count()
    }

    #[test]
    fn test_player_box_turns_red_on_game_over() {
        let mut s = state();
        let before = build_scene(&s);
        assert_eq!(count_color(&before, colors::PLAYER_BOX), 144);
        assert_eq!(count_color(&before, colors::PLAYER_BOX_HIT), 0);
        assert_eq!(count_color(&before, colors::GAME_OVER_OVERLAY), 0);

        game_over(&mut s);
        let after = build_scene(&s);
        assert_eq!(count_color(&after, colors::PLAYER_BOX), 0);
        assert_eq!(count_color(&after, colors::PLAYER_BOX_HIT), 144);
        assert_eq!(count_color(&after, colors::GAME_OVER_OVERLAY), 6);
    }

    #[test]
    fn test_each_obstacle_gets_frame() {
        let mut s = state();
        spawn_batch(&mut s);
        let v = build_scene(&s);
        // Frame: 4 segments of 6 vertices
        assert_eq!(count_color(&v, colors::OBSTACLE_FRAME), s.obstacles.len() * 24);
    }
}
