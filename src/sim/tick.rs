//! Fixed timestep simulation tick
//!
//! Frame order: progress accrual, timers (spawn, difficulty), off-screen
//! sweep, player input, motion, collision.

use super::collision::first_collision;
use super::input::{PlayerCommand, PointerEvent, key_velocity, map_pointer};
use super::spawner::{spawn_batch, sweep_offscreen};
use super::state::{GameEvent, GamePhase, GameState};
use crate::highscore::HighScore;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left arrow (or A) held
    pub left: bool,
    /// Right arrow (or D) held
    pub right: bool,
    /// Pointer events since the last tick, oldest first
    pub pointer: Vec<PointerEvent>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.is_game_over() {
        // Motion is frozen; only the sweep keeps running
        sweep_offscreen(
            &mut state.obstacles,
            state.viewport.height,
            state.tuning.cleanup_margin,
        );
        return;
    }

    state.time_ticks += 1;

    state.progress.tick(&state.profile);

    let dt_ms = dt * 1000.0;
    let spawns = state
        .spawn_timer
        .advance(dt_ms, state.progress.obstacle_frequency_ms);
    for _ in 0..spawns {
        let count = spawn_batch(state);
        state.events.push(GameEvent::ObstaclesSpawned { count });
    }

    let steps = state
        .difficulty_timer
        .advance(dt_ms, state.tuning.difficulty_interval_ms);
    for _ in 0..steps {
        state.progress.increase_difficulty(&state.tuning);
        let multiplier = state.progress.difficulty_multiplier;
        log::debug!(
            "Difficulty {:.1}: every {} ms at speed {}",
            multiplier,
            state.progress.obstacle_frequency_ms,
            state.progress.obstacle_speed
        );
        state.events.push(GameEvent::DifficultyIncreased { multiplier });
    }

    sweep_offscreen(
        &mut state.obstacles,
        state.viewport.height,
        state.tuning.cleanup_margin,
    );

    apply_input(state, input);

    // Integrate motion (no gravity, constant velocities)
    for obstacle in &mut state.obstacles {
        obstacle.pos += obstacle.vel * dt;
        obstacle.rotation = (obstacle.rotation + obstacle.angular_vel * dt).rem_euclid(360.0);
    }
    state.player.pos.x += state.player.vel_x * dt;
    state.player.clamp_to(&state.viewport);

    let player_box = state.player.hitbox();
    if let Some(id) = first_collision(&player_box, &state.obstacles, state.tuning.hitbox_inset, dt) {
        if let Some(hit) = state.obstacles.iter().find(|o| o.id == id) {
            log::debug!("Player hit by {} (obstacle {})", hit.kind.glyph(), id);
        }
        game_over(state);
    }
}

/// Route pointer and keyboard input to the player
fn apply_input(state: &mut GameState, input: &TickInput) {
    let scheme = state.profile.control;
    for event in &input.pointer {
        let command = map_pointer(
            scheme,
            &mut state.pointer,
            event,
            state.player.pos.x,
            &state.viewport,
            &state.tuning,
        );
        match command {
            PlayerCommand::Hold => {}
            PlayerCommand::SetVelocity(vx) => state.player.drive_x = vx,
            PlayerCommand::MoveTo(x) => state.player.pos.x = x,
        }
    }

    // Held keys override any pointer nudge
    state.player.vel_x =
        key_velocity(input.left, input.right, &state.tuning).unwrap_or(state.player.drive_x);
}

/// Enter the terminal state. Returns false if the session was already over.
pub fn game_over(state: &mut GameState) -> bool {
    if state.is_game_over() {
        return false;
    }
    state.phase = GamePhase::GameOver;

    for obstacle in &mut state.obstacles {
        obstacle.angular_vel = 0.0;
    }
    state.player.hit = true;
    state.player.vel_x = 0.0;
    state.player.drive_x = 0.0;
    state.pointer.anchor_x = None;

    let mut best = HighScore::new(state.high_score);
    let new_record = best.record(state.progress.score);
    state.high_score = best.best;

    let score = state.progress.display_score();
    log::info!(
        "Game over: score {} (best {}{})",
        score,
        state.high_score,
        if new_record { ", new record" } else { "" }
    );
    state.events.push(GameEvent::GameOver {
        score,
        high_score: state.high_score,
        new_record,
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::platform::PlatformProfile;
    use crate::sim::input::PointerPhase;
    use crate::sim::state::{Obstacle, ObstacleKind};
    use crate::tuning::Tuning;
    use crate::Viewport;
    use glam::Vec2;

    fn new_state(profile: PlatformProfile) -> GameState {
        GameState::new(12345, profile, Tuning::default(), Viewport::new(800.0, 600.0), 100)
    }

    fn obstacle_on_player(state: &mut GameState) -> Obstacle {
        Obstacle {
            id: state.next_entity_id(),
            kind: ObstacleKind::Bomb,
            pos: state.player.pos,
            vel: Vec2::new(0.0, 450.0),
            rotation: 0.0,
            angular_vel: 90.0,
        }
    }

    #[test]
    fn test_tick_accrues_score() {
        let mut state = new_state(PlatformProfile::STANDARD);
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!((state.progress.score - 9.0).abs() < 1e-3);
        assert_eq!(state.time_ticks, 60);
    }

    #[test]
    fn test_spawn_timer_follows_frequency() {
        let mut state = new_state(PlatformProfile::STANDARD);
        // 300 ms interval at 60 Hz: first batch around frame 18
        for _ in 0..17 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.obstacles.is_empty());
        tick(&mut state, &TickInput::default(), SIM_DT);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.obstacles.len(), 2);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::ObstaclesSpawned { count: 2 })
        );
    }

    #[test]
    fn test_difficulty_ramp_is_periodic() {
        let mut state = new_state(PlatformProfile::STANDARD);
        // Keep the player clear of everything for 10.5 s
        state.tuning.spawn_margin_x = 700;
        state.player.pos.x = 30.0;
        for _ in 0..630 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(!state.is_game_over());
        assert_eq!(state.progress.level, 1);
        assert!((state.progress.difficulty_multiplier - 1.9).abs() < 1e-6);
    }

    #[test]
    fn test_difficulty_ramp_can_be_disabled() {
        let mut state = new_state(PlatformProfile::STANDARD);
        state.tuning.difficulty_interval_ms = 0;
        state.tuning.max_batch = 1;
        state.tuning.spawn_margin_x = 700;
        state.player.pos.x = 30.0;
        for _ in 0..1200 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.progress.level, 0);
    }

    #[test]
    fn test_obstacles_fall_and_are_swept() {
        let mut state = new_state(PlatformProfile::STANDARD);
        let mut o = obstacle_on_player(&mut state);
        o.pos = Vec2::new(700.0, 635.0);
        o.vel = Vec2::new(0.0, 600.0);
        state.obstacles.push(o);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.obstacles.len(), 1);
        assert!((state.obstacles[0].pos.y - 645.0).abs() < 1e-3);

        // 645 is within the limit (650); it moves on to 655
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.obstacles.len(), 1);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_swept_obstacle_never_collides() {
        let mut state = new_state(PlatformProfile::STANDARD);
        let mut o = obstacle_on_player(&mut state);
        o.pos.y = 700.0;
        o.vel = Vec2::ZERO;
        state.obstacles.push(o);
        // Same column as the player, but already past the limit
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.obstacles.is_empty());
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_fast_obstacle_hits_player_between_steps() {
        let mut state = new_state(PlatformProfile::STANDARD);
        state.tuning.difficulty_interval_ms = 0;
        for _ in 0..14 {
            state.progress.increase_difficulty(&state.tuning);
        }
        let speed = state.progress.fall_speed();
        // Each step moves further than player box + obstacle box (60 + 50)
        assert!(speed * SIM_DT > 110.0);

        let mut o = obstacle_on_player(&mut state);
        o.pos.y = state.tuning.spawn_y;
        o.vel = Vec2::new(0.0, speed);
        o.angular_vel = 0.0;
        state.obstacles.push(o);

        // Less than one spawn interval, so nothing else is on screen
        for _ in 0..8 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            if state.is_game_over() {
                break;
            }
        }
        assert!(state.is_game_over());
        assert!(state.player.hit);
    }

    #[test]
    fn test_collision_ends_game_once() {
        let mut state = new_state(PlatformProfile::STANDARD);
        state.progress.score = 104.2;
        let o = obstacle_on_player(&mut state);
        state.obstacles.push(o);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.player.hit);
        assert!(state.obstacles.iter().all(|o| o.angular_vel == 0.0));
        assert_eq!(state.high_score, 104);

        let events = state.drain_events();
        let game_overs: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(
            game_overs,
            vec![&GameEvent::GameOver {
                score: 104,
                high_score: 104,
                new_record: true
            }]
        );

        // Frozen: further ticks and collisions change nothing
        let frozen: Vec<Vec2> = state.obstacles.iter().map(|o| o.pos).collect();
        let score = state.progress.score;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(!game_over(&mut state));
        assert!(state.drain_events().is_empty());
        assert_eq!(state.progress.score, score);
        let after: Vec<Vec2> = state.obstacles.iter().map(|o| o.pos).collect();
        assert_eq!(frozen, after);
    }

    #[test]
    fn test_low_score_keeps_high_score() {
        let mut state = new_state(PlatformProfile::STANDARD);
        state.progress.score = 87.9;
        assert!(game_over(&mut state));
        assert_eq!(state.high_score, 100);
        assert!(state.drain_events().contains(&GameEvent::GameOver {
            score: 87,
            high_score: 100,
            new_record: false
        }));
    }

    #[test]
    fn test_keyboard_moves_player() {
        let mut state = new_state(PlatformProfile::STANDARD);
        let start = state.player.pos.x;
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut state, &input, SIM_DT);
        }
        assert!((state.player.pos.x - (start + 200.0)).abs() < 0.5);

        // Released: stops
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.vel_x, 0.0);
    }

    #[test]
    fn test_player_stays_in_bounds() {
        let mut state = new_state(PlatformProfile::STANDARD);
        let input = TickInput {
            left: true,
            ..Default::default()
        };
        state.tuning.spawn_margin_x = 700;
        for _ in 0..300 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.player.pos.x, 30.0);
    }

    #[test]
    fn test_pointer_nudge_persists_until_release() {
        let mut state = new_state(PlatformProfile::STANDARD);
        let press = TickInput {
            pointer: vec![
                PointerEvent::new(100.0, 100.0, PointerPhase::Down),
                PointerEvent::new(130.0, 100.0, PointerPhase::Move),
            ],
            ..Default::default()
        };
        tick(&mut state, &press, SIM_DT);
        assert_eq!(state.player.vel_x, 200.0);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.vel_x, 200.0);

        // A held key wins, the nudge resumes once it is released
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        tick(&mut state, &left, SIM_DT);
        assert_eq!(state.player.vel_x, -400.0);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.vel_x, 200.0);

        let release = TickInput {
            pointer: vec![PointerEvent::new(130.0, 100.0, PointerPhase::Up)],
            ..Default::default()
        };
        tick(&mut state, &release, SIM_DT);
        assert_eq!(state.player.vel_x, 0.0);
        assert_eq!(state.player.drive_x, 0.0);
    }

    #[test]
    fn test_pointer_slide_on_compact_profile() {
        let mut state = new_state(PlatformProfile::COMPACT);
        let drag = TickInput {
            pointer: vec![
                PointerEvent::new(100.0, 500.0, PointerPhase::Down),
                PointerEvent::new(20.0, 500.0, PointerPhase::Move),
            ],
            ..Default::default()
        };
        tick(&mut state, &drag, SIM_DT);
        assert_eq!(state.player.pos.x, 320.0);
        assert_eq!(state.player.vel_x, 0.0);
    }

    #[test]
    fn test_input_ignored_after_game_over() {
        let mut state = new_state(PlatformProfile::COMPACT);
        game_over(&mut state);
        let x = state.player.pos.x;
        let drag = TickInput {
            right: true,
            pointer: vec![
                PointerEvent::new(100.0, 500.0, PointerPhase::Down),
                PointerEvent::new(300.0, 500.0, PointerPhase::Move),
            ],
            ..Default::default()
        };
        tick(&mut state, &drag, SIM_DT);
        assert_eq!(state.player.pos.x, x);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = new_state(PlatformProfile::STANDARD);
        state.progress.increase_difficulty(&state.tuning);
        state.progress.score = 250.0;
        game_over(&mut state);
        assert_eq!(state.high_score, 250);

        let fresh = state.restarted(99, state.high_score);
        assert_eq!(fresh.phase, GamePhase::Running);
        assert_eq!(fresh.progress.score, 0.0);
        assert_eq!(fresh.progress.difficulty_multiplier, 1.5);
        assert!(fresh.obstacles.is_empty());
        assert!(!fresh.player.hit);
        assert_eq!(fresh.high_score, 250);
    }
}
