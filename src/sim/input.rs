//! Pointer input mapping
//!
//! Two schemes, picked by the platform profile:
//! - `Nudge`: dragging past a dead zone pushes the player at a fixed speed
//! - `Slide`: the player follows the finger 1:1 from where the drag began

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;
use crate::Viewport;

/// Pointer control scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlScheme {
    #[default]
    Nudge,
    Slide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// A pointer (mouse or touch) event in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
    pub phase: PointerPhase,
}

impl PointerEvent {
    pub fn new(x: f32, y: f32, phase: PointerPhase) -> Self {
        Self { x, y, phase }
    }
}

/// Drag state carried between pointer events
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTracker {
    /// Pointer x at drag start (None when no drag is active)
    pub anchor_x: Option<f32>,
    /// Player x at drag start
    pub player_anchor_x: f32,
}

/// What a pointer event asks the player to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    /// Leave the player alone
    Hold,
    /// Drive horizontally at this speed
    SetVelocity(f32),
    /// Jump straight to this x
    MoveTo(f32),
}

/// Map one pointer event to a player command, updating the drag state
pub fn map_pointer(
    scheme: ControlScheme,
    tracker: &mut PointerTracker,
    event: &PointerEvent,
    player_x: f32,
    viewport: &Viewport,
    tuning: &Tuning,
) -> PlayerCommand {
    match event.phase {
        PointerPhase::Down => {
            tracker.anchor_x = Some(event.x);
            tracker.player_anchor_x = player_x;
            PlayerCommand::Hold
        }
        PointerPhase::Up => {
            tracker.anchor_x = None;
            match scheme {
                ControlScheme::Nudge => PlayerCommand::SetVelocity(0.0),
                ControlScheme::Slide => PlayerCommand::Hold,
            }
        }
        PointerPhase::Move => {
            let Some(anchor) = tracker.anchor_x else {
                return PlayerCommand::Hold;
            };
            let delta = event.x - anchor;
            match scheme {
                ControlScheme::Nudge => {
                    let vx = if delta > tuning.nudge_dead_zone {
                        tuning.nudge_speed
                    } else if delta < -tuning.nudge_dead_zone {
                        -tuning.nudge_speed
                    } else {
                        0.0
                    };
                    PlayerCommand::SetVelocity(vx)
                }
                ControlScheme::Slide => {
                    let lo = tuning.slide_margin;
                    let hi = (viewport.width - tuning.slide_margin).max(lo);
                    PlayerCommand::MoveTo((tracker.player_anchor_x + delta).clamp(lo, hi))
                }
            }
        }
    }
}

/// Keyboard velocity, if an arrow key is held. Left wins a tie.
pub fn key_velocity(left: bool, right: bool, tuning: &Tuning) -> Option<f32> {
    if left {
        Some(-tuning.key_speed)
    } else if right {
        Some(tuning.key_speed)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(x: f32, phase: PointerPhase) -> PointerEvent {
        PointerEvent::new(x, 300.0, phase)
    }

    #[test]
    fn test_nudge_dead_zone() {
        let tuning = Tuning::default();
        let vp = Viewport::default();
        let mut t = PointerTracker::default();
        let scheme = ControlScheme::Nudge;

        assert_eq!(
            map_pointer(scheme, &mut t, &ev(200.0, PointerPhase::Down), 400.0, &vp, &tuning),
            PlayerCommand::Hold
        );
        assert_eq!(
            map_pointer(scheme, &mut t, &ev(208.0, PointerPhase::Move), 400.0, &vp, &tuning),
            PlayerCommand::SetVelocity(0.0)
        );
        assert_eq!(
            map_pointer(scheme, &mut t, &ev(215.0, PointerPhase::Move), 400.0, &vp, &tuning),
            PlayerCommand::SetVelocity(200.0)
        );
        assert_eq!(
            map_pointer(scheme, &mut t, &ev(150.0, PointerPhase::Move), 400.0, &vp, &tuning),
            PlayerCommand::SetVelocity(-200.0)
        );
        assert_eq!(t.anchor_x, Some(200.0));

        assert_eq!(
            map_pointer(scheme, &mut t, &ev(150.0, PointerPhase::Up), 400.0, &vp, &tuning),
            PlayerCommand::SetVelocity(0.0)
        );
        assert_eq!(t.anchor_x, None);
    }

    #[test]
    fn test_move_without_down_is_ignored() {
        let tuning = Tuning::default();
        let mut t = PointerTracker::default();
        for scheme in [ControlScheme::Nudge, ControlScheme::Slide] {
            assert_eq!(
                map_pointer(scheme, &mut t, &ev(500.0, PointerPhase::Move), 400.0, &Viewport::default(), &tuning),
                PlayerCommand::Hold
            );
        }
    }

    #[test]
    fn test_slide_follows_drag_and_clamps() {
        let tuning = Tuning::default();
        let vp = Viewport::new(800.0, 600.0);
        let mut t = PointerTracker::default();
        let scheme = ControlScheme::Slide;

        map_pointer(scheme, &mut t, &ev(100.0, PointerPhase::Down), 400.0, &vp, &tuning);
        assert_eq!(
            map_pointer(scheme, &mut t, &ev(160.0, PointerPhase::Move), 999.0, &vp, &tuning),
            PlayerCommand::MoveTo(460.0)
        );
        assert_eq!(
            map_pointer(scheme, &mut t, &ev(-900.0, PointerPhase::Move), 999.0, &vp, &tuning),
            PlayerCommand::MoveTo(50.0)
        );
        assert_eq!(
            map_pointer(scheme, &mut t, &ev(900.0, PointerPhase::Move), 999.0, &vp, &tuning),
            PlayerCommand::MoveTo(750.0)
        );
        map_pointer(scheme, &mut t, &ev(900.0, PointerPhase::Up), 750.0, &vp, &tuning);
        assert_eq!(t.anchor_x, None);
    }

    #[test]
    fn test_key_velocity() {
        let tuning = Tuning::default();
        assert_eq!(key_velocity(true, false, &tuning), Some(-400.0));
        assert_eq!(key_velocity(false, true, &tuning), Some(400.0));
        assert_eq!(key_velocity(true, true, &tuning), Some(-400.0));
        assert_eq!(key_velocity(false, false, &tuning), None);
    }
}
