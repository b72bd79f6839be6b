//! Score and difficulty progression
//!
//! Score and background scroll accrue per frame. Difficulty moves in discrete
//! steps: the multiplier only grows, the spawn interval only shrinks (down to
//! a floor), and obstacle speed only grows (up to a cap).

use crate::consts::BASE_DIFFICULTY;
use crate::platform::PlatformProfile;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Accumulated score (displayed floored)
    pub score: f32,
    /// Scales spawn count, fall speed and score rate
    pub difficulty_multiplier: f32,
    /// Base fall speed before the multiplier (pixels/s)
    pub obstacle_speed: f32,
    /// Spawn timer interval
    pub obstacle_frequency_ms: u32,
    /// Background scroll per frame
    pub background_speed: f32,
    /// Total background scroll
    pub background_offset: f32,
    /// Number of difficulty steps taken
    pub level: u32,
}

impl Progress {
    pub fn new(profile: &PlatformProfile, tuning: &Tuning) -> Self {
        Self {
            score: 0.0,
            difficulty_multiplier: BASE_DIFFICULTY,
            obstacle_speed: profile.initial_obstacle_speed,
            obstacle_frequency_ms: tuning.initial_frequency_ms,
            background_speed: profile.base_background_speed,
            background_offset: 0.0,
            level: 0,
        }
    }

    /// Per-frame accrual
    pub fn tick(&mut self, profile: &PlatformProfile) {
        self.background_offset += self.background_speed;
        self.background_speed = profile.base_background_speed
            + self.difficulty_multiplier * profile.background_gain_factor;
        self.score += profile.base_score_rate * self.difficulty_multiplier;
    }

    /// One difficulty step
    pub fn increase_difficulty(&mut self, tuning: &Tuning) {
        self.level += 1;
        // Derived from the step count so repeated steps don't drift
        self.difficulty_multiplier = BASE_DIFFICULTY + tuning.difficulty_step * self.level as f32;
        self.obstacle_frequency_ms = self
            .obstacle_frequency_ms
            .saturating_sub(tuning.frequency_step_ms)
            .max(tuning.min_frequency_ms);
        if self.obstacle_speed < tuning.max_obstacle_speed {
            self.obstacle_speed = (self.obstacle_speed + tuning.speed_step).min(tuning.max_obstacle_speed);
        }
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> u64 {
        self.score.max(0.0).floor() as u64
    }

    /// Vertical velocity for newly spawned obstacles
    pub fn fall_speed(&self) -> f32 {
        self.obstacle_speed * self.difficulty_multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn standard() -> Progress {
        Progress::new(&PlatformProfile::STANDARD, &Tuning::default())
    }

    #[test]
    fn test_tick_standard_profile() {
        let profile = PlatformProfile::STANDARD;
        let mut p = standard();
        p.tick(&profile);

        assert!((p.score - 0.15).abs() < 1e-6);
        assert_eq!(p.background_offset, 5.0);
        assert!((p.background_speed - 5.75).abs() < 1e-6);

        p.tick(&profile);
        assert!((p.background_offset - 10.75).abs() < 1e-5);
    }

    #[test]
    fn test_tick_compact_profile() {
        let profile = PlatformProfile::COMPACT;
        let mut p = Progress::new(&profile, &Tuning::default());
        assert_eq!(p.obstacle_speed, 400.0);
        p.tick(&profile);

        assert!((p.score - 0.225).abs() < 1e-6);
        assert_eq!(p.background_offset, 8.0);
        assert!((p.background_speed - 9.2).abs() < 1e-5);
    }

    #[test]
    fn test_increase_difficulty_single_step() {
        let tuning = Tuning {
            initial_frequency_ms: 1000,
            ..Default::default()
        };
        let mut p = Progress::new(&PlatformProfile::STANDARD, &tuning);
        p.increase_difficulty(&tuning);

        assert!((p.difficulty_multiplier - 1.9).abs() < 1e-6);
        assert_eq!(p.obstacle_frequency_ms, 900);
        assert_eq!(p.obstacle_speed, 350.0);
    }

    #[test]
    fn test_default_frequency_starts_on_floor() {
        let tuning = Tuning::default();
        let mut p = standard();
        assert_eq!(p.obstacle_frequency_ms, 300);
        p.increase_difficulty(&tuning);
        assert_eq!(p.obstacle_frequency_ms, 300);
    }

    #[test]
    fn test_difficulty_saturates() {
        let tuning = Tuning::default();
        let mut p = standard();
        for _ in 0..50 {
            p.increase_difficulty(&tuning);
        }
        assert_eq!(p.obstacle_frequency_ms, 300);
        assert_eq!(p.obstacle_speed, 1000.0);
        assert!((p.difficulty_multiplier - 21.5).abs() < 1e-4);
    }

    #[test]
    fn test_display_score_floors() {
        let mut p = standard();
        p.score = 104.9;
        assert_eq!(p.display_score(), 104);
    }

    proptest! {
        #[test]
        fn prop_multiplier_is_linear_in_steps(n in 0u32..500) {
            let tuning = Tuning::default();
            let mut p = standard();
            for _ in 0..n {
                p.increase_difficulty(&tuning);
            }
            let expected = 1.5 + 0.4 * n as f32;
            prop_assert!((p.difficulty_multiplier - expected).abs() <= expected * 1e-5);
        }

        #[test]
        fn prop_frequency_and_speed_are_monotone(n in 0usize..200, compact in any::<bool>()) {
            let tuning = Tuning::default();
            let profile = if compact { PlatformProfile::COMPACT } else { PlatformProfile::STANDARD };
            let mut p = Progress::new(&profile, &tuning);
            for _ in 0..n {
                let before = p.clone();
                p.increase_difficulty(&tuning);
                prop_assert!(p.obstacle_frequency_ms <= before.obstacle_frequency_ms);
                prop_assert!(p.obstacle_frequency_ms >= 300);
                prop_assert!(p.obstacle_speed >= before.obstacle_speed);
                prop_assert!(p.obstacle_speed <= 1000.0);
                prop_assert!(p.difficulty_multiplier >= before.difficulty_multiplier);
            }
        }

        #[test]
        fn prop_speed_never_drops_when_starting_above_cap(start in 1000.0f32..2000.0) {
            let tuning = Tuning::default();
            let mut p = standard();
            p.obstacle_speed = start;
            p.increase_difficulty(&tuning);
            prop_assert_eq!(p.obstacle_speed, start);
        }
    }
}
