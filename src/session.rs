//! Play session driver
//!
//! Owns the game state and the key-value store, runs fixed substeps for each
//! rendered frame and persists a new best score as soon as it happens.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::highscore::HighScore;
use crate::platform::{KeyValueStore, PlatformProfile};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;
use crate::Viewport;

pub struct Session<S: KeyValueStore> {
    pub state: GameState,
    store: S,
    accumulator: f32,
}

impl<S: KeyValueStore> Session<S> {
    /// Start a session, reading the stored best score
    pub fn new(store: S, seed: u64, profile: PlatformProfile, tuning: Tuning, viewport: Viewport) -> Self {
        let best = HighScore::load(&store);
        log::info!("Session started with seed {} (best {})", seed, best.best);
        Self {
            state: GameState::new(seed, profile, tuning, viewport, best.best),
            store,
            accumulator: 0.0,
        }
    }

    /// Run the simulation for one rendered frame. Pointer events in `input`
    /// are consumed by the first substep; held keys stay.
    pub fn update(&mut self, dt: f32, input: &mut TickInput) -> Vec<GameEvent> {
        let dt = dt.clamp(0.0, 0.1);
        self.accumulator += dt;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.pointer.clear();

            for event in self.state.drain_events() {
                if let GameEvent::GameOver {
                    high_score,
                    new_record: true,
                    ..
                } = event
                {
                    HighScore::new(high_score).save(&mut self.store);
                }
                events.push(event);
            }
        }
        events
    }

    /// Throw the session away and start over. The best score carries over.
    pub fn restart(&mut self, seed: u64) {
        let persisted = HighScore::load(&self.store).best;
        let best = persisted.max(self.state.high_score);
        self.state = self.state.restarted(seed, best);
        self.accumulator = 0.0;
        log::info!("Game restarted with seed: {}", seed);
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist settings next to the best score
    pub fn save_settings(&mut self, settings: &Settings) {
        settings.save(&mut self.store);
    }
}
