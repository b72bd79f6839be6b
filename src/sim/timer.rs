//! Repeating timers driven by the simulation step
//!
//! The interval is passed on every advance, so a timer follows a value that
//! changes while it runs (the spawn interval shrinks with difficulty).

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntervalTimer {
    elapsed_ms: f32,
}

impl IntervalTimer {
    /// Advance by `dt_ms` and return how many times the timer fired.
    /// An interval of 0 never fires.
    pub fn advance(&mut self, dt_ms: f32, interval_ms: u32) -> u32 {
        if interval_ms == 0 {
            return 0;
        }
        let interval = interval_ms as f32;
        self.elapsed_ms += dt_ms;
        let mut fired = 0;
        while self.elapsed_ms >= interval {
            self.elapsed_ms -= interval;
            fired += 1;
        }
        fired
    }
}
