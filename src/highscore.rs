//! Best score
//!
//! A single integer persisted to LocalStorage as a decimal string. Storage is
//! best-effort: a failed read counts as no record, a failed write is skipped.

use crate::platform::KeyValueStore;

/// Best score across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "highScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Record a final score. Returns true if it set a new best.
    pub fn record(&mut self, score: f32) -> bool {
        let whole = score.max(0.0).floor() as u64;
        if whole > self.best {
            self.best = whole;
            true
        } else {
            false
        }
    }

    /// Read the stored best score (0 if absent, unreadable or malformed)
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match parse_score(&raw) {
                Some(best) => {
                    log::info!("Loaded high score {}", best);
                    Self { best }
                }
                None => {
                    log::warn!("Ignoring malformed high score {:?}", raw);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read high score: {}", e);
                Self::default()
            }
        }
    }

    /// Write the best score. Failures are logged and otherwise ignored.
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match store.set(Self::STORAGE_KEY, &self.best.to_string()) {
            Ok(()) => log::info!("High score saved ({})", self.best),
            Err(e) => log::warn!("Could not save high score: {}", e),
        }
    }
}

/// Parse a stored score. Tolerates a fractional part, which older saves
/// may carry, by truncating it.
fn parse_score(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<u64>() {
        return Some(n);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 => Some(f.floor() as u64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_record_only_improves() {
        let mut hs = HighScore::new(100);
        assert!(!hs.record(87.9));
        assert_eq!(hs.best, 100);

        assert!(hs.record(104.2));
        assert_eq!(hs.best, 104);

        // floor(100.9) == 100 does not beat 100
        let mut hs = HighScore::new(100);
        assert!(!hs.record(100.9));
        assert_eq!(hs.best, 100);
    }

    #[test]
    fn test_load_save_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(HighScore::load(&store).best, 0);

        HighScore::new(321).save(&mut store);
        assert_eq!(store.get(HighScore::STORAGE_KEY).unwrap().as_deref(), Some("321"));
        assert_eq!(HighScore::load(&store).best, 321);
    }

    #[test]
    fn test_load_tolerates_garbage() {
        let mut store = MemoryStore::new();
        store.set(HighScore::STORAGE_KEY, "banana").unwrap();
        assert_eq!(HighScore::load(&store).best, 0);

        store.set(HighScore::STORAGE_KEY, "-5").unwrap();
        assert_eq!(HighScore::load(&store).best, 0);

        store.set(HighScore::STORAGE_KEY, "42.7").unwrap();
        assert_eq!(HighScore::load(&store).best, 42);
    }

    #[test]
    fn test_unavailable_storage_is_not_fatal() {
        let mut store = MemoryStore::unavailable();
        assert_eq!(HighScore::load(&store), HighScore::default());
        // Must not panic
        HighScore::new(10).save(&mut store);
    }
}
