//! Best score, persisted across sessions
//!
//! Stored as a plain integer string under a single key. Anything missing or
//! unreadable counts as zero.

use crate::platform::KeyValueStore;

/// All-time best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "doodleJumpHighScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Record a finished run. Returns true if it beat the best.
    pub fn submit(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load the best score, defaulting to zero
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let raw = match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read high score: {}", e);
                return Self::default();
            }
        };

        match parse_score(&raw) {
            Some(best) => {
                log::info!("Loaded high score {}", best);
                Self { best }
            }
            None => {
                log::warn!("Ignoring malformed high score {:?}", raw);
                Self::default()
            }
        }
    }

    /// Write the best score
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match store.set(Self::STORAGE_KEY, &self.best.to_string()) {
            Ok(()) => log::info!("High score saved ({})", self.best),
            Err(e) => log::warn!("Could not save high score: {}", e),
        }
    }
}

/// Parse a stored score. Older saves may hold a float like "250.0".
fn parse_score(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Ok(score) = raw.parse::<u64>() {
        return Some(score);
    }
    let value = raw.parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then(|| value.floor() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_submit_only_raises() {
        let mut hs = HighScore::new(100);
        assert!(!hs.submit(50));
        assert!(!hs.submit(100));
        assert_eq!(hs.best, 100);
        assert!(hs.submit(101));
        assert_eq!(hs.best, 101);
    }

    #[test]
    fn test_load_missing_is_zero() {
        let store = MemoryStore::new();
        assert_eq!(HighScore::load(&store).best, 0);
    }

    #[test]
    fn test_load_malformed_is_zero() {
        let mut store = MemoryStore::new();
        for bad in ["", "abc", "-5", "NaN", "1e999"] {
            store.set(HighScore::STORAGE_KEY, bad).unwrap();
            assert_eq!(HighScore::load(&store).best, 0, "value {bad:?}");
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut store = MemoryStore::new();
        HighScore::new(4321).save(&mut store);
        assert_eq!(
            store.get(HighScore::STORAGE_KEY).unwrap().as_deref(),
            Some("4321")
        );
        assert_eq!(HighScore::load(&store).best, 4321);

        store.set(HighScore::STORAGE_KEY, " 250.0 ").unwrap();
        assert_eq!(HighScore::load(&store).best, 250);
    }
}
