//! Best survival times
//!
//! Persisted to LocalStorage, tracks the top 10 longest runs.

use serde::{Deserialize, Serialize};

/// Maximum number of best times to keep
pub const MAX_BEST_TIMES: usize = 10;

/// A single recorded run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestTimeEntry {
    /// Whole seconds survived
    pub seconds: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Best-times leaderboard, sorted descending by seconds survived
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BestTimes {
    pub entries: Vec<BestTimeEntry>,
}

impl BestTimes {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dodge_pups_best_times";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a run qualifies for the leaderboard
    pub fn qualifies(&self, seconds: u32) -> bool {
        if seconds == 0 {
            return false;
        }
        if self.entries.len() < MAX_BEST_TIMES {
            return true;
        }
        self.entries
            .last()
            .map(|e| seconds > e.seconds)
            .unwrap_or(true)
    }

    /// Record a run (if it qualifies). Returns the rank achieved
    /// (1-indexed) or None if it didn't qualify.
    pub fn record(&mut self, seconds: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(seconds) {
            return None;
        }

        let entry = BestTimeEntry { seconds, timestamp };

        let pos = self.entries.iter().position(|e| seconds > e.seconds);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_BEST_TIMES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest run on record (if any)
    pub fn best(&self) -> Option<u32> {
        self.entries.first().map(|e| e.seconds)
    }

    /// Load best times from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        if let Some(storage) = crate::browser::local_storage() {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(times) = serde_json::from_str::<BestTimes>(&json) {
                    log::info!("Loaded {} best times", times.entries.len());
                    return times;
                }
            }
        }

        log::info!("No best times found, starting fresh");
        Self::new()
    }

    /// Save best times to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        if let Some(storage) = crate::browser::local_storage() {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Best times saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_seconds_never_qualifies() {
        let times = BestTimes::new();
        assert!(!times.qualifies(0));
    }

    #[test]
    fn test_record_keeps_descending_order() {
        let mut times = BestTimes::new();
        assert_eq!(times.record(10, 0.0), Some(1));
        assert_eq!(times.record(30, 1.0), Some(1));
        assert_eq!(times.record(20, 2.0), Some(2));
        let secs: Vec<u32> = times.entries.iter().map(|e| e.seconds).collect();
        assert_eq!(secs, vec![30, 20, 10]);
        assert_eq!(times.best(), Some(30));
    }

    #[test]
    fn test_leaderboard_truncates_at_max() {
        let mut times = BestTimes::new();
        for s in 1..=(MAX_BEST_TIMES as u32 + 5) {
            times.record(s, 0.0);
        }
        assert_eq!(times.entries.len(), MAX_BEST_TIMES);
        // Worst surviving entry beats everything that was pushed out
        assert_eq!(times.entries.last().unwrap().seconds, 6);
        assert!(!times.qualifies(5));
        assert!(times.qualifies(7));
    }
}
