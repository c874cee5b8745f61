//! Engine Statistics Module
//!
//! Tracks how next-exercise requests were served and how much background
//! replenishment has run.

use serde::Serialize;

// == Engine Stats ==
/// Counters for engine activity.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EngineStats {
    /// Next-exercise requests served from the cache pool
    pub cache_hits: u64,
    /// Next-exercise requests that had to generate synchronously
    pub generated_on_demand: u64,
    /// Exercises inserted by replenishment runs
    pub replenished: u64,
    /// Successfully recorded attempts
    pub attempts_recorded: u64,
}

impl EngineStats {
    // == Constructor ==
    /// Creates a new EngineStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Fraction of next-exercise requests served from the pool.
    ///
    /// Returns hits / (hits + on-demand generations), or 0.0 before any
    /// request has been served.
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.generated_on_demand;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }

    // == Record Cache Hit ==
    /// Increments the cache-hit counter.
    pub fn record_cache_hit(&mut self) {
        self.cache_hits += 1;
    }

    // == Record On-Demand Generation ==
    /// Increments the on-demand generation counter.
    pub fn record_generated_on_demand(&mut self) {
        self.generated_on_demand += 1;
    }

    // == Record Replenished ==
    /// Adds replenished exercises to the counter.
    pub fn record_replenished(&mut self, count: usize) {
        self.replenished += count as u64;
    }

    // == Record Attempt ==
    /// Increments the recorded-attempt counter.
    pub fn record_attempt(&mut self) {
        self.attempts_recorded += 1;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = EngineStats::new();
        assert_eq!(stats.cache_hits, 0);
        assert_eq!(stats.generated_on_demand, 0);
        assert_eq!(stats.replenished, 0);
        assert_eq!(stats.attempts_recorded, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = EngineStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = EngineStats::new();
        stats.record_cache_hit();
        stats.record_generated_on_demand();
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_record_replenished_accumulates() {
        let mut stats = EngineStats::new();
        stats.record_replenished(3);
        stats.record_replenished(2);
        assert_eq!(stats.replenished, 5);
    }

    #[test]
    fn test_record_attempt() {
        let mut stats = EngineStats::new();
        stats.record_attempt();
        stats.record_attempt();
        assert_eq!(stats.attempts_recorded, 2);
    }
}
