//! Configuration Module
//!
//! Handles loading and managing engine configuration from environment variables.

use std::env;

/// Engine configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Target number of unused cached exercises per (user, language)
    pub cache_target_size: usize,
    /// Number of background replenishment workers
    pub replenish_workers: usize,
    /// Capacity of the bounded replenishment job queue
    pub replenish_queue_capacity: usize,
    /// Retries per replenishment job after the initial failure
    pub replenish_max_retries: u32,
    /// Base backoff between job retries, in milliseconds (doubles per retry)
    pub replenish_retry_backoff_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TARGET_SIZE` - Cached exercises per user/language (default: 3)
    /// - `REPLENISH_WORKERS` - Background workers (default: 2)
    /// - `REPLENISH_QUEUE_CAPACITY` - Job queue capacity (default: 64)
    /// - `REPLENISH_MAX_RETRIES` - Retries per failed job (default: 2)
    /// - `REPLENISH_RETRY_BACKOFF_MS` - Base retry backoff (default: 250)
    pub fn from_env() -> Self {
        Self {
            cache_target_size: env::var("CACHE_TARGET_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            replenish_workers: env::var("REPLENISH_WORKERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
            replenish_queue_capacity: env::var("REPLENISH_QUEUE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(64),
            replenish_max_retries: env::var("REPLENISH_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
            replenish_retry_backoff_ms: env::var("REPLENISH_RETRY_BACKOFF_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(250),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_target_size: 3,
            replenish_workers: 2,
            replenish_queue_capacity: 64,
            replenish_max_retries: 2,
            replenish_retry_backoff_ms: 250,
        }
    }
}
