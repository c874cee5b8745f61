//! Store Module
//!
//! Document collections backing the practice engine: tokenbanks, exercises,
//! cache entries, and attempts. Every collection sits behind its own
//! `Arc<RwLock<...>>`, so each operation is an atomic single-collection
//! read-modify-write; no cross-collection transactions exist, matching the
//! consistency model the engine is designed around.
//!
//! The `Store` handle owns all four collections and is passed explicitly into
//! each component at construction, with an open-on-startup/close-on-shutdown
//! lifecycle.

mod attempts;
mod cache;
mod exercises;
mod stats;
mod tokenbank;


// Re-export public types
pub use attempts::AttemptStore;
pub use cache::{CacheEntry, ExerciseCacheStore};
pub use exercises::ExerciseStore;
pub use stats::EngineStats;
pub use tokenbank::TokenBankStore;

use tracing::info;

// == Store Handle ==
/// Handle over all engine collections.
///
/// Cloning is cheap and shares the underlying collections.
#[derive(Debug, Clone)]
pub struct Store {
    tokenbanks: TokenBankStore,
    exercises: ExerciseStore,
    cache: ExerciseCacheStore,
    attempts: AttemptStore,
}

impl Store {
    /// Opens a fresh, empty store.
    pub fn open() -> Self {
        let exercises = ExerciseStore::new();
        let store = Self {
            tokenbanks: TokenBankStore::new(),
            cache: ExerciseCacheStore::new(exercises.clone()),
            exercises,
            attempts: AttemptStore::new(),
        };
        info!("Store opened");
        store
    }

    /// The per-(user, language) token practice counts.
    pub fn tokenbanks(&self) -> &TokenBankStore {
        &self.tokenbanks
    }

    /// The immutable exercise documents.
    pub fn exercises(&self) -> &ExerciseStore {
        &self.exercises
    }

    /// The per-(user, language) pool of unused cached exercises.
    pub fn cache(&self) -> &ExerciseCacheStore {
        &self.cache
    }

    /// The immutable attempt records.
    pub fn attempts(&self) -> &AttemptStore {
        &self.attempts
    }

    /// Closes the store, releasing this handle's share of the collections.
    pub fn close(self) {
        info!("Store closed");
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::open()
    }
}
