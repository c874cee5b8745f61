//! Exercise Cache Store
//!
//! Per-(user, language) pool of generated, not-yet-attempted exercises. Each
//! entry pairs a persisted exercise with a `used` flag that transitions
//! false -> true exactly once and never reverses. The cache exclusively owns
//! the exercise documents it creates: clearing the pool deletes them too.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{Exercise, NewExercise};
use crate::store::ExerciseStore;

// == Cache Entry ==
/// A cached exercise reference for one (user, language) pair.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Id of the exercise document this entry owns
    pub exercise_id: Uuid,
    pub user_id: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
    /// Consumption flag; flipped at most once, by attempt recording
    pub used: bool,
}

impl CacheEntry {
    fn matches(&self, user_id: &str, language: &str) -> bool {
        self.user_id == user_id && self.language == language
    }
}

// == Cache Store ==
/// Insertion-ordered cache entries plus the exercise documents they own.
#[derive(Debug, Clone)]
pub struct ExerciseCacheStore {
    entries: Arc<RwLock<Vec<CacheEntry>>>,
    exercises: ExerciseStore,
}

impl ExerciseCacheStore {
    /// Creates an empty cache over the given exercise collection.
    pub fn new(exercises: ExerciseStore) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            exercises,
        }
    }

    // == Insert ==
    /// Persists a generated exercise and caches an unused entry referencing it.
    ///
    /// Two-step write: the exercise document lands first, then the cache entry
    /// keyed on the freshly assigned id. A crash between the steps leaves an
    /// orphan exercise with no entry - garbage, not a correctness violation.
    pub async fn insert(&self, new: NewExercise, user_id: &str, language: &str) -> Exercise {
        let exercise = self.exercises.insert(new).await;

        let entry = CacheEntry {
            exercise_id: exercise.id,
            user_id: user_id.to_string(),
            language: language.to_string(),
            created_at: Utc::now(),
            used: false,
        };
        debug!(
            "Caching exercise {} for user {} language {}",
            exercise.id, user_id, language
        );

        let mut entries = self.entries.write().await;
        entries.push(entry);
        exercise
    }

    // == Peek Oldest Unused ==
    /// Returns the exercise referenced by the oldest unused entry, without
    /// consuming it. Consumption is a separate, explicit act tied to attempt
    /// recording, never to reads.
    pub async fn peek_oldest_unused(&self, user_id: &str, language: &str) -> Option<Exercise> {
        let exercise_id = {
            let entries = self.entries.read().await;
            entries
                .iter()
                .find(|e| e.matches(user_id, language) && !e.used)
                .map(|e| e.exercise_id)
        }?;
        self.exercises.fetch(exercise_id).await
    }

    // == Count Unused ==
    /// Number of unused entries for a (user, language) pair.
    pub async fn count_unused(&self, user_id: &str, language: &str) -> usize {
        let entries = self.entries.read().await;
        entries
            .iter()
            .filter(|e| e.matches(user_id, language) && !e.used)
            .count()
    }

    // == List All Unused ==
    /// All unused exercises for a (user, language) pair, oldest first.
    ///
    /// Entries whose exercise document has gone missing are skipped.
    pub async fn list_all_unused(&self, user_id: &str, language: &str) -> Vec<Exercise> {
        let ids: Vec<Uuid> = {
            let entries = self.entries.read().await;
            entries
                .iter()
                .filter(|e| e.matches(user_id, language) && !e.used)
                .map(|e| e.exercise_id)
                .collect()
        };

        let mut exercises = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(exercise) = self.exercises.fetch(id).await {
                exercises.push(exercise);
            }
        }
        exercises
    }

    // == Mark Used ==
    /// Conditionally flips the matching entry's `used` flag.
    ///
    /// Succeeds only if the entry currently has `used = false`; this single
    /// conditional update is the at-most-once consumption guarantee. Returns
    /// whether an entry was flipped.
    pub async fn mark_used(&self, exercise_id: Uuid, user_id: &str, language: &str) -> bool {
        let mut entries = self.entries.write().await;
        match entries
            .iter_mut()
            .find(|e| e.exercise_id == exercise_id && e.matches(user_id, language) && !e.used)
        {
            Some(entry) => {
                entry.used = true;
                debug!("Marked cached exercise {} as used", exercise_id);
                true
            }
            None => false,
        }
    }

    // == Clear ==
    /// Deletes all cache entries for a (user, language) pair, used or not,
    /// along with the exercise documents they own. Returns the number of
    /// entries deleted.
    pub async fn clear(&self, user_id: &str, language: &str) -> usize {
        let removed: Vec<Uuid> = {
            let mut entries = self.entries.write().await;
            let ids = entries
                .iter()
                .filter(|e| e.matches(user_id, language))
                .map(|e| e.exercise_id)
                .collect();
            entries.retain(|e| !e.matches(user_id, language));
            ids
        };

        self.exercises.delete_many(&removed).await;
        info!(
            "Cleared {} cache entries for user {} language {}",
            removed.len(),
            user_id,
            language
        );
        removed.len()
    }
}
