//! Attempt Store
//!
//! Immutable attempt records, uniquely keyed by (user, exercise). Insertion
//! is first-write-wins: the uniqueness check and the write happen under one
//! write lock, so racing inserts for the same pair admit exactly one record.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, Result};
use crate::models::{ExerciseAttempt, NewAttempt};

/// Collection of attempt records keyed by (user, exercise).
#[derive(Debug, Clone, Default)]
pub struct AttemptStore {
    attempts: Arc<RwLock<HashMap<(String, Uuid), ExerciseAttempt>>>,
}

impl AttemptStore {
    /// Creates an empty attempt store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Find ==
    /// Looks up the attempt for a (user, exercise) pair, if one exists.
    pub async fn find(&self, user_id: &str, exercise_id: Uuid) -> Option<ExerciseAttempt> {
        let attempts = self.attempts.read().await;
        attempts
            .get(&(user_id.to_string(), exercise_id))
            .cloned()
    }

    // == Insert ==
    /// Persists an attempt, assigning it a fresh id.
    ///
    /// Fails with `DuplicateAttempt` if a record already exists for the
    /// (user, exercise) pair; the existing record is left untouched.
    pub async fn insert(&self, new: NewAttempt) -> Result<ExerciseAttempt> {
        let key = (new.user_id.clone(), new.exercise_id);

        let mut attempts = self.attempts.write().await;
        if attempts.contains_key(&key) {
            return Err(EngineError::DuplicateAttempt {
                user_id: new.user_id,
                exercise_id: new.exercise_id.to_string(),
            });
        }

        let attempt = ExerciseAttempt::from_new(Uuid::new_v4(), new);
        debug!(
            "Recorded attempt {} for exercise {} by user {}",
            attempt.id, attempt.exercise_id, attempt.user_id
        );
        attempts.insert(key, attempt.clone());
        Ok(attempt)
    }

    // == List For User ==
    /// All attempts by a user in one language, most recent first.
    pub async fn list_for_user(&self, user_id: &str, language: &str) -> Vec<ExerciseAttempt> {
        let attempts = self.attempts.read().await;
        let mut matching: Vec<ExerciseAttempt> = attempts
            .values()
            .filter(|a| a.user_id == user_id && a.language == language)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        matching
    }
}
