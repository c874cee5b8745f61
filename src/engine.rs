//! Practice Engine
//!
//! Orchestrates the stores, the recommendation selector, and the exercise
//! generator: serving the next exercise, recording attempts, and keeping the
//! per-(user, language) cache pool at its target size.
//!
//! All coordination state lives in the store; the engine holds no per-request
//! mutable state and no lock is held across a generator call.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::generator::ExerciseGenerator;
use crate::models::{Exercise, ExerciseAttempt, NewAttempt, NewExercise};
use crate::recommend::select_next_token;
use crate::store::{EngineStats, Store};
use crate::tasks::{ReplenishJob, ReplenishQueue};

// == Practice Engine ==
/// The practice cache and recommendation engine.
pub struct PracticeEngine {
    store: Store,
    generator: Arc<dyn ExerciseGenerator>,
    target_size: usize,
    replenish_queue: Option<ReplenishQueue>,
    stats: Arc<RwLock<EngineStats>>,
}

impl PracticeEngine {
    /// Creates an engine over the given store and generator.
    ///
    /// Without a replenishment queue attached, attempt recording skips the
    /// background trigger; callers replenish explicitly.
    pub fn new(store: Store, generator: Arc<dyn ExerciseGenerator>, config: &Config) -> Self {
        Self {
            store,
            generator,
            target_size: config.cache_target_size,
            replenish_queue: None,
            stats: Arc::new(RwLock::new(EngineStats::new())),
        }
    }

    /// Attaches the bounded queue that attempt recording submits
    /// replenishment jobs to.
    pub fn with_replenish_queue(mut self, queue: ReplenishQueue) -> Self {
        self.replenish_queue = Some(queue);
        self
    }

    /// The configured per-(user, language) cache pool size.
    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// The store handle this engine operates on.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// A snapshot of the engine's activity counters.
    pub async fn stats(&self) -> EngineStats {
        self.stats.read().await.clone()
    }

    // == Next Exercise ==
    /// Returns the next exercise for a (user, language) pair.
    ///
    /// A cache hit returns the oldest unused pooled exercise without
    /// consuming it; consumption happens only through attempt recording. On a
    /// miss, one exercise is generated synchronously, cached, and returned as
    /// read back from the store, so the caller sees exactly what a later
    /// fetch-by-id would yield.
    ///
    /// Fails with `NoTokensAvailable` when the tokenbank is empty, even if
    /// the pool still holds entries.
    pub async fn next_exercise(&self, user_id: &str, language: &str) -> Result<Exercise> {
        let bank = self.store.tokenbanks().get(user_id, language).await;
        let token = select_next_token(&bank)
            .ok_or_else(|| EngineError::NoTokensAvailable {
                user_id: user_id.to_string(),
                language: language.to_string(),
            })?
            .to_string();

        if let Some(exercise) = self.store.cache().peek_oldest_unused(user_id, language).await {
            debug!(
                "Cache hit for user {} language {}: exercise {}",
                user_id, language, exercise.id
            );
            self.stats.write().await.record_cache_hit();
            return Ok(exercise);
        }

        info!(
            "Cache miss for user {} language {}; generating for token {}",
            user_id, language, token
        );
        let generated = self.generator.generate(language, Some(&token)).await?;
        let inserted = self.store.cache().insert(generated, user_id, language).await;
        let exercise = self.store.exercises().get(&inserted.id.to_string()).await?;
        self.stats.write().await.record_generated_on_demand();
        Ok(exercise)
    }

    // == Record Attempt ==
    /// Records a learner's attempt at an exercise.
    ///
    /// Rejects a second attempt for the same (user, exercise) pair with
    /// `DuplicateAttempt`, leaving the first record untouched. On success the
    /// matching unused cache entry is consumed (silently skipped when the
    /// exercise was never cache-sourced), the attempt is persisted, and a
    /// replenishment job is submitted to the background queue without ever
    /// blocking or failing this call.
    pub async fn record_attempt(&self, new: NewAttempt) -> Result<ExerciseAttempt> {
        if let Some(existing) = self.store.attempts().find(&new.user_id, new.exercise_id).await {
            return Err(EngineError::DuplicateAttempt {
                user_id: existing.user_id,
                exercise_id: existing.exercise_id.to_string(),
            });
        }

        let consumed = self
            .store
            .cache()
            .mark_used(new.exercise_id, &new.user_id, &new.language)
            .await;
        if !consumed {
            debug!(
                "Exercise {} was not an unused cache entry for user {}; nothing to consume",
                new.exercise_id, new.user_id
            );
        }

        let user_id = new.user_id.clone();
        let language = new.language.clone();
        let attempt = self.store.attempts().insert(new).await?;
        self.stats.write().await.record_attempt();

        match &self.replenish_queue {
            Some(queue) => {
                queue.submit(ReplenishJob { user_id, language });
            }
            None => debug!("No replenish queue attached; skipping background refill"),
        }

        Ok(attempt)
    }

    // == Replenish ==
    /// Tops the cache pool for a (user, language) pair up to `target_size`,
    /// returning how many exercises were inserted.
    ///
    /// The read-deficit-generate loop is deliberately not serialized per
    /// pair: concurrent invocations can both observe a stale count and
    /// jointly over-provision past the target. Accepted trade-off.
    ///
    /// Fails with `NoTokensAvailable` if the tokenbank is empty while the
    /// pool is below target; generation never runs without a token.
    pub async fn replenish(&self, user_id: &str, language: &str, target_size: usize) -> Result<usize> {
        let unused = self.store.cache().count_unused(user_id, language).await;
        if unused >= target_size {
            debug!(
                "Cache for user {} language {} already at {}/{}; nothing to do",
                user_id, language, unused, target_size
            );
            return Ok(0);
        }

        let deficit = target_size - unused;
        let mut inserted = 0;
        for _ in 0..deficit {
            let bank = self.store.tokenbanks().get(user_id, language).await;
            let token = select_next_token(&bank)
                .ok_or_else(|| EngineError::NoTokensAvailable {
                    user_id: user_id.to_string(),
                    language: language.to_string(),
                })?
                .to_string();

            let generated = self.generator.generate(language, Some(&token)).await?;
            self.store.cache().insert(generated, user_id, language).await;
            inserted += 1;
        }

        self.stats.write().await.record_replenished(inserted);
        info!(
            "Replenished {} exercises for user {} language {}",
            inserted, user_id, language
        );
        Ok(inserted)
    }

    // == Regenerate ==
    /// Discards the whole pool for a (user, language) pair and rebuilds it
    /// from scratch up to `target_size`. Returns the resulting unused count.
    pub async fn regenerate(&self, user_id: &str, language: &str, target_size: usize) -> Result<usize> {
        let cleared = self.store.cache().clear(user_id, language).await;
        info!(
            "Regenerating cache for user {} language {} (cleared {})",
            user_id, language, cleared
        );
        self.replenish(user_id, language, target_size).await?;
        Ok(self.store.cache().count_unused(user_id, language).await)
    }

    // == Ad-hoc Exercise Path ==
    /// Persists a single-use exercise outside the cache pool.
    ///
    /// Such exercises have no cache entry; attempting them records the
    /// attempt without consuming anything.
    pub async fn create_exercise(&self, new: NewExercise) -> Exercise {
        self.store.exercises().insert(new).await
    }

    /// Fetches any persisted exercise by id string.
    pub async fn exercise_by_id(&self, id: &str) -> Result<Exercise> {
        self.store.exercises().get(id).await
    }

    // == Attempt History ==
    /// All of a user's attempts in one language, most recent first.
    pub async fn attempt_history(&self, user_id: &str, language: &str) -> Vec<ExerciseAttempt> {
        self.store.attempts().list_for_user(user_id, language).await
    }
}
