//! Exercise Store
//!
//! Immutable exercise documents. Ids are assigned here, at persistence time;
//! a stored exercise is never modified, only deleted when its owning cache
//! entry is purged.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, Result};
use crate::models::{Exercise, NewExercise};

/// Collection of persisted exercise documents keyed by id.
#[derive(Debug, Clone, Default)]
pub struct ExerciseStore {
    docs: Arc<RwLock<HashMap<Uuid, Exercise>>>,
}

impl ExerciseStore {
    /// Creates an empty exercise store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Persists a generated exercise, assigning it a fresh id, and returns
    /// the stored document.
    pub async fn insert(&self, new: NewExercise) -> Exercise {
        let exercise = Exercise {
            id: Uuid::new_v4(),
            language: new.language,
            payload: new.payload,
        };
        debug!(
            "Persisting {} exercise {} ({})",
            exercise.kind().as_str(),
            exercise.id,
            exercise.language
        );

        let mut docs = self.docs.write().await;
        docs.insert(exercise.id, exercise.clone());
        exercise
    }

    // == Get ==
    /// Fetches an exercise by its id string.
    ///
    /// Malformed id syntax is an `InvalidId` error; a well-formed id with no
    /// matching document is `NotFound`.
    pub async fn get(&self, id: &str) -> Result<Exercise> {
        let parsed = Uuid::parse_str(id).map_err(|_| EngineError::InvalidId(id.to_string()))?;
        self.fetch(parsed)
            .await
            .ok_or_else(|| EngineError::NotFound(id.to_string()))
    }

    // == Fetch ==
    /// Fetches an exercise by parsed id, or `None` when absent.
    pub async fn fetch(&self, id: Uuid) -> Option<Exercise> {
        let docs = self.docs.read().await;
        docs.get(&id).cloned()
    }

    // == Delete Many ==
    /// Deletes the documents with the given ids; returns how many existed.
    pub async fn delete_many(&self, ids: &[Uuid]) -> usize {
        let mut docs = self.docs.write().await;
        let deleted = ids.iter().filter(|id| docs.remove(id).is_some()).count();
        debug!("Deleted {} of {} requested exercises", deleted, ids.len());
        deleted
    }

    // == Count ==
    /// Returns the number of stored exercise documents.
    pub async fn count(&self) -> usize {
        self.docs.read().await.len()
    }
}
