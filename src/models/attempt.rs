//! Attempt Models
//!
//! An attempt records a single learner interaction with one exercise. At most
//! one attempt exists per (user, exercise) pair, and attempts are never
//! modified or deleted after being recorded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// An attempt submitted for recording; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAttempt {
    pub user_id: String,
    pub exercise_id: Uuid,
    pub language: String,
    pub completed_at: DateTime<Utc>,
    /// How long the exercise took, in milliseconds
    pub time_spent_ms: u64,
    /// Raw response data from the client; format depends on the exercise kind
    pub user_response: Value,
}

/// A persisted attempt record. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseAttempt {
    pub id: Uuid,
    pub user_id: String,
    pub exercise_id: Uuid,
    pub language: String,
    pub completed_at: DateTime<Utc>,
    pub time_spent_ms: u64,
    pub user_response: Value,
}

impl ExerciseAttempt {
    /// Builds the persisted record from a submission and a freshly assigned id.
    pub fn from_new(id: Uuid, new: NewAttempt) -> Self {
        Self {
            id,
            user_id: new.user_id,
            exercise_id: new.exercise_id,
            language: new.language,
            completed_at: new.completed_at,
            time_spent_ms: new.time_spent_ms,
            user_response: new.user_response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attempt_from_new_preserves_fields() {
        let new = NewAttempt {
            user_id: "james".to_string(),
            exercise_id: Uuid::new_v4(),
            language: "cmn".to_string(),
            completed_at: Utc::now(),
            time_spent_ms: 4200,
            user_response: json!({"selected": ["我", "要", "去商店"]}),
        };

        let id = Uuid::new_v4();
        let attempt = ExerciseAttempt::from_new(id, new.clone());

        assert_eq!(attempt.id, id);
        assert_eq!(attempt.user_id, new.user_id);
        assert_eq!(attempt.exercise_id, new.exercise_id);
        assert_eq!(attempt.time_spent_ms, 4200);
        assert_eq!(attempt.user_response, new.user_response);
    }
}
