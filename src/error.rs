//! Error types for the practice engine
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Engine Error Enum ==
/// Unified error type for the practice engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// No exercise exists with the given id
    #[error("Exercise not found: {0}")]
    NotFound(String),

    /// The given id is not syntactically valid
    #[error("Invalid exercise id: {0}")]
    InvalidId(String),

    /// The tokenbank for this (user, language) is empty; nothing to practice
    #[error("No tokens available for user {user_id} in language {language}")]
    NoTokensAvailable { user_id: String, language: String },

    /// An attempt for this (user, exercise) pair has already been recorded
    #[error("Attempt already recorded for exercise {exercise_id} by user {user_id}")]
    DuplicateAttempt { user_id: String, exercise_id: String },

    /// Transient failure in the backing store
    #[error("Storage error: {0}")]
    Storage(String),

    /// The exercise generator failed to produce an exercise
    #[error("Generator error: {0}")]
    Generator(String),
}

// == Result Type Alias ==
/// Convenience Result type for the practice engine.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::NoTokensAvailable {
            user_id: "james".to_string(),
            language: "spa".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No tokens available for user james in language spa"
        );

        let err = EngineError::DuplicateAttempt {
            user_id: "james".to_string(),
            exercise_id: "abc".to_string(),
        };
        assert!(err.to_string().contains("already recorded"));
    }
}
