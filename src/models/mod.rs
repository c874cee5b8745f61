//! Domain models for the practice engine
//!
//! Defines the exercise documents produced by the generator and the immutable
//! attempt records created when a learner completes an exercise.

pub mod attempt;
pub mod exercise;

// Re-export commonly used types
pub use attempt::{ExerciseAttempt, NewAttempt};
pub use exercise::{
    AudioTranscribeExercise, Exercise, ExerciseKind, ExercisePayload, FillBlankExercise,
    MatchingExercise, NewExercise, TranslateExercise,
};
