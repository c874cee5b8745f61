//! Lexaglot Engine - practice cache and recommendation core
//!
//! Keeps a small per-(user, language) pool of pre-generated, not-yet-attempted
//! exercises so that handing a learner the next exercise never blocks on the
//! expensive exercise generator. A lowest-count token selector decides which
//! vocabulary unit the next generated exercise should drill, and a background
//! worker pool replenishes the pool after every recorded attempt.

pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod language;
pub mod models;
pub mod recommend;
pub mod store;
pub mod tasks;

pub use config::Config;
pub use engine::PracticeEngine;
pub use error::{EngineError, Result};
pub use generator::{ExerciseGenerator, StubGenerator};
pub use models::{
    Exercise, ExerciseAttempt, ExerciseKind, ExercisePayload, NewAttempt, NewExercise,
};
pub use store::Store;
pub use tasks::{spawn_replenish_workers, ReplenishJob, ReplenishQueue};
