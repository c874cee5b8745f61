//! Background Tasks Module
//!
//! Contains the detached work that runs outside any request's lifetime.
//!
//! # Tasks
//! - Replenishment: refills per-(user, language) cache pools after attempts
//!   are recorded, via a bounded job queue and a small worker pool

mod replenish;

pub use replenish::{spawn_replenish_workers, ReplenishJob, ReplenishQueue};
