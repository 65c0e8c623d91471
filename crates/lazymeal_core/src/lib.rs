//! Core domain logic for LazyMeal.
//! This crate is the single source of truth for business invariants.

pub mod codec;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use codec::{decode, encode, DecodeError, EncodeError, SNAPSHOT_VERSION};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::meal::{Meal, MealValidationError, MAX_RATING, MIN_RATING};
pub use repo::meal_repo::{
    sample_meals, InitReport, InitSource, MealRepository, MutationReceipt, PersistOutcome,
    RepoError, RepoResult,
};
pub use store::{FileMealStore, MealStore, StoreError, StoreResult, SNAPSHOT_FILE_NAME};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
