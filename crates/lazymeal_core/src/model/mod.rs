//! Domain model for journaled meal entries.
//!
//! # Responsibility
//! - Define the canonical validated record handled by repository and codec.
//!
//! # Invariants
//! - A constructed [`meal::Meal`] always satisfies its field invariants;
//!   there is no partially-valid state to defend against downstream.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod meal;
