//! Repository layer over snapshot storage.
//!
//! # Responsibility
//! - Own the authoritative ordered meal collection and its mutation API.
//! - Isolate snapshot-store details from shell/FFI orchestration.
//!
//! # Invariants
//! - Every mutation persists the full list before returning; persist
//!   failures are reported in the receipt, never swallowed.
//! - Repository APIs return semantic errors (`IndexOutOfRange`) distinct
//!   from storage transport errors.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod meal_repo;
