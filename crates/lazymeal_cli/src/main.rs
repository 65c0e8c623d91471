//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `lazymeal_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe that validates core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("lazymeal_core ping={}", lazymeal_core::ping());
    println!("lazymeal_core version={}", lazymeal_core::core_version());
}
