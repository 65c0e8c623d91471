//! FFI crate exposing the meal journal core to the Flutter shell.

pub mod api;
