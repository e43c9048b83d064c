// NYHousing - lib.rs
//
// Library entry point, exposing every layer for the binary and for
// integration tests.

pub mod app;
pub mod core;
pub mod platform;
pub mod ui;
pub mod util;
