// NYHousing - app/mod.rs
//
// Application layer: state management and the dashboard rendering pass.
// Dependencies: core, platform.
// Must NOT depend on: ui.

pub mod dashboard;
pub mod state;
