// NYHousing - core/mod.rs
//
// Core business logic layer: data model, cleaning, statistics, queries,
// filtering, export.
// Must NOT depend on: ui, platform, app.

pub mod dataset;
pub mod export;
pub mod filter;
pub mod model;
pub mod query;
pub mod stats;
