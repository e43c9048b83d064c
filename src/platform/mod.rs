// NYHousing - platform/mod.rs
//
// Platform abstraction layer: config directories, config.toml, file access.

pub mod config;
pub mod fs;
