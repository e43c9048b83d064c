// NYHousing - ui/panels/mod.rs
//
// Individual dashboard sections.

pub mod bedrooms;
pub mod boxplot;
pub mod heatmap;
pub mod insights;
pub mod listings;
pub mod locality;
pub mod map;
