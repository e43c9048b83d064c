// NYHousing - ui/panels/map.rs
//
// Point "map": a terminal has no tiles, so this lists the extent of the
// points and a preview of coordinates.

use crate::core::model::GeoPoint;
use crate::ui::format::format_count;
use crate::util::constants::MAP_PREVIEW_POINTS;
use std::io::{self, Write};

/// Bounding box of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Extent {
    pub fn of(points: &[GeoPoint]) -> Option<Self> {
        let first = points.first()?;
        let init = Self {
            min_lat: first.latitude,
            max_lat: first.latitude,
            min_lon: first.longitude,
            max_lon: first.longitude,
        };
        Some(points.iter().fold(init, |e, p| Self {
            min_lat: e.min_lat.min(p.latitude),
            max_lat: e.max_lat.max(p.latitude),
            min_lon: e.min_lon.min(p.longitude),
            max_lon: e.max_lon.max(p.longitude),
        }))
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            latitude: (self.min_lat + self.max_lat) / 2.0,
            longitude: (self.min_lon + self.max_lon) / 2.0,
        }
    }
}

pub fn render<W: Write>(out: &mut W, points: &[GeoPoint]) -> io::Result<()> {
    let Some(extent) = Extent::of(points) else {
        return writeln!(out, "  No listings with coordinates.");
    };

    let center = extent.center();
    writeln!(out, "  Points plotted: {}", format_count(points.len()))?;
    writeln!(
        out,
        "  Latitude  {:>10.5} .. {:<10.5}",
        extent.min_lat, extent.max_lat
    )?;
    writeln!(
        out,
        "  Longitude {:>10.5} .. {:<10.5}",
        extent.min_lon, extent.max_lon
    )?;
    writeln!(
        out,
        "  Center    {:.5}, {:.5}",
        center.latitude, center.longitude
    )?;

    for p in points.iter().take(MAP_PREVIEW_POINTS) {
        writeln!(out, "    ({:.5}, {:.5})", p.latitude, p.longitude)?;
    }
    if points.len() > MAP_PREVIEW_POINTS {
        writeln!(
            out,
            "    … {} more",
            format_count(points.len() - MAP_PREVIEW_POINTS)
        )?;
    }
    Ok(())
}
